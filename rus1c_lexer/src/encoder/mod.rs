//! Consumers of scanner output
//!
//! A scanner never builds its result itself: it drives an [`Encoder`] with
//! leaf tokens and group markers. The encoders here cover collecting
//! ([`TokenStream`](crate::tokens::TokenStream)), compact text rendering, and
//! counting.

pub mod debug;
pub mod metrics;

use crate::tokens::{GroupKind, SpannedToken};

pub use debug::DebugEncoder;
pub use metrics::ScanMetrics;

/// Receiver of scanner output
pub trait Encoder {
    /// A leaf token with its exact source text
    fn text_token(&mut self, token: SpannedToken);

    /// Start of a composite construct; leaf tokens follow until `end_group`
    fn begin_group(&mut self, kind: GroupKind);

    fn end_group(&mut self, kind: GroupKind);
}

/// Forwards every call to two encoders, e.g. collecting and counting at once
pub struct Tee<'a, A: Encoder + ?Sized, B: Encoder + ?Sized> {
    pub first: &'a mut A,
    pub second: &'a mut B,
}

impl<'a, A: Encoder + ?Sized, B: Encoder + ?Sized> Tee<'a, A, B> {
    pub fn new(first: &'a mut A, second: &'a mut B) -> Self {
        Self { first, second }
    }
}

impl<A: Encoder + ?Sized, B: Encoder + ?Sized> Encoder for Tee<'_, A, B> {
    fn text_token(&mut self, token: SpannedToken) {
        self.first.text_token(token.clone());
        self.second.text_token(token);
    }

    fn begin_group(&mut self, kind: GroupKind) {
        self.first.begin_group(kind);
        self.second.begin_group(kind);
    }

    fn end_group(&mut self, kind: GroupKind) {
        self.first.end_group(kind);
        self.second.end_group(kind);
    }
}
