//! # rus1c-highlight
//!
//! Dumps the token stream of 1C:Enterprise sources as compact debug text,
//! JSON, or per-kind statistics.

use clap::{Parser, ValueEnum};
use rus1c_lexer::config::{LogLevel, RuntimeConfig};
use rus1c_lexer::logging::{self, codes, FacadeLogger, LoggingService};
use rus1c_lexer::utils::SourceMap;
use rus1c_lexer::{
    highlight_file, highlight_source, DebugEncoder, HighlightResult, Language, TokenKind,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

const STDIN_NAME: &str = "<stdin>";

#[derive(Parser)]
#[command(name = "rus1c-highlight")]
#[command(version)]
#[command(about = "Tokenize 1C:Enterprise module code and queries", long_about = None)]
struct Cli {
    /// Source files; `-` reads standard input
    #[arg(required = true)]
    files: Vec<String>,

    /// Scanner to use instead of picking one by file extension
    #[arg(short, long, value_parser = parse_language)]
    lang: Option<Language>,

    #[arg(short, long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// TOML preference file with [scanner] and [logging] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write log events to stderr as JSON lines
    #[arg(long)]
    structured_logs: bool,

    /// Minimum level of library log events (error, warn, info, debug)
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// kind(text) per token, strings as string<...>
    Debug,
    /// The token stream and metrics as JSON
    Json,
    /// Token counts per kind
    Stats,
}

fn parse_language(name: &str) -> Result<Language, String> {
    Language::for_name(name).ok_or_else(|| {
        let known: Vec<&str> = Language::ALL.iter().map(|lang| lang.name()).collect();
        format!("unknown language '{}' (expected one of: {})", name, known.join(", "))
    })
}

fn parse_log_level(level: &str) -> Result<LogLevel, String> {
    LogLevel::parse(level).ok_or_else(|| format!("unknown log level '{}'", level))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if cli.structured_logs {
        config.logging.use_structured_logging = true;
    }
    if let Some(level) = cli.log_level {
        config.logging.min_log_level = level;
    }

    init_logging(&config)?;

    let mut failed = 0;
    for (index, input) in cli.files.iter().enumerate() {
        let name = if input == "-" { STDIN_NAME } else { input.as_str() };
        let outcome = logging::with_file_context(PathBuf::from(name), index, || {
            highlight_input(input, cli.lang, &config)
        });

        match outcome {
            Ok(result) => {
                report_first_error_token(name, &result);
                print_result(name, &result, cli.format)?;
            }
            Err(err) => {
                eprintln!("error: {}: {}", name, err);
                failed += 1;
            }
        }
    }

    if cli.files.len() > 1 || failed > 0 {
        if let Some(summary) = logging::cargo_style_summary() {
            eprint!("{}", summary);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Console events go through the `log` facade and env_logger; structured
/// output uses the library's JSON logger directly
fn init_logging(config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let min_level = config.logging.min_log_level;
    logging::config::init_runtime_preferences(config.logging.clone())?;

    let direct = config.logging.use_structured_logging || !config.logging.enable_console_logging;
    if direct {
        logging::init_global_logging()?;
    } else {
        logging::config::validate_config()?;
        env_logger::Builder::new()
            .filter_module("rus1c_lexer", to_level_filter(min_level))
            .parse_default_env()
            .format_timestamp(None)
            .init();
        let service = LoggingService::new(Arc::new(FacadeLogger), min_level.to_events_log_level());
        logging::init_global_logging_with_service(Arc::new(service))?;
    }

    if min_level == LogLevel::Debug {
        eprint!("{}", logging::get_system_diagnostics());
    }
    Ok(())
}

fn to_level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warning => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
    }
}

fn highlight_input(
    input: &str,
    language: Option<Language>,
    config: &RuntimeConfig,
) -> Result<HighlightResult, Box<dyn std::error::Error>> {
    if input != "-" {
        return Ok(highlight_file(input, language, &config.scanner)?);
    }

    let Some(language) = language else {
        let message = "standard input needs --lang";
        logging::safe_log_error(codes::file_processing::UNKNOWN_LANGUAGE, message);
        return Err(message.into());
    };
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    let source = source.strip_prefix('\u{feff}').unwrap_or(&source);
    Ok(highlight_source(language, source, &config.scanner)?)
}

/// Caret report for the first unrecognized character, on stderr
fn report_first_error_token(name: &str, result: &HighlightResult) {
    let Some(first) = result.tokens.tokens().find(|t| t.value.kind == TokenKind::Error) else {
        return;
    };
    let source = result.tokens.text();
    let message = format!("{}: unrecognized character {:?}", name, first.value.text);
    eprint!("{}", SourceMap::new(&source).format_error(&first.span, &message));
}

fn print_result(
    name: &str,
    result: &HighlightResult,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        Format::Debug => println!("{}", DebugEncoder::render(&result.tokens)),
        Format::Json => println!("{}", result.to_json()?),
        Format::Stats => {
            println!("== {} ({}) ==", name, result.language);
            print!("{}", result.metrics_or_count().format_summary());
            println!("time: {:.2} ms", result.duration.as_secs_f64() * 1000.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "rus1c-highlight",
            "--lang",
            "RUS1C_SQL",
            "--format",
            "stats",
            "--log-level",
            "debug",
            "-",
        ])
        .unwrap();

        assert_eq!(cli.lang, Some(Language::Rus1cSql));
        assert_eq!(cli.format, Format::Stats);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.files, vec!["-".to_string()]);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["rus1c-highlight", "--lang", "vb", "a.1c"]).is_err());
        assert!(Cli::try_parse_from(["rus1c-highlight"]).is_err());
    }

    #[test]
    fn test_highlight_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.1c");
        std::fs::write(&path, "А = 1;").unwrap();

        let config = RuntimeConfig::default();
        let result = highlight_input(path.to_str().unwrap(), None, &config).unwrap();
        assert_eq!(
            DebugEncoder::render(&result.tokens),
            "ident(А) operator(=) integer(1)operator(;)"
        );
    }
}
