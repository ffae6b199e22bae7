use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use metacog_patterns::adapters::{JsonlRecordSink, JsonlTranscriptSource};
use metacog_patterns::application::{ScoreBatchCommand, ScoreBatchHandler};
use metacog_patterns::config::{AppConfig, LoggingConfig};
use metacog_patterns::domain::classification::RuleClassifier;
use metacog_patterns::domain::foundation::DomainError;
use metacog_patterns::domain::scoring::RubricScorer;
use metacog_patterns::ports::RecordSink;

/// Score chat transcripts on twelve metacognitive dimensions and classify
/// each user into a usage pattern A-F.
#[derive(Debug, Parser)]
#[command(name = "metacog-patterns")]
#[command(version)]
#[command(about = "Metacognitive dimension scoring and usage-pattern classification")]
struct Cli {
    /// Configuration file layered under METACOG_PATTERNS__* variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines transcript (overrides io.input)
    input: Option<PathBuf>,

    /// JSON-lines record output (overrides io.output; stdout when unset)
    output: Option<PathBuf>,
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => logging.env_filter()?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().try_init().map_err(|e| e as Box<dyn Error>)?;
    } else {
        builder.try_init().map_err(|e| e as Box<dyn Error>)?;
    }
    Ok(())
}

/// Wires the JSONL adapters, the compiled rubric and the rule classifier.
fn build_handler(config: &AppConfig) -> Result<ScoreBatchHandler, DomainError> {
    let rubric = config.scoring.rubric()?;
    let scorer = Arc::new(RubricScorer::compile(&rubric)?);
    let model = Arc::new(RuleClassifier::try_new(config.scoring.classifier_rules())?);
    debug!(rules = ?model.rules(), "Classifier configured");

    let sink: Arc<dyn RecordSink> = match &config.io.output {
        Some(path) => Arc::new(JsonlRecordSink::to_file(path)),
        None => Arc::new(JsonlRecordSink::to_stdout()),
    };
    Ok(ScoreBatchHandler::new(
        Arc::new(JsonlTranscriptSource::new(&config.io.input)),
        sink,
        scorer,
        model,
    ))
}

fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load_with_file(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.io.input = input;
    }
    if args.output.is_some() {
        config.io.output = args.output;
    }

    init_tracing(&config.logging)?;
    config.validate()?;

    let handler = build_handler(&config)?;
    let result = handler.handle(ScoreBatchCommand {
        granularity: config.scoring.granularity,
    })?;

    for (pattern, share) in &result.summary.distribution {
        info!(
            pattern = %pattern,
            name = pattern.name(),
            count = share.count,
            percentage = share.percentage,
            "Pattern distribution"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Scoring failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use metacog_patterns::domain::foundation::ErrorCode;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_input_and_output() {
        let cli = Cli::try_parse_from(["metacog-patterns", "in.jsonl", "out.jsonl"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.jsonl")));
        assert_eq!(cli.output, Some(PathBuf::from("out.jsonl")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_takes_a_value() {
        let cli =
            Cli::try_parse_from(["metacog-patterns", "--config", "metacog.yaml", "in.jsonl"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("metacog.yaml")));
        assert_eq!(cli.input, Some(PathBuf::from("in.jsonl")));

        let cli = Cli::try_parse_from(["metacog-patterns", "-c", "metacog.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("metacog.toml")));

        assert!(Cli::try_parse_from(["metacog-patterns", "--config"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags_and_extra_arguments() {
        assert!(Cli::try_parse_from(["metacog-patterns", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["metacog-patterns", "a", "b", "c"]).is_err());
    }

    #[test]
    fn no_arguments_defer_to_configuration() {
        let cli = Cli::try_parse_from(["metacog-patterns"]).unwrap();
        assert!(cli.input.is_none() && cli.output.is_none());
    }

    #[test]
    fn broken_rubric_file_is_reported_as_invalid_rubric() {
        let dir = tempfile::tempdir().unwrap();
        let rubric_path = dir.path().join("rubric.yaml");
        std::fs::write(&rubric_path, "dimensions: 7").unwrap();

        let mut config = AppConfig::default();
        config.scoring.rubric_path = Some(rubric_path);
        let err = match build_handler(&config) {
            Ok(_) => panic!("rubric should not load"),
            Err(err) => err,
        };
        assert_eq!(err.code, ErrorCode::InvalidRubric);
    }

    #[test]
    fn default_configuration_builds_a_handler() {
        assert!(build_handler(&AppConfig::default()).is_ok());
    }

    #[test]
    fn second_tracing_init_returns_an_error() {
        let logging = LoggingConfig::default();
        let _ = init_tracing(&logging);
        assert!(init_tracing(&logging).is_err());
    }

    #[test]
    fn version_flag_is_supported() {
        let err = Cli::try_parse_from(["metacog-patterns", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
