use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_REPORT_FORMATS: &str = "html,json,markdown";

#[derive(Parser, Debug)]
#[command(
    name = "secgate",
    version,
    about = "Security gate for CI: aggregate scanner artifacts and apply policy",
    long_about = "secgate reads the JSON artifacts of dependency, secret and license scanners, \
                  evaluates them against a security policy to decide PASS/WARN/FAIL, \
                  and renders consolidated JSON, HTML and Markdown reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (info level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug output (debug level logs)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate scan artifacts against a policy and decide the CI gate
    Evaluate(EvaluateArgs),

    /// Generate consolidated security reports from scan artifacts
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Directory containing one subdirectory per scan artifact
    #[arg(long)]
    pub reports_dir: PathBuf,

    /// Security policy (YAML, JSON or TOML); the built-in policy is used if unreadable
    #[arg(long)]
    pub policy_file: PathBuf,

    /// Path of the evaluation JSON to write
    #[arg(long)]
    pub output: PathBuf,

    /// Strict mode: a WARN gate also fails the run
    #[arg(short, long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory containing one subdirectory per scan artifact
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory to write the reports into (created if absent)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Output formats, comma separated (json, html, markdown)
    #[arg(long, default_value = DEFAULT_REPORT_FORMATS)]
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "secgate",
            "evaluate",
            "--reports-dir",
            "./artifacts",
            "--policy-file",
            ".github/security-policy.yml",
            "--output",
            "evaluation.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.reports_dir, PathBuf::from("./artifacts"));
                assert_eq!(args.output, PathBuf::from("evaluation.json"));
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.verbose);
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_evaluate_strict() {
        let cli = Cli::try_parse_from([
            "secgate",
            "evaluate",
            "--reports-dir",
            "a",
            "--policy-file",
            "p.yml",
            "--output",
            "o.json",
            "--strict",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Evaluate(EvaluateArgs { strict: true, .. })));
    }

    #[test]
    fn test_evaluate_requires_all_paths() {
        let result = Cli::try_parse_from(["secgate", "evaluate", "--reports-dir", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_report_default_formats() {
        let cli = Cli::try_parse_from([
            "secgate",
            "report",
            "--input-dir",
            "artifacts",
            "--output-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Report(args) => assert_eq!(args.format, DEFAULT_REPORT_FORMATS),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "secgate",
            "report",
            "--input-dir",
            "artifacts",
            "--output-dir",
            "out",
            "--format",
            "json",
            "-v",
            "--debug",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.debug);
    }
}
