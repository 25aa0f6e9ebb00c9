//! `secgate evaluate`: policy gate over an artifact tree.

use std::process::ExitCode;

use tracing::info;

use super::{FATAL_EXIT, HandlerResult, write_json};
use crate::artifacts::discover;
use crate::cli::EvaluateArgs;
use crate::evaluator::{PolicyEvaluator, Tally};
use crate::policy::Policy;
use crate::reporter::terminal::TerminalReporter;

pub fn handle_evaluate(args: &EvaluateArgs) -> ExitCode {
    run_evaluate(args).into()
}

pub fn run_evaluate(args: &EvaluateArgs) -> HandlerResult {
    let dirs = match discover(&args.reports_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return HandlerResult::Error(FATAL_EXIT);
        }
    };

    let policy = Policy::load_or_built_in(&args.policy_file);
    let tally = Tally::collect(&dirs, &policy.licenses);
    let evaluation = PolicyEvaluator::new(&policy).evaluate(tally);

    if let Err(e) = write_json(&args.output, &evaluation) {
        eprintln!("Error: {}", e);
        return HandlerResult::Error(FATAL_EXIT);
    }
    info!(path = %args.output.display(), "Evaluation written");

    print!(
        "{}",
        TerminalReporter::new(args.strict).format_evaluation(&evaluation)
    );
    println!(
        "Security policy evaluation results saved to: {}",
        args.output.display()
    );

    match evaluation.gate_status.exit_code(args.strict) {
        0 => HandlerResult::Success,
        code => HandlerResult::Error(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{LICENSES_FILE, NPM_AUDIT_FILE, SECRETS_AUDIT_FILE};
    use crate::test_utils::fixtures::{LICENSES_JSON, SECRETS_AUDIT_JSON, write_artifact};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(root: &TempDir, strict: bool) -> EvaluateArgs {
        EvaluateArgs {
            reports_dir: root.path().join("artifacts"),
            policy_file: root.path().join("security-policy.yml"),
            output: root.path().join("evaluation.json"),
            strict,
        }
    }

    fn read_output(args: &EvaluateArgs) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(&args.output).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_reports_dir_passes() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("artifacts")).unwrap();
        let args = args(&root, false);

        assert_eq!(run_evaluate(&args), HandlerResult::Success);
        let json = read_output(&args);
        assert_eq!(json["gate_status"], "PASS");
        assert_eq!(json["policy_version"], "1.0");
    }

    #[test]
    fn test_critical_finding_fails() {
        let root = TempDir::new().unwrap();
        write_artifact(
            &root,
            "artifacts/npm",
            NPM_AUDIT_FILE,
            r#"{"metadata": {"vulnerabilities": {"critical": 1}}}"#,
        );
        let args = args(&root, false);

        assert_eq!(run_evaluate(&args), HandlerResult::Error(1));
        assert_eq!(read_output(&args)["gate_status"], "FAIL");
    }

    #[test]
    fn test_secrets_fail() {
        let root = TempDir::new().unwrap();
        write_artifact(&root, "artifacts/secrets", SECRETS_AUDIT_FILE, SECRETS_AUDIT_JSON);
        let args = args(&root, false);

        assert_eq!(run_evaluate(&args), HandlerResult::Error(1));
        assert_eq!(read_output(&args)["findings"]["secrets_count"], 2);
    }

    #[test]
    fn test_warn_only_fails_in_strict_mode() {
        let root = TempDir::new().unwrap();
        write_artifact(&root, "artifacts/licenses", LICENSES_FILE, LICENSES_JSON);

        let lenient = args(&root, false);
        assert_eq!(run_evaluate(&lenient), HandlerResult::Success);
        assert_eq!(read_output(&lenient)["gate_status"], "WARN");

        let strict = args(&root, true);
        assert_eq!(run_evaluate(&strict), HandlerResult::Error(1));
    }

    #[test]
    fn test_policy_file_is_applied() {
        let root = TempDir::new().unwrap();
        write_artifact(
            &root,
            "artifacts/npm",
            NPM_AUDIT_FILE,
            r#"{"metadata": {"vulnerabilities": {"high": 3}}}"#,
        );
        fs::write(
            root.path().join("security-policy.yml"),
            "version: \"2.1\"\nthresholds:\n  high:\n    max_allowed: 2\n    action: fail\n",
        )
        .unwrap();
        let args = args(&root, false);

        assert_eq!(run_evaluate(&args), HandlerResult::Error(1));
        let json = read_output(&args);
        assert_eq!(json["policy_version"], "2.1");
        assert_eq!(
            json["policy_violations"][0]["message"],
            "High vulnerability threshold exceeded: 3 > 2"
        );
    }

    #[test]
    fn test_missing_reports_dir_is_fatal() {
        let root = TempDir::new().unwrap();
        let args = args(&root, false);
        assert_eq!(run_evaluate(&args), HandlerResult::Error(2));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("artifacts")).unwrap();
        let mut args = args(&root, false);
        args.output = PathBuf::from("/nonexistent/dir/evaluation.json");
        assert_eq!(run_evaluate(&args), HandlerResult::Error(2));
    }
}
