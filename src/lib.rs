pub mod aggregator;
pub mod artifacts;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod handlers;
pub mod logging;
pub mod policy;
pub mod reporter;
pub mod scoring;
pub mod severity;

#[cfg(test)]
pub mod test_utils;

pub use aggregator::{ReportBuilder, ReportSummary, SecurityReport};
pub use artifacts::{ArtifactDir, discover};
pub use cli::{Cli, Commands, EvaluateArgs, ReportArgs};
pub use error::{GateError, Result};
pub use evaluator::{Evaluation, Findings, GateStatus, PolicyEvaluator, Tally};
pub use policy::{Policy, PolicyError};
pub use reporter::{
    Reporter, html::HtmlReporter, json::JsonReporter, markdown::MarkdownReporter,
    terminal::TerminalReporter,
};
pub use scoring::{ScoreClass, security_score};
pub use severity::Severity;
