//! `secgate report`: consolidated JSON, HTML and Markdown reports.

use std::fs;
use std::process::ExitCode;

use tracing::{info, warn};

use super::{FATAL_EXIT, HandlerResult, write_output};
use crate::aggregator::{ReportBuilder, SecurityReport};
use crate::artifacts::discover;
use crate::cli::ReportArgs;
use crate::reporter::{
    Reporter, html::HtmlReporter, json::JsonReporter, markdown::MarkdownReporter,
    terminal::TerminalReporter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
    Markdown,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "html" => Some(OutputFormat::Html),
            "markdown" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "security-report.json",
            OutputFormat::Html => "security-report.html",
            OutputFormat::Markdown => "security-summary.md",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON report",
            OutputFormat::Html => "HTML report",
            OutputFormat::Markdown => "Markdown summary",
        }
    }

    fn render(&self, report: &SecurityReport) -> String {
        match self {
            OutputFormat::Json => JsonReporter::new().report(report),
            OutputFormat::Html => HtmlReporter::new().report(report),
            OutputFormat::Markdown => MarkdownReporter::new().report(report),
        }
    }
}

/// Parse a comma separated format list. Entries are trimmed and
/// lowercased; unknown and repeated entries are skipped. Output order is
/// always JSON, HTML, Markdown.
pub fn parse_format_list(list: &str) -> Vec<OutputFormat> {
    let mut requested = Vec::new();
    for entry in list.split(',') {
        let name = entry.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        match OutputFormat::from_name(&name) {
            Some(format) => {
                if !requested.contains(&format) {
                    requested.push(format);
                }
            }
            None => warn!(format = %name, "Unknown report format, skipping"),
        }
    }

    [OutputFormat::Json, OutputFormat::Html, OutputFormat::Markdown]
        .into_iter()
        .filter(|format| requested.contains(format))
        .collect()
}

pub fn handle_report(args: &ReportArgs) -> ExitCode {
    run_report(args).into()
}

pub fn run_report(args: &ReportArgs) -> HandlerResult {
    let dirs = match discover(&args.input_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return HandlerResult::Error(FATAL_EXIT);
        }
    };

    let report = ReportBuilder::new().with_dirs(&dirs).build();

    if let Err(e) = fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "Error: Failed to create output directory {}: {}",
            args.output_dir.display(),
            e
        );
        return HandlerResult::Error(FATAL_EXIT);
    }

    for format in parse_format_list(&args.format) {
        let path = args.output_dir.join(format.file_name());
        if let Err(e) = write_output(&path, &format.render(&report)) {
            eprintln!("Error: {}", e);
            return HandlerResult::Error(FATAL_EXIT);
        }
        info!(path = %path.display(), format = ?format, "Report written");
        println!("Generated {}: {}", format.label(), path.display());
    }

    print!("{}", TerminalReporter::new(false).report(&report));
    HandlerResult::Success
}
