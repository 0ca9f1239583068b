//! Subcommand implementations

use clap::ValueEnum;
use serde::Deserialize;

use protodiff_core::diff::{render_human_summary, render_json, render_text};
use protodiff_core::errors::ExError;
use protodiff_core::Report;

pub mod compare;
pub mod diff;
pub mod echo;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One problem per line
    #[default]
    Text,
    /// Markdown summary grouped by entity kind
    Markdown,
    /// The report as JSON
    Json,
}

/// Render `report` in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String, ExError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Markdown => Ok(render_human_summary(report)),
        OutputFormat::Json => render_json(report).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}
