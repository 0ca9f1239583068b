//! Report renderers.
//!
//! - [`render_text`]: one problem per line, the CI gate format
//! - [`render_human_summary`]: Markdown grouped by entity kind, for review
//! - [`render_json`]: the serialized report, for tooling

use crate::diff::model::{Problem, Report};
use crate::errors::{ExError, ExErrorKind};

/// Section headings in display order.
const SECTIONS: &[&str] = &["Files", "Enums", "Services", "Messages"];

fn section_of(problem: &Problem) -> &'static str {
    match problem {
        Problem::RemovedFile { .. } | Problem::ChangedPackage { .. } => "Files",
        Problem::RemovedEnum { .. }
        | Problem::RemovedEnumValue { .. }
        | Problem::ChangeEnumValue { .. } => "Enums",
        Problem::RemovedService { .. }
        | Problem::RemovedServiceMethod { .. }
        | Problem::ChangedService { .. }
        | Problem::ChangedServiceStreaming { .. } => "Services",
        Problem::RemovedMessage { .. }
        | Problem::RemovedField { .. }
        | Problem::ChangedFieldType { .. }
        | Problem::ChangedFieldLabel { .. } => "Messages",
    }
}

/// Render each problem's one-line description, newline terminated.
///
/// An empty report renders as the empty string.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for problem in report {
        out.push_str(&problem.to_string());
        out.push('\n');
    }
    out
}

/// Render a human-readable Markdown summary of a [`Report`].
///
/// Problems keep their emission order within each section.
pub fn render_human_summary(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("## Schema Compatibility\n\n");

    let verdict = if report.is_empty() {
        "Compatible"
    } else {
        "Breaking"
    };
    out.push_str(&format!(
        "**Verdict**: {verdict}  \n**Problems**: {}\n\n",
        report.len()
    ));

    if report.is_empty() {
        out.push_str("_No breaking changes detected._\n");
        return out;
    }

    for section in SECTIONS {
        let entries: Vec<&Problem> = report
            .iter()
            .filter(|p| section_of(p) == *section)
            .collect();
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("### {section}\n\n"));
        for problem in entries {
            out.push_str(&format!("- {}\n", problem));
        }
        out.push('\n');
    }

    out
}

/// Render the report as pretty-printed JSON.
///
/// # Errors
///
/// - `Serialization` - the report could not be encoded
pub fn render_json(report: &Report) -> Result<String, ExError> {
    serde_json::to_string_pretty(report).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("render_json")
            .with_message(format!("failed to serialize report: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::from(vec![
            Problem::RemovedField {
                field: "name".to_string(),
            },
            Problem::ChangedPackage {
                old: "foo".to_string(),
                new: "bar".to_string(),
            },
            Problem::RemovedServiceMethod {
                name: "Bar".to_string(),
            },
        ])
    }

    #[test]
    fn test_text_is_one_line_per_problem() {
        assert_eq!(
            render_text(&sample()),
            "removed field name\nchanged package from foo to bar\nremoved service method Bar\n"
        );
    }

    #[test]
    fn test_text_empty_report() {
        assert_eq!(render_text(&Report::new()), "");
    }

    #[test]
    fn test_summary_compatible() {
        let s = render_human_summary(&Report::new());
        assert!(s.contains("**Verdict**: Compatible"));
        assert!(s.contains("_No breaking changes detected._"));
    }

    #[test]
    fn test_summary_groups_by_section_in_display_order() {
        let s = render_human_summary(&sample());
        assert!(s.contains("**Verdict**: Breaking"));
        assert!(s.contains("**Problems**: 3"));

        let files = s.find("### Files").unwrap();
        let services = s.find("### Services").unwrap();
        let messages = s.find("### Messages").unwrap();
        assert!(files < services && services < messages);
        assert!(!s.contains("### Enums"));
        assert!(s.contains("- removed field name\n"));
    }

    #[test]
    fn test_json_round_trips() {
        let report = sample();
        let json = render_json(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
