//! Output formatter for human-readable and JSON output
//!
//! Ensures consistent output formatting across all commands.

use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL_CONDENSED};
use comfy_table::{Cell, Color, Table};
use serde::Serialize;
use snaptool_core::{Outcome, PassReport};

use super::OutputConfig;

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on configuration.
/// When JSON mode is enabled, stdout carries nothing but the JSON document.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Output the result of a workflow pass
    pub fn report(&self, report: &PassReport) {
        if self.config.json {
            self.json(report);
            return;
        }

        if self.config.quiet {
            return;
        }

        if !report.items.is_empty() {
            println!("{}", self.render_table(report));
        }

        let verb = if report.dry_run { "Would act on" } else { "Acted on" };
        self.success(&format!(
            "{} {verb} {} snapshot(s) in {}; {} skipped, {} pending.",
            report.workflow,
            report.acted_count(),
            report.region,
            report.skipped_count(),
            report.pending_count()
        ));
    }

    /// Build the per-snapshot outcome table
    pub fn render_table(&self, report: &PassReport) -> Table {
        let mut table = Table::new();
        if self.colors_enabled() {
            table.load_preset(UTF8_FULL_CONDENSED);
        } else {
            table.load_preset(ASCII_MARKDOWN);
        }
        table.set_header(vec!["Snapshot", "Outcome", "Reason"]);

        for item in &report.items {
            let mut outcome = Cell::new(item.outcome.label());
            if self.colors_enabled() {
                outcome = outcome.fg(match item.outcome {
                    Outcome::Acted | Outcome::DryRun => Color::Green,
                    Outcome::Skipped(_) => Color::DarkGrey,
                    Outcome::Pending(_) => Color::Red,
                });
            }
            table.add_row(vec![
                Cell::new(&item.identifier),
                outcome,
                Cell::new(item.outcome.reason().unwrap_or("")),
            ]);
        }

        table
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            println!("\x1b[32m✓\x1b[0m {message}");
        } else {
            println!("✓ {message}");
        }
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else if self.colors_enabled() {
            eprintln!("\x1b[31m✗\x1b[0m {message}");
        } else {
            eprintln!("✗ {message}");
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            eprintln!("\x1b[33m⚠\x1b[0m {message}");
        } else {
            eprintln!("⚠ {message}");
        }
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaptool_core::{SnapshotRecord, Workflow};

    fn sample_report() -> PassReport {
        let mut report = PassReport::new(Workflow::Delete, "eu-west-1", false);
        report.record(
            &SnapshotRecord::new("db-prod-01-2024-01-01-00-00", "db-prod-01", "eu-west-1"),
            Outcome::Acted,
        );
        report.record(
            &SnapshotRecord::new("db-prod-01-final", "db-prod-01", "eu-west-1"),
            Outcome::Skipped("no valid timestamp".into()),
        );
        report
    }

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(!formatter.is_quiet());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_table_lists_every_item() {
        let formatter = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        let rendered = formatter.render_table(&sample_report()).to_string();

        assert!(rendered.contains("db-prod-01-2024-01-01-00-00"));
        assert!(rendered.contains("acted"));
        assert!(rendered.contains("no valid timestamp"));
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["workflow"], "delete");
        assert_eq!(json["items"][0]["outcome"], "acted");
        assert_eq!(json["items"][1]["reason"], "no valid timestamp");
    }
}
