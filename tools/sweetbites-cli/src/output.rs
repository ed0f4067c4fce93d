//! Output formatting for the CLI.

use anyhow::{Context, Result};
use console::style;
use sweetbites_cart::{LineItem, Price};

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", render_json(value)?);
        Ok(())
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// One cart line as shown to the user, with a 1-based position.
pub fn format_line(position: usize, item: &LineItem) -> String {
    format!(
        "{:>2}. {} ×{}  {}",
        position,
        item.name(),
        item.quantity(),
        item.line_total()
    )
}

/// The cart total line.
pub fn format_total(total: Price) -> String {
    format!("Total: {}", total)
}

/// The cart count badge.
pub fn format_badge(count: u64) -> String {
    match count {
        1 => "1 item in cart".to_string(),
        n => format!("{} items in cart", n),
    }
}

/// Pretty-print a value for `--json` output.
pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(Price::ZERO), "Total: R0");
        assert_eq!(format_total(Price::new(135)), "Total: R135");
    }

    #[test]
    fn test_format_badge() {
        assert_eq!(format_badge(1), "1 item in cart");
        assert_eq!(format_badge(7), "7 items in cart");
    }

    #[test]
    fn test_render_json_reports_errors() {
        use std::collections::BTreeMap;

        let rendered = render_json(&serde_json::json!({ "count": 2 })).unwrap();
        assert!(rendered.contains("\"count\": 2"));

        // JSON object keys must be strings.
        let bad = BTreeMap::from([(vec![1u8], 1u8)]);
        let err = render_json(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to serialize JSON output"));
    }
}
