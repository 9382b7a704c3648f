//! Display utilities for the CLI

use autopay_state::{Notice, Notifier};
use autopay_types::PaymentStatus;
use colored::*;

const RULE_WIDTH: usize = 56;
const LABEL_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Done,
    Failed,
    Note,
    Caution,
}

impl Tone {
    fn glyph(self) -> ColoredString {
        match self {
            Tone::Done => "✓".bright_green(),
            Tone::Failed => "✗".bright_red(),
            Tone::Note => "→".bright_blue(),
            Tone::Caution => "!".yellow().bold(),
        }
    }
}

fn line(tone: Tone, message: &str) {
    match tone {
        // failures go to stderr so `--json` output stays parseable
        Tone::Failed => eprintln!("  {} {}", tone.glyph(), message.bright_red()),
        Tone::Caution => println!("  {} {}", tone.glyph(), message.yellow()),
        Tone::Done | Tone::Note => println!("  {} {}", tone.glyph(), message),
    }
}

fn pad_label(label: &str) -> String {
    format!("{:<width$}", format!("{label}:"), width = LABEL_WIDTH)
}

/// Section header between two rules
pub fn section(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!();
    println!("{}", rule.bright_black());
    println!(" {}", title.to_uppercase().bright_white().bold());
    println!("{}", rule.bright_black());
}

pub fn success(message: &str) {
    line(Tone::Done, message);
}

pub fn error(message: &str) {
    line(Tone::Failed, message);
}

pub fn info(message: &str) {
    line(Tone::Note, message);
}

pub fn warning(message: &str) {
    line(Tone::Caution, message);
}

/// Indented detail line under an item
pub fn kv(key: &str, value: &str) {
    println!("      {} {}", pad_label(key).bright_black(), value.bright_cyan());
}

/// Aligned top-level field
pub fn labeled(label: &str, value: &str) {
    println!("  {} {}", pad_label(label).bright_white(), value.bright_cyan());
}

/// Payment status in its console colour
pub fn status(status: PaymentStatus) -> ColoredString {
    match status {
        PaymentStatus::Completed => status.as_str().bright_green(),
        PaymentStatus::Pending => status.as_str().yellow(),
        PaymentStatus::Failed => status.as_str().bright_red(),
    }
}

/// Prints successful outcomes as they are announced
///
/// Failures travel back to `main` as errors and are printed there.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: &Notice) {
        if !notice.is_error() {
            success(&format!("{}: {}", notice.title, notice.description));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_align_to_column() {
        assert_eq!(pad_label("Units"), "Units:          ");
        assert_eq!(pad_label("Units").len(), LABEL_WIDTH);
        // long labels are never truncated
        assert_eq!(pad_label("Default spending limit"), "Default spending limit:");
    }

    #[test]
    fn test_status_keeps_canonical_text() {
        colored::control::set_override(false);
        assert_eq!(status(PaymentStatus::Completed).to_string(), "Completed");
        assert_eq!(status(PaymentStatus::Failed).to_string(), "Failed");
    }
}
