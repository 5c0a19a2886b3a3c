//! CLI presenter for output formatting

use chrono::{DateTime, Utc};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::transcript::{Message, MessageStatus};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Render one transcript message to stdout
    pub fn message(&self, message: &Message, now: DateTime<Utc>) {
        let when = format_relative(message.timestamp(), now);

        match message.status() {
            MessageStatus::Pushed => {
                println!("{} {}", "●".green(), message.text().bold());
                println!("  {}", format!("{} ({})", meta_line(message), when).dimmed());
            }
            MessageStatus::Retrieved => {
                println!("{} {}", "?".cyan(), message.text().bold());
                println!("  {}", format!("({})", when).dimmed());

                match message.results() {
                    Some(results) if !results.is_empty() => {
                        for entry in results {
                            let mut line = entry.text.clone();
                            // Defaulting of absent fields happens here, at
                            // render time only
                            if let Some(intent) = entry.intent.as_deref() {
                                line.push_str(&format!(" [{}]", intent));
                            }
                            for tag in entry.tags.as_deref().unwrap_or(&[]) {
                                line.push_str(&format!(" #{}", tag));
                            }
                            if let Some(timestamp) = entry.timestamp.as_deref() {
                                line.push_str(&format!(
                                    " ({})",
                                    format_relative(timestamp, now)
                                ));
                            }
                            println!("  {} {}", "↳".cyan(), line);
                        }
                    }
                    _ => println!("  {}", "No matching notes found".dimmed()),
                }
            }
        }
    }

    /// Render the full transcript to stdout
    pub fn transcript(&self, messages: &[Message], now: DateTime<Utc>) {
        if messages.is_empty() {
            self.info("Nothing captured yet. Record a note or ask a question.");
            return;
        }
        for message in messages {
            self.message(message, now);
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Intent and tag metadata for a pushed message, e.g. "[task] #errands"
fn meta_line(message: &Message) -> String {
    let mut parts = Vec::new();
    if !message.intent().is_empty() {
        parts.push(format!("[{}]", message.intent()));
    }
    for tag in message.tags() {
        parts.push(format!("#{}", tag));
    }
    parts.join(" ")
}

/// Format an ISO-8601 timestamp relative to `now`, e.g. "5m ago".
/// Falls back to the raw string if it does not parse.
pub fn format_relative(iso: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(iso) else {
        return iso.to_string();
    };
    let diff = now.signed_duration_since(then.with_timezone(&Utc));

    if diff.num_minutes() < 1 {
        "Just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{}d ago", diff.num_days())
    } else {
        then.format("%b %-d").to_string()
    }
}
