//! Styled terminal output utilities.

use owo_colors::OwoColorize;

/// Print a command header.
pub fn header(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
    println!();
}

/// Print a section header.
pub fn section(text: &str) {
    println!("{}", text.bold());
}

/// Print an indented key-value pair.
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", format!("{key}:").dimmed(), value);
}

/// Print a success message.
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text);
}

/// Print an info message.
pub fn info(text: &str) {
    println!("{} {}", "ℹ".blue(), text);
}

/// Print a warning message.
pub fn warn(text: &str) {
    println!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// Print an error message to stderr.
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print a numbered step indicator.
pub fn step(current: usize, total: usize, text: &str) {
    println!("{} {}", format!("[{current}/{total}]").dimmed(), text);
}

/// Print a list item.
pub fn list_item(text: &str) {
    println!("    - {}", text);
}

/// Print a newline.
pub fn newline() {
    println!();
}

/// Print dimmed text.
pub fn dim(text: &str) {
    println!("{}", text.dimmed());
}

/// Ask for a yes/no confirmation, defaulting to no.
pub fn confirm(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} {} ", prompt, "[y/N]".dimmed());
    io::stdout().flush().ok();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
