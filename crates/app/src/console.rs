//! Line-oriented console input.
//!
//! Every helper re-prompts on bad input and only fails on I/O errors or a
//! closed stdin, so callers can thread `?` through a whole dialogue.

use std::io::{self, Write};

use chrono::NaiveDate;

/// Raised when stdin reaches end of file.
#[derive(Debug, thiserror::Error)]
#[error("console input closed")]
pub struct InputClosed;

/// Print `prompt` and read one trimmed line.
pub fn read_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(InputClosed.into());
    }
    Ok(line.trim().to_string())
}

/// Re-prompt until the line is non-empty.
pub fn read_required(prompt: &str) -> anyhow::Result<String> {
    loop {
        let line = read_line(prompt)?;
        if !line.is_empty() {
            return Ok(line);
        }
        println!("A value is required.");
    }
}

/// Empty input means "no value".
pub fn read_optional(prompt: &str) -> anyhow::Result<Option<String>> {
    let line = read_line(prompt)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Empty input falls back to `default`.
pub fn read_string_or(prompt: &str, default: &str) -> anyhow::Result<String> {
    let line = read_line(prompt)?;
    Ok(if line.is_empty() {
        default.to_string()
    } else {
        line
    })
}

/// Re-prompt until the line parses as a whole number.
pub fn read_i64(prompt: &str) -> anyhow::Result<i64> {
    loop {
        match read_line(prompt)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Enter a whole number."),
        }
    }
}

/// Like [`read_i64`], with empty input falling back to `default`.
pub fn read_i64_or(prompt: &str, default: i64) -> anyhow::Result<i64> {
    loop {
        let line = read_line(prompt)?;
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Enter a whole number."),
        }
    }
}

/// Re-prompt until the line parses as a number; empty input falls back to
/// `default`.
pub fn read_f64_or(prompt: &str, default: f64) -> anyhow::Result<f64> {
    loop {
        let line = read_line(prompt)?;
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Enter a number."),
        }
    }
}

/// Re-prompt until the line parses as `YYYY-MM-DD`; empty input falls back
/// to `default`.
pub fn read_date_or(prompt: &str, default: NaiveDate) -> anyhow::Result<NaiveDate> {
    loop {
        let line = read_line(prompt)?;
        if line.is_empty() {
            return Ok(default);
        }
        match parse_date(&line) {
            Some(date) => return Ok(date),
            None => println!("Enter a date as YYYY-MM-DD."),
        }
    }
}

/// Yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Ok(is_yes(&read_line(prompt)?))
}

pub(crate) fn parse_date(input: &str) -> Option<NaiveDate> {
    input.parse().ok()
}

pub(crate) fn is_yes(input: &str) -> bool {
    matches!(input, "y" | "Y" | "yes" | "Yes")
}
