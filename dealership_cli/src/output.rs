use std::io::Write;

use anyhow::Result;
use dealership_lib::notify::{Level, Notification, Notifier};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

/// Rendered rows plus their column titles.
pub struct Rows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Rows {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

// -- Table output --

fn build_table(rows: &Rows) -> Table {
    let mut builder = Builder::default();
    builder.push_record(rows.headers.iter().cloned());
    for row in &rows.rows {
        builder.push_record(row.iter().cloned());
    }
    builder.build()
}

pub fn render_table(rows: &Rows) -> String {
    build_table(rows).to_string()
}

pub fn render_markdown(rows: &Rows) -> String {
    let mut table = build_table(rows);
    table.with(Style::markdown());
    table.to_string()
}

// -- CSV output --

pub fn write_csv<W: Write>(writer: W, rows: &Rows) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&rows.headers)?;
    for row in &rows.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Prints `rows` in the chosen format; JSON prints `records` instead.
pub fn print<T: Serialize + ?Sized>(format: OutputFormat, rows: &Rows, records: &T) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(rows)),
        OutputFormat::Markdown => println!("{}", render_markdown(rows)),
        OutputFormat::Csv => write_csv(std::io::stdout(), rows)?,
        OutputFormat::Json => print_json(records),
    }
    Ok(())
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB * KB {
        format!("{:.1} GB", b / (KB * KB * KB))
    } else if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Writes notifications to stderr so stdout stays machine readable.
pub struct ConsoleNotifier;

pub fn notification_line(notification: &Notification) -> String {
    let tag = match notification.level {
        Level::Success => "ok",
        Level::Info => "info",
        Level::Error => "error",
    };
    format!("[{}] {}", tag, notification.message)
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", notification_line(&notification));
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
