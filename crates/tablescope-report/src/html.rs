//! Small HTML building blocks shared by every view.

use anyhow::Result;
use polars::prelude::DataFrame;
use tablescope_common::any_to_string;
use tablescope_plot::{EncodedImage, StatsTable};

/// Bootstrap alert flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An alert banner; `message` is escaped.
pub fn alert(level: AlertLevel, message: &str) -> String {
    format!(
        "<div class='alert {}'>{}</div>",
        level.class(),
        escape_html(message)
    )
}

/// Error banner for anything displayable.
pub fn error_alert(err: &dyn std::fmt::Display) -> String {
    alert(AlertLevel::Danger, &err.to_string())
}

/// Inline PNG image.
pub fn image_tag(image: &EncodedImage, alt: &str) -> String {
    format!(
        "<img class='img-fluid' src='{}' alt='{}'>",
        image.data_uri(),
        escape_html(alt)
    )
}

/// Builds a `<table>` from a header row and body rows; every cell is
/// escaped.
pub fn table<H, R>(headers: H, rows: R) -> String
where
    H: IntoIterator,
    H::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsRef<str>,
{
    let mut out = String::from("<table class='table table-bordered table-striped'><thead><tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header.as_ref())));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(cell.as_ref())));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Renders every cell of `df`; nulls are shown as empty cells.
pub fn frame_table(df: &DataFrame) -> Result<String> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let cells = columns
            .iter()
            .map(|column| column.get(row).map(any_to_string))
            .collect::<polars::prelude::PolarsResult<Vec<String>>>()?;
        rows.push(cells);
    }
    Ok(table(df.get_column_names_str(), rows))
}

/// Renders a plot statistics table, or nothing when it has no rows.
pub fn stats_table(stats: &StatsTable) -> String {
    if stats.is_empty() {
        return String::new();
    }
    table(&stats.headers, &stats.rows)
}

/// Wraps a fragment into a standalone document.
pub fn page(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang='en'>\n<head>\n<meta charset='utf-8'>\n<title>{title}</title>\n\
         <link rel='stylesheet' href='https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css'>\n\
         </head>\n<body>\n<div class='container my-4'>\n<h1>{title}</h1>\n{body}\n</div>\n</body>\n</html>\n"
    )
}
