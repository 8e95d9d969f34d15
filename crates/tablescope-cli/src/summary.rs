//! Terminal rendering of command outcomes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;
use tablescope_common::any_to_string;
use tablescope_model::{ColumnPair, CorrelationClassification, Prediction};

use crate::commands::{CorrelateOutcome, DescribeOutcome, PlotOutcome, PredictOutcome, PreviewOutcome};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_numeric_columns(table: &mut Table, from: usize) {
    for index in from..table.column_count() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn frame_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(df.get_column_names_str().into_iter().map(header_cell).collect::<Vec<_>>());
    for row in 0..df.height() {
        table.add_row(
            df.get_columns()
                .iter()
                .map(|column| column.get(row).map(any_to_string).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Shape and column types.
pub fn table_overview(df: &DataFrame) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("#"), header_cell("Column"), header_cell("Type")]);
    for (index, column) in df.get_columns().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(column.name().as_str()),
            dim_cell(column.dtype()),
        ]);
    }
    format!("Rows: {}, Columns: {}\n{table}", df.height(), df.width())
}

pub fn preview_summary(outcome: &PreviewOutcome) -> String {
    let sample = &outcome.sample;
    let mut out = String::new();
    for notice in &sample.notices {
        out.push_str(&format!("warning: {notice}\n"));
    }
    out.push_str(&format!(
        "Displayed rows ({}, {} records)\n{}",
        sample.mode,
        sample.shown,
        frame_table(&sample.frame)
    ));
    out
}

fn pair_lines(out: &mut String, heading: &str, pairs: &[ColumnPair]) {
    if pairs.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for pair in pairs {
        out.push_str(&format!("  {} and {}: r = {:.2}\n", pair.first, pair.second, pair.r));
    }
}

/// Plain-text conclusions, mirroring the HTML block.
pub fn conclusions_text(classification: &CorrelationClassification) -> String {
    if classification.is_empty() {
        return "No significant correlations found.\n".to_string();
    }
    let mut out = String::new();
    pair_lines(&mut out, "Strong positive correlation:", &classification.strong_positive);
    pair_lines(&mut out, "Strong negative correlation:", &classification.strong_negative);
    let weak_heading = if classification.weak_total > classification.weak.len() {
        format!(
            "Weak or no correlation (first {} of {}):",
            classification.weak.len(),
            classification.weak_total
        )
    } else {
        "Weak or no correlation:".to_string()
    };
    pair_lines(&mut out, &weak_heading, &classification.weak);
    out.push_str("Pairs with moderate correlation are not listed.\n");
    out
}

pub fn correlation_summary(outcome: &CorrelateOutcome) -> String {
    let matrix = &outcome.report.matrix;
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(
        std::iter::once(header_cell(""))
            .chain(matrix.columns().iter().map(|name| header_cell(name)))
            .collect::<Vec<_>>(),
    );
    for (name, row) in matrix.columns().iter().zip(matrix.rows()) {
        let mut cells = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|r| match r {
            Some(r) => Cell::new(format!("{r:.4}")),
            None => dim_cell("NaN"),
        }));
        table.add_row(cells);
    }
    align_numeric_columns(&mut table, 1);
    let mut out = format!("{table}\n{}", conclusions_text(&outcome.report.classification));
    if let Some(path) = &outcome.saved {
        out.push_str(&format!("Report saved: {}\n", path.display()));
    }
    out
}

fn optional(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(format!("{v:.4}")),
        None => dim_cell("n/a"),
    }
}

pub fn distribution_summary(outcome: &DescribeOutcome) -> String {
    let columns = &outcome.report.columns;
    if columns.is_empty() {
        return "No numeric columns to analyze\n".to_string();
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(
        [
            "Column", "Count", "Mean", "Median", "Std", "Skewness", "Kurtosis", "Normal",
            "p-value", "Outliers",
        ]
        .into_iter()
        .map(header_cell)
        .collect::<Vec<_>>(),
    );
    for stats in columns {
        let normal = if stats.is_normal {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&stats.column).add_attribute(Attribute::Bold),
            Cell::new(stats.count),
            Cell::new(format!("{:.4}", stats.mean)),
            Cell::new(format!("{:.4}", stats.median)),
            Cell::new(format!("{:.4}", stats.std)),
            optional(stats.skewness),
            optional(stats.kurtosis),
            normal,
            optional(stats.normality_p_value),
            Cell::new(format!("{} ({:.2}%)", stats.outliers, stats.outlier_percent)),
        ]);
    }
    align_numeric_columns(&mut table, 1);
    let mut out = format!("{table}\n");
    if let Some(path) = &outcome.saved {
        out.push_str(&format!("Report saved: {}\n", path.display()));
    }
    out
}

pub fn plot_summary(outcome: &PlotOutcome) -> String {
    let mut out = String::new();
    for plot in &outcome.plots {
        if !plot.stats.is_empty() {
            let mut table = Table::new();
            apply_table_style(&mut table);
            table.set_header(plot.stats.headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
            for row in &plot.stats.rows {
                table.add_row(row.clone());
            }
            align_numeric_columns(&mut table, 1);
            out.push_str(&format!("{}\n{table}\n", plot.label));
        }
    }
    for page in &outcome.pages {
        out.push_str(&format!("Plot saved: {}\n", page.display()));
    }
    out
}

pub fn prediction_summary(prediction: &Prediction) -> String {
    format!(
        "{}Training R²: {:.4} ({} rows)\n",
        prediction.summary_text(),
        prediction.r_squared,
        prediction.rows_used
    )
}

pub fn predict_summary(outcome: &PredictOutcome) -> String {
    let mut out = prediction_summary(&outcome.prediction);
    if let Some(saved) = &outcome.saved {
        out.push_str(&format!(
            "Saved: {} and {}\n",
            saved.data.display(),
            saved.text.display()
        ));
    }
    out
}
