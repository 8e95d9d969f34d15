//! Annotated correlation heatmap.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tablescope_model::CorrelationMatrix;

use crate::canvas::{FONT, render_encoded};
use crate::error::{Result, render_error};
use crate::types::EncodedImage;

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
const MISSING: RGBColor = RGBColor(160, 160, 160);

fn lerp(a: (f64, f64, f64), b: (f64, f64, f64), t: f64) -> RGBColor {
    let mix = |x: f64, y: f64| (x + (y - x) * t).round().clamp(0.0, 255.0) as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Diverging blue-white-red color for a coefficient in `[-1, 1]`.
pub(crate) fn coefficient_color(r: Option<f64>) -> RGBColor {
    match r {
        None => MISSING,
        Some(r) if r < 0.0 => lerp(NEUTRAL, COOL, (-r).min(1.0)),
        Some(r) => lerp(NEUTRAL, WARM, r.min(1.0)),
    }
}

fn side_for(columns: usize) -> u32 {
    (160 + 80 * columns as u32).clamp(500, 1100)
}

fn label_for(names: &[String], value: &SegmentValue<i32>, flip: bool) -> String {
    let index = match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => return String::new(),
    };
    let Ok(index) = usize::try_from(index) else {
        return String::new();
    };
    let index = if flip {
        match names.len().checked_sub(index + 1) {
            Some(i) => i,
            None => return String::new(),
        }
    } else {
        index
    };
    names.get(index).cloned().unwrap_or_default()
}

/// Renders the matrix with each cell annotated to two decimals.
pub fn render_heatmap(matrix: &CorrelationMatrix) -> Result<EncodedImage> {
    let names = matrix.columns().to_vec();
    let k = names.len().max(1);
    let side = side_for(k);
    render_encoded(side, side, |area| {
        let n = k as i32;
        // Integer segments include both ends, so `0..n - 1` yields `n` cells.
        let last = (n - 1).max(1);
        let mut chart = ChartBuilder::on(area)
            .caption("Correlation heatmap", (FONT, 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d((0..last).into_segmented(), (0..last).into_segmented())
            .map_err(render_error)?;
        let x_label = |v: &SegmentValue<i32>| label_for(&names, v, false);
        let y_label = |v: &SegmentValue<i32>| label_for(&names, v, true);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k)
            .y_labels(k)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .draw()
            .map_err(render_error)?;

        // Row 0 is drawn at the top.
        let cells: Vec<(i32, i32, Option<f64>)> = (0..matrix.len())
            .flat_map(|i| (0..matrix.len()).map(move |j| (i, j)))
            .map(|(i, j)| (j as i32, n - 1 - i as i32, matrix.get(i, j)))
            .collect();
        chart
            .draw_series(cells.iter().map(|&(x, y, r)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    coefficient_color(r).filled(),
                )
            }))
            .map_err(render_error)?;

        let style = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(cells.iter().map(|&(x, y, r)| {
                let text = r.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
                Text::new(
                    text,
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    style.clone(),
                )
            }))
            .map_err(render_error)?;
        Ok(())
    })
}
