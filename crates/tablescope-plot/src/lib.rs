//! Off-screen PNG rendering for tables.
//!
//! [`render`] draws one of the [`PlotKind`]s for every numeric column of a
//! table and returns the images base64-encoded, together with a small
//! statistics table per image. [`render_distribution`] and
//! [`render_heatmap`] back the distribution and correlation reports.
//!
//! Nothing here touches the filesystem.

mod boxplot;
mod canvas;
pub mod error;
mod heatmap;
mod hist;
mod scatter;
pub mod types;

use polars::prelude::DataFrame;
use tablescope_common::numeric_columns;
use tracing::{debug, info_span};

pub use error::{PlotError, Result};
pub use heatmap::render_heatmap;
pub use hist::render_distribution;
pub use types::{EncodedImage, PlotKind, RenderedPlot, StatsTable};

/// Renders `kind` for the numeric columns of `df`.
///
/// Histograms yield one entry per numeric column; box plots and scatter
/// matrices yield a single combined entry.
pub fn render(df: &DataFrame, kind: PlotKind) -> Result<Vec<RenderedPlot>> {
    let span = info_span!("render", kind = %kind, columns = df.width());
    let _guard = span.enter();

    let columns = numeric_columns(df)?;
    if columns.is_empty() && kind != PlotKind::Scatter {
        return Err(PlotError::NoNumericColumns);
    }
    let plots = match kind {
        PlotKind::Hist => hist::render_histograms(&columns)?,
        PlotKind::Box => vec![boxplot::render_box(&columns)?],
        PlotKind::Scatter => vec![scatter::render_scatter_matrix(&columns)?],
    };
    debug!(images = plots.len(), "rendered plots");
    Ok(plots)
}
