use std::fmt;
use std::str::FromStr;

use crate::error::PlotError;

/// Plot kinds offered by [`crate::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// One density histogram per numeric column.
    Hist,
    /// One combined box-and-whisker image.
    Box,
    /// Pairwise scatter matrix.
    Scatter,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::Hist, PlotKind::Box, PlotKind::Scatter];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hist => "hist",
            Self::Box => "box",
            Self::Scatter => "scatter",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hist" | "histogram" => Ok(Self::Hist),
            "box" | "boxplot" => Ok(Self::Box),
            "scatter" => Ok(Self::Scatter),
            _ => Err(PlotError::UnknownPlotKind {
                name: s.to_string(),
            }),
        }
    }
}

/// A small table of formatted values shown next to a plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatsTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A rendered PNG, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    base64: String,
}

impl EncodedImage {
    pub(crate) fn new(base64: String) -> Self {
        Self { base64 }
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// `data:` URI suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }
}

/// One entry of a render: a label, the image and its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlot {
    pub label: String,
    pub image: EncodedImage,
    pub stats: StatsTable,
}
