//! Report assembly for tablescope.
//!
//! Turns analysis results into HTML fragments and standalone pages,
//! persists dated report files, and keeps the per-session current table.

pub mod html;
pub mod session;
pub mod views;
pub mod writer;

pub use html::{AlertLevel, alert, error_alert, escape_html, frame_table, page};
pub use session::{SessionId, SessionStore};
pub use views::{
    CorrelationReport, DistributionReport, conclusions_html, correlation_report,
    correlation_table_html, distribution_report, plot_card, plot_title, plots_html,
    prediction_html, preview_html, table_conclusions_html,
};
pub use writer::{DEFAULT_OUTPUT_DIR, ReportWriter, SavedPrediction};
