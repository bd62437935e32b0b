//! View components.

pub mod force_graph;
mod results_panel;
mod status_line;

pub use results_panel::ResultsPanel;
pub use status_line::StatusLine;
