//! Step-histogram rendering.
//!
//! This module bins named samples and draws them as overlaid outlines into
//! an SVG image.

pub mod binning;
pub mod renderer;

// Re-export main types
pub use binning::Histogram;
pub use renderer::{render_histogram_svg, render_histograms, HistogramConfig, HistogramSeries};
