//! Overlaid step-histogram rendering with plotters.
//!
//! Every series is binned over its own range and drawn as an outline on a
//! shared pair of axes, with a legend keyed by series label.

use super::binning::Histogram;
use crate::output::write_svg;
use crate::utils::config::HISTOGRAM_BINS;
use crate::utils::error::RenderError;
use log::{debug, info, warn};
use plotters::{
    chart::{ChartBuilder, SeriesLabelPosition},
    prelude::{IntoDrawingArea, PathElement, SVGBackend},
    series::{DashedLineSeries, LineSeries},
    style::{Color, IntoFont, RGBColor, ShapeStyle, BLACK, WHITE},
};
use std::path::Path;

/// Line colours, cycled per series
const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Histogram rendering configuration
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub bins: usize,
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            title: None,
            x_label: "Energy [MeV]".to_string(),
            y_label: "Number of events".to_string(),
            bins: HISTOGRAM_BINS,
            width: 800,
            height: 600,
            line_width: 2,
        }
    }
}

impl HistogramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }
}

/// One named sample to draw
#[derive(Debug, Clone)]
pub struct HistogramSeries<'a> {
    pub label: String,
    pub values: &'a [f64],
    pub dashed: bool,
}

impl<'a> HistogramSeries<'a> {
    pub fn new(label: impl Into<String>, values: &'a [f64]) -> Self {
        Self {
            label: label.into(),
            values,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

fn drawing_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Render overlaid histograms to an SVG string
///
/// **Public** - used by `render_histograms` and tests
///
/// # Errors
/// * `RenderError::EmptySeries` - `series` is empty
/// * `RenderError::Drawing` - plotters failed
pub fn render_histogram_svg(
    series: &[HistogramSeries<'_>],
    config: &HistogramConfig,
) -> Result<String, RenderError> {
    if series.is_empty() {
        return Err(RenderError::EmptySeries);
    }

    let binned: Vec<(&HistogramSeries<'_>, Histogram)> = series
        .iter()
        .filter_map(|s| match Histogram::from_values(s.values, config.bins) {
            Some(hist) => Some((s, hist)),
            None => {
                warn!("Series '{}' has no finite values, not drawn", s.label);
                None
            }
        })
        .collect();

    let (x_lo, x_hi) = binned
        .iter()
        .map(|(_, hist)| hist.range())
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
        .unwrap_or((0.0, 1.0));
    let max_count = binned
        .iter()
        .map(|(_, hist)| hist.max_count())
        .max()
        .unwrap_or(0);
    let y_hi = (max_count as f64 * 1.1).max(1.0);

    debug!(
        "Drawing {} series over [{}, {}], max count {}",
        binned.len(),
        x_lo,
        x_hi,
        max_count
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(15).x_label_area_size(45).y_label_area_size(60);
        if let Some(title) = &config.title {
            builder.caption(title, ("sans-serif", 22).into_font());
        }
        let mut chart = builder
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()
            .map_err(drawing_error)?;

        for (idx, (s, hist)) in binned.iter().enumerate() {
            let style = ShapeStyle::from(&series_color(idx)).stroke_width(config.line_width);
            let outline = hist.step_outline();

            let anno = if s.dashed {
                chart.draw_series(DashedLineSeries::new(outline, 8, 4, style))
            } else {
                chart.draw_series(LineSeries::new(outline, style))
            };

            anno.map_err(drawing_error)?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    Ok(svg)
}

/// Render overlaid histograms and write them to `output_path`
///
/// **Public** - main entry point for plotting
///
/// Parent directories are created if missing.
pub fn render_histograms(
    series: &[HistogramSeries<'_>],
    output_path: impl AsRef<Path>,
    config: &HistogramConfig,
) -> Result<(), RenderError> {
    let output_path = output_path.as_ref();
    info!(
        "Rendering {} histograms to {}",
        series.len(),
        output_path.display()
    );

    let svg = render_histogram_svg(series, config)?;
    write_svg(&svg, output_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_legend_labels() {
        let a = [1.0, 2.0, 2.5, 3.0];
        let b = [10.0, 11.0];
        let series = vec![
            HistogramSeries::new("E_avail", &a),
            HistogramSeries::new("Q_thre (dQ > 75keV)", &b).dashed(),
        ];

        let svg = render_histogram_svg(&series, &HistogramConfig::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("E_avail"));
        assert!(svg.contains("Number of events"));
    }

    #[test]
    fn test_render_empty_series_list() {
        let result = render_histogram_svg(&[], &HistogramConfig::default());
        assert!(matches!(result, Err(RenderError::EmptySeries)));
    }

    #[test]
    fn test_render_series_without_finite_values() {
        let nan = [f64::NAN];
        let series = vec![HistogramSeries::new("L", &nan)];

        let svg = render_histogram_svg(&series, &HistogramConfig::default()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_config_builder() {
        let config = HistogramConfig::new()
            .with_title("E_nu = 1000 MeV")
            .with_labels("E [MeV]", "Events");

        assert_eq!(config.title.as_deref(), Some("E_nu = 1000 MeV"));
        assert_eq!(config.x_label, "E [MeV]");
        assert_eq!(config.bins, 100);
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(0), series_color(1));
    }
}
