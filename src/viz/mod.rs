//! Visualization: bind a delta series to a category style and render it to
//! **SVG**, **PNG**, or an in-memory RGB buffer.
//!
//! - One dataset per chart, drawn as a filled area with a border line
//! - Time-scaled x axis at day resolution (`MM/DD/YY` labels)
//! - Abbreviated y tick labels (`1.2k`) and signed tooltip values (`+1,234`)
//! - Empty series are never drawn: [`chart`] returns `None`

pub mod format;
pub mod style;

pub use style::{ChartOptions, Rgba, SeriesStyle, TimeAxis};

use crate::error::{Error, Result};
use crate::models::{Category, DeltaPoint, DeltaSeries};
use chrono::{Duration, NaiveDate};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::AreaSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

/// Outer margin around the plot, in pixels.
pub const MARGIN: u32 = 16;
/// Width reserved for y tick labels.
pub const Y_LABEL_AREA: u32 = 56;
/// Height reserved for x tick labels.
pub const X_LABEL_AREA: u32 = 36;

const X_LABELS: usize = 8;
const Y_LABELS: usize = 8;

/// A renderable chart: one series, its category style, and the options.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub category: Category,
    pub style: SeriesStyle,
    pub points: DeltaSeries,
    pub options: ChartOptions,
}

/// Tooltip content for the point under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub point: DeltaPoint,
    pub title: String,
    pub label: String,
}

/// Describe a chart for `series`, or `None` when there is nothing to draw.
pub fn chart(series: &[DeltaPoint], category: Category, options: ChartOptions) -> Option<Chart> {
    if series.is_empty() {
        return None;
    }
    Some(Chart {
        category,
        style: SeriesStyle::for_category(category),
        points: series.to_vec(),
        options,
    })
}

impl Chart {
    /// Date span of the x axis. A single day is widened by one day each side.
    pub fn x_range(&self) -> (NaiveDate, NaiveDate) {
        // `chart()` never builds an empty chart.
        let first = self.points.first().map(|p| p.date).unwrap_or_default();
        let last = self.points.last().map(|p| p.date).unwrap_or(first);
        if first == last {
            (first - Duration::days(1), last + Duration::days(1))
        } else {
            (first, last)
        }
    }

    /// Value span of the y axis; always includes the zero baseline, padded by 5%.
    pub fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .points
            .iter()
            .map(|p| p.value as f64)
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (max - min).abs() < f64::EPSILON {
            return (-1.0, 1.0);
        }
        let pad = (max - min) * 0.05;
        (if min < 0.0 { min - pad } else { min }, max + pad)
    }

    /// Nearest point to a horizontal position given as a fraction of the plot width.
    pub fn tooltip_at(&self, fraction: f64) -> Option<Tooltip> {
        let (start, end) = self.x_range();
        let span = (end - start).num_days() as f64;
        let target = fraction.clamp(0.0, 1.0) * span;

        let point = *self.points.iter().min_by(|a, b| {
            let da = ((a.date - start).num_days() as f64 - target).abs();
            let db = ((b.date - start).num_days() as f64 - target).abs();
            da.total_cmp(&db)
        })?;

        Some(Tooltip {
            point,
            title: point.date.format(self.options.x_axis.tooltip_format).to_string(),
            label: format::signed_thousands(point.value),
        })
    }

    /// Map a pixel column of a rendered image of `width` onto the plot's x fraction.
    pub fn plot_fraction(x_px: f64, width: u32) -> f64 {
        let left = (MARGIN + Y_LABEL_AREA) as f64;
        let plot_w = (width as f64 - left - MARGIN as f64).max(1.0);
        ((x_px - left) / plot_w).clamp(0.0, 1.0)
    }
}

fn render_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

/// Render to `out_path`: SVG when the extension is `svg`, PNG otherwise.
pub fn render_to_file<P: AsRef<Path>>(chart: &Chart, out_path: P, width: u32, height: u32) -> Result<()> {
    let out_path = out_path.as_ref();
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        draw_chart(root, chart)
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        draw_chart(root, chart)
    }
}

/// Render to an SVG document held in memory.
pub fn render_svg(chart: &Chart, width: u32, height: u32) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(root, chart)?;
    }
    Ok(buffer)
}

/// Render to a packed RGB8 buffer of `width * height * 3` bytes.
pub fn render_rgb(chart: &Chart, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(root, chart)?;
    }
    Ok(buffer)
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &Chart) -> Result<()>
where
    DB: DrawingBackend,
{
    let opts = &chart.options;
    root.fill(&WHITE).map_err(render_err)?;

    let (x_min, x_max) = chart.x_range();
    let (y_min, y_max) = chart.y_range();

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, Y_LABEL_AREA)
        .set_label_area_size(LabelAreaPosition::Bottom, X_LABEL_AREA);
    if let Some(title) = opts.title.as_deref() {
        builder.caption(title, (FontFamily::SansSerif, 20));
    }
    let mut ctx = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    let x_fmt = |d: &NaiveDate| d.format(opts.x_axis.display_format).to_string();
    let y_fmt = |v: &f64| format::abbreviate(*v);

    let mut mesh = ctx.configure_mesh();
    mesh.x_labels(X_LABELS)
        .y_labels(Y_LABELS)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style((FontFamily::SansSerif, 12));
    if !opts.y_grid_lines {
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(render_err)?;

    let border = chart.style.border.to_plotters();
    let fill = chart.style.fill.to_plotters();
    let data: Vec<(NaiveDate, f64)> = chart
        .points
        .iter()
        .map(|p| (p.date, p.value as f64))
        .collect();

    let area = ctx
        .draw_series(
            AreaSeries::new(data.iter().copied(), 0.0, fill.filled())
                .border_style(border.stroke_width(opts.border_width)),
        )
        .map_err(render_err)?;
    if opts.show_legend {
        area.label(chart.category.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], border));
    }

    if opts.point_radius > 0 {
        let radius = opts.point_radius as i32;
        ctx.draw_series(
            data.iter()
                .map(|(d, v)| Circle::new((*d, *v), radius, border.filled())),
        )
        .map_err(render_err)?;
    }

    if opts.show_legend {
        ctx.configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 14))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(values: &[i64]) -> DeltaSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DeltaPoint {
                date: start + Duration::days(i as i64),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_not_charted() {
        assert!(chart(&[], Category::Confirmed, ChartOptions::default()).is_none());
    }

    #[test]
    fn chart_binds_category_style() {
        let c = chart(&pts(&[1, 2]), Category::Deaths, ChartOptions::default()).unwrap();
        assert_eq!(c.style, SeriesStyle::for_category(Category::Deaths));
        assert_eq!(c.points.len(), 2);
    }

    #[test]
    fn ranges_cover_baseline_and_single_day() {
        let c = chart(&pts(&[5]), Category::Confirmed, ChartOptions::default()).unwrap();
        let (a, b) = c.x_range();
        assert_eq!((b - a).num_days(), 2);
        let (lo, hi) = c.y_range();
        assert_eq!(lo, 0.0);
        assert!(hi > 5.0);

        let neg = chart(&pts(&[-10, 30]), Category::Confirmed, ChartOptions::default()).unwrap();
        let (lo, hi) = neg.y_range();
        assert!(lo < -10.0 && hi > 30.0);

        let flat = chart(&pts(&[0, 0]), Category::Confirmed, ChartOptions::default()).unwrap();
        assert_eq!(flat.y_range(), (-1.0, 1.0));
    }

    #[test]
    fn tooltip_picks_nearest_day() {
        let c = chart(&pts(&[10, 1234, -56]), Category::Confirmed, ChartOptions::default()).unwrap();
        let mid = c.tooltip_at(0.5).unwrap();
        assert_eq!(mid.label, "+1,234");
        assert_eq!(mid.title, "Jan 3, 2021");
        assert_eq!(c.tooltip_at(0.95).unwrap().label, "-56");
        assert_eq!(c.tooltip_at(-3.0).unwrap().point.value, 10);
    }

    #[test]
    fn plot_fraction_maps_plot_area() {
        let left = (MARGIN + Y_LABEL_AREA) as f64;
        assert_eq!(Chart::plot_fraction(0.0, 800), 0.0);
        assert_eq!(Chart::plot_fraction(left, 800), 0.0);
        assert_eq!(Chart::plot_fraction(800.0 - MARGIN as f64, 800), 1.0);
    }
}
