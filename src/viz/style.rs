//! Per-category colours and the fixed chart configuration.
//!
//! Options are plain immutable values: build a fresh [`ChartOptions`] per
//! render and pass the category style alongside it.

use crate::models::Category;
use plotters::style::RGBAColor;

use super::format::{AXIS_DATE_FORMAT, TOOLTIP_DATE_FORMAT};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_plotters(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, self.a)
    }
}

/// Border/fill pair applied to the plotted series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub border: Rgba,
    pub fill: Rgba,
    /// CSS spelling of `border`.
    pub border_css: &'static str,
    /// CSS spelling of `fill`.
    pub fill_css: &'static str,
}

// Indexed by `Category as usize`.
const CATEGORY_STYLES: [SeriesStyle; 3] = [
    SeriesStyle {
        border: Rgba::new(204, 16, 52, 1.0),
        fill: Rgba::new(204, 16, 52, 0.5),
        border_css: "#CC1034",
        fill_css: "rgba(204,16,52,0.5)",
    },
    SeriesStyle {
        border: Rgba::new(125, 215, 29, 1.0),
        fill: Rgba::new(125, 215, 29, 0.5),
        border_css: "#7dd71d",
        fill_css: "rgba(125,215,29,0.5)",
    },
    SeriesStyle {
        border: Rgba::new(251, 68, 67, 1.0),
        fill: Rgba::new(251, 68, 67, 0.5),
        border_css: "#fb4443",
        fill_css: "rgba(251,68,67,0.5)",
    },
];

impl SeriesStyle {
    pub fn for_category(category: Category) -> Self {
        CATEGORY_STYLES[category as usize]
    }
}

/// Day-resolution time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeAxis {
    /// `strftime` pattern for tick labels.
    pub display_format: &'static str,
    /// `strftime` pattern for tooltip titles.
    pub tooltip_format: &'static str,
}

/// Fixed chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub title: Option<String>,
    pub show_legend: bool,
    /// Marker radius in pixels; `0` draws the line only.
    pub point_radius: u32,
    pub border_width: u32,
    pub x_axis: TimeAxis,
    /// Horizontal grid lines behind the series.
    pub y_grid_lines: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            show_legend: false,
            point_radius: 0,
            border_width: 2,
            x_axis: TimeAxis {
                display_format: AXIS_DATE_FORMAT,
                tooltip_format: TOOLTIP_DATE_FORMAT,
            },
            y_grid_lines: false,
        }
    }
}

impl ChartOptions {
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }
}
