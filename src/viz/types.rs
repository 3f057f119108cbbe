//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};

use super::legend::LegendEntry;
use crate::extent::AxisRange;
use crate::models::{ChartType, FieldType, XValue};

/// Pixel size of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Default surface: 800 × 450 pixels.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 450.0,
};

/// How the series of one render group share an x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Bars side by side, one slot per series.
    Grouped,
    /// Values accumulated on top of each other.
    Stacked,
    /// Lines and areas drawn over each other on the shared scale.
    Overlay,
}

impl Arrangement {
    pub fn for_chart(chart_type: ChartType, stacked: bool) -> Self {
        match (chart_type, stacked) {
            (_, true) => Arrangement::Stacked,
            (ChartType::Bar, false) => Arrangement::Grouped,
            (ChartType::Line | ChartType::Area, false) => Arrangement::Overlay,
        }
    }
}

/// Bar width and spacing shared by every bar in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGeometry {
    pub bar_width: f64,
    pub group_offset: f64,
    /// Slot width before it is split between grouped series.
    pub full_bar_width: f64,
    /// Pixel extent bars are laid out along.
    pub extent: f64,
    /// Point count used for the slot width, after the zero-baseline correction.
    pub data_set_length: usize,
    /// Number of side-by-side slots sharing one x position.
    pub series_count: usize,
}

/// A point ready to draw: the bar or area spans `y0..y1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub x: XValue,
    pub y: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<RenderPoint>,
}

/// The visible series of one chart spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderGroup {
    pub chart_index: usize,
    pub chart_type: ChartType,
    pub arrangement: Arrangement,
    pub series: Vec<RenderSeries>,
    /// Present only for bar groups.
    pub bar: Option<BarGeometry>,
}

/// Everything the rendering surface needs for one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub x_type: FieldType,
    pub horizontal: bool,
    pub geometry: Option<BarGeometry>,
    pub groups: Vec<RenderGroup>,
    pub legend: Vec<LegendEntry>,
    pub ignored: Vec<String>,
    pub legend_offset: f64,
    pub x_range: Option<AxisRange>,
    pub y_domain: AxisRange,
    pub warnings: Vec<String>,
}
