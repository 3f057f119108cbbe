//! Bar width and group offset geometry.

use crate::classify::Classified;
use crate::extent::AxisRange;
use crate::models::{ChartConfig, FieldType, Orientation};

use super::types::BarGeometry;

/// Space reserved for axis and legend chrome along each orientation.
pub const HORIZONTAL_CHROME_PX: f64 = 120.0;
pub const VERTICAL_CHROME_PX: f64 = 280.0;

/// Slots wider than this are shrunk to keep bars on sparse data from looking bloated.
pub const WIDE_SLOT_PX: f64 = 100.0;
pub const WIDE_SLOT_FACTOR: f64 = 0.8;

/// How the x-axis is divided into bar slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisStep {
    /// Time axis with an explicit interval unit spanning `range` milliseconds.
    Interval { range: f64, interval_ms: f64 },
    /// Continuous axis divided by a raw step (default 1).
    Step(f64),
    /// Categorical axis: one slot per category.
    Ordinal,
}

impl AxisStep {
    /// Pick the slot rule for an axis of `x_type` spanning `x_range`.
    ///
    /// The interval rule applies only to time axes with a `timeStep` whose
    /// range starts away from zero; other continuous axes use `linearSeriesStep`.
    pub fn for_axis(config: &ChartConfig, x_type: FieldType, x_range: Option<AxisRange>) -> Self {
        match (x_type, &config.time_step, x_range) {
            (FieldType::Ordinal, _, _) => AxisStep::Ordinal,
            (FieldType::Time, Some(step), Some(range)) if range.min != 0.0 => AxisStep::Interval {
                range: range.span(),
                interval_ms: step.interval_ms(),
            },
            _ => AxisStep::Step(
                config
                    .linear_series_step
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .unwrap_or(1.0),
            ),
        }
    }
}

/// Pixels available for bars: `height - 120` when horizontal, else `width - 280`.
pub fn available_extent(orientation: Orientation, height: f64, width: f64) -> f64 {
    let extent = if orientation.is_horizontal() {
        height - HORIZONTAL_CHROME_PX
    } else {
        width - VERTICAL_CHROME_PX
    };
    extent.max(1.0)
}

/// Width of one x slot before the wide-slot cap.
pub fn slot_width(extent: f64, max_points: usize, step: AxisStep) -> f64 {
    let points = max_points.max(1) as f64;
    let slots = match step {
        AxisStep::Interval { range, interval_ms } => range.max(0.0) / interval_ms.max(1.0) + 1.0,
        AxisStep::Step(step) => (points + 2.0 * step) / step,
        AxisStep::Ordinal => points,
    };
    extent / slots.max(1.0)
}

/// Point count used for slot widths, with the zero-baseline correction:
/// a vertical chart whose data starts at x == 0 gets one extra slot.
pub fn effective_data_set_length(classified: &Classified, orientation: Orientation) -> usize {
    let len = classified.max_points();
    if classified.starts_at_zero() && !orientation.is_horizontal() {
        len + 1
    } else {
        len
    }
}

/// Bar geometry for `series_count` side-by-side slots over `max_points` positions.
pub fn compute_geometry(
    orientation: Orientation,
    height: f64,
    width: f64,
    series_count: usize,
    max_points: usize,
    step: AxisStep,
) -> BarGeometry {
    let extent = available_extent(orientation, height, width);
    let mut full = slot_width(extent, max_points, step);
    if full > WIDE_SLOT_PX {
        full *= WIDE_SLOT_FACTOR;
    }
    let series_count = series_count.max(1);
    let bar_width = (full / series_count as f64).floor().clamp(1.0, extent);
    BarGeometry {
        bar_width,
        group_offset: bar_width,
        full_bar_width: full,
        extent,
        data_set_length: max_points.max(1),
        series_count,
    }
}
