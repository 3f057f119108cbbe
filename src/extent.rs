use serde::{Deserialize, Serialize};

use crate::classify::Classified;
use crate::models::Series;
use crate::viz::types::RenderGroup;

/// Closed numeric interval of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn include(self, v: f64) -> Self {
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }
}

/// Numeric x range over every classified point (synthetic padding included).
///
/// `None` for ordinal axes or when there are no points.
pub fn x_range(classified: &Classified) -> Option<AxisRange> {
    series_x_range(classified.all_series())
}

/// Numeric x range over the points of `series`.
pub fn series_x_range<'a>(series: impl Iterator<Item = &'a Series>) -> Option<AxisRange> {
    series
        .flat_map(|s| s.points.iter())
        .filter_map(|p| p.x.as_f64())
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<AxisRange>, v| {
            Some(match acc {
                Some(r) => r.include(v),
                None => AxisRange::new(v, v),
            })
        })
}

/// Value domain over the visible groups, using stacked spans and always including zero.
///
/// A flat domain is widened by one unit on each side.
pub fn y_domain(groups: &[RenderGroup]) -> AxisRange {
    let mut range = AxisRange::new(0.0, 0.0);
    for p in groups
        .iter()
        .flat_map(|g| g.series.iter())
        .flat_map(|s| s.points.iter())
    {
        for v in [p.y0, p.y1] {
            if v.is_finite() {
                range = range.include(v);
            }
        }
    }
    if (range.max - range.min).abs() < f64::EPSILON {
        range.min -= 1.0;
        range.max += 1.0;
    }
    range
}
