//! Legend entries and the ignore set driven by legend clicks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::text::truncate_label;
use crate::classify::Classified;

/// Symbol fill of a legend entry whose series is hidden.
pub const IGNORED_FILL: &str = "#d3d3d3";

// Legend band layout, must match the hosting surface.
const LEGEND_COLUMN_WIDTH_PX: f64 = 160.0;
const LEGEND_LINE_HEIGHT_PX: f64 = 25.0;
const LEGEND_ROW_HEIGHT_PX: f64 = 30.0;
const LEGEND_RESERVED_HEIGHT_PX: f64 = 100.0;
const X_AXIS_LABEL_OFFSET_PX: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Label fitted to the legend column; also the key of the ignore set.
    pub name: String,
    pub full_name: String,
    /// Series color.
    pub color: String,
    /// Symbol fill: the series color, or [`IGNORED_FILL`] while hidden.
    pub fill: String,
    pub chart_index: usize,
    pub ignored: bool,
}

/// Truncated series names hidden from rendering but still listed in the legend.
///
/// Deserializes from a list of full or truncated names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the series with this (full or truncated) name is hidden.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&truncate_label(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// New set with the membership of `name` flipped.
    pub fn toggled(&self, name: &str) -> Self {
        let key = truncate_label(name);
        let mut next = self.0.clone();
        if !next.remove(&key) {
            next.insert(key);
        }
        Self(next)
    }

    /// Subset of names that match some legend entry.
    pub fn reconcile(&self, entries: &[LegendEntry]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|n| entries.iter().any(|e| &e.name == *n))
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<String>> for IgnoreSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| truncate_label(s.as_ref())).collect())
    }
}

/// Flip the visibility of one legend entry. Data and metadata are untouched.
pub fn toggle(name: &str, ignore: &IgnoreSet) -> IgnoreSet {
    ignore.toggled(name)
}

/// One entry per classified series, in chart then first-seen order.
pub fn build_entries(classified: &Classified, ignore: &IgnoreSet) -> Vec<LegendEntry> {
    let mut entries = Vec::new();
    for (chart_index, chart) in &classified.charts {
        for series in &chart.series {
            let name = truncate_label(&series.name);
            let ignored = ignore.0.contains(&name);
            let fill = if ignored {
                IGNORED_FILL.to_string()
            } else {
                series.color.clone()
            };
            entries.push(LegendEntry {
                name,
                full_name: series.name.clone(),
                color: series.color.clone(),
                fill,
                chart_index: *chart_index,
                ignored,
            });
        }
    }
    entries
}

/// Extra bottom space needed when the legend overflows a single column.
pub fn legend_offset(entry_count: usize, width: f64, height: f64, legend_enabled: bool) -> f64 {
    if !legend_enabled {
        return 0.0;
    }
    let columns = (width / LEGEND_COLUMN_WIDTH_PX).floor().max(1.0);
    let max_items = ((height - LEGEND_RESERVED_HEIGHT_PX) / LEGEND_LINE_HEIGHT_PX).floor();
    if (entry_count as f64) > max_items {
        (entry_count as f64 / columns).ceil() * LEGEND_ROW_HEIGHT_PX + X_AXIS_LABEL_OFFSET_PX
    } else {
        0.0
    }
}
