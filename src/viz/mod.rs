//! Chart pipeline: classified series → legend → bar layout → render groups.
//!
//! - `render_frame` runs one synchronous update from rows, metadata, config and the ignore set
//! - `ChartSession` owns the retained rows and the ignore set for a host that pushes data over time
//! - Plot kinds: grouped bars, stacked bars, lines, areas, and mixed bar + line + area charts
//! - Horizontal layout when any chart is oriented `left`
//! - `preview::plot_frame` draws a frame to **SVG** or **PNG**

pub mod compose;
pub mod layout;
pub mod legend;
pub mod preview;
pub mod text;
pub mod tooltip;
pub mod types;
pub mod util;

// Re-export types for public API
pub use legend::{IgnoreSet, LegendEntry};
pub use types::{
    Arrangement, BarGeometry, DEFAULT_VIEWPORT, Frame, RenderGroup, RenderPoint, RenderSeries,
    Viewport,
};

use crate::classify::{RowBuffer, classify};
use crate::error::Result;
use crate::extent::{x_range, y_domain};
use crate::models::{ChartConfig, Metadata, Row};

use compose::compose;
use legend::{build_entries, legend_offset};
use tooltip::{format_point, validate_time_format};

/// Run classification, legend, layout and composition for one update.
///
/// Pure given its inputs: the ignore set is read, never changed. Legend
/// entries are listed for every composable series, hidden ones included.
/// `Frame::ignored` lists the hidden names present in this frame's legend.
pub fn render_frame(
    rows: &[Row],
    metadata: &Metadata,
    config: &ChartConfig,
    ignore: &IgnoreSet,
    viewport: Viewport,
) -> Result<Frame> {
    for pattern in [&config.time_format, &config.tip_time_format]
        .into_iter()
        .flatten()
    {
        validate_time_format(pattern)?;
    }

    let classified = classify(rows, metadata, config)?;
    let legend = build_entries(&classified, ignore);

    let composition = compose(config, &classified, ignore, viewport);
    let legend_offset = legend_offset(legend.len(), viewport.width, viewport.height, config.legend);

    Ok(Frame {
        x_type: classified.x_type,
        horizontal: composition.horizontal,
        geometry: composition.geometry,
        y_domain: y_domain(&composition.groups),
        groups: composition.groups,
        // only names some legend entry carries; the caller's set keeps the rest
        ignored: ignore
            .reconcile(&legend)
            .iter()
            .map(str::to_string)
            .collect(),
        legend,
        legend_offset,
        x_range: x_range(&classified),
        warnings: composition.warnings,
    })
}

impl Frame {
    /// Tooltip of one rendered point, `None` when the indices are out of range.
    pub fn tooltip(
        &self,
        config: &ChartConfig,
        group: usize,
        series: usize,
        point: usize,
    ) -> Option<Result<String>> {
        let g = self.groups.get(group)?;
        let p = g.series.get(series)?.points.get(point)?;
        Some(format_point(&p.x, p.y, g.chart_index, config, self.x_type))
    }

    /// Number of visible series across all groups.
    pub fn visible_series(&self) -> usize {
        self.groups.iter().map(|g| g.series.len()).sum()
    }
}

/// Single owner of the state that outlives one update: retained rows and the ignore set.
#[derive(Debug, Clone)]
pub struct ChartSession {
    metadata: Metadata,
    config: ChartConfig,
    buffer: RowBuffer,
    ignore: IgnoreSet,
}

impl ChartSession {
    /// Fails when the config references fields missing from metadata.
    pub fn new(metadata: Metadata, config: ChartConfig) -> Result<Self> {
        classify(&[], &metadata, &config)?;
        Ok(Self {
            metadata,
            config,
            buffer: RowBuffer::new(),
            ignore: IgnoreSet::new(),
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn rows(&self) -> &[Row] {
        self.buffer.rows()
    }

    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Append or replace rows according to the config.
    pub fn push_rows(&mut self, rows: Vec<Row>) -> Result<()> {
        self.buffer.push(rows, &self.metadata, &self.config)
    }

    /// Swap the config; retained rows and the ignore set are kept.
    pub fn set_config(&mut self, config: ChartConfig) -> Result<()> {
        classify(&[], &self.metadata, &config)?;
        self.config = config;
        Ok(())
    }

    /// Legend click on `name` (full or truncated label).
    pub fn toggle_legend(&mut self, name: &str) {
        self.ignore = legend::toggle(name, &self.ignore);
    }

    /// Recompute the frame. Hidden names survive updates in which their
    /// series is absent; only `toggle_legend` changes the ignore set.
    pub fn frame(&self, viewport: Viewport) -> Result<Frame> {
        render_frame(
            self.buffer.rows(),
            &self.metadata,
            &self.config,
            &self.ignore,
            viewport,
        )
    }
}
