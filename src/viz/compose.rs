//! Arranges classified series into grouped, stacked or overlaid render groups.

use ahash::AHashMap;
use log::warn;

use super::legend::IgnoreSet;
use super::layout::{AxisStep, compute_geometry, effective_data_set_length};
use super::types::{Arrangement, BarGeometry, RenderGroup, RenderPoint, RenderSeries, Viewport};
use crate::classify::Classified;
use crate::models::{ChartConfig, ChartSpec, ChartType, Series, StackMode, XKey};

/// Render groups plus the frame-wide bar geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub horizontal: bool,
    pub geometry: Option<BarGeometry>,
    pub groups: Vec<RenderGroup>,
    pub warnings: Vec<String>,
}

/// Warning for every chart whose type cannot be composed.
pub fn unsupported_charts(config: &ChartConfig) -> Vec<(usize, String)> {
    config
        .charts
        .iter()
        .enumerate()
        .filter(|(_, spec)| spec.chart_type().is_none())
        .map(|(idx, spec)| {
            let kind: String = spec.kind.clone().into();
            (idx, format!("chart {idx}: unsupported type '{kind}', skipped"))
        })
        .collect()
}

/// Side-by-side slots bars occupy at one x position: each visible grouped
/// bar series takes one, each stacked bar chart takes one.
fn grouped_slot_count(config: &ChartConfig, classified: &Classified, ignore: &IgnoreSet) -> usize {
    config
        .charts
        .iter()
        .enumerate()
        .filter(|(_, spec)| spec.chart_type() == Some(ChartType::Bar))
        .map(|(idx, spec)| match spec.mode {
            StackMode::Stacked => 1,
            StackMode::Grouped => classified
                .chart(idx)
                .map(|c| c.series.iter().filter(|s| !ignore.contains(&s.name)).count())
                .unwrap_or(0),
        })
        .sum()
}

fn plain_series(series: &Series) -> RenderSeries {
    RenderSeries {
        name: series.name.clone(),
        color: series.color.clone(),
        points: series
            .points
            .iter()
            .map(|p| RenderPoint {
                x: p.x.clone(),
                y: p.y,
                y0: 0.0,
                y1: p.y,
            })
            .collect(),
    }
}

/// Accumulate values per x position: positives grow up from zero, negatives down.
fn stack_series(series: &[&Series]) -> Vec<RenderSeries> {
    let mut tops: AHashMap<XKey, (f64, f64)> = AHashMap::new();
    series
        .iter()
        .map(|s| RenderSeries {
            name: s.name.clone(),
            color: s.color.clone(),
            points: s
                .points
                .iter()
                .map(|p| {
                    let (pos, neg) = tops.entry(p.x.key()).or_insert((0.0, 0.0));
                    let base = if p.y >= 0.0 { pos } else { neg };
                    let y0 = *base;
                    *base += p.y;
                    RenderPoint {
                        x: p.x.clone(),
                        y: p.y,
                        y0,
                        y1: *base,
                    }
                })
                .collect(),
        })
        .collect()
}

fn compose_chart(
    chart_index: usize,
    spec: &ChartSpec,
    chart_type: ChartType,
    classified: &Classified,
    ignore: &IgnoreSet,
) -> RenderGroup {
    let visible: Vec<&Series> = classified
        .chart(chart_index)
        .map(|c| c.series.iter().filter(|s| !ignore.contains(&s.name)).collect())
        .unwrap_or_default();
    let arrangement = Arrangement::for_chart(chart_type, spec.mode == StackMode::Stacked);
    let series = match arrangement {
        Arrangement::Stacked => stack_series(&visible),
        Arrangement::Grouped | Arrangement::Overlay => {
            visible.into_iter().map(plain_series).collect()
        }
    };
    RenderGroup {
        chart_index,
        chart_type,
        arrangement,
        series,
        bar: None,
    }
}

/// Build the render groups of one frame.
///
/// Charts with an unsupported type are skipped with a warning. Ignored series
/// are left out of the groups. Only bar groups carry the bar geometry, which
/// is computed once for the whole frame so grouped bars of several charts fit
/// side by side.
pub fn compose(
    config: &ChartConfig,
    classified: &Classified,
    ignore: &IgnoreSet,
    viewport: Viewport,
) -> Composition {
    let orientation = config.orientation();
    let mut warnings = Vec::new();
    for (_, message) in unsupported_charts(config) {
        warn!("{message}");
        warnings.push(message);
    }

    let mut groups: Vec<RenderGroup> = config
        .charts
        .iter()
        .enumerate()
        .filter_map(|(idx, spec)| {
            let chart_type = spec.chart_type()?;
            Some(compose_chart(idx, spec, chart_type, classified, ignore))
        })
        .collect();

    let has_bars = groups.iter().any(|g| g.chart_type.uses_bar_geometry());
    let geometry = has_bars.then(|| {
        let step = AxisStep::for_axis(config, classified.x_type, classified.data_x_range);
        compute_geometry(
            orientation,
            viewport.height,
            viewport.width,
            grouped_slot_count(config, classified, ignore),
            effective_data_set_length(classified, orientation),
            step,
        )
    });
    for group in &mut groups {
        if group.chart_type.uses_bar_geometry() {
            group.bar = geometry;
        }
    }

    Composition {
        horizontal: orientation.is_horizontal(),
        geometry,
        groups,
        warnings,
    }
}
