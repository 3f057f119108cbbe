//! Row classification: groups rows into named series per chart spec, aligns
//! ordinal axes, pads singleton time series and keeps the bounded row buffer.

use ahash::{AHashMap, AHashSet};
use log::debug;
use std::collections::BTreeMap;

use crate::error::{ConfigError, FieldRole, Result};
use crate::extent::{AxisRange, series_x_range};
use crate::models::{Cell, ChartConfig, FieldType, Metadata, Point, Row, Series, XKey, XValue};
use crate::viz::util::{SeriesPalette, fill_color};

/// Distance of the synthetic points bracketing a lone time-series point.
pub const TIME_PADDING: f64 = 10_000.0;

/// Series produced for one chart spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedChart {
    pub chart_index: usize,
    /// Series in first-seen order.
    pub series: Vec<Series>,
    /// Longest series length in this chart (at least 1).
    pub data_set_length: usize,
}

impl ClassifiedChart {
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Output of [`classify`]: one entry per chart spec index.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub x_type: FieldType,
    /// Charts with a supported type, keyed by spec index.
    pub charts: BTreeMap<usize, ClassifiedChart>,
    /// Numeric x range of the data rows, before time padding.
    pub data_x_range: Option<AxisRange>,
}

impl Classified {
    pub fn chart(&self, index: usize) -> Option<&ClassifiedChart> {
        self.charts.get(&index)
    }

    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.charts.values().flat_map(|c| c.series.iter())
    }

    /// Longest series across all charts (at least 1).
    pub fn max_points(&self) -> usize {
        self.all_series()
            .map(|s| s.points.len())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Whether any series has its first point at x == 0.
    pub fn starts_at_zero(&self) -> bool {
        self.all_series()
            .any(|s| s.points.first().and_then(|p| p.x.as_f64()) == Some(0.0))
    }
}

/// Field positions a chart spec reads from each row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpecFields {
    pub y: usize,
    pub color: Option<usize>,
}

/// Field positions resolved for the whole config.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedFields {
    pub x: usize,
    pub x_type: FieldType,
    /// `None` for specs whose chart type is unsupported.
    pub specs: Vec<Option<SpecFields>>,
}

/// Validate metadata and resolve every field the supported specs reference.
pub(crate) fn resolve_fields(metadata: &Metadata, config: &ChartConfig) -> Result<ResolvedFields> {
    metadata.validate()?;
    let (x, x_type) = metadata.field(FieldRole::X, &config.x)?;
    let specs = config
        .charts
        .iter()
        .map(|spec| {
            if spec.chart_type().is_none() {
                return Ok(None);
            }
            let (y, _) = metadata.field(FieldRole::Y, &spec.y)?;
            let color = match &spec.color {
                Some(name) => Some(metadata.field(FieldRole::Color, name)?.0),
                None => None,
            };
            Ok(Some(SpecFields { y, color }))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ResolvedFields { x, x_type, specs })
}

fn check_row_shapes(rows: &[Row], metadata: &Metadata) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != metadata.len() {
            return Err(ConfigError::RowShape {
                row: i,
                expected: metadata.len(),
                found: row.len(),
            });
        }
    }
    Ok(())
}

fn x_value(row_no: usize, cell: &Cell, x_type: FieldType, field: &str) -> Result<Option<XValue>> {
    match (cell, x_type) {
        (Cell::Null, _) => Ok(None),
        (c, FieldType::Ordinal) => Ok(Some(XValue::Category(c.label()))),
        (Cell::Number(v), _) => Ok(Some(XValue::Number(*v))),
        (Cell::Text(_), _) => Err(ConfigError::NonNumeric {
            row: row_no,
            field: field.to_string(),
        }),
    }
}

/// Group `rows` into series for every chart spec of `config`.
///
/// Fails before reading any row when metadata is inconsistent or a spec
/// references a field that metadata does not declare. Specs with an
/// unsupported chart type are neither validated nor classified.
pub fn classify(rows: &[Row], metadata: &Metadata, config: &ChartConfig) -> Result<Classified> {
    let fields = resolve_fields(metadata, config)?;
    check_row_shapes(rows, metadata)?;

    let mut charts = BTreeMap::new();
    for (chart_index, (spec, spec_fields)) in config.charts.iter().zip(&fields.specs).enumerate() {
        let Some(spec_fields) = spec_fields else {
            continue;
        };
        let mut palette = SeriesPalette::for_spec(spec);
        let mut series: Vec<Series> = Vec::new();
        let mut by_name: AHashMap<String, usize> = AHashMap::new();

        for (row_no, row) in rows.iter().enumerate() {
            let y = match &row[spec_fields.y] {
                Cell::Null => {
                    debug!("row {row_no}: '{}' is null, skipped for chart {chart_index}", spec.y);
                    continue;
                }
                cell => cell.as_f64().ok_or_else(|| ConfigError::NonNumeric {
                    row: row_no,
                    field: spec.y.clone(),
                })?,
            };
            let Some(x) = x_value(row_no, &row[fields.x], fields.x_type, &config.x)? else {
                debug!("row {row_no}: '{}' is null, skipped for chart {chart_index}", config.x);
                continue;
            };
            let name = match spec_fields.color {
                Some(ci) if row[ci].is_null() => {
                    debug!("row {row_no}: category is null, skipped for chart {chart_index}");
                    continue;
                }
                Some(ci) => row[ci].label(),
                None => spec.y.clone(),
            };

            let idx = match by_name.get(&name) {
                Some(idx) => *idx,
                None => {
                    let color = match spec_fields.color {
                        Some(_) => palette.color_for(&name),
                        None => fill_color(spec, chart_index),
                    };
                    series.push(Series::new(name.clone(), color));
                    by_name.insert(name, series.len() - 1);
                    series.len() - 1
                }
            };
            series[idx].points.push(Point { x, y });
        }

        if let Some(max) = config.max_length {
            for s in &mut series {
                s.retain_newest(max);
            }
        }

        charts.insert(
            chart_index,
            ClassifiedChart {
                chart_index,
                series,
                data_set_length: 1,
            },
        );
    }

    let data_x_range = series_x_range(charts.values().flat_map(|c| c.series.iter()));
    match fields.x_type {
        FieldType::Ordinal => align_ordinal(charts.values_mut()),
        FieldType::Time => {
            for s in charts.values_mut().flat_map(|c| c.series.iter_mut()) {
                pad_time_singleton(s);
            }
        }
        FieldType::Linear => {}
    }

    for chart in charts.values_mut() {
        chart.data_set_length = chart
            .series
            .iter()
            .map(|s| s.points.len())
            .max()
            .unwrap_or(0)
            .max(1);
    }

    Ok(Classified {
        x_type: fields.x_type,
        charts,
        data_x_range,
    })
}

/// Reindex every series onto the union of x categories (first-seen order),
/// inserting `y = 0` where a series has no value for a category.
pub fn align_ordinal<'a>(charts: impl Iterator<Item = &'a mut ClassifiedChart>) {
    let charts: Vec<&mut ClassifiedChart> = charts.collect();

    let mut categories: Vec<XValue> = Vec::new();
    let mut seen: AHashSet<XKey> = AHashSet::new();
    for p in charts.iter().flat_map(|c| c.series.iter()).flat_map(|s| s.points.iter()) {
        if seen.insert(p.x.key()) {
            categories.push(p.x.clone());
        }
    }

    for chart in charts {
        for s in &mut chart.series {
            let mut values: AHashMap<XKey, f64> = AHashMap::with_capacity(s.points.len());
            for p in &s.points {
                values.entry(p.x.key()).or_insert(p.y);
            }
            s.points = categories
                .iter()
                .map(|x| Point {
                    x: x.clone(),
                    y: values.get(&x.key()).copied().unwrap_or(0.0),
                })
                .collect();
        }
    }
}

/// Bracket a lone point with zero-valued points at `x + 10000` and `x - 10000`,
/// appended in that order.
pub fn pad_time_singleton(series: &mut Series) {
    if series.points.len() != 1 {
        return;
    }
    let Some(x) = series.points[0].x.as_f64() else {
        return;
    };
    series.points.push(Point::new(x + TIME_PADDING, 0.0));
    series.points.push(Point::new(x - TIME_PADDING, 0.0));
}

/// Retained rows between updates.
///
/// With `append` the incoming rows extend the buffer, which is then trimmed
/// from the oldest end so no series holds more than `maxLength` rows.
/// Otherwise the buffer is replaced by the incoming rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowBuffer {
    rows: Vec<Row>,
}

impl RowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, rows: Vec<Row>, metadata: &Metadata, config: &ChartConfig) -> Result<()> {
        let fields = resolve_fields(metadata, config)?;
        check_row_shapes(&rows, metadata)?;
        if config.append {
            self.rows.extend(rows);
        } else {
            self.rows = rows;
        }
        if let Some(max) = config.max_length {
            self.trim(max, &fields);
        }
        Ok(())
    }

    /// Keep, newest first, every row that still feeds some series below `max` points.
    fn trim(&mut self, max: usize, fields: &ResolvedFields) {
        let mut counts: AHashMap<(usize, String), usize> = AHashMap::new();
        let mut keep = vec![false; self.rows.len()];
        for (i, row) in self.rows.iter().enumerate().rev() {
            if row[fields.x].is_null() {
                continue;
            }
            for (chart_index, spec) in fields.specs.iter().enumerate() {
                let Some(spec) = spec else { continue };
                if row[spec.y].is_null() {
                    continue;
                }
                let key = match spec.color {
                    Some(ci) if row[ci].is_null() => continue,
                    Some(ci) => row[ci].label(),
                    None => String::new(),
                };
                let count = counts.entry((chart_index, key)).or_insert(0);
                if *count < max {
                    *count += 1;
                    keep[i] = true;
                }
            }
        }
        let before = self.rows.len();
        let mut flags = keep.into_iter();
        self.rows.retain(|_| flags.next().unwrap_or(false));
        if before != self.rows.len() {
            debug!("row buffer trimmed from {before} to {} rows", self.rows.len());
        }
    }
}
