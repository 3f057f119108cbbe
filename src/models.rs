use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, FieldRole, Result};

/// Scale type of a metadata column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Continuous numeric values.
    Linear,
    /// Categorical values, aligned across series before stacking/grouping.
    Ordinal,
    /// Continuous timestamps in epoch milliseconds.
    Time,
}

impl FieldType {
    /// Whether the axis is continuous (linear or time).
    pub fn is_continuous(self) -> bool {
        !matches!(self, FieldType::Ordinal)
    }
}

/// Column names and types; parallel arrays of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub names: Vec<String>,
    pub types: Vec<FieldType>,
}

impl Metadata {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>, types: Vec<FieldType>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            types,
        }
    }

    /// Fails fast when `names` and `types` disagree in length.
    pub fn validate(&self) -> Result<()> {
        if self.names.len() != self.types.len() {
            return Err(ConfigError::MetadataMismatch {
                names: self.names.len(),
                types: self.types.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position and type of a named field, or a lookup error naming the field and its role.
    pub fn field(&self, role: FieldRole, name: &str) -> Result<(usize, FieldType)> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|idx| self.types.get(idx).map(|ty| (idx, *ty)))
            .ok_or_else(|| ConfigError::UnknownField {
                role,
                name: name.to_string(),
            })
    }
}

/// One cell of an input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text used when the cell names a category (series name or ordinal x).
    pub fn label(&self) -> String {
        match self {
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Null => String::new(),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// A row is positionally aligned to `Metadata::names`.
pub type Row = Vec<Cell>;

/// Build a row from heterogeneous values: `row![1, 42.0, "piston"]`.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::models::Cell::from($cell)),*]
    };
}

/// X position of a point: numeric for linear/time axes, a category for ordinal axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Category(String),
}

/// Hashable identity of an `XValue`, used to match points across series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum XKey {
    Number(u64),
    Category(String),
}

impl XValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            XValue::Number(v) => Some(*v),
            XValue::Category(_) => None,
        }
    }

    pub fn key(&self) -> XKey {
        match self {
            // +0.0 and -0.0 share a slot
            XValue::Number(v) if *v == 0.0 => XKey::Number(0),
            XValue::Number(v) => XKey::Number(v.to_bits()),
            XValue::Category(s) => XKey::Category(s.clone()),
        }
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(v) => write!(f, "{v}"),
            XValue::Category(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: XValue,
    pub y: f64,
}

impl Point {
    pub fn new(x: impl Into<XValue>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

impl From<f64> for XValue {
    fn from(v: f64) -> Self {
        XValue::Number(v)
    }
}

impl From<&str> for XValue {
    fn from(s: &str) -> Self {
        XValue::Category(s.to_string())
    }
}

/// A named, colored, ordered sequence of points. Rebuilt on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            points: Vec::new(),
        }
    }

    /// Keep only the newest `max` points.
    pub fn retain_newest(&mut self, max: usize) {
        if self.points.len() > max {
            let excess = self.points.len() - max;
            self.points.drain(..excess);
        }
    }
}

/// Chart variants understood by the composition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
        }
    }

    /// Only bars consume the computed bar width and group offset.
    pub fn uses_bar_geometry(self) -> bool {
        match self {
            ChartType::Bar => true,
            ChartType::Line | ChartType::Area => false,
        }
    }
}

/// Raw `type` of a chart spec. Unrecognised names survive parsing so the
/// composition step can skip that chart with a warning instead of rejecting the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    Known(ChartType),
    Unsupported(String),
}

impl From<String> for ChartKind {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "bar" => ChartKind::Known(ChartType::Bar),
            "line" => ChartKind::Known(ChartType::Line),
            "area" => ChartKind::Known(ChartType::Area),
            _ => ChartKind::Unsupported(s),
        }
    }
}

impl From<ChartKind> for String {
    fn from(k: ChartKind) -> Self {
        match k {
            ChartKind::Known(t) => t.as_str().to_string(),
            ChartKind::Unsupported(s) => s,
        }
    }
}

impl From<ChartType> for ChartKind {
    fn from(t: ChartType) -> Self {
        ChartKind::Known(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackMode {
    #[default]
    Grouped,
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Vertical bars growing up from the bottom axis.
    #[default]
    Bottom,
    /// Horizontal bars growing right from the left axis.
    Left,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Left)
    }
}

/// One chart definition inside a `ChartConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_domain: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default)]
    pub mode: StackMode,
    #[serde(default)]
    pub orientation: Orientation,
}

impl ChartSpec {
    pub fn new(kind: impl Into<ChartKind>, y: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            y: y.into(),
            color: None,
            color_domain: None,
            color_scale: None,
            fill: None,
            mode: StackMode::Grouped,
            orientation: Orientation::Bottom,
        }
    }

    pub fn bar(y: impl Into<String>) -> Self {
        Self::new(ChartType::Bar, y)
    }

    pub fn line(y: impl Into<String>) -> Self {
        Self::new(ChartType::Line, y)
    }

    pub fn area(y: impl Into<String>) -> Self {
        Self::new(ChartType::Area, y)
    }

    pub fn with_color(mut self, field: impl Into<String>) -> Self {
        self.color = Some(field.into());
        self
    }

    pub fn with_color_domain<S: Into<String>>(mut self, domain: impl IntoIterator<Item = S>) -> Self {
        self.color_domain = Some(domain.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_color_scale<S: Into<String>>(mut self, scale: impl IntoIterator<Item = S>) -> Self {
        self.color_scale = Some(scale.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn stacked(mut self) -> Self {
        self.mode = StackMode::Stacked;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Left;
        self
    }

    /// The chart variant, or `None` when `type` names something unsupported.
    pub fn chart_type(&self) -> Option<ChartType> {
        match &self.kind {
            ChartKind::Known(t) => Some(*t),
            ChartKind::Unsupported(_) => None,
        }
    }
}

/// Interval unit for time axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeStep {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
    Other(String),
}

pub const MILLISECONDS_FOR_SECOND: f64 = 1_000.0;
pub const MILLISECONDS_FOR_MINUTE: f64 = 60_000.0;
pub const MILLISECONDS_FOR_HOUR: f64 = 3_600_000.0;
pub const MILLISECONDS_FOR_DAY: f64 = 86_400_000.0;
pub const MILLISECONDS_FOR_MONTH: f64 = 2_592_000_000.0;
pub const MILLISECONDS_FOR_YEAR: f64 = 31_536_000_000.0;

impl TimeStep {
    /// Interval length in milliseconds; unknown units count as 1 ms.
    pub fn interval_ms(&self) -> f64 {
        match self {
            TimeStep::Second => MILLISECONDS_FOR_SECOND,
            TimeStep::Minute => MILLISECONDS_FOR_MINUTE,
            TimeStep::Hour => MILLISECONDS_FOR_HOUR,
            TimeStep::Day => MILLISECONDS_FOR_DAY,
            TimeStep::Month => MILLISECONDS_FOR_MONTH,
            TimeStep::Year => MILLISECONDS_FOR_YEAR,
            TimeStep::Other(_) => 1.0,
        }
    }
}

impl From<String> for TimeStep {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "second" => TimeStep::Second,
            "minute" => TimeStep::Minute,
            "hour" => TimeStep::Hour,
            "day" => TimeStep::Day,
            "month" => TimeStep::Month,
            "year" => TimeStep::Year,
            _ => TimeStep::Other(s),
        }
    }
}

impl From<TimeStep> for String {
    fn from(t: TimeStep) -> Self {
        match t {
            TimeStep::Second => "second".into(),
            TimeStep::Minute => "minute".into(),
            TimeStep::Hour => "hour".into(),
            TimeStep::Day => "day".into(),
            TimeStep::Month => "month".into(),
            TimeStep::Year => "year".into(),
            TimeStep::Other(s) => s,
        }
    }
}

/// Axis styling passed through to the rendering surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_tick_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_tick_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_label_color: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Declarative chart configuration shared by every chart in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub x: String,
    pub charts: Vec<ChartSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub legend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_step: Option<TimeStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear_series_step: Option<f64>,
    #[serde(default)]
    pub animate: bool,
    #[serde(default)]
    pub style: StyleConfig,
    /// Append incoming rows to the retained buffer (default) or replace it.
    #[serde(default = "default_true")]
    pub append: bool,
}

impl ChartConfig {
    pub fn new(x: impl Into<String>, charts: Vec<ChartSpec>) -> Self {
        Self {
            x: x.into(),
            charts,
            max_length: None,
            legend: true,
            time_format: None,
            tip_time_format: None,
            time_step: None,
            linear_series_step: None,
            animate: false,
            style: StyleConfig::default(),
            append: true,
        }
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_time_step(mut self, step: TimeStep) -> Self {
        self.time_step = Some(step);
        self
    }

    pub fn with_linear_series_step(mut self, step: f64) -> Self {
        self.linear_series_step = Some(step);
        self
    }

    pub fn with_tip_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.tip_time_format = Some(pattern.into());
        self
    }

    pub fn replacing(mut self) -> Self {
        self.append = false;
        self
    }

    /// Any chart oriented `left` flips the whole composition to horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.charts.iter().any(|c| c.orientation.is_horizontal())
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_horizontal() {
            Orientation::Left
        } else {
            Orientation::Bottom
        }
    }
}

/// Everything a host hands over in one document: metadata, config and an initial row set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub metadata: Metadata,
    pub config: ChartConfig,
    #[serde(default)]
    pub data: Vec<Row>,
}
