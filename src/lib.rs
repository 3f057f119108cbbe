//! vizbar
//!
//! A lightweight Rust library that turns tabular rows plus a declarative chart
//! configuration into positioned bar, line and area series. Pairs with the
//! `vizbar` CLI.
//!
//! ### Features
//! - Group rows into named series by a category/color field
//! - Align ordinal series onto a shared category axis
//! - Pad lone time-series points so they stay visible
//! - Bar width and offset geometry for grouped, stacked and mixed charts
//! - Legend entries with label truncation and click-to-hide toggling
//! - Two-line tooltips with numeric and time formatting
//!
//! ### Example
//! ```
//! use vizbar::models::{ChartConfig, ChartSpec, FieldType, Metadata};
//! use vizbar::viz::{IgnoreSet, Viewport, render_frame};
//! use vizbar::row;
//!
//! let metadata = Metadata::new(
//!     ["rpm", "torque", "horsepower", "EngineType"],
//!     vec![FieldType::Linear, FieldType::Linear, FieldType::Linear, FieldType::Ordinal],
//! );
//! let config = ChartConfig::new("rpm", vec![ChartSpec::bar("torque").with_color("EngineType")]);
//! let rows = vec![row![1, 42, 10, "piston"], row![1, 55, 10, "rotary"]];
//!
//! let ignore = IgnoreSet::new().toggled("rotary");
//! let frame = render_frame(&rows, &metadata, &config, &ignore, Viewport::new(800.0, 450.0))?;
//! assert_eq!(frame.legend.len(), 2);
//! assert_eq!(frame.visible_series(), 1);
//! # Ok::<(), vizbar::error::ConfigError>(())
//! ```

pub mod classify;
pub mod error;
pub mod extent;
pub mod models;
pub mod storage;
pub mod viz;

pub use classify::{Classified, RowBuffer, classify};
pub use error::ConfigError;
pub use models::{ChartConfig, ChartSpec, ChartType, FieldType, Metadata, Row};
pub use viz::{ChartSession, Frame, IgnoreSet, Viewport, render_frame};
