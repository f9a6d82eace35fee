//! Indentation guides for an editor viewport.
//!
//! The pipeline runs once per regeneration cycle:
//!
//! 1. [`scan::scan`] turns the visible lines into a [`scan::LevelMap`].
//! 2. [`calibrate::calibrate`] measures how many pixels one indent unit spans.
//! 3. [`compose::compose`] turns a level descriptor into a [`compose::GuidePattern`].
//! 4. [`style`] serializes the pattern into a line style attribute, which the
//!    host applies through a [`decoration::DecorationSink`].
//!
//! [`scheduler::GuideScheduler`] decides when a cycle is needed and keeps the
//! measure stage apart from the commit stage.

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod calibrate;
pub mod compose;
pub mod config;
pub mod decoration;
pub mod host;
pub mod line;
pub mod scan;
pub mod scheduler;
pub mod style;
pub mod theme;

pub type Tendril = SmartString<LazyCompact>;

pub use config::{
  ConfigError,
  GuidesConfig,
  MarkerScope,
};
pub use decoration::{
  DecorationSet,
  DecorationSink,
  LineDecoration,
};
pub use host::{
  GuideHost,
  LayoutReader,
};
pub use line::Line;
pub use scheduler::{
  GuideScheduler,
  ViewChange,
};
