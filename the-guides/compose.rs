//! Composite guide patterns.
//!
//! A [`GuidePattern`] is the typed form of everything drawn behind one line:
//! an ordered list of [`GuideLayer`]s, each a run of consecutive indent
//! columns sharing a color role. Column `k` spans
//! `[k * unit_width, (k + 1) * unit_width)` pixels from the line start and
//! holds a `thickness` wide stripe at its left edge.
//!
//! Layers never overlap: the active column is carved out of the normal range,
//! so the active color wins exactly one column and nothing is drawn twice.

use smallvec::SmallVec;

use crate::scan::IndentLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
  Normal,
  Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuideLayer {
  pub role:         MarkerRole,
  pub column_start: u32,
  pub column_count: u32,
}

impl GuideLayer {
  fn new(role: MarkerRole, column_start: u32, column_count: u32) -> Self {
    Self {
      role,
      column_start,
      column_count,
    }
  }

  pub fn column_end(&self) -> u32 {
    self.column_start + self.column_count
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuidePattern {
  /// Layers in column order.
  pub layers:     SmallVec<[GuideLayer; 3]>,
  /// Pixel width of one indent column.
  pub unit_width: f32,
  /// Pixel width of the stripe inside each column.
  pub thickness:  f32,
}

impl GuidePattern {
  pub fn empty(unit_width: f32, thickness: f32) -> Self {
    Self {
      layers: SmallVec::new(),
      unit_width,
      thickness,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.layers.is_empty()
  }

  /// Every drawn column with its role, in column order.
  pub fn columns(&self) -> impl Iterator<Item = (u32, MarkerRole)> + '_ {
    self
      .layers
      .iter()
      .flat_map(|layer| (layer.column_start..layer.column_end()).map(move |col| (col, layer.role)))
  }

  fn push(&mut self, role: MarkerRole, column_start: u32, column_count: u32) {
    if column_count > 0 {
      self
        .layers
        .push(GuideLayer::new(role, column_start, column_count));
    }
  }
}

/// Compose the pattern for one line.
///
/// With `hide_outermost` the level-0 column is only drawn when it holds the
/// active marker. A unit width that is zero or negative (layout not ready) composes to
/// the empty pattern.
pub fn compose(
  descriptor: &IndentLevel,
  unit_width: f32,
  hide_outermost: bool,
  thickness: f32,
) -> GuidePattern {
  let mut pattern = GuidePattern::empty(unit_width, thickness.max(0.0));
  let level = descriptor.level;

  if (hide_outermost && level == 0) || unit_width.is_nan() || unit_width <= 0.0 {
    return pattern;
  }

  let start_at = u32::from(hide_outermost);

  match descriptor.active.map(|a| a.get().min(level)) {
    Some(active) => {
      pattern.push(
        MarkerRole::Normal,
        start_at,
        active.saturating_sub(start_at + 1),
      );
      pattern.push(MarkerRole::Active, active - 1, 1);
      pattern.push(MarkerRole::Normal, active, level - active);
    },
    None => pattern.push(MarkerRole::Normal, start_at, level.saturating_sub(start_at)),
  }

  pattern
}
