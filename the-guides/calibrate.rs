//! Indent unit width measurement.
//!
//! Fonts need not be monospace, so the pixel width of one indent unit is read
//! back from the host layout on the line itself rather than derived from a
//! character width.

use crate::{
  host::LayoutReader,
  line::Line,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitWidth {
  Measured(f32),
  /// The layout could not resolve one of the two coordinates.
  Unresolved,
  /// The line does not start with the indent unit, so there is nothing to
  /// measure against.
  Mismatch,
}

impl UnitWidth {
  /// Pixel width to compose with. Unresolved layouts degrade to zero, which
  /// composes to nothing; a mismatch has no width at all.
  pub fn pixels(self) -> Option<f32> {
    match self {
      Self::Measured(px) => Some(px),
      Self::Unresolved => Some(0.0),
      Self::Mismatch => None,
    }
  }
}

/// Measure the distance between the start of `line` and the end of its first
/// indent unit.
pub fn calibrate(layout: &impl LayoutReader, line: &Line, indent_unit: &str) -> UnitWidth {
  if indent_unit.is_empty() || !line.text.starts_with(indent_unit) {
    return UnitWidth::Mismatch;
  }
  let unit_chars = indent_unit.chars().count();
  let start = layout.horizontal_offset(line.from);
  let end = layout.horizontal_offset(line.from + unit_chars);
  match (start, end) {
    (Some(start), Some(end)) => UnitWidth::Measured(end - start),
    _ => UnitWidth::Unresolved,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Every character is 7px wide, positions past `limit` are not laid out.
  struct FixedLayout {
    limit: usize,
  }

  impl LayoutReader for FixedLayout {
    fn horizontal_offset(&self, pos: usize) -> Option<f32> {
      (pos <= self.limit).then(|| (pos % 100) as f32 * 7.0)
    }
  }

  #[test]
  fn measures_one_unit() {
    let layout = FixedLayout { limit: usize::MAX };
    let line = Line::new(2, 100, "    foo");
    assert_eq!(calibrate(&layout, &line, "  "), UnitWidth::Measured(14.0));
    assert_eq!(calibrate(&layout, &line, "    "), UnitWidth::Measured(28.0));
  }

  #[test]
  fn different_whitespace_is_a_mismatch() {
    let layout = FixedLayout { limit: usize::MAX };
    let line = Line::new(1, 0, "\tfoo");
    assert_eq!(calibrate(&layout, &line, "  "), UnitWidth::Mismatch);
    assert_eq!(UnitWidth::Mismatch.pixels(), None);
    assert_eq!(calibrate(&layout, &Line::new(1, 0, ""), "  "), UnitWidth::Mismatch);
  }

  #[test]
  fn unresolved_layout_degrades_to_zero() {
    let layout = FixedLayout { limit: 1 };
    let line = Line::new(1, 0, "    foo");
    assert_eq!(calibrate(&layout, &line, "  "), UnitWidth::Unresolved);
    assert_eq!(UnitWidth::Unresolved.pixels(), Some(0.0));
  }
}
