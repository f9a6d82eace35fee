//! What the guides need from the editor hosting them.
//!
//! State queries ([`GuideHost`]) are answered synchronously when an update
//! event arrives. Layout queries ([`LayoutReader`]) are only made from the
//! measure stage, once the host has finished a layout pass.

use crate::line::Line;

pub trait GuideHost {
  /// The configured indent unit, e.g. two spaces or a tab.
  fn indent_unit(&self) -> &str;

  /// Columns spanned by one indent unit.
  fn indent_unit_width(&self) -> usize;

  /// Columns per tab stop.
  fn tab_width(&self) -> usize;

  /// The lines currently on screen, ordered by line number.
  fn visible_lines(&self) -> Vec<Line>;

  /// 1-based line number of the primary cursor.
  fn cursor_line(&self) -> usize;
}

pub trait LayoutReader {
  /// Horizontal pixel offset of document position `pos`, or `None` when the
  /// layout does not cover it yet.
  fn horizontal_offset(&self, pos: usize) -> Option<f32>;
}
