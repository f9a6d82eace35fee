use unicode_width::UnicodeWidthChar;

use crate::Tendril;

/// A visible document line as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
  /// 1-based line number.
  pub number: usize,
  /// Document position of the first character of the line.
  pub from:   usize,
  /// Line content without the line ending.
  pub text:   Tendril,
}

impl Line {
  pub fn new(number: usize, from: usize, text: impl Into<Tendril>) -> Self {
    Self {
      number,
      from,
      text: text.into(),
    }
  }

  pub fn is_blank(&self) -> bool {
    self.text.chars().all(char_is_indent_whitespace)
  }

  /// Display columns covered by the leading whitespace.
  pub fn indent_columns(&self, tab_width: usize) -> usize {
    indent_columns(&self.text, tab_width)
  }
}

#[inline]
pub fn char_is_indent_whitespace(ch: char) -> bool {
  match ch {
    '\u{0009}' | // Character Tabulation
    '\u{0020}' | // Space
    '\u{00A0}' | // No-break Space
    '\u{202F}' | // Narrow No-break Space
    '\u{205F}' | // Medium Mathematical Space
    '\u{3000}' | // Ideographic Space
    '\u{FEFF}'   // Zero Width No-break Space
    => true,

    ch if ('\u{2000}'..='\u{200B}').contains(&ch) => true,

    _ => false,
  }
}

/// Counts the display columns of the leading whitespace of `text`. Tabs
/// advance to the next multiple of `tab_width`; every other whitespace
/// character counts its display width.
pub fn indent_columns(text: &str, tab_width: usize) -> usize {
  let tab_width = tab_width.max(1);
  let mut cols = 0;
  for ch in text.chars() {
    if ch == '\t' {
      cols += tab_width - cols % tab_width;
    } else if char_is_indent_whitespace(ch) {
      cols += ch.width().unwrap_or(0);
    } else {
      break;
    }
  }
  cols
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn spaces_count_one_column_each() {
    assert_eq!(indent_columns("    foo", 4), 4);
    assert_eq!(indent_columns("foo  ", 4), 0);
    assert_eq!(indent_columns("", 4), 0);
  }

  #[test]
  fn tabs_snap_to_tab_stops() {
    assert_eq!(indent_columns("\tfoo", 4), 4);
    assert_eq!(indent_columns("  \tfoo", 4), 4);
    assert_eq!(indent_columns("\t\tfoo", 2), 4);
    assert_eq!(indent_columns(" \t foo", 8), 9);
  }

  #[test]
  fn zero_tab_width_does_not_divide_by_zero() {
    assert_eq!(indent_columns("\t\tx", 0), 2);
  }

  #[test]
  fn wide_whitespace_uses_display_width() {
    assert_eq!(indent_columns("\u{3000}x", 4), 2);
  }

  #[test]
  fn blank_lines() {
    assert!(Line::new(1, 0, "").is_blank());
    assert!(Line::new(1, 0, " \t ").is_blank());
    assert!(!Line::new(1, 0, "  x").is_blank());
  }
}
