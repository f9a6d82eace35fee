//! A headless, monospace stand-in for an editor view.

use ropey::Rope;
use the_guides::{
  DecorationSink,
  GuideHost,
  LayoutReader,
  Line,
  line::indent_columns,
};

pub struct TextView {
  text:        Rope,
  first_line:  usize,
  last_line:   usize,
  cursor_line: usize,
  indent_unit: String,
  tab_width:   usize,
  char_width:  f32,
}

impl TextView {
  pub fn new(text: Rope, indent_unit: String, tab_width: usize, char_width: f32) -> Self {
    let last_line = text.len_lines();
    Self {
      text,
      first_line: 1,
      last_line,
      cursor_line: 1,
      indent_unit,
      tab_width,
      char_width,
    }
  }

  pub fn scroll_to(&mut self, first: usize, last: Option<usize>) {
    self.first_line = first.max(1);
    self.last_line = last
      .unwrap_or(usize::MAX)
      .min(self.text.len_lines());
  }

  pub fn set_cursor_line(&mut self, line: usize) {
    self.cursor_line = line;
  }

  /// 1-based line number containing document position `pos`.
  pub fn line_of(&self, pos: usize) -> usize {
    self.text.char_to_line(pos.min(self.text.len_chars())) + 1
  }

  fn line_text(&self, idx: usize) -> String {
    let mut text = self.text.line(idx).to_string();
    while text.ends_with(['\n', '\r']) {
      text.pop();
    }
    text
  }
}

impl GuideHost for TextView {
  fn indent_unit(&self) -> &str {
    &self.indent_unit
  }

  fn indent_unit_width(&self) -> usize {
    indent_columns(&self.indent_unit, self.tab_width)
  }

  fn tab_width(&self) -> usize {
    self.tab_width
  }

  fn visible_lines(&self) -> Vec<Line> {
    (self.first_line..=self.last_line)
      .map(|number| {
        let idx = number - 1;
        Line::new(number, self.text.line_to_char(idx), self.line_text(idx))
      })
      .collect()
  }

  fn cursor_line(&self) -> usize {
    self.cursor_line
  }
}

impl LayoutReader for TextView {
  fn horizontal_offset(&self, pos: usize) -> Option<f32> {
    if pos > self.text.len_chars() {
      return None;
    }
    let line = self.text.char_to_line(pos);
    let start = self.text.line_to_char(line);
    let tab_width = self.tab_width.max(1);
    let mut col = 0;
    for ch in self.text.slice(start..pos).chars() {
      if ch == '\t' {
        col += tab_width - col % tab_width;
      } else {
        col += 1;
      }
    }
    Some(col as f32 * self.char_width)
  }
}

/// Collects committed decorations for printing.
#[derive(Debug, Default)]
pub struct CollectSink {
  pub decorations: Vec<(usize, String)>,
}

impl DecorationSink for CollectSink {
  fn clear_line_decorations(&mut self) {
    self.decorations.clear();
  }

  fn apply_line_decoration(&mut self, line_start: usize, style: &str) {
    self.decorations.push((line_start, style.to_string()));
  }
}
