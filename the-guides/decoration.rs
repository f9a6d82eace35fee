/// A style attribute attached to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoration {
  /// Document position of the line start.
  pub line_start: usize,
  pub style:      String,
}

/// The full set of guide decorations for one regeneration cycle, ordered by
/// line start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
  decorations: Vec<LineDecoration>,
}

impl DecorationSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, line_start: usize, style: String) {
    debug_assert!(
      self
        .decorations
        .last()
        .is_none_or(|last| last.line_start < line_start)
    );
    self.decorations.push(LineDecoration { line_start, style });
  }

  pub fn len(&self) -> usize {
    self.decorations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.decorations.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &LineDecoration> {
    self.decorations.iter()
  }

  pub fn get(&self, line_start: usize) -> Option<&LineDecoration> {
    self
      .decorations
      .binary_search_by_key(&line_start, |d| d.line_start)
      .ok()
      .map(|idx| &self.decorations[idx])
  }
}

/// Receives committed decorations. A commit always replaces everything the
/// previous commit applied.
pub trait DecorationSink {
  fn clear_line_decorations(&mut self);

  fn apply_line_decoration(&mut self, line_start: usize, style: &str);

  fn replace_line_decorations(&mut self, set: &DecorationSet) {
    self.clear_line_decorations();
    for decoration in set.iter() {
      self.apply_line_decoration(decoration.line_start, &decoration.style);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Recorder(Vec<(usize, String)>);

  impl DecorationSink for Recorder {
    fn clear_line_decorations(&mut self) {
      self.0.clear();
    }

    fn apply_line_decoration(&mut self, line_start: usize, style: &str) {
      self.0.push((line_start, style.to_string()));
    }
  }

  #[test]
  fn replace_drops_previous_decorations() {
    let mut sink = Recorder::default();
    sink.apply_line_decoration(99, "stale");

    let mut set = DecorationSet::new();
    set.push(0, "a".into());
    set.push(10, "b".into());
    sink.replace_line_decorations(&set);

    assert_eq!(sink.0, vec![(0, "a".to_string()), (10, "b".to_string())]);
  }

  #[test]
  fn lookup_by_line_start() {
    let mut set = DecorationSet::new();
    set.push(4, "x".into());
    set.push(12, "y".into());
    assert_eq!(set.get(12).map(|d| d.style.as_str()), Some("y"));
    assert!(set.get(5).is_none());
    assert_eq!(set.len(), 2);
  }
}
