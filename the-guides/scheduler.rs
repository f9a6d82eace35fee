//! Regeneration scheduling.
//!
//! The host forwards every update event to [`GuideScheduler::update`]. When
//! nothing relevant changed this is a cheap no-op. Otherwise a new cycle is
//! started: the visible lines are scanned right away and the cycle is queued
//! until the host has a finished layout, at which point it calls
//! [`GuideScheduler::flush`] from a deferred callback.
//!
//! A cycle runs in two stages:
//!
//! - [`GuideScheduler::measure`] only reads layout and produces a
//!   [`MeasuredCycle`]. It borrows the scheduler immutably.
//! - [`GuideScheduler::commit`] only writes decorations and never sees the
//!   layout.
//!
//! Cycles are never cancelled. Every queued cycle is measured and committed
//! in full, in the order it was started, so the newest cycle's commit is the
//! one that sticks.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::{
  Tendril,
  calibrate::{
    UnitWidth,
    calibrate,
  },
  compose::compose,
  config::GuidesConfig,
  decoration::{
    DecorationSet,
    DecorationSink,
  },
  host::{
    GuideHost,
    LayoutReader,
  },
  line::Line,
  scan::{
    LevelMap,
    ScanOptions,
    scan,
  },
  style,
};

bitflags! {
  /// What the host saw change since the previous update event.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
  pub struct ViewChange: u8 {
    const DOCUMENT  = 1 << 0;
    const VIEWPORT  = 1 << 1;
    const SELECTION = 1 << 2;
  }
}

/// A started cycle waiting for layout.
#[derive(Debug)]
pub struct PendingCycle {
  pub id:      u64,
  lines:       Vec<Line>,
  levels:      LevelMap,
  indent_unit: Tendril,
}

impl PendingCycle {
  pub fn levels(&self) -> &LevelMap {
    &self.levels
  }
}

/// The output of a measure stage, ready to commit.
#[derive(Debug)]
pub struct MeasuredCycle {
  pub id:          u64,
  pub decorations: DecorationSet,
}

#[derive(Debug)]
pub struct GuideScheduler {
  config:           GuidesConfig,
  last_unit_width:  Option<usize>,
  last_cursor_line: Option<usize>,
  /// Set until the first cycle after construction or reconfiguration.
  force:            bool,
  next_cycle:       u64,
  pending:          VecDeque<PendingCycle>,
  committed:        DecorationSet,
  committed_cycle:  Option<u64>,
}

impl GuideScheduler {
  pub fn new(config: GuidesConfig) -> Self {
    Self {
      config,
      last_unit_width: None,
      last_cursor_line: None,
      force: true,
      next_cycle: 0,
      pending: VecDeque::new(),
      committed: DecorationSet::new(),
      committed_cycle: None,
    }
  }

  pub fn config(&self) -> &GuidesConfig {
    &self.config
  }

  /// Swap the configuration. The next update regenerates unconditionally.
  pub fn reconfigure(&mut self, config: GuidesConfig) {
    self.config = config;
    self.last_unit_width = None;
    self.last_cursor_line = None;
    self.force = true;
  }

  /// Whether an update event with `change` requires a new cycle.
  pub fn needs_regeneration(&self, host: &impl GuideHost, change: ViewChange) -> bool {
    let unit_width_changed = self.last_unit_width != Some(host.indent_unit_width());
    let cursor_changed = self.config.highlight_active_block
      && self.last_cursor_line != Some(host.cursor_line());

    self.force
      || change.intersects(ViewChange::DOCUMENT | ViewChange::VIEWPORT)
      || unit_width_changed
      || cursor_changed
  }

  /// Handle one host update event. Returns `true` when a cycle was started
  /// and the host should schedule a deferred [`flush`](Self::flush).
  pub fn update(&mut self, host: &impl GuideHost, change: ViewChange) -> bool {
    if !self.needs_regeneration(host, change) {
      tracing::trace!(?change, "indent guides up to date");
      return false;
    }

    let unit_width = host.indent_unit_width();
    let cursor_line = host.cursor_line();
    self.last_unit_width = Some(unit_width);
    self.last_cursor_line = Some(cursor_line);
    self.force = false;

    let lines = host.visible_lines();
    let levels = scan(&lines, &ScanOptions {
      indent_unit_width: unit_width,
      tab_width: host.tab_width(),
      cursor_line,
      highlight_active_block: self.config.highlight_active_block,
      scope: self.config.marker_scope,
    });

    let id = self.next_cycle;
    self.next_cycle += 1;
    tracing::debug!(
      cycle = id,
      ?change,
      lines = lines.len(),
      "starting indent guide cycle"
    );

    self.pending.push_back(PendingCycle {
      id,
      lines,
      levels,
      indent_unit: host.indent_unit().into(),
    });
    true
  }

  pub fn has_pending(&self) -> bool {
    !self.pending.is_empty()
  }

  /// Measure and commit every queued cycle, oldest first.
  pub fn flush(&mut self, layout: &impl LayoutReader, sink: &mut impl DecorationSink) {
    while let Some(cycle) = self.pending.pop_front() {
      let measured = self.measure(&cycle, layout);
      self.commit(measured, sink);
    }
  }

  /// Measure stage: read unit widths from the layout and compose every line.
  pub fn measure(&self, cycle: &PendingCycle, layout: &impl LayoutReader) -> MeasuredCycle {
    let thickness = self.config.thickness();
    let widths = unit_widths(cycle, layout);
    let mut decorations = DecorationSet::new();

    for (line, width) in cycle.lines.iter().zip(widths) {
      let Some(descriptor) = cycle.levels.get(&line.number) else {
        continue;
      };
      let Some(width) = width else {
        if descriptor.level > 0 {
          tracing::debug!(
            cycle = cycle.id,
            line = line.number,
            "skipping indent guides, indent unit not measurable"
          );
        }
        continue;
      };
      let pattern = compose(descriptor, width, self.config.hide_outermost, thickness);
      if let Some(style) = style::to_style(&pattern) {
        decorations.push(line.from, style);
      }
    }

    tracing::trace!(cycle = cycle.id, decorated = decorations.len(), "measured");
    MeasuredCycle {
      id: cycle.id,
      decorations,
    }
  }

  /// Commit stage: replace the applied decorations with `measured`.
  pub fn commit(&mut self, measured: MeasuredCycle, sink: &mut impl DecorationSink) {
    sink.replace_line_decorations(&measured.decorations);
    tracing::trace!(
      cycle = measured.id,
      decorated = measured.decorations.len(),
      "committed"
    );
    self.committed = measured.decorations;
    self.committed_cycle = Some(measured.id);
  }

  /// Decorations of the last commit.
  pub fn decorations(&self) -> &DecorationSet {
    &self.committed
  }

  pub fn committed_cycle(&self) -> Option<u64> {
    self.committed_cycle
  }
}

/// Pixel width of one indent unit for every line of `cycle`, or `None` for
/// lines that get no guides this cycle.
///
/// Only non-blank lines with guides are calibrated. A blank line has no
/// indent text to measure, so it borrows the width measured in this cycle on
/// the nearest calibrated line above it, or below it when nothing above was
/// calibrated.
fn unit_widths(cycle: &PendingCycle, layout: &impl LayoutReader) -> Vec<Option<f32>> {
  let mut widths: Vec<Option<f32>> = cycle
    .lines
    .iter()
    .map(|line| {
      let level = cycle.levels.get(&line.number).map_or(0, |d| d.level);
      if level == 0 || line.is_blank() {
        return None;
      }
      match calibrate(layout, line, &cycle.indent_unit) {
        UnitWidth::Unresolved => {
          tracing::debug!(line = line.number, "indent unit offset unresolved");
          UnitWidth::Unresolved.pixels()
        },
        width => width.pixels(),
      }
    })
    .collect();

  let blank: Vec<bool> = cycle.lines.iter().map(Line::is_blank).collect();
  let mut above = None;
  let mut borrowed = vec![None; widths.len()];
  for i in 0..widths.len() {
    if blank[i] {
      borrowed[i] = above;
    } else if widths[i].is_some() {
      above = widths[i];
    }
  }
  let mut below = None;
  for i in (0..widths.len()).rev() {
    if blank[i] {
      borrowed[i] = borrowed[i].or(below);
    } else if widths[i].is_some() {
      below = widths[i];
    }
  }
  for i in 0..widths.len() {
    if blank[i] {
      widths[i] = borrowed[i];
    }
  }
  widths
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::config::MarkerScope;

  struct TestHost {
    lines:       Vec<Line>,
    cursor_line: usize,
    unit_width:  usize,
    unit:        &'static str,
  }

  impl TestHost {
    fn new(text: &str) -> Self {
      let mut from = 0;
      let lines = text
        .split('\n')
        .enumerate()
        .map(|(i, text)| {
          let line = Line::new(i + 1, from, text);
          from += text.chars().count() + 1;
          line
        })
        .collect();
      Self {
        lines,
        cursor_line: 1,
        unit_width: 2,
        unit: "  ",
      }
    }
  }

  impl GuideHost for TestHost {
    fn indent_unit(&self) -> &str {
      self.unit
    }

    fn indent_unit_width(&self) -> usize {
      self.unit_width
    }

    fn tab_width(&self) -> usize {
      4
    }

    fn visible_lines(&self) -> Vec<Line> {
      self.lines.clone()
    }

    fn cursor_line(&self) -> usize {
      self.cursor_line
    }
  }

  /// Every character is 5px wide and counts how often it was asked.
  #[derive(Default)]
  struct CountingLayout {
    reads: Cell<usize>,
  }

  impl LayoutReader for CountingLayout {
    fn horizontal_offset(&self, pos: usize) -> Option<f32> {
      self.reads.set(self.reads.get() + 1);
      Some(pos as f32 * 5.0)
    }
  }

  #[derive(Default)]
  struct Sink {
    applied: Vec<(usize, String)>,
    commits: usize,
  }

  impl DecorationSink for Sink {
    fn clear_line_decorations(&mut self) {
      self.applied.clear();
      self.commits += 1;
    }

    fn apply_line_decoration(&mut self, line_start: usize, style: &str) {
      self.applied.push((line_start, style.to_string()));
    }
  }

  #[test]
  fn first_update_always_regenerates() {
    let host = TestHost::new("a\n  b");
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    assert!(scheduler.update(&host, ViewChange::empty()));
    assert!(scheduler.has_pending());
  }

  #[test]
  fn unchanged_state_is_a_no_op() {
    let host = TestHost::new("a\n  b");
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    scheduler.update(&host, ViewChange::empty());
    assert!(!scheduler.update(&host, ViewChange::empty()));
    assert!(!scheduler.update(&host, ViewChange::SELECTION));
    assert!(scheduler.update(&host, ViewChange::DOCUMENT));
    assert!(scheduler.update(&host, ViewChange::VIEWPORT));
  }

  #[test]
  fn unit_width_change_regenerates() {
    let mut host = TestHost::new("a\n  b");
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    scheduler.update(&host, ViewChange::empty());
    host.unit_width = 4;
    assert!(scheduler.update(&host, ViewChange::empty()));
  }

  #[test]
  fn cursor_moves_only_matter_with_highlighting() {
    let mut host = TestHost::new("a\n  b\n  c");
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    scheduler.update(&host, ViewChange::empty());
    host.cursor_line = 2;
    assert!(scheduler.update(&host, ViewChange::SELECTION));

    scheduler.reconfigure(GuidesConfig {
      highlight_active_block: false,
      ..GuidesConfig::default()
    });
    assert!(!scheduler.config().highlight_active_block);
    assert!(scheduler.update(&host, ViewChange::empty()));
    host.cursor_line = 3;
    assert!(!scheduler.update(&host, ViewChange::SELECTION));
  }

  #[test]
  fn measure_does_not_touch_committed_state() {
    let host = TestHost::new("a\n  b");
    let layout = CountingLayout::default();
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    scheduler.update(&host, ViewChange::empty());

    let cycle = scheduler.pending.pop_front().unwrap();
    let measured = scheduler.measure(&cycle, &layout);
    assert!(layout.reads.get() > 0);
    assert!(scheduler.decorations().is_empty());
    assert_eq!(scheduler.committed_cycle(), None);

    let mut sink = Sink::default();
    let reads = layout.reads.get();
    scheduler.commit(measured, &mut sink);
    assert_eq!(layout.reads.get(), reads);
    assert_eq!(sink.applied.len(), 1);
    assert_eq!(sink.applied[0].0, 2);
    assert_eq!(scheduler.committed_cycle(), Some(0));
  }

  #[test]
  fn every_queued_cycle_commits_in_order() {
    let mut host = TestHost::new("a\n  b");
    let layout = CountingLayout::default();
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    let mut sink = Sink::default();

    scheduler.update(&host, ViewChange::empty());
    host = TestHost::new("a\n  b\n    c");
    scheduler.update(&host, ViewChange::DOCUMENT);
    scheduler.flush(&layout, &mut sink);

    assert_eq!(sink.commits, 2);
    assert_eq!(scheduler.committed_cycle(), Some(1));
    assert_eq!(sink.applied.len(), 2);
    assert_eq!(scheduler.decorations().len(), 2);
    assert!(!scheduler.has_pending());
  }

  #[test]
  fn blank_lines_borrow_a_width_from_their_block() {
    let host = TestHost::new("a\n  b\n\n  c\n\t d");
    let layout = CountingLayout::default();
    let mut scheduler = GuideScheduler::new(GuidesConfig {
      marker_scope: MarkerScope::FullScope,
      ..GuidesConfig::default()
    });
    scheduler.update(&host, ViewChange::empty());
    let cycle = scheduler.pending.pop_front().unwrap();
    let levels: Vec<u32> = cycle.levels().values().map(|d| d.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 1, 2]);
    let widths = unit_widths(&cycle, &layout);
    assert_eq!(widths, vec![None, Some(10.0), Some(10.0), Some(10.0), None]);
  }

  #[test]
  fn leading_blank_lines_borrow_from_below() {
    let host = TestHost::new("\n  b");
    let layout = CountingLayout::default();
    let mut scheduler = GuideScheduler::new(GuidesConfig::default());
    scheduler.update(&host, ViewChange::empty());
    let cycle = scheduler.pending.pop_front().unwrap();
    assert_eq!(unit_widths(&cycle, &layout), vec![Some(10.0), Some(10.0)]);
  }
}
