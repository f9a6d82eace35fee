//! Indent level scanning.
//!
//! [`scan`] derives an [`IndentLevel`] for every visible line from nothing but
//! the width of its leading whitespace. Blank lines carry no whitespace signal
//! of their own and are resolved from their non-blank neighbours according to
//! the configured [`MarkerScope`]:
//!
//! - [`MarkerScope::FullScope`]: the larger level of the nearest non-blank line
//!   above and below. A neighbour missing on one side (top or bottom of the
//!   visible range) is ignored, with no neighbour at all the level is 0.
//! - [`MarkerScope::CodeOnly`]: always 0.
//!
//! Both neighbours are found with one forward and one backward pass, so a run
//! of blank lines never causes rescanning.
//!
//! # Active block
//!
//! With active-block highlighting on, the level `L` of the cursor line (or,
//! for a blank cursor line, of the nearest non-blank line, preferring the one
//! above on a tie) selects the block. The block grows up and down over
//! non-blank lines with level `>= L` and stops at the first non-blank line
//! below `L`. Blank lines neither stop nor extend the walk. Every line in the
//! resulting range whose own level is at least `L` is marked `active = L`.
//! Level 0 never produces an active marker.

use std::{
  collections::BTreeMap,
  num::NonZeroU32,
};

use crate::{
  config::MarkerScope,
  line::Line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndentLevel {
  /// Number of indentation scopes enclosing the line.
  pub level:  u32,
  /// The highlighted scope, always within `1..=level`.
  pub active: Option<NonZeroU32>,
}

impl IndentLevel {
  pub const fn new(level: u32) -> Self {
    Self {
      level,
      active: None,
    }
  }

  pub fn with_active(level: u32, active: u32) -> Self {
    debug_assert!(active <= level);
    Self {
      level,
      active: NonZeroU32::new(active),
    }
  }
}

/// Levels keyed by 1-based line number. Only visible lines have an entry.
pub type LevelMap = BTreeMap<usize, IndentLevel>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
  /// Columns per indent unit.
  pub indent_unit_width:      usize,
  /// Columns per tab stop.
  pub tab_width:              usize,
  /// 1-based line number of the primary cursor.
  pub cursor_line:            usize,
  pub highlight_active_block: bool,
  pub scope:                  MarkerScope,
}

/// Scan the visible `lines` (ordered by line number) into a level map.
pub fn scan(lines: &[Line], opts: &ScanOptions) -> LevelMap {
  debug_assert!(lines.windows(2).all(|w| w[0].number < w[1].number));

  let raw: Vec<Option<u32>> = lines
    .iter()
    .map(|line| {
      if line.is_blank() {
        None
      } else {
        Some(level_for_columns(
          line.indent_columns(opts.tab_width),
          opts.indent_unit_width,
        ))
      }
    })
    .collect();

  let prev = nearest_non_blank(&raw, Direction::Up);
  let next = nearest_non_blank(&raw, Direction::Down);

  let levels: Vec<u32> = raw
    .iter()
    .enumerate()
    .map(|(i, level)| {
      match (level, opts.scope) {
        (Some(level), _) => *level,
        (None, MarkerScope::CodeOnly) => 0,
        (None, MarkerScope::FullScope) => {
          let above = prev[i].and_then(|j| raw[j]);
          let below = next[i].and_then(|j| raw[j]);
          above.max(below).unwrap_or(0)
        },
      }
    })
    .collect();

  let active = if opts.highlight_active_block {
    active_block(lines, &raw, &levels, &prev, &next, opts.cursor_line)
  } else {
    None
  };

  lines
    .iter()
    .enumerate()
    .map(|(i, line)| {
      let level = levels[i];
      let descriptor = match &active {
        Some(block) if block.range.contains(&i) && level >= block.level => {
          IndentLevel::with_active(level, block.level)
        },
        _ => IndentLevel::new(level),
      };
      (line.number, descriptor)
    })
    .collect()
}

/// `columns / unit`, truncating. A zero unit width yields level 0.
pub fn level_for_columns(columns: usize, unit: usize) -> u32 {
  if unit == 0 {
    return 0;
  }
  u32::try_from(columns / unit).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
  Up,
  Down,
}

/// For every index, the index of the closest non-blank line strictly above
/// (or below) it.
fn nearest_non_blank(raw: &[Option<u32>], dir: Direction) -> Vec<Option<usize>> {
  let mut out = vec![None; raw.len()];
  let mut last = None;
  let mut visit = |i: usize| {
    out[i] = last;
    if raw[i].is_some() {
      last = Some(i);
    }
  };
  match dir {
    Direction::Up => (0..raw.len()).for_each(&mut visit),
    Direction::Down => (0..raw.len()).rev().for_each(&mut visit),
  }
  out
}

#[derive(Debug)]
struct ActiveBlock {
  level: u32,
  range: std::ops::RangeInclusive<usize>,
}

fn active_block(
  lines: &[Line],
  raw: &[Option<u32>],
  levels: &[u32],
  prev: &[Option<usize>],
  next: &[Option<usize>],
  cursor_line: usize,
) -> Option<ActiveBlock> {
  let cursor = lines.iter().position(|line| line.number == cursor_line)?;

  let anchor = if raw[cursor].is_some() {
    cursor
  } else {
    match (prev[cursor], next[cursor]) {
      (Some(above), Some(below)) if below - cursor < cursor - above => below,
      (Some(above), _) => above,
      (None, Some(below)) => below,
      (None, None) => return None,
    }
  };

  let level = raw[anchor]?;
  if level == 0 {
    return None;
  }

  let mut top = anchor;
  for i in (0..anchor).rev() {
    match raw[i] {
      None => continue,
      Some(l) if l >= level => top = i,
      Some(_) => break,
    }
  }

  let mut bottom = anchor;
  for (i, l) in raw.iter().enumerate().skip(anchor + 1) {
    match l {
      None => continue,
      Some(l) if *l >= level => bottom = i,
      Some(_) => break,
    }
  }

  let range = top.min(cursor)..=bottom.max(cursor);
  tracing::trace!(
    level,
    first = lines[*range.start()].number,
    last = lines[*range.end()].number,
    "active indent block"
  );
  debug_assert!(range.clone().all(|i| raw[i].is_none() || levels[i] >= level));

  Some(ActiveBlock { level, range })
}
