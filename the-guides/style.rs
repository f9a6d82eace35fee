//! Serialization of [`GuidePattern`]s into a line style attribute.
//!
//! Each layer becomes one CSS background layer:
//!
//! ```text
//! repeating-linear-gradient(to right, var(COLOR) 0 Tpx, transparent Tpx Wpx) Xpx 0 / Spx 100% no-repeat
//! ```
//!
//! where `W` is the indent unit width, `X` the offset of the first column and
//! `S` the covered span minus [`SEAM_EPSILON`].

use crate::{
  compose::{
    GuideLayer,
    GuidePattern,
  },
  theme::color_var,
};

/// Shaved off every layer's span so rounding never leaks a stripe into the
/// next column.
pub const SEAM_EPSILON: f32 = 1.0;

/// Serialize a single layer.
pub fn layer_to_css(layer: &GuideLayer, unit_width: f32, thickness: f32) -> String {
  let offset = layer.column_start as f32 * unit_width;
  let span = (layer.column_count as f32 * unit_width - SEAM_EPSILON).max(0.0);
  format!(
    "repeating-linear-gradient(to right, var({color}) 0 {thickness}px, transparent {thickness}px \
     {unit_width}px) {offset}px 0 / {span}px 100% no-repeat",
    color = color_var(layer.role),
  )
}

/// The layers of `pattern`, comma joined, or `None` when there is nothing to
/// draw.
pub fn background(pattern: &GuidePattern) -> Option<String> {
  if pattern.is_empty() {
    return None;
  }
  let mut out = String::new();
  for (i, layer) in pattern.layers.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    out.push_str(&layer_to_css(layer, pattern.unit_width, pattern.thickness));
  }
  Some(out)
}

/// The complete style attribute for a line.
pub fn to_style(pattern: &GuidePattern) -> Option<String> {
  let background = background(pattern)?;
  Some(format!("background: {background};"))
}
