use std::{
  fs,
  io,
  path::{
    Path,
    PathBuf,
  },
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::theme::GuideColors;

/// How blank (empty or whitespace-only) lines get their level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerScope {
  /// A blank line takes the larger level of the nearest non-blank lines
  /// above and below it, so guides run through gaps inside a block.
  FullScope,
  /// A blank line is level 0, so guides stop at the last line of code.
  CodeOnly,
}

impl Default for MarkerScope {
  fn default() -> Self {
    Self::FullScope
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GuidesConfig {
  pub hide_outermost:         bool,
  pub highlight_active_block: bool,
  pub marker_scope:           MarkerScope,
  /// Stripe width in pixels.
  pub thickness:              f32,
  pub colors:                 GuideColors,
}

impl Default for GuidesConfig {
  fn default() -> Self {
    Self {
      hide_outermost:         false,
      highlight_active_block: true,
      marker_scope:           MarkerScope::FullScope,
      thickness:              1.0,
      colors:                 GuideColors::default(),
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error(transparent)]
  Parse(#[from] toml::de::Error),
}

impl GuidesConfig {
  pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(contents)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| {
      ConfigError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml_str(&contents)
  }

  /// Stripe thickness with nonsense values clamped away. Negative and NaN
  /// thicknesses draw nothing instead of failing the pipeline.
  pub fn thickness(&self) -> f32 {
    if self.thickness.is_nan() || self.thickness < 0.0 {
      tracing::warn!(thickness = self.thickness, "clamping indent guide thickness to 0");
      0.0
    } else {
      self.thickness
    }
  }
}
