//! Guide colors.
//!
//! Composite patterns never embed a color directly. They reference the CSS
//! variables below, and the host installs [`GuideColors::stylesheet`] once so
//! that light and dark themes resolve the variables to the configured values.

use serde::{
  Deserialize,
  Serialize,
};

use crate::compose::MarkerRole;

pub const NORMAL_COLOR_VAR: &str = "--indent-marker-bg-color";
pub const ACTIVE_COLOR_VAR: &str = "--indent-marker-active-bg-color";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
  Dark,
  Light,
}

impl Mode {
  /// Selector the host puts on the editor root for this mode.
  pub fn selector(self) -> &'static str {
    match self {
      Self::Dark => ".dark",
      Self::Light => ".light",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ColorPair {
  pub normal: String,
  pub active: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GuideColors {
  pub light: ColorPair,
  pub dark:  ColorPair,
}

impl Default for GuideColors {
  fn default() -> Self {
    Self {
      light: ColorPair {
        normal: "#F0F1F2".into(),
        active: "#E4E5E6".into(),
      },
      dark:  ColorPair {
        normal: "#2B3245".into(),
        active: "#3C445C".into(),
      },
    }
  }
}

impl GuideColors {
  pub fn pair(&self, mode: Mode) -> &ColorPair {
    match mode {
      Mode::Light => &self.light,
      Mode::Dark => &self.dark,
    }
  }

  pub fn stylesheet(&self) -> String {
    [Mode::Light, Mode::Dark]
      .into_iter()
      .map(|mode| {
        let pair = self.pair(mode);
        format!(
          "{} {{ {NORMAL_COLOR_VAR}: {}; {ACTIVE_COLOR_VAR}: {}; }}\n",
          mode.selector(),
          pair.normal,
          pair.active,
        )
      })
      .collect()
  }
}

pub fn color_var(role: MarkerRole) -> &'static str {
  match role {
    MarkerRole::Normal => NORMAL_COLOR_VAR,
    MarkerRole::Active => ACTIVE_COLOR_VAR,
  }
}
