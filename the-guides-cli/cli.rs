use std::path::PathBuf;

use anyhow::{
  Result,
  bail,
};
use clap::{
  ArgAction,
  Parser,
};

#[derive(Clone, Debug)]
pub struct CliOptions {
  pub file:        PathBuf,
  pub config_file: Option<PathBuf>,
  pub cursor_line: usize,
  pub first_line:  usize,
  pub last_line:   Option<usize>,
  pub indent_unit: String,
  pub tab_width:   usize,
  pub char_width:  f32,
  pub stylesheet:  bool,
  pub verbosity:   u8,
  pub log_file:    Option<PathBuf>,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }
}

#[derive(Parser, Debug)]
#[command(name = "the-guides", about, long_about = None)]
struct RawCli {
  /// File to render indentation guides for
  #[arg(value_name = "FILE")]
  file: PathBuf,

  /// Load guide configuration from a TOML file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// 1-based line of the cursor
  #[arg(long = "cursor", value_name = "LINE", default_value_t = 1)]
  cursor_line: usize,

  /// First visible line (1-based)
  #[arg(long = "first", value_name = "LINE", default_value_t = 1)]
  first_line: usize,

  /// Last visible line (1-based, inclusive)
  #[arg(long = "last", value_name = "LINE")]
  last_line: Option<usize>,

  /// Indent unit; `\t` is accepted for a tab
  #[arg(long = "indent-unit", value_name = "STR", default_value = "  ")]
  indent_unit: String,

  /// Columns per tab stop
  #[arg(long = "tab-width", value_name = "N", default_value_t = 4)]
  tab_width: usize,

  /// Pixel width of one column
  #[arg(long = "char-width", value_name = "PX", default_value_t = 8.0)]
  char_width: f32,

  /// Print the theme stylesheet before the decorations
  #[arg(long = "stylesheet")]
  stylesheet: bool,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file instead of stderr
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,
}

impl TryFrom<RawCli> for CliOptions {
  type Error = anyhow::Error;

  fn try_from(raw: RawCli) -> Result<Self> {
    if raw.first_line == 0 || raw.cursor_line == 0 {
      bail!("line numbers start at 1");
    }
    if let Some(last) = raw.last_line {
      if last < raw.first_line {
        bail!("--last ({last}) is before --first ({})", raw.first_line);
      }
    }
    let indent_unit = raw.indent_unit.replace("\\t", "\t");
    if indent_unit.is_empty() {
      bail!("indent unit must not be empty");
    }

    Ok(Self {
      file: raw.file,
      config_file: raw.config_file,
      cursor_line: raw.cursor_line,
      first_line: raw.first_line,
      last_line: raw.last_line,
      indent_unit,
      tab_width: raw.tab_width,
      char_width: raw.char_width,
      stylesheet: raw.stylesheet,
      verbosity: raw.verbosity,
      log_file: raw.log_file,
    })
  }
}
