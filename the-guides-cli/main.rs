use std::{
  fs::File,
  io::{
    self,
    BufReader,
    Write,
  },
  path::PathBuf,
};

use anyhow::{
  Context,
  Result,
};
use ropey::Rope;
use the_guides::{
  GuideScheduler,
  GuidesConfig,
  ViewChange,
};

use crate::{
  cli::CliOptions,
  view::{
    CollectSink,
    TextView,
  },
};

mod cli;
mod view;

fn main() -> Result<()> {
  let opts = CliOptions::parse()?;
  setup_logging(opts.verbosity, opts.log_file.clone()).context("failed to initialize logging")?;

  let config = match &opts.config_file {
    Some(path) => GuidesConfig::load(path)?,
    None => GuidesConfig::default(),
  };
  log::debug!("guide config: {config:?}");

  let file = File::open(&opts.file)
    .with_context(|| format!("failed to open {}", opts.file.display()))?;
  let text = Rope::from_reader(BufReader::new(file))
    .with_context(|| format!("failed to read {}", opts.file.display()))?;

  let mut view = TextView::new(text, opts.indent_unit, opts.tab_width, opts.char_width);
  view.scroll_to(opts.first_line, opts.last_line);
  view.set_cursor_line(opts.cursor_line);

  let stylesheet = config.colors.stylesheet();
  let mut scheduler = GuideScheduler::new(config);
  let mut sink = CollectSink::default();
  if scheduler.update(&view, ViewChange::DOCUMENT | ViewChange::VIEWPORT) {
    scheduler.flush(&view, &mut sink);
  }

  let stdout = io::stdout();
  let mut out = stdout.lock();
  if opts.stylesheet {
    write!(out, "{stylesheet}")?;
  }
  for (line_start, style) in &sink.decorations {
    writeln!(out, "{}\t{}", view.line_of(*line_start), style)?;
  }
  Ok(())
}

fn setup_logging(verbosity: u8, log_file: Option<PathBuf>) -> Result<()> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _3_or_more => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .level(level)
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    });

  let dispatch = match log_file {
    Some(path) => dispatch.chain(fern::log_file(path)?),
    None => dispatch.chain(io::stderr()),
  };
  dispatch.apply()?;
  Ok(())
}
