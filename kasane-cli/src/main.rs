//! Interactive driver for the kasane session converter.
//!
//! Reads commands from stdin, feeds typed text through a demo composer and
//! engine, and prints the output record after each operation.

mod demo;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use kasane_session::config::Settings;
use kasane_session::core::output::{Annotation, CandidateWindow, Output};
use kasane_session::{Composer as _, SessionConverter, logging};
use tracing::debug;

use demo::{DemoEngine, SimpleComposer};

/// Interactive driver for the kasane session converter
#[derive(Parser, Debug)]
#[command(name = "kasane")]
#[command(about = "Drive the session converter from a terminal", long_about = None)]
struct Args {
    /// Increase verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log to stderr instead of the log file
    #[arg(long)]
    logtostderr: bool,

    /// Disable ANSI colors in stderr logging
    #[arg(long)]
    no_colored_log: bool,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Settings file to load instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

const HELP: &str = "\
commands:
  <text>       append text to the composition (suggests as you type)
  :convert     start conversion         :predict    show predictions
  :next/:prev  move candidate focus     :npage/:ppage  page through
  :right/:left move segment focus       :first/:last   jump segments
  :expand/:shrink  resize the focused segment
  :kana        cycle kana types         :half       to half width
  :pick N      commit suggestion N      :id N       focus candidate id N
  :commit      commit everything        :commitfirst   commit 1st segment
  :preedit     commit the raw preedit   :head N     commit first N chars
  :cancel      back to composition      :reset      clear everything
  :help        this text                :quit       exit";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load().context("failed to load settings")?,
    };

    logging::set_config_verbose_level(settings.log.verbose_level);
    let mut log_options = settings.log_options();
    log_options.verbose_level = args.verbose as i32;
    if args.logtostderr {
        log_options.logtostderr = true;
    }
    if args.no_colored_log {
        log_options.colored_log = false;
    }
    if let Some(dir) = &args.log_dir {
        log_options.log_dir = Some(dir.clone());
    }
    let argv0 = std::env::args().next().unwrap_or_else(|| "kasane".into());
    let _log_guard = logging::init(&argv0, &log_options).context("failed to set up logging")?;

    let mut converter = SessionConverter::new(Arc::new(DemoEngine::new()));
    converter.set_conversion_preferences(settings.conversion_preferences());
    converter.set_operation_preferences(settings.operation_preferences());
    let mut composer = SimpleComposer::new();

    println!("{HELP}");
    repl(&mut converter, &mut composer)
}

fn repl(converter: &mut SessionConverter, composer: &mut SimpleComposer) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == ":quit" {
            return Ok(());
        }
        if !dispatch(line, converter, composer) {
            continue;
        }
        print_output(&converter.pop_output(Some(&*composer)));
    }
}

/// Apply one command. Returns false when no output should be printed.
fn dispatch(line: &str, converter: &mut SessionConverter, composer: &mut SimpleComposer) -> bool {
    debug!("command: {line}");
    match line {
        ":help" => {
            println!("{HELP}");
            return false;
        }
        ":convert" => {
            converter.convert(composer);
        }
        ":predict" => {
            converter.predict(composer);
        }
        ":next" => converter.candidate_next(composer),
        ":prev" => converter.candidate_prev(),
        ":npage" => converter.candidate_next_page(),
        ":ppage" => converter.candidate_prev_page(),
        ":right" => converter.segment_focus_right(),
        ":left" => converter.segment_focus_left(),
        ":first" => converter.segment_focus_left_edge(),
        ":last" => converter.segment_focus_last(),
        ":expand" => converter.segment_width_expand(),
        ":shrink" => converter.segment_width_shrink(),
        ":kana" => {
            converter.switch_kana_type(composer);
        }
        ":half" => {
            converter.convert_to_half_width(composer);
        }
        ":commit" => {
            converter.commit();
            if converter.result().is_some() {
                composer.reset();
            }
        }
        ":commitfirst" => converter.commit_first_segment(composer),
        ":preedit" => {
            converter.commit_preedit(composer);
            composer.reset();
        }
        ":cancel" => converter.cancel(),
        ":reset" => {
            converter.reset();
            composer.reset();
        }
        _ => {
            if let Some(rest) = line.strip_prefix(":pick ") {
                match rest.trim().parse() {
                    Ok(index) => {
                        converter.commit_suggestion(index);
                        if converter.result().is_some() {
                            composer.reset();
                        }
                    }
                    Err(_) => {
                        println!("usage: :pick <page index>");
                        return false;
                    }
                }
            } else if let Some(rest) = line.strip_prefix(":id ") {
                match rest.trim().parse() {
                    Ok(id) => converter.candidate_move_to_id(id, composer),
                    Err(_) => {
                        println!("usage: :id <candidate id>");
                        return false;
                    }
                }
            } else if let Some(rest) = line.strip_prefix(":head ") {
                match rest.trim().parse() {
                    Ok(count) => converter.commit_head(count, composer),
                    Err(_) => {
                        println!("usage: :head <count>");
                        return false;
                    }
                }
            } else if line.starts_with(':') {
                println!("unknown command: {line} (:help for help)");
                return false;
            } else {
                composer.push_str(line);
                converter.suggest(composer);
            }
        }
    }
    true
}

fn print_window(window: &CandidateWindow, indent: &str) {
    for row in &window.candidates {
        let marker = if window.focused_index == Some(row.index) {
            ">"
        } else {
            " "
        };
        let shortcut = row
            .shortcut
            .map(|c| format!("{c}:"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{indent}{marker} {shortcut}{}", row.value);
    }
    if window.total_pages > 1 {
        println!(
            "{indent}  page {}/{}",
            window.current_page + 1,
            window.total_pages
        );
    }
    if let Some(cascade) = &window.subcandidates {
        println!("{indent}  --");
        print_window(cascade, &format!("{indent}  "));
    }
    if let Some(usages) = &window.usages {
        for usage in &usages.candidates {
            let description = usage.description.as_deref().unwrap_or("");
            println!("{indent}  * {}: {description}", usage.value);
        }
    }
}

fn print_output(output: &Output) {
    if let Some(result) = &output.result {
        println!("committed: {} ({})", result.value, result.key);
    }
    if let Some(preedit) = &output.preedit {
        let rendered: String = preedit
            .segments
            .iter()
            .map(|segment| match segment.annotation {
                Annotation::Highlight => format!("[{}]", segment.value),
                Annotation::Underline => segment.value.clone(),
            })
            .collect();
        println!("preedit: {rendered}");
    }
    if let Some(window) = &output.candidates {
        print_window(window, "  ");
    }
}
