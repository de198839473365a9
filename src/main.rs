mod batch;
mod cli;
mod copier;
mod destination;
mod error;
mod extension;
mod prompt;
mod report;
mod scan;
#[cfg(test)]
mod testing;
mod ui;
mod wizard;

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use prompt::{InquirePrompter, Prompter};
use wizard::{Ending, Options, Wizard};

fn main() {
    let mut opts = Cli::parse();
    if let Some(Commands::Completions { shell }) = opts.command.take() {
        shell.generate(&mut Cli::command(), &mut std::io::stdout());
        return;
    }
    init_logging(&opts.log_level);

    let interrupt = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&interrupt);
    if let Err(err) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!("could not install the Ctrl+C handler: {err}");
    }

    let mut prompter = InquirePrompter;
    match run(&opts, &mut prompter, interrupt) {
        Ok(()) => {}
        Err(err) => match stopped_by_user(&err) {
            Some(error::Error::Interrupted) => ui::interrupted(),
            Some(_) => ui::escaped(),
            None => {
                tracing::error!("{err:#}");
                ui::unexpected_error(&err);
                pause(&mut prompter, opts.no_pause);
            }
        },
    }
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(
    opts: &Cli,
    prompter: &mut dyn Prompter,
    interrupt: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    ui::banner();
    let options = Options {
        source: opts.source.clone(),
        ask_on_overwrite: !opts.overwrite,
        quiet: !std::io::stdout().is_terminal(),
        interrupt,
    };
    let ending = Wizard::new(&mut *prompter, options, &extension::targets()).run()?;
    match ending {
        Ending::Cancelled => {}
        Ending::NothingFound => pause(prompter, opts.no_pause),
        Ending::Completed(summary) => {
            if let Some(path) = &opts.report {
                summary
                    .to_file(path)
                    .with_context(|| format!("saving report to \"{}\"", path.display()))?;
                ui::report_written(path);
            }
            pause(prompter, opts.no_pause);
        }
    }
    Ok(())
}

/// The Ctrl+C or Esc error behind `err`, if that is why the run ended.
fn stopped_by_user(err: &anyhow::Error) -> Option<&error::Error> {
    err.downcast_ref::<error::Error>().filter(|err| {
        matches!(err, error::Error::Interrupted | error::Error::Cancelled)
    })
}

/// Wait for Enter so the summary stays readable when launched from a file manager.
fn pause(prompter: &mut dyn Prompter, no_pause: bool) {
    if no_pause {
        return;
    }
    if let Err(err) = prompter.text("Press Enter to exit...", None) {
        tracing::debug!("final prompt ended early: {err}");
    }
}
