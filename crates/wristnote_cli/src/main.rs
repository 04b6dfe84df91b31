//! Line-protocol harness for the notification pipeline.
//!
//! # Responsibility
//! - Feed stdin lines to the dispatcher and write diagnostics to stdout.
//! - Optionally render each presented notification as text on stderr.

mod console;

use clap::Parser;
use console::{ConsoleHaptics, ConsoleMusic, ConsoleScheduler, TextCanvas};
use log::{error, info};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use wristnote_core::{
    DeviceHandles, Dispatcher, MemoryNotificationStore, MonospaceWrap, NotificationApp,
    NotifyConfig,
};

#[derive(Debug, Parser)]
#[command(name = "wristnote", version, about = "Watch notification pipeline harness")]
struct Args {
    /// JSON file overriding display geometry and timings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value_t = wristnote_core::default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logs go to stderr otherwise.
    #[arg(long)]
    log_dir: Option<String>,

    /// Render each notification the dispatcher presents.
    #[arg(long)]
    render: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let logging = match &args.log_dir {
        Some(dir) => wristnote_core::init_logging(&args.log_level, dir),
        None => wristnote_core::init_stderr_logging(&args.log_level),
    };
    if let Err(err) = logging {
        eprintln!("wristnote: logging disabled: {err}");
    }

    let config = match &args.config {
        Some(path) => match NotifyConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("event=config_load module=cli status=error error={err}");
                eprintln!("wristnote: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => NotifyConfig::default(),
    };

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_failed module=cli status=error error={err}");
            eprintln!("wristnote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: NotifyConfig) -> io::Result<()> {
    let scheduler = Arc::new(ConsoleScheduler::default());
    let device = DeviceHandles::new(
        Arc::new(ConsoleHaptics),
        scheduler.clone(),
        Arc::new(ConsoleMusic),
    );
    let store = MemoryNotificationStore::new();
    let oracle = Arc::new(MonospaceWrap::default());

    let dispatcher = Dispatcher::new(store.clone(), device.clone(), config.clone());
    let mut app = NotificationApp::new(store, device, oracle, config);
    let mut canvas = TextCanvas::default();

    info!(
        "event=session_start module=cli status=ok version={} render={}",
        wristnote_core::core_version(),
        args.render
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = dispatcher.run_with_hook(stdin.lock(), BufWriter::new(stdout.lock()), |_| {
        if !scheduler.take_switch_request() || !args.render {
            return;
        }
        if let Err(err) = app.foreground(&mut canvas) {
            error!("event=render module=cli status=error error={err}");
        }
    })?;

    app.background();
    eprintln!(
        "wristnote: lines={} commands={} infos={} errors={}",
        stats.lines, stats.commands, stats.infos, stats.errors
    );
    Ok(())
}
