mod simulate;

use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use concierge_engine::Catalog;
use concierge_tui::TuiOptions;
use concierge_types::{FlowSettings, ReentryPolicy, TransitionDelays};
use concierge_util::{UserPreferences, default_log_path};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::simulate::SimulateArgs;

/// Book an appointment from the terminal.
#[derive(Parser, Debug)]
#[command(name = "concierge", version, about)]
struct Cli {
    /// Theme id or alias (dracula, nord)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Input while a step is loading: ignore or restart
    #[arg(long, global = true)]
    reentry: Option<ReentryPolicy>,

    /// Skip the loading delays between steps
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a booking without the TUI and print the final state as JSON
    Simulate(SimulateArgs),
    /// Print the services and time slots as JSON
    Catalog,
}

impl Cli {
    /// Saved flow settings with command-line overrides applied.
    fn flow_settings(&self, saved: FlowSettings) -> FlowSettings {
        let mut flow = saved;
        if let Some(reentry) = self.reentry {
            flow.reentry = reentry;
        }
        if self.instant {
            flow.delays = TransitionDelays::instant();
        }
        flow
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // The TUI owns the terminal, so its logs go to a file.
    init_tracing(cli.command.is_none())?;

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "preferences unavailable; using in-memory defaults");
        UserPreferences::ephemeral()
    });
    let flow = cli.flow_settings(preferences.flow_settings());

    match cli.command {
        None => {
            concierge_tui::run(TuiOptions {
                preferences: Arc::new(preferences),
                flow,
                catalog: Catalog::default(),
                theme: cli.theme,
            })
            .await
        }
        Some(Commands::Simulate(args)) => {
            let state = simulate::run(args, flow).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(())
        }
        Some(Commands::Catalog) => {
            println!("{}", serde_json::to_string_pretty(&Catalog::default())?);
            Ok(())
        }
    }
}

fn init_tracing(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if to_file {
        let path = default_log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open log file {}", path.display()))?;
        let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
    Ok(())
}
