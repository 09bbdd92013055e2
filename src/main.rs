mod replay;
mod watch;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::{Args, Parser, Subcommand};
use scene::{Scene, SceneConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fleetview", about = "Fleet and matchmaking visualization console")]
struct Cli {
    /// Fixed layout seed; unset seeds from the OS.
    #[arg(long, env = "FLEETVIEW_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed recorded messages through the scene and print the final summary.
    Replay(ReplayArgs),
    /// Follow a live websocket stream until ctrl-c or close.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "JSON lines file, or - for stdin")]
    input: String,

    #[arg(long, default_value_t = 100, help = "Simulated milliseconds between lines")]
    step_ms: u64,

    #[arg(long, default_value_t = 60_000, help = "Simulated time allowed for animations to finish")]
    settle_ms: u64,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(long, env = "FLEETVIEW_URL")]
    url: String,

    #[arg(long, default_value_t = 5)]
    poll_secs: u64,

    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = SceneConfig::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let scene = Scene::new(config);

    match cli.command {
        Command::Replay(args) => run_replay(scene, &args),
        Command::Watch(args) => watch::run(scene, &args).await,
    }
}

fn run_replay(mut scene: Scene, args: &ReplayArgs) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).map_err(|source| CliError::Open { path: args.input.clone(), source })?;
        Box::new(BufReader::new(file))
    };

    let stats = replay::replay_lines(&mut scene, reader, args.step_ms)?;
    let settled = replay::settle(&mut scene, args.step_ms, args.settle_ms);
    tracing::info!(
        lines = stats.lines,
        ingested = stats.ingested,
        skipped = stats.skipped,
        failures = stats.failures,
        settled,
        "replay complete"
    );

    let rendered = serde_json::to_string_pretty(&scene.summary())?;
    println!("{rendered}");
    Ok(())
}
