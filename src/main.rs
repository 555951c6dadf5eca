use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use airdraw::auth::{LandmarkDetector, NoHands};
use airdraw::io::{DirectorySink, DirectorySource, FrameSink, FrameSource, ReplayLandmarks};
use airdraw::{Config, ManualClock, Session};

#[derive(Parser)]
#[command(name = "airdraw")]
#[command(about = "Gesture-locked hand tracking over a sequence of frames")]
struct Cli {
    /// Directory of input frames (read in file-name order)
    #[arg(value_name = "FRAMES")]
    frames: PathBuf,

    /// Write annotated frames to this directory (must be empty)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Recorded hand landmarks, one hand per line
    #[arg(long, value_name = "FILE")]
    landmarks: Option<PathBuf>,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Time between frames for the gesture timers
    #[arg(long, default_value_t = 33)]
    frame_interval_ms: u64,

    /// Do not flip authentication frames horizontally
    #[arg(long)]
    no_mirror: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Cli, stop: Arc<AtomicBool>) -> anyhow::Result<()> {
    let mut source = DirectorySource::open(&args.frames)?;
    info!(frames = source.len(), "loaded frame directory");

    let detector: Box<dyn LandmarkDetector> = match &args.landmarks {
        Some(path) => {
            let replay = ReplayLandmarks::from_file(path)?;
            info!(frames = replay.frame_count(), "loaded landmark replay");
            Box::new(replay)
        }
        None => {
            warn!("no landmark source given, gesture entry cannot progress");
            Box::new(NoHands)
        }
    };

    let mut sink = match args.output {
        Some(dir) => Some(DirectorySink::create(dir)?),
        None => None,
    };

    // Recorded frames carry no timestamps; time advances by a fixed interval.
    let config = Config::default().with_mirror(!args.no_mirror);
    let mut session = Session::with_clock(config, detector, ManualClock::new());
    if let Some(dir) = args.debug_out {
        session = session.with_debug(dir)?;
    }
    let interval = Duration::from_millis(args.frame_interval_ms);

    while let Some(frame) = source.next_frame()? {
        if stop.load(Ordering::Relaxed) {
            info!("interrupted, stopping between frames");
            break;
        }
        let annotated = session.process(frame)?;
        if let Some(sink) = sink.as_mut() {
            sink.present(&annotated)?;
        }
        session.clock().advance(interval);
    }

    let status = session.status();
    println!("\n=== Session Summary ===");
    println!("Session: {}", status.id);
    println!("Frames processed: {}", status.frames);
    println!("Final state: {}", status.state.as_str());
    if let Some(p) = status.last_prediction {
        println!("Last tracked point: ({}, {})", p.x, p.y);
    }
    println!("Trajectory length: {}", status.trajectory_len);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let stop = Arc::new(AtomicBool::new(false));
    let watcher = {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.store(true, Ordering::Relaxed);
            }
        })
    };

    let result = tokio::task::spawn_blocking(move || run(args, stop)).await?;
    watcher.abort();
    result
}
