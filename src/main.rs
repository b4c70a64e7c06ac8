//! Replay a scripted sensor trace against a simulated player.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use motion_playback::{
    config::{Config, EXAMPLE_CONFIG},
    player::PlayerCall,
    replay::{replay, Trace, DEMO_TRACE},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sensor trace to replay (YAML); the built-in demo runs when omitted
    #[arg(short, long)]
    trace: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Rotation threshold override, in radians
    #[arg(long)]
    rotation_threshold: Option<f64>,

    /// Distance threshold override, in meters
    #[arg(long)]
    distance_threshold: Option<f64>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(threshold) = args.rotation_threshold {
        config.orientation.rotation_threshold = threshold;
    }
    if let Some(threshold) = args.distance_threshold {
        config.location.distance_threshold_m = threshold;
    }
    config.validate().context("invalid configuration")?;

    let trace = match &args.trace {
        Some(path) => {
            info!("Loading trace from: {}", path);
            Trace::from_file(path).with_context(|| format!("failed to load trace {path}"))?
        }
        None => {
            info!("No trace given, replaying the built-in demo");
            Trace::from_yaml(DEMO_TRACE)?
        }
    };

    let report = replay(&trace, &config)?;

    for call in &report.calls {
        match call {
            PlayerCall::Play => println!("play"),
            PlayerCall::Pause => println!("pause"),
            PlayerCall::Seek(to) => println!("seek {:.1}s", to.as_secs_f64()),
            PlayerCall::SetVolume(volume) => println!("volume {volume:.2}"),
        }
    }
    println!(
        "final: {} volume {:.2} at {:.1}s ({} tilt/turn, {} move, {} shake events)",
        if report.state.is_playing() { "playing" } else { "paused" },
        report.state.volume(),
        report.position.as_secs_f64(),
        report.orientation_events,
        report.displacement_events,
        report.shake_events,
    );

    Ok(())
}
