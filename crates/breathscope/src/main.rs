use anyhow::Context;
use breathscope::chart::ChartConfig;
use breathscope::core::{logging, profiling};
use breathscope::dashboard::dashboard_chart_config;
use breathscope::{ReplayOptions, replay};
use clap::Parser;
use glam::Vec2;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "breathscope",
    version,
    about = "Replay recorded sensor payloads through the breath-rate dashboard chart",
    after_help = "Examples:
  breathscope --input session.jsonl                      Render chart.svg from a session
  breathscope --input session.jsonl --config chart.json  Use custom chart options
  breathscope --input session.jsonl --no-animation       Apply every update at once"
)]
struct Args {
    /// Recorded endpoint payloads, one JSON object per line
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Chart options as JSON (defaults to the dashboard's options)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Chart container width
    #[arg(long, default_value = "800")]
    width: f32,

    /// Chart container height
    #[arg(long, default_value = "200")]
    height: f32,

    /// Time between recorded payloads
    #[arg(long, default_value = "500", value_name = "MILLIS")]
    sample_ms: u64,

    /// Frame step used to drive animations
    #[arg(long, default_value = "16", value_name = "MILLIS")]
    frame_ms: u64,

    /// Where to write the rendered SVG
    #[arg(short, long, default_value = "chart.svg", value_name = "PATH")]
    out: PathBuf,

    /// Disable tweening and frame deferral
    #[arg(long)]
    no_animation: bool,

    /// Serve puffin profiling data while replaying
    #[arg(long)]
    profile: bool,

    /// Log filter directive, overriding RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    match &args.log {
        Some(directive) => logging::init_with_filter(directive),
        None => logging::init(),
    }

    if args.profile {
        profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp);
    }

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("failed to load chart config {}", path.display()))?,
        None => dashboard_chart_config(),
    };

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    let options = ReplayOptions {
        config,
        size: Vec2::new(args.width, args.height),
        sample_interval: Duration::from_millis(args.sample_ms),
        frame_interval: Duration::from_millis(args.frame_ms),
        animated: !args.no_animation,
    };
    let report = replay(BufReader::new(input), options)?;

    std::fs::write(&args.out, &report.svg)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    println!(
        "{} payloads: {} plotted, {} throttled, {} rejected, {} malformed",
        report.payloads, report.accepted, report.throttled, report.rejected, report.malformed
    );
    for (name, text) in &report.readouts {
        println!("  {name:<14}{text}");
    }
    println!("Chart written to {}", args.out.display());

    Ok(())
}
