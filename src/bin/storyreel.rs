use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storyreel::{
    Millis, PanelPose, Progress, ScrollFrame, Showcase, ShowcaseKind, Stage,
    StageConfig, StepCount, StoryboardGenerator as _, StoryboardOutput, TimerQueue, Wakeup,
    step_for_progress,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the phase transitions of one showcase as JSON lines.
    Timeline(TimelineArgs),
    /// Print the workflow step and panel poses for scroll progress values.
    Steps(StepsArgs),
    /// Scroll the landing page down and back up, printing frame styles as JSON lines.
    Simulate(SimulateArgs),
    /// Turn a novel excerpt into a storyboard (simulated when no API key is set).
    Storyboard(StoryboardArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Showcase to run.
    #[arg(long)]
    showcase: ShowcaseKind,

    /// Stop after this many milliseconds.
    #[arg(long, default_value_t = 20_000)]
    until: u64,

    /// Stage config JSON with timing overrides.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Number of steps (defaults to the configured workflow steps).
    #[arg(long)]
    steps: Option<usize>,

    /// Scroll progress values in [0, 1].
    #[arg(long, num_args = 1.., required = true)]
    progress: Vec<f64>,

    /// Stage config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Stage config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Length of the down-and-up sweep in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    duration: u64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport_h: f64,
}

#[derive(Parser, Debug)]
struct StoryboardArgs {
    /// Novel excerpt (UTF-8 text file).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the model text instead of parsed scenes.
    #[arg(long)]
    raw: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Steps(args) => cmd_steps(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Storyboard(args) => cmd_storyboard(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StageConfig> {
    match path {
        Some(p) => StageConfig::load(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(StageConfig::default()),
    }
}

fn emit(out: &mut impl std::io::Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value).context("serialize output")?;
    writeln!(out).context("write output")?;
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut show = Showcase::new(args.showcase, cfg.holds(args.showcase))
        .with_context(|| format!("build showcase '{}'", args.showcase))?;

    let mut out = std::io::stdout().lock();
    let mut queue: TimerQueue<Wakeup> = TimerQueue::new();
    if let Some(entered) = show.activate(Millis::ZERO, &mut queue) {
        emit(&mut out, &entered)?;
    }
    while let Some(fired) = queue.pop_until(Millis(args.until)) {
        if let Some(entered) = show.fire(fired.payload, fired.at, &mut queue) {
            emit(&mut out, &entered)?;
        }
    }
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let steps = match args.steps {
        Some(n) => StepCount::new(n).context("invalid --steps")?,
        None => cfg.workflow_steps,
    };

    let mut out = std::io::stdout().lock();
    for p in args.progress {
        let progress = Progress::new(p);
        let step = step_for_progress(progress, steps);
        let poses: Vec<PanelPose> = (0..steps.get())
            .map(|i| PanelPose::target(i, step))
            .collect();
        emit(
            &mut out,
            &serde_json::json!({ "progress": progress, "step": step, "poses": poses }),
        )?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let cfg = load_config(args.config.as_deref())?;
    let mut stage = Stage::landing(cfg, args.viewport_h).context("build stage")?;
    let max_scroll = (stage.layout().page_height() - args.viewport_h).max(0.0);

    let frame_ms = (1000 / u64::from(args.fps)).max(1);
    let half = (args.duration / 2).max(1) as f64;
    let mut out = std::io::stdout().lock();
    let mut t = 0;
    while t <= args.duration {
        let sweep = t as f64 / half;
        let y = max_scroll * if sweep <= 1.0 { sweep } else { 2.0 - sweep };
        let styles = stage.frame(Millis(t), ScrollFrame::new(y.max(0.0), args.viewport_h));
        emit(&mut out, &styles)?;
        t += frame_ms;
    }
    stage.unmount();
    Ok(())
}

fn cmd_storyboard(args: StoryboardArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let config = storyreel::GeneratorConfig::from_env();
    let generator = storyreel::generator_from_config(&config).context("build storyboard client")?;
    let output = generator
        .generate(&text, !args.raw)
        .context("generate storyboard")?;

    let mut out = std::io::stdout().lock();
    match output {
        StoryboardOutput::Structured(board) => emit(&mut out, &board)?,
        StoryboardOutput::Raw(raw) => writeln!(out, "{raw}").context("write output")?,
    }
    Ok(())
}
