use anyhow::Result;
use cavern_core::{init_logging, Border, SimConfig, Telemetry};
use cavern_lib::app::{App, Control};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How to drive the simulation
    #[arg(short, long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Config file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "cavern.toml")]
    config: PathBuf,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    /// cellular | life | erosion | B../S.. rulestring
    #[arg(short, long)]
    rule: Option<String>,

    /// closed | open (overrides the rule's default)
    #[arg(long)]
    border: Option<Border>,

    #[arg(long)]
    seed: Option<u64>,

    /// Initial fill probability
    #[arg(long)]
    probability: Option<f64>,

    /// Generations to run
    #[arg(short, long, default_value_t = 10)]
    steps: u64,

    /// Milliseconds between generations in play mode
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop early once the grid stops changing
    #[arg(long)]
    until_stable: bool,

    /// Emit telemetry as JSON lines instead of drawing the grid
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Step as fast as possible, print the final map
    Headless,
    /// Step on a timer, redraw after every generation
    Play,
}

impl Args {
    fn apply_to(&self, config: &mut SimConfig) {
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if let Some(rule) = &self.rule {
            config.rule.kind = rule.clone();
        }
        if let Some(border) = self.border {
            config.rule.border = Some(border);
        }
        if let Some(seed) = self.seed {
            config.grid.seed = Some(seed);
        }
        if let Some(p) = self.probability {
            config.grid.fill_probability = p;
        }
        if let Some(interval) = self.interval_ms {
            config.scheduler.tick_interval_ms = interval;
        }
    }
}

fn emit_json(out: &mut impl Write, telemetry: &Telemetry) -> Result<()> {
    serde_json::to_writer(&mut *out, telemetry)?;
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = SimConfig::load(&args.config)?;
    args.apply_to(&mut config);
    config.validate()?;

    let mut app = App::new(config)?;
    app.max_generations = Some(args.steps);
    app.stop_when_stable = args.until_stable;

    let stdout = std::io::stdout();
    match args.mode {
        Mode::Headless => {
            let mut out = stdout.lock();
            if args.steps > 0 {
                app.apply(Control::Play)?;
            }
            while let Some(_report) = app.tick() {
                if args.json {
                    emit_json(&mut out, &app.engine.telemetry())?;
                }
            }
            if !args.json {
                write!(out, "{}", app.frame())?;
            }
        }
        Mode::Play => {
            let json = args.json;
            if args.steps > 0 {
                app.apply(Control::Play)?;
            }
            if !json {
                print!("\x1b[2J\x1b[H{}", app.frame());
            }
            app.run(|app, _report| {
                let mut out = stdout.lock();
                if json {
                    emit_json(&mut out, &app.engine.telemetry())?;
                } else {
                    write!(out, "\x1b[H{}", app.frame())?;
                }
                out.flush()?;
                Ok(())
            })
            .await?;
        }
    }

    tracing::info!(
        generation = app.engine.current_generation(),
        occupied = app.engine.occupied_count(),
        mean_step_us = app.metrics.mean_step_time().as_micros() as u64,
        "run complete"
    );
    Ok(())
}
