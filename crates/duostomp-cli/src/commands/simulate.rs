//! Scenario simulator.
//!
//! Runs the pedal's main loop on a virtual clock: every cadence wait advances
//! the clock instead of sleeping, so a minute of playing finishes instantly
//! and always produces the same output.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use duostomp_config::PedalConfig;
use duostomp_pedal::{
    BankRack, CadenceStep, DisplayFrame, DisplaySink, Pedal, Settings, SimPlatform,
    TelemetrySink, TickSnapshot,
};
use duostomp_platform::PlatformController;

use crate::scenario::{MAX_DURATION_MS, Scenario, Script};

/// Run a scripted scenario through the control core.
#[derive(Args)]
pub struct SimulateArgs {
    /// Scenario TOML file
    pub scenario: PathBuf,

    /// Pedal config file (stock settings if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the scenario's duration in milliseconds
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DURATION_MS))
    )]
    pub duration: Option<u32>,

    /// Print the telemetry snapshot of every control tick
    #[arg(short, long)]
    pub telemetry: bool,
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let mut script = scenario.resolve()?;
    if let Some(duration) = args.duration {
        script.end_ms = duration;
    }

    let settings = match &args.config {
        Some(path) => {
            let config = PedalConfig::load_validated(path)?;
            tracing::info!(config = %config.name, path = %path.display(), "loaded config");
            config.settings
        }
        None => Settings::default(),
    };

    tracing::info!(
        scenario = %script.name,
        events = script.steps.len(),
        end_ms = script.end_ms,
        "starting simulation"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = simulate(&script, settings, args.telemetry, &mut out)?;

    tracing::info!(
        ticks = summary.ticks,
        writes = summary.writes,
        "simulation finished"
    );
    Ok(())
}

/// Totals of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Control ticks run.
    pub ticks: u32,
    /// Frames that differed from the one before.
    pub frames: u32,
    /// Parameter writes the rack received, boot included.
    pub writes: u32,
}

/// Remembers the last frame and flags changes.
struct FrameLog {
    last: DisplayFrame,
    changed: bool,
}

impl DisplaySink for FrameLog {
    fn show(&mut self, frame: &DisplayFrame) {
        if *frame != self.last {
            self.last = *frame;
            self.changed = true;
        }
    }
}

/// Holds the snapshot of the latest tick.
#[derive(Default)]
struct SnapshotLog {
    latest: Option<TickSnapshot>,
}

impl TelemetrySink for SnapshotLog {
    fn record(&mut self, snapshot: &TickSnapshot) {
        self.latest = Some(*snapshot);
    }
}

/// Runs `script` to its end time and writes frames (and snapshots) to `out`.
pub fn simulate<W: Write>(
    script: &Script,
    settings: Settings,
    telemetry: bool,
    out: &mut W,
) -> anyhow::Result<Summary> {
    let mut sim = SimPlatform::with_range(settings.raw_range());
    for change in &script.boot {
        change.apply(&mut sim);
    }
    let mut pedal = Pedal::boot(sim, BankRack::new(), settings);

    writeln!(
        out,
        "scenario: {} ({} ms, control tick every {} ms)",
        script.name,
        script.end_ms,
        settings.tick_period_ms()
    )?;

    let state = pedal.state();
    let mut frames = FrameLog {
        last: DisplayFrame::render(&state.slot1, &state.slot2),
        changed: false,
    };
    writeln!(out, "[{:>6} ms] boot", 0)?;
    writeln!(out, "{}", frames.last)?;

    let mut snapshots = SnapshotLog::default();
    let mut summary = Summary {
        ticks: 0,
        frames: 1,
        writes: 0,
    };
    let mut pending = script.steps.iter().peekable();

    loop {
        let now = pedal.platform().now_ms();
        if now >= script.end_ms {
            break;
        }

        while let Some(&&(at, change)) = pending.peek() {
            if at > now {
                break;
            }
            tracing::debug!(at_ms = at, ?change, "scenario event");
            change.apply(pedal.platform_mut());
            pending.next();
        }

        match pedal.step(&mut frames, &mut snapshots) {
            // A zero delay would stall the virtual clock
            CadenceStep::Wait(ms) => pedal.platform_mut().advance(ms.max(1)),
            CadenceStep::Tick => {
                summary.ticks += 1;
                if telemetry && let Some(snapshot) = snapshots.latest.take() {
                    writeln!(out, "{snapshot}")?;
                }
                if frames.changed {
                    frames.changed = false;
                    summary.frames += 1;
                    writeln!(out, "[{now:>6} ms]")?;
                    writeln!(out, "{}", frames.last)?;
                }
            }
        }
    }

    summary.writes = pedal.rack().total_writes();
    writeln!(
        out,
        "done: {} ticks, {} frames, {} parameter writes",
        summary.ticks, summary.frames, summary.writes
    )?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn run_toml(toml_str: &str, telemetry: bool) -> (Summary, String) {
        let script = Scenario::from_toml(toml_str).unwrap().resolve().unwrap();
        let mut out = Vec::new();
        let summary = simulate(&script, Settings::default(), telemetry, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn idle_pedal_prints_boot_frame_only() {
        let (summary, out) = run_toml("duration_ms = 3000", false);
        assert_eq!(summary.ticks, 9);
        assert_eq!(summary.frames, 1);
        assert!(out.contains("Revrb  ||    Sqr\nMix Sze||Mix    "));
        assert!(out.contains("done: 9 ticks, 1 frames"), "got:\n{out}");
    }

    #[test]
    fn press_cycles_slot2() {
        let (summary, out) = run_toml(
            r#"
duration_ms = 2000

[boot]
stomp_2 = true

[[events]]
at_ms = 100
action = { press = "cycle-2f" }
"#,
            false,
        );
        assert_eq!(summary.frames, 2);
        assert!(out.contains("LFO  ##||    Sqr\nRng Spd||Mix    "), "got:\n{out}");
    }

    #[test]
    fn telemetry_prints_one_line_per_tick() {
        let (summary, out) = run_toml("duration_ms = 1500", true);
        let lines = out.lines().filter(|l| l.starts_with("tick=")).count();
        assert_eq!(lines as u32, summary.ticks);
    }
}
