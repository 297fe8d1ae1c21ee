use std::path::Path;
use std::time::Duration;

use clap::Subcommand;
use sadhana_core::timer::{format_clock, minutes_to_secs, PRESET_MINUTES};
use sadhana_core::{Config, CountdownTimer, Event, TimerCommand, TimerPhase};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a sitting: prints one JSON event per line, reads commands
    /// (pause, resume, stop) from stdin
    Run {
        /// Duration in minutes (overrides meditation.duration_min)
        #[arg(long, conflicts_with = "seconds")]
        minutes: Option<u64>,
        /// Duration in seconds
        #[arg(long)]
        seconds: Option<u64>,
        /// Milliseconds between ticks (overrides meditation.tick_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// List the preset durations in minutes
    Presets,
    /// Format seconds as MM:SS
    Format {
        secs: u64,
    },
}

pub fn run(action: TimerAction, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            minutes,
            seconds,
            interval_ms,
        } => {
            let config = Config::load_from(config_path)?;
            let mut timer = config.timer();
            if let Some(minutes) = minutes {
                timer.set_duration_minutes(minutes);
            } else if let Some(seconds) = seconds {
                timer.set_duration(seconds);
            }
            let interval = interval_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or_else(|| config.tick_interval());

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let timer = runtime.block_on(run_sitting(timer, interval));
            // The stdin reader blocks on a pool thread that cannot be
            // cancelled; do not wait for it.
            runtime.shutdown_background();
            let timer = timer?;

            println!("{}", serde_json::to_string(&timer.snapshot())?);
        }
        TimerAction::Presets => {
            let presets: Vec<_> = PRESET_MINUTES
                .iter()
                .map(|&m| {
                    serde_json::json!({
                        "minutes": m,
                        "clock": format_clock(minutes_to_secs(m)),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&presets)?);
        }
        TimerAction::Format { secs } => {
            println!("{}", format_clock(secs));
        }
    }
    Ok(())
}

fn emit(event: Option<Event>) -> Result<(), serde_json::Error> {
    if let Some(event) = event {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

/// Drive the timer until it completes or is stopped.
///
/// This loop is the tick source: it only schedules ticks while the timer is
/// running, and a resume restarts the interval so the first tick after a
/// pause is a full period away.
async fn run_sitting(
    mut timer: CountdownTimer,
    interval: Duration,
) -> Result<CountdownTimer, Box<dyn std::error::Error>> {
    emit(timer.start())?;
    info!(
        duration = %format_clock(timer.total_secs()),
        interval = ?interval,
        "sitting started"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval fires immediately.
    ticker.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick(), if timer.is_running() => {
                emit(timer.tick())?;
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match line.parse::<TimerCommand>() {
                        Ok(TimerCommand::Tick) => warn!("ticks come from the timer loop; ignoring"),
                        Ok(command) => {
                            let event = timer.apply(command);
                            if command == TimerCommand::Resume && event.is_some() {
                                ticker.reset();
                            }
                            emit(event)?;
                        }
                        Err(e) => warn!("{e}"),
                    },
                    None => {
                        stdin_open = false;
                        // Nothing can resume a paused sitting once input is gone.
                        if !timer.is_running() {
                            info!("stdin closed while paused");
                            emit(timer.stop())?;
                        }
                    }
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                emit(timer.stop())?;
            }
        }

        match timer.phase() {
            TimerPhase::Completed | TimerPhase::Idle => break,
            TimerPhase::Running | TimerPhase::Paused => {}
        }
    }

    Ok(timer)
}
