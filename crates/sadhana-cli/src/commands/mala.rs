use std::path::Path;

use clap::Subcommand;
use sadhana_core::Config;
use serde_json::json;

#[derive(Subcommand)]
pub enum MalaAction {
    /// Count a number of beads and print the resulting counter state
    Count {
        /// Beads to count
        #[arg(long, default_value = "1")]
        taps: u64,
        /// Beads per round (overrides mala.target)
        #[arg(long)]
        target: Option<u32>,
        /// Print every round completion as it happens
        #[arg(long)]
        events: bool,
    },
}

pub fn run(action: MalaAction, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from(config_path)?;

    match action {
        MalaAction::Count {
            taps,
            target,
            events,
        } => {
            let mut mala = config.counter();
            if let Some(target) = target {
                mala.set_target(target);
            }
            for _ in 0..taps {
                let event = mala.increment();
                if events && event.is_completion() {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }

            let report = json!({
                "mantra": config.mala.mantra,
                "state": mala.snapshot(),
                "currentRound": mala.current_round(),
                "progressPct": mala.progress_pct().round(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
