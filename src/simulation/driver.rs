//! Driving loop shared by the viewer and the headless runner
//!
//! The core never repairs a broken state. Here a failed step or a state
//! containing NaN/inf either resets the scenario to its initial layout or
//! stops the run, depending on `Engine::reset_on_non_finite`.

use anyhow::{bail, Result};
use log::{debug, info, warn};

use crate::simulation::scenario::Scenario;

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced { guarded_pairs: usize, guarded_particles: usize },
    Reset { reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub resets: u64,
    pub guarded_pairs: usize,
    pub guarded_particles: usize,
}

/// Advance the scenario once, applying the recovery rule
pub fn drive_one(scenario: &mut Scenario) -> Result<StepOutcome> {
    let tick = scenario.system.tick;
    let reason = match scenario.step() {
        Ok(report) if scenario.system.is_finite() => {
            if !report.is_clean() {
                debug!("tick {tick}: guarded {} pairs, {} particles", report.guarded_pairs, report.guarded_particles);
            }
            return Ok(StepOutcome::Advanced {
                guarded_pairs: report.guarded_pairs,
                guarded_particles: report.guarded_particles,
            });
        }
        Ok(_) => format!("state became non-finite at tick {tick}"),
        Err(e) => format!("step failed at tick {tick}: {e}"),
    };

    if !scenario.engine.reset_on_non_finite {
        bail!(reason);
    }
    warn!("{reason}, resetting to the initial layout");
    scenario.reset();
    Ok(StepOutcome::Reset { reason })
}

/// Run `steps` steps without a window
pub fn run_headless(scenario: &mut Scenario, steps: u64) -> Result<RunSummary> {
    info!("run_headless: {} particles, {steps} steps", scenario.system.len());

    let mut summary = RunSummary::default();
    for _ in 0..steps {
        match drive_one(scenario)? {
            StepOutcome::Advanced { guarded_pairs, guarded_particles } => {
                summary.guarded_pairs += guarded_pairs;
                summary.guarded_particles += guarded_particles;
            }
            StepOutcome::Reset { .. } => summary.resets += 1,
        }
        summary.steps += 1;
    }

    info!(
        "run_headless: done, {} resets, {} guarded pairs, {} guarded particles",
        summary.resets, summary.guarded_pairs, summary.guarded_particles
    );
    Ok(summary)
}
