//! Clock polling background task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that polls the clock while it runs and parks while paused.
///
/// Remaining time comes from the absolute end instant, so a delayed or
/// skipped tick needs no catch-up; the next one simply reads the right value.
pub async fn clock_ticker_task(state: Arc<AppState>) {
    info!("Starting clock ticker task ({:?} interval)", state.poll_interval);

    let mut running_rx = state.running_tx.subscribe();

    loop {
        // Nothing changes while paused, so wait for the clock to start
        if !*running_rx.borrow_and_update() {
            debug!("Clock paused, ticker parked");
            if running_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Clock running, ticker polling");
        let mut ticks = interval(state.poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match state.tick() {
                        Ok(Some(report)) if report.running => {}
                        Ok(_) => break,
                        Err(e) => error!("Clock tick failed: {}", e),
                    }
                }

                changed = running_rx.changed() => {
                    if changed.is_err() {
                        info!("Clock ticker stopping");
                        return;
                    }
                    if !*running_rx.borrow_and_update() {
                        break;
                    }
                }
            }
        }
    }

    info!("Clock ticker stopping");
}
