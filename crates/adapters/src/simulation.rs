// Copyright 2025 Mako Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Timer drivers for the simulated flows.
//!
//! The wizards in `mako-core` never wait; they are advanced by `tick()` and
//! `finish_generation()`. The functions here supply the waiting with
//! `tokio::time`, so tests can run them on a paused clock.

use mako_core::{Dashboard, TcoReport};
use std::time::Duration;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::debug;

/// Tick the running benchmark every `period` until it finishes.
///
/// `on_progress` sees every percentage, ending with 100. Returns the final
/// percentage, or `None` when no run was in progress.
pub async fn run_benchmark<F>(dashboard: &mut Dashboard, period: Duration, mut on_progress: F) -> Option<u8>
where
    F: FnMut(u8),
{
    if !dashboard.benchmark_dialog().is_some_and(|w| w.is_running()) {
        return None;
    }

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = 0;
    loop {
        ticker.tick().await;
        match dashboard.tick_benchmark() {
            Some(progress) => {
                on_progress(progress);
                last = progress;
                if progress >= 100 {
                    break;
                }
            }
            None => break,
        }
    }
    debug!(progress = last, "Benchmark timer stopped");
    Some(last)
}

/// Wait `delay`, then complete the pending report generation.
///
/// Returns `None` when the panel is not generating.
pub async fn generate_report(dashboard: &mut Dashboard, delay: Duration) -> Option<TcoReport> {
    if !dashboard.report_panel().is_generating() {
        return None;
    }
    sleep(delay).await;
    dashboard.finish_report_generation().cloned()
}
