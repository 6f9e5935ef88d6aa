//! Periodic controller status report

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::stitcher::Controller;

/// Report interval in seconds
const STATUS_INTERVAL_SECS: u64 = 10;

/// Status task - logs a stats snapshot whenever the counters changed
#[embassy_executor::task]
pub async fn status_task(controller: &'static Controller) {
    let mut ticker = Ticker::every(Duration::from_secs(STATUS_INTERVAL_SECS));
    let mut last = controller.stats();

    loop {
        ticker.next().await;

        let stats = controller.stats();
        if stats == last {
            trace!("Stitch controller idle");
            continue;
        }

        info!(
            "Stitches: queued={} executed={} pending={} enabled={}",
            stats.queued,
            stats.executed,
            stats.pending,
            controller.is_enabled()
        );
        if stats.debounced != last.debounced || stats.ignored != last.ignored {
            trace!(
                "Needle edges: debounced={} ignored={} empty_wakes={}",
                stats.debounced,
                stats.ignored,
                stats.empty_wakes
            );
        }
        last = stats;
    }
}
