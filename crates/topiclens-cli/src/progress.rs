//! Upload progress indicator.
//!
//! The bar is cosmetic: it creeps toward [`ASYMPTOTE`] on a fixed interval
//! while the request is in flight and only reaches 100 on success.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

/// Ceiling the ticker approaches but never reaches.
pub const ASYMPTOTE: f64 = 90.0;

/// Fraction of the remaining distance covered per tick.
const STEP_FRACTION: f64 = 0.1;

const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Next simulated position.
pub fn advance(position: f64) -> f64 {
    position + (ASYMPTOTE - position) * STEP_FRACTION
}

pub struct UploadProgress {
    bar: ProgressBar,
    ticker: JoinHandle<()>,
}

impl UploadProgress {
    /// Draw the bar and start ticking on its own task.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {bar:30.cyan/blue} {pos}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());

        let ticking = bar.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            let mut position = 0.0;
            loop {
                interval.tick().await;
                position = advance(position);
                ticking.set_position(position as u64);
            }
        });

        Self { bar, ticker }
    }

    /// Stop ticking and clear the bar; jumps to 100 first on success.
    pub fn finish(self, success: bool) {
        self.ticker.abort();
        if success {
            self.bar.set_position(100);
        }
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_approaches_but_never_reaches() {
        let mut position = 0.0;
        for _ in 0..500 {
            let next = advance(position);
            assert!(next >= position);
            assert!(next <= ASYMPTOTE);
            position = next;
        }
        assert!(position < 100.0);
    }

    #[test]
    fn test_first_steps_move() {
        assert!(advance(0.0) > 0.0);
        assert!(advance(advance(0.0)) > advance(0.0));
    }

    #[tokio::test]
    async fn test_finish_stops_ticker() {
        let progress = UploadProgress::start("Uploading");
        let bar = progress.bar.clone();
        progress.finish(true);
        assert!(bar.is_finished());
    }
}
