//! Status caption ticker.
//!
//! While an analysis is in flight the form cycles through a fixed list of
//! captions. The cycling runs as a spawned task owned by a [`TickerGuard`];
//! dropping the guard stops it, so every exit path from loading (success,
//! failure, cancellation) ends the task.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use plancritic_core::defaults;

/// Periodic caption cycler. Cheap to query from any thread.
pub struct CaptionTicker {
    captions: &'static [&'static str],
    period: Duration,
    step: Arc<AtomicUsize>,
    generation: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Default for CaptionTicker {
    fn default() -> Self {
        Self::new(
            defaults::LOADING_CAPTIONS,
            Duration::from_millis(defaults::CAPTION_INTERVAL_MS),
        )
    }
}

impl CaptionTicker {
    /// `captions` must not be empty.
    pub fn new(captions: &'static [&'static str], period: Duration) -> Self {
        assert!(!captions.is_empty(), "caption list must not be empty");
        Self {
            captions,
            period,
            step: Arc::new(AtomicUsize::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Reset to the first caption and start advancing one position per
    /// period, wrapping. Any previous run is stopped first.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(&self) -> TickerGuard<'_> {
        self.stop();
        self.step.store(0, Ordering::SeqCst);

        let generation = self.generation.load(Ordering::SeqCst);
        let live_generation = self.generation.clone();
        let step = self.step.clone();
        let len = self.captions.len();
        let mut interval = interval_at(Instant::now() + self.period, self.period);

        let handle = tokio::spawn(async move {
            loop {
                interval.tick().await;
                if live_generation.load(Ordering::SeqCst) != generation {
                    break;
                }
                let next = (step.load(Ordering::SeqCst) + 1) % len;
                step.store(next, Ordering::SeqCst);
                tracing::trace!(step = next, "Caption advanced");
            }
        });

        if let Ok(mut task) = self.task.lock() {
            *task = Some(handle);
        }
        TickerGuard { ticker: self }
    }

    /// Stop advancing. Idempotent.
    pub fn stop(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|t| t.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    pub fn step(&self) -> usize {
        self.step.load(Ordering::SeqCst)
    }

    pub fn caption(&self) -> &'static str {
        self.captions[self.step() % self.captions.len()]
    }

    /// Fraction of the caption list shown so far, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.step() + 1) as f64 / self.captions.len() as f64
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

impl Drop for CaptionTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Stops the ticker when dropped.
#[must_use = "the ticker stops as soon as the guard is dropped"]
pub struct TickerGuard<'a> {
    ticker: &'a CaptionTicker,
}

impl Drop for TickerGuard<'_> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(1500);

    #[tokio::test(start_paused = true)]
    async fn test_advances_one_step_per_period_and_wraps() {
        let ticker = CaptionTicker::default();
        let n = 10;
        let _guard = ticker.start();

        tokio::time::sleep(PERIOD * n + Duration::from_millis(100)).await;

        assert_eq!(ticker.step(), n as usize % ticker.len());
        assert_eq!(ticker.caption(), defaults::LOADING_CAPTIONS[2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_advance_before_first_period() {
        let ticker = CaptionTicker::default();
        let _guard = ticker.start();

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(ticker.step(), 0);
        assert_eq!(ticker.caption(), "در حال بررسی نقشه");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_guard_stops_advancing() {
        let ticker = CaptionTicker::default();
        let guard = ticker.start();
        tokio::time::sleep(PERIOD * 2 + Duration::from_millis(100)).await;
        assert_eq!(ticker.step(), 2);

        drop(guard);
        tokio::time::sleep(PERIOD * 5).await;

        assert_eq!(ticker.step(), 2);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_to_first_caption() {
        let ticker = CaptionTicker::default();
        {
            let _guard = ticker.start();
            tokio::time::sleep(PERIOD * 3 + Duration::from_millis(100)).await;
            assert_eq!(ticker.step(), 3);
        }

        let _guard = ticker.start();
        assert_eq!(ticker.step(), 0);
        tokio::time::sleep(PERIOD + Duration::from_millis(100)).await;
        assert_eq!(ticker.step(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_fraction() {
        let ticker = CaptionTicker::default();
        assert_eq!(ticker.progress(), 1.0 / 8.0);
        let _guard = ticker.start();
        tokio::time::sleep(PERIOD * 7 + Duration::from_millis(100)).await;
        assert_eq!(ticker.progress(), 1.0);
    }
}
