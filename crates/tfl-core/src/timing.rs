//! Opt-in call timing for the state-update tiers.
//!
//! Off by default. Switch it on with [`enable_timing`] or by setting the
//! `TFL_TIMING` environment variable; the state setters then add their
//! elapsed time to the matching [`eval_timing`] accumulator.

use std::fmt::Write as _;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static ENABLED: AtomicBool = AtomicBool::new(false);
static FROM_ENV: OnceLock<bool> = OnceLock::new();

pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Whether timing was enabled in code or through `TFL_TIMING` (read once).
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
        || *FROM_ENV.get_or_init(|| std::env::var_os("TFL_TIMING").is_some())
}

/// Wall-clock timer for one call. Captures the enabled flag at start.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    started: Option<Instant>,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: is_enabled().then(Instant::now),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time, or `None` when timing was off at [`Timer::start`].
    pub fn stop(self) -> Option<Duration> {
        self.started.map(|t| t.elapsed())
    }

    /// Stop and add the elapsed time to `acc`; a no-op when timing is off.
    pub fn stop_into(self, acc: &AccumulatingTimer) {
        if let Some(elapsed) = self.stop() {
            acc.record(elapsed);
        }
    }
}

/// Lock-free running total, call count and slowest call.
#[derive(Debug, Default)]
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    max_ns: AtomicU64,
    count: AtomicU64,
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            max_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    pub fn record(&self, elapsed: Duration) {
        let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.total_ns.fetch_add(ns, Ordering::Relaxed);
        self.max_ns.fetch_max(ns, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.total_ns.load(Ordering::Relaxed))
    }

    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.max_ns.load(Ordering::Relaxed))
    }

    /// Mean call time; zero before the first call.
    pub fn mean(&self) -> Duration {
        match self.count() {
            0 => Duration::ZERO,
            n => Duration::from_nanos(self.total_ns.load(Ordering::Relaxed) / n),
        }
    }

    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.max_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// State-setter timers, one per cost tier.
pub mod eval_timing {
    use super::*;

    /// Direct (rho, e) updates
    pub static DIRECT: AccumulatingTimer = AccumulatingTimer::new();
    /// Updates that invert one table lookup for energy
    pub static SINGLE_INVERSION: AccumulatingTimer = AccumulatingTimer::new();
    /// Updates that nest an energy inversion inside a density inversion
    pub static DOUBLE_INVERSION: AccumulatingTimer = AccumulatingTimer::new();

    fn tiers() -> [(&'static str, &'static AccumulatingTimer); 3] {
        [
            ("direct", &DIRECT),
            ("single inversion", &SINGLE_INVERSION),
            ("double inversion", &DOUBLE_INVERSION),
        ]
    }

    pub fn reset_all() {
        for (_, acc) in tiers() {
            acc.reset();
        }
    }

    /// One line per tier that recorded at least one call.
    pub fn summary() -> String {
        let mut out = String::from("=== State Update Timing ===\n");
        for (label, acc) in tiers() {
            if acc.count() == 0 {
                continue;
            }
            let _ = writeln!(
                out,
                "{:<18} {:>8} calls  total {:>10.3?}  mean {:>10.3?}  max {:>10.3?}",
                label,
                acc.count(),
                acc.total(),
                acc.mean(),
                acc.max()
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_tracks_mean_and_max() {
        let acc = AccumulatingTimer::new();
        assert_eq!(acc.mean(), Duration::ZERO);
        acc.record(Duration::from_millis(5));
        acc.record(Duration::from_millis(15));
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.total(), Duration::from_millis(20));
        assert_eq!(acc.mean(), Duration::from_millis(10));
        assert_eq!(acc.max(), Duration::from_millis(15));
        acc.reset();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.max(), Duration::ZERO);
    }

    #[test]
    fn enabled_timer_records_into_accumulator() {
        enable_timing();
        let acc = AccumulatingTimer::new();
        let timer = Timer::start("probe");
        assert_eq!(timer.label(), "probe");
        timer.stop_into(&acc);
        assert_eq!(acc.count(), 1);
        assert!(eval_timing::summary().starts_with("=== State Update Timing ==="));
    }
}
