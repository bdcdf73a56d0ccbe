use std::time::{Duration, Instant};

use itertools::Itertools;

use crate::errors::PlinthError;

/// An accumulating stopwatch over the monotonic clock.
///
/// The timer is either stopped or running; `start` and `stop` move
/// between the two states and do nothing otherwise. Elapsed time
/// accumulates across start/stop cycles until `reset`.
#[derive(Debug, Default)]
pub struct Timer {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Timer {
    pub fn new() -> Timer {
        Timer::default()
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(t0) = self.started.take() {
            self.accumulated += t0.elapsed();
        }
    }

    /// Stop the timer and zero the accumulated time.
    pub fn reset(&mut self) {
        self.started = None;
        self.accumulated = Duration::ZERO;
    }

    /// Accumulated running time, including the interval in flight if
    /// the timer is running.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(t0) => self.accumulated + t0.elapsed(),
            None => self.accumulated,
        }
    }
}

/// A set of mutually exclusive accumulating intervals.
///
/// Exactly one interval is running at any moment; interval 0 runs from
/// construction. `switch_to` stops the current interval and starts
/// another, so the interval times partition the wall-clock time since
/// construction.
#[derive(Debug)]
pub struct MultiTimer {
    current: usize,
    started: Instant,
    accumulated: Vec<Duration>,
}

impl MultiTimer {
    /// Create a timer with `num` intervals and start interval 0.
    pub fn new(num: usize) -> Result<MultiTimer, PlinthError> {
        if num == 0 {
            return Err(PlinthError::NoIntervals);
        }
        Ok(MultiTimer {
            current: 0,
            started: Instant::now(),
            accumulated: vec![Duration::ZERO; num],
        })
    }

    pub fn num_intervals(&self) -> usize {
        self.accumulated.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Stop the running interval and start `id`. Switching to the
    /// interval already running does nothing.
    pub fn switch_to(&mut self, id: usize) -> Result<(), PlinthError> {
        self.check_id(id)?;
        if id != self.current {
            self.flush();
            self.current = id;
        }
        Ok(())
    }

    /// Accumulated time of interval `id`, including the in-flight part
    /// if it is the running interval.
    pub fn elapsed(&self, id: usize) -> Result<Duration, PlinthError> {
        self.check_id(id)?;
        let mut d = self.accumulated[id];
        if id == self.current {
            d += self.started.elapsed();
        }
        Ok(d)
    }

    /// Zero the accumulated time of interval `id`. If `id` is the
    /// running interval its in-flight time is discarded too.
    pub fn reset(&mut self, id: usize) -> Result<(), PlinthError> {
        self.check_id(id)?;
        self.accumulated[id] = Duration::ZERO;
        if id == self.current {
            self.started = Instant::now();
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for d in self.accumulated.iter_mut() {
            *d = Duration::ZERO;
        }
        self.started = Instant::now();
    }

    /// Report all interval times on one line at info level.
    pub fn log_report(&self) {
        let parts = self
            .accumulated
            .iter()
            .enumerate()
            .map(|(id, d)| {
                let mut d = *d;
                if id == self.current {
                    d += self.started.elapsed();
                }
                format!("{}={:.3}ms", id, d.as_secs_f64() * 1e3)
            })
            .join(" ");
        log::info!("interval times: {}", parts);
    }

    fn flush(&mut self) {
        let now = Instant::now();
        self.accumulated[self.current] += now - self.started;
        self.started = now;
    }

    fn check_id(&self, id: usize) -> Result<(), PlinthError> {
        if id >= self.accumulated.len() {
            return Err(PlinthError::IntervalOutOfRange(id, self.accumulated.len()));
        }
        Ok(())
    }
}
