use std::time::{Duration, Instant};

/// Timing and workload data gathered over a single simulation tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfile {
    pub force_time: Duration,
    pub integrate_time: Duration,
    pub detect_time: Duration,
    pub resolve_time: Duration,

    pub particle_count: usize,
    pub contact_count: usize,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
}

impl StepProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_time(&self) -> Duration {
        self.force_time + self.integrate_time + self.detect_time + self.resolve_time
    }

    /// Writes the profile to the `log` facade at debug level.
    pub fn report(&self) {
        let total_us = self.total_time().as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "tick: {} particles, {} contacts, {}/{} velocity/position iterations, {:.3} ms",
            self.particle_count,
            self.contact_count,
            self.velocity_iterations,
            self.position_iterations,
            self.total_time().as_secs_f32() * 1000.0
        );
        log::debug!(
            "  forces {:.1}% | integrate {:.1}% | detect {:.1}% | resolve {:.1}%",
            share(self.force_time, total_us),
            share(self.integrate_time, total_us),
            share(self.detect_time, total_us),
            share(self.resolve_time, total_us)
        );
    }
}

fn share(part: Duration, total_us: f32) -> f32 {
    (part.as_micros() as f32 / total_us) * 100.0
}

/// Adds the elapsed time of its scope to a [`Duration`] slot on drop.
pub struct ScopedTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        log::trace!("start {label}");
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
    }
}
