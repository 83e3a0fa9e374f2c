//! Rolling drag velocity.
//!
//! Keeps the most recent signed distance samples of a drag. A gap longer than
//! the cache-reset interval discards the history, so a drag that pauses and
//! then resumes (or is released after a pause) reports only what happened
//! since the pause.

use crate::gesture_constants::DEFAULT_VELOCITY_CACHE_RESET_MS;

/// Ring buffer size for distance samples.
const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DistanceSample {
    pub distance: f32,
    pub timestamp_ms: u64,
}

/// Accumulated motion over the retained samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityWindow {
    /// Signed sum of the retained distances.
    pub distance: f32,
    /// Milliseconds spanned by the retained distances.
    pub elapsed_ms: u64,
}

impl VelocityWindow {
    pub fn is_empty(&self) -> bool {
        self.elapsed_ms == 0
    }

    /// Pixels per millisecond, 0 for an empty window.
    pub fn velocity(&self) -> f32 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            self.distance / self.elapsed_ms as f32
        }
    }
}

#[derive(Clone, Debug)]
pub struct DragVelocityTracker {
    samples: [DistanceSample; HISTORY_SIZE],
    /// Slot the next sample is written to.
    head: usize,
    len: usize,
    /// Time the oldest retained distance started accumulating.
    window_start_ms: Option<u64>,
    last_timestamp_ms: Option<u64>,
    cache_reset_ms: u64,
}

impl Default for DragVelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_CACHE_RESET_MS)
    }
}

impl DragVelocityTracker {
    pub fn new(cache_reset_ms: u64) -> Self {
        Self {
            samples: [DistanceSample::default(); HISTORY_SIZE],
            head: 0,
            len: 0,
            window_start_ms: None,
            last_timestamp_ms: None,
            cache_reset_ms,
        }
    }

    pub fn cache_reset_ms(&self) -> u64 {
        self.cache_reset_ms
    }

    /// Marks the time the drag began; the first distance is measured from here.
    pub fn start(&mut self, timestamp_ms: u64) {
        self.reset();
        self.window_start_ms = Some(timestamp_ms);
        self.last_timestamp_ms = Some(timestamp_ms);
    }

    pub fn add_sample(&mut self, distance: f32, timestamp_ms: u64) {
        match self.last_timestamp_ms {
            Some(last) if timestamp_ms.saturating_sub(last) > self.cache_reset_ms => {
                log::trace!(
                    "velocity history reset after {}ms idle",
                    timestamp_ms.saturating_sub(last)
                );
                self.clear_samples();
                self.window_start_ms = Some(last);
            }
            Some(_) => {}
            None => self.window_start_ms = Some(timestamp_ms),
        }

        if self.len == HISTORY_SIZE {
            // Evicting the oldest sample moves the window start to its end.
            self.window_start_ms = Some(self.samples[self.head].timestamp_ms);
        } else {
            self.len += 1;
        }
        self.samples[self.head] = DistanceSample {
            distance,
            timestamp_ms,
        };
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.last_timestamp_ms = Some(timestamp_ms);
    }

    pub fn sample_count(&self) -> usize {
        self.len
    }

    pub fn samples(&self) -> impl Iterator<Item = DistanceSample> + '_ {
        let oldest = (self.head + HISTORY_SIZE - self.len) % HISTORY_SIZE;
        (0..self.len).map(move |offset| self.samples[(oldest + offset) % HISTORY_SIZE])
    }

    /// Motion retained as of `now_ms`. Empty if the pointer has been idle
    /// longer than the cache-reset interval.
    pub fn window(&self, now_ms: u64) -> VelocityWindow {
        let (Some(start), Some(last)) = (self.window_start_ms, self.last_timestamp_ms) else {
            return VelocityWindow::default();
        };
        if self.len == 0 || now_ms.saturating_sub(last) > self.cache_reset_ms {
            return VelocityWindow::default();
        }
        VelocityWindow {
            distance: self.samples().map(|sample| sample.distance).sum(),
            elapsed_ms: last.saturating_sub(start),
        }
    }

    /// Pixels per millisecond as of `now_ms`.
    pub fn velocity(&self, now_ms: u64) -> f32 {
        self.window(now_ms).velocity()
    }

    fn clear_samples(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn reset(&mut self) {
        self.clear_samples();
        self.window_start_ms = None;
        self.last_timestamp_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero() {
        let tracker = DragVelocityTracker::default();
        assert!(tracker.window(100).is_empty());
        assert_eq!(tracker.velocity(100), 0.0);
    }

    #[test]
    fn constant_motion() {
        let mut tracker = DragVelocityTracker::new(100);
        tracker.start(0);
        for step in 1..=4 {
            tracker.add_sample(10.0, step * 10);
        }

        let window = tracker.window(40);
        assert_eq!(window.distance, 40.0);
        assert_eq!(window.elapsed_ms, 40);
        assert_eq!(window.velocity(), 1.0);
    }

    #[test]
    fn negative_motion_reports_negative_velocity() {
        let mut tracker = DragVelocityTracker::new(100);
        tracker.start(0);
        tracker.add_sample(-30.0, 10);
        tracker.add_sample(-30.0, 20);
        assert!(tracker.velocity(20) < 0.0);
    }

    #[test]
    fn idle_gap_clears_history() {
        let mut tracker = DragVelocityTracker::new(50);
        tracker.start(0);
        tracker.add_sample(100.0, 10);
        tracker.add_sample(100.0, 20);
        // Resume after a pause: only the new motion counts.
        tracker.add_sample(5.0, 120);

        let window = tracker.window(120);
        assert_eq!(tracker.sample_count(), 1);
        assert_eq!(window.distance, 5.0);
        assert_eq!(window.elapsed_ms, 100);
    }

    #[test]
    fn release_after_pause_has_no_velocity() {
        let mut tracker = DragVelocityTracker::new(50);
        tracker.start(0);
        tracker.add_sample(100.0, 10);
        assert!(tracker.window(10).velocity() > 0.0);
        assert!(tracker.window(200).is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let mut tracker = DragVelocityTracker::new(1_000);
        tracker.start(0);
        for step in 1..=(HISTORY_SIZE as u64 + 5) {
            tracker.add_sample(1.0, step);
        }

        let window = tracker.window(HISTORY_SIZE as u64 + 5);
        assert_eq!(tracker.sample_count(), HISTORY_SIZE);
        assert_eq!(window.distance, HISTORY_SIZE as f32);
        assert_eq!(window.elapsed_ms, HISTORY_SIZE as u64);
        let first = tracker.samples().next().expect("samples retained");
        assert_eq!(first.timestamp_ms, 6);
    }
}
