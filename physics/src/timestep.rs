/// Fixed-timestep accumulator.
///
/// Real frame time is added with [`FixedTimestep::accumulate`], which reports how many
/// whole ticks of `dt` are due. Leftover time carries over to the next frame. When more
/// than `max_ticks` are due at once (a stall, a debugger break), the excess is dropped
/// so the simulation cannot fall further and further behind.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedTimestep {
    dt: f32,
    max_ticks: u32,
    accumulator: f32,
}

impl FixedTimestep {
    /// `dt` must be > 0 and `max_ticks` >= 1; [`crate::config::PhysicsConfig::validate`]
    /// guarantees both for configured worlds.
    pub fn new(dt: f32, max_ticks: u32) -> Self {
        Self {
            dt,
            max_ticks: max_ticks.max(1),
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add `frame_seconds` of real time and return the number of ticks to run now.
    ///
    /// Negative or non-finite frame times are ignored.
    pub fn accumulate(&mut self, frame_seconds: f32) -> u32 {
        if frame_seconds.is_finite() && frame_seconds > 0.0 {
            self.accumulator += frame_seconds;
        }

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_ticks {
            self.accumulator -= self.dt;
            ticks += 1;
        }

        if self.accumulator >= self.dt {
            log::warn!(
                "Physics fell behind by {:.4}s, dropping time after {} ticks",
                self.accumulator,
                ticks
            );
            self.accumulator %= self.dt;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn whole_ticks_are_consumed_and_remainder_kept() {
        let mut step = FixedTimestep::new(0.01, 100);

        assert_eq!(step.accumulate(0.025), 2);
        assert_relative_eq!(step.alpha(), 0.5, epsilon = 1e-3);

        // The carried half tick completes with the next frame.
        assert_eq!(step.accumulate(0.006), 1);
    }

    #[test]
    fn short_frames_run_no_ticks() {
        let mut step = FixedTimestep::new(1.0 / 180.0, 8);
        assert_eq!(step.accumulate(0.001), 0);
        assert_eq!(step.accumulate(0.001), 0);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut step = FixedTimestep::new(0.01, 4);

        assert_eq!(step.accumulate(1.0), 4);
        assert!(step.alpha() < 1.0);
        assert_eq!(step.accumulate(0.0), 0);
    }

    #[test]
    fn bad_frame_times_are_ignored() {
        let mut step = FixedTimestep::new(0.01, 4);
        assert_eq!(step.accumulate(-1.0), 0);
        assert_eq!(step.accumulate(f32::NAN), 0);
        assert_eq!(step.alpha(), 0.0);
    }

    #[test]
    fn reset_drops_pending_time() {
        let mut step = FixedTimestep::new(0.01, 4);
        step.accumulate(0.009);
        step.reset();
        assert_eq!(step.accumulate(0.002), 0);
    }
}
