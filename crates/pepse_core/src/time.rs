//! Fixed-timestep tick clock.
//!
//! Frame durations are fed in by the caller rather than sampled from the wall
//! clock, so a headless run replays identically. Each frame's time goes into
//! an accumulator that is drained in `fixed_dt` slices, one world tick per
//! slice.

pub struct TickClock {
    pub fixed_dt: f32,
    pub max_accumulator: f32,
    accumulator: f32,
    pub tick_count: u64,
}

impl TickClock {
    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            tick_count: 0,
        }
    }

    pub fn begin_frame(&mut self, frame_dt: f32) {
        let mut frame_dt = frame_dt.max(0.0);
        // Spiral-of-death cap
        if frame_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                frame_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            frame_dt = self.max_accumulator;
        }
        self.accumulator += frame_dt;
    }

    pub fn should_tick(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut TickClock) -> u32 {
        let mut ticks = 0;
        while clock.should_tick() {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn exact_frames_tick_once() {
        let mut clock = TickClock::new(0.25 / 16.0);
        for _ in 0..8 {
            clock.begin_frame(0.25 / 16.0);
            assert_eq!(drain(&mut clock), 1);
        }
        assert_eq!(clock.tick_count, 8);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut clock = TickClock::new(0.125);
        clock.begin_frame(10.0);
        assert_eq!(drain(&mut clock), 2, "0.25s cap at 0.125s per tick");
    }

    #[test]
    fn short_frames_accumulate() {
        let mut clock = TickClock::new(0.5);
        clock.begin_frame(0.25);
        assert_eq!(drain(&mut clock), 0);
        clock.begin_frame(0.25);
        assert_eq!(drain(&mut clock), 1);
        assert_eq!(clock.tick_count, 1);
    }

    #[test]
    fn negative_frames_count_as_zero() {
        let mut clock = TickClock::new(0.5);
        clock.begin_frame(-1.0);
        clock.begin_frame(0.5);
        assert_eq!(drain(&mut clock), 1);
    }
}
