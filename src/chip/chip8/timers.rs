use crate::chip::chip8::constants::CHIP8_TIMER_FREQUENCY;

/// Selects one of the two timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Delay,
    Sound,
}

/// The delay and sound timers. Both count down at `CHIP8_TIMER_FREQUENCY`
/// units per second of elapsed time. The counters keep their fractional part
/// so that frames shorter than a full tick still add up; reads truncate.
#[derive(Debug, Default, Clone)]
pub(super) struct TimerPair {
    delay: f64,
    sound: f64,
}

impl TimerPair {
    pub(super) fn get(&self, which: Timer) -> u8 {
        match which {
            Timer::Delay => self.delay as u8,
            Timer::Sound => self.sound as u8,
        }
    }

    pub(super) fn set(&mut self, which: Timer, value: u8) {
        match which {
            Timer::Delay => self.delay = value as f64,
            Timer::Sound => self.sound = value as f64,
        }
    }

    /// Lets `elapsed` seconds pass. Negative durations count as zero.
    pub(super) fn decay(&mut self, elapsed: f64) {
        let ticks = (elapsed * CHIP8_TIMER_FREQUENCY).max(0.0);
        self.delay = (self.delay - ticks).max(0.0);
        self.sound = (self.sound - ticks).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_by_seconds() {
        let mut timers = TimerPair::default();
        timers.set(Timer::Delay, 120);
        timers.decay(1.0);
        assert_eq!(timers.get(Timer::Delay), 60);
        timers.decay(2.0);
        assert_eq!(timers.get(Timer::Delay), 0);
    }

    #[test]
    fn test_timers_are_independent() {
        let mut timers = TimerPair::default();
        timers.set(Timer::Delay, 10);
        timers.set(Timer::Sound, 200);
        timers.decay(0.5);
        assert_eq!(timers.get(Timer::Delay), 0);
        assert_eq!(timers.get(Timer::Sound), 170);
    }

    #[test]
    fn test_partial_ticks_accumulate() {
        let mut timers = TimerPair::default();
        timers.set(Timer::Sound, 2);
        timers.decay(0.01);
        // 0.6 of a tick has passed
        assert_eq!(timers.get(Timer::Sound), 1);
        timers.decay(0.01);
        assert_eq!(timers.get(Timer::Sound), 0);
    }

    #[test]
    fn test_negative_elapsed_never_increases() {
        let mut timers = TimerPair::default();
        timers.set(Timer::Delay, 5);
        timers.decay(-3.0);
        assert_eq!(timers.get(Timer::Delay), 5);
    }
}
