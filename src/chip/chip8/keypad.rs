use crate::chip::chip8::constants::CHIP8_KEY_COUNT;

/// The 16 key hexadecimal keypad. Besides the current key states it keeps the
/// keys that were seen pressed while a blocking key read is outstanding, so
/// that the read completes on a press followed by a release.
#[derive(Debug, Default, Clone)]
pub(super) struct Keypad {
    keys: [bool; CHIP8_KEY_COUNT],
    seen_pressed: [bool; CHIP8_KEY_COUNT],
}

impl Keypad {
    pub(super) fn set(&mut self, key: usize, pressed: bool) {
        self.keys[key] = pressed;
    }

    pub(super) fn reset(&mut self) {
        self.keys = [false; CHIP8_KEY_COUNT];
    }

    /// Keys outside the keypad are never pressed.
    pub(super) fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// One polling step of the blocking key read. Returns the key that has
    /// completed a press and release, lowest index first. Any other completed
    /// keys stay recorded and are returned by later polls.
    pub(super) fn poll_release(&mut self) -> Option<u8> {
        for (seen, pressed) in self.seen_pressed.iter_mut().zip(self.keys.iter()) {
            *seen |= *pressed;
        }

        let key = (0..CHIP8_KEY_COUNT).find(|&k| self.seen_pressed[k] && !self.keys[k])?;
        self.seen_pressed[key] = false;
        Some(key as u8)
    }
}
