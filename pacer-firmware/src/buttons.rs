//! Button debouncing
//!
//! The engine loop samples the raw GPIO level every millisecond; a
//! level change must hold for a few consecutive samples before it
//! counts, and only the release-to-pressed transition produces an
//! event.

const DEBOUNCE_SAMPLES: u8 = 5;

#[derive(Debug, Default)]
pub struct DebouncedButton {
    stable: bool,
    candidate: bool,
    count: u8,
}

impl DebouncedButton {
    pub const fn new() -> Self {
        Self {
            stable: false,
            candidate: false,
            count: 0,
        }
    }

    /// Feed one sample of the pressed level; true on a debounced press
    /// edge
    pub fn update(&mut self, pressed: bool) -> bool {
        if pressed == self.stable {
            self.candidate = pressed;
            self.count = 0;
            return false;
        }

        if pressed != self.candidate {
            self.candidate = pressed;
            self.count = 1;
            return false;
        }

        self.count += 1;
        if self.count >= DEBOUNCE_SAMPLES {
            self.stable = pressed;
            self.count = 0;
            return pressed;
        }
        false
    }
}
