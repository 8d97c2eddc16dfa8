//! Goal celebration melody
//!
//! Non-blocking playback: the engine loop calls [`MelodyPlayer::update`]
//! once per tick and applies the returned command to the buzzer PWM, so
//! the tune plays out over ~1.8s without ever stalling the loop.

/// Note frequencies in Hz
const NOTE_G3: u16 = 196;
const NOTE_C4: u16 = 261;
const NOTE_E4: u16 = 329;
const NOTE_G4: u16 = 392;
const REST: u16 = 0;

/// (frequency, duration_ms) pairs
const MELODY: &[(u16, u32)] = &[
    (NOTE_E4, 150),
    (NOTE_E4, 150),
    (REST, 100),
    (NOTE_E4, 150),
    (REST, 100),
    (NOTE_C4, 150),
    (NOTE_E4, 150),
    (REST, 100),
    (NOTE_G4, 300),
    (REST, 200),
    (REST, 100),
    (NOTE_G3, 200),
];

/// What the buzzer hardware should do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerCommand {
    Tone(u16),
    Silence,
}

#[derive(Debug, Default)]
pub struct MelodyPlayer {
    active: bool,
    note_index: usize,
    next_note_ms: u32,
}

impl MelodyPlayer {
    pub const fn new() -> Self {
        Self {
            active: false,
            note_index: 0,
            next_note_ms: 0,
        }
    }

    /// Begin playback from the first note
    pub fn start(&mut self, now_ms: u32) {
        self.active = true;
        self.note_index = 0;
        self.next_note_ms = now_ms;
    }

    /// Advance playback; returns a command when the output should change
    pub fn update(&mut self, now_ms: u32) -> Option<BuzzerCommand> {
        if !self.active || now_ms < self.next_note_ms {
            return None;
        }

        if let Some(&(freq, duration)) = MELODY.get(self.note_index) {
            self.note_index += 1;
            self.next_note_ms = now_ms + duration;
            Some(if freq == REST {
                BuzzerCommand::Silence
            } else {
                BuzzerCommand::Tone(freq)
            })
        } else {
            self.active = false;
            Some(BuzzerCommand::Silence)
        }
    }
}
