use std::time::{Duration, Instant};

use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// A C, like a piezo buzzer
const PITCH: f32 = 523.25;
const VOLUME: f32 = 0.2;
const BEEP_LENGTH: Duration = Duration::from_millis(100);

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            *x = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a short square wave whenever the Chip-8 sound timer runs out.
/// The device is paused between beeps; `update` pauses it once the beep has played.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing_until: Option<Instant>,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: PITCH / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;

        Ok(Beeper {
            device,
            playing_until: None,
        })
    }

    pub fn beep(&mut self) {
        debug!("beep");
        self.device.resume();
        self.playing_until = Some(Instant::now() + BEEP_LENGTH);
    }

    /// Silences a beep that has played for long enough
    pub fn update(&mut self) {
        if let Some(until) = self.playing_until {
            if Instant::now() >= until {
                self.device.pause();
                self.playing_until = None;
            }
        }
    }
}
