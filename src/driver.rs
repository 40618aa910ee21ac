use std::time::Instant;

use log::{debug, error, info, warn};

use crate::chip8::{Chip8, Cycle};
use crate::error::Result;
use crate::pacer::Pacer;
use crate::signal::{AudioReceiver, Shutdown};
use crate::state::{FrameBuffer, Keypad};

/// How much faster time passes while fast forwarding
pub const FAST_FORWARD_SPEED: u32 = 8;

/// What the user asked for while input was polled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Control {
    pub quit: bool,
    pub fast_forward: bool,
    pub rewind: bool,
}

/// Everything outside the machine: a screen, a keypad and a speaker.
pub trait Frontend {
    /// Draws a frame
    fn render(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Records which keys are held and reports anything else the user asked for
    fn poll(&mut self, keys: &mut Keypad) -> Result<Control>;

    /// Plays the tone
    fn beep(&mut self) -> Result<()>;
}

/// # Driver
/// Runs a Chip8 against a Frontend until asked to stop.
///
/// Every iteration:
/// - polls input
/// - runs whatever cycles and timer ticks have come due (or rewinds that many cycles)
/// - renders if any of those cycles drew
/// - plays a pending tone
/// - sleeps until more work is due
///
/// Unknown opcodes are logged and skipped. Any other error stops the loop and is returned.
pub struct Driver {
    chip8: Chip8,
    audio: Option<AudioReceiver>,
    pacer: Pacer,
    shutdown: Shutdown,
}

impl Driver {
    pub fn new(mut chip8: Chip8, shutdown: Shutdown) -> Self {
        let audio = chip8.take_audio_receiver();
        let pacer = Pacer::new(
            chip8.config().clock_hz,
            chip8.config().timer_hz,
            Instant::now(),
        );
        Driver {
            chip8,
            audio,
            pacer,
            shutdown,
        }
    }

    /// A handle that stops `run` at its next iteration
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn chip8(&self) -> &Chip8 {
        &self.chip8
    }

    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<()> {
        info!(
            "running at {}Hz with timers at {}Hz",
            self.chip8.config().clock_hz,
            self.chip8.config().timer_hz
        );

        while !self.shutdown.is_cancelled() {
            let control = frontend.poll(self.chip8.keys_mut())?;
            if control.quit {
                self.shutdown.cancel();
                break;
            }

            let speed = if control.fast_forward {
                FAST_FORWARD_SPEED
            } else {
                1
            };
            let due = self.pacer.due(Instant::now(), speed);

            let redraw = if control.rewind {
                self.rewind(due.cycles)
            } else {
                let redraw = self.advance(due.cycles)?;
                for _ in 0..due.ticks {
                    self.chip8.advance_timers();
                }
                redraw
            };

            if redraw {
                frontend.render(self.chip8.frame_buffer())?;
            }
            self.play(frontend)?;

            std::thread::sleep(self.pacer.idle_time());
        }

        info!("received shutdown signal, stopping");
        Ok(())
    }

    /// Runs `cycles` instructions, returning whether any of them drew
    fn advance(&mut self, cycles: u32) -> Result<bool> {
        let mut redraw = false;
        for _ in 0..cycles {
            if self.shutdown.is_cancelled() {
                break;
            }
            match self.chip8.advance_cpu() {
                Ok(Cycle::Redraw) => redraw = true,
                Ok(Cycle::PollInput) => {}
                Err(e) if e.is_recoverable() => warn!("{}, skipping", e),
                Err(e) => {
                    error!("{}, halting", e);
                    return Err(e);
                }
            }
        }
        Ok(redraw)
    }

    fn rewind(&mut self, cycles: u32) -> bool {
        let mut rewound = 0;
        while rewound < cycles && self.chip8.reverse_cpu() {
            rewound += 1;
        }
        if rewound > 0 {
            debug!("rewound {} cycles", rewound);
        }
        rewound > 0
    }

    fn play<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<()> {
        if let Some(audio) = &self.audio {
            while audio.try_recv() {
                frontend.beep()?;
            }
        }
        Ok(())
    }
}
