use std::collections::VecDeque;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::operations::{execute, Io};
use crate::signal::{audio_channel, AudioReceiver, AudioSender};
use crate::state::{FrameBuffer, Keypad, State};
use crate::timers;

/// What the frontend should do after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The frame buffer changed
    Redraw,
    /// Nothing to draw; just look for input again
    PollInput,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    pressed_keys: Keypad,
    rng: StdRng,
    config: Config,
    audio: AudioSender,
    audio_receiver: Option<AudioReceiver>,
}

// TODO explore time/memory efficiency of more compact representations of past states (e.g. diffs)
impl Chip8 {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (audio, audio_receiver) = audio_channel();

        Ok(Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(config.history),
            pressed_keys: [false; 16],
            rng,
            config,
            audio,
            audio_receiver: Some(audio_receiver),
        })
    }

    /// A fresh machine with `rom` loaded
    pub fn with_rom(rom: &[u8], config: Config) -> Result<Self> {
        let mut chip8 = Chip8::new(config)?;
        chip8.load_rom(rom)?;
        Ok(chip8)
    }

    /// Load a rom that has already been read into memory
    ///
    /// # Arguments
    /// * `rom` the program; at most `MAX_ROM_SIZE` bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.state.load_rom(rom)?;
        debug!("loaded {} byte rom", rom.len());
        Ok(())
    }

    /// Hands out the receiving end of the tone signal. There is only one.
    pub fn take_audio_receiver(&mut self) -> Option<AudioReceiver> {
        self.audio_receiver.take()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the last cycle changed the frame buffer
    pub fn redraw_needed(&self) -> bool {
        self.state.draw_flag
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// A read-only view of the registers and memory, for debugging
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn keys(&self) -> &Keypad {
        &self.pressed_keys
    }

    /// For frontends that track the whole keypad themselves
    pub fn keys_mut(&mut self) -> &mut Keypad {
        &mut self.pressed_keys
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex value 0..F of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex value 0..F of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc, decodes it and executes it
    /// - an unknown opcode is skipped and reported; the caller decides whether to carry on
    /// - any other error leaves the machine as it was before the cycle
    /// - cycles that change nothing (waiting for a key, jumping to itself) aren't saved for
    ///   rewinding
    pub fn advance_cpu(&mut self) -> Result<Cycle> {
        let op = self.get_op()?;
        let previous = self.state;
        self.state.draw_flag = false;

        let instruction = match Instruction::from_op(op) {
            Ok(instruction) => instruction,
            Err(e) => {
                self.state.pc += 0x2;
                self.save_state(previous);
                return Err(e);
            }
        };
        trace!("{:04X} {:?} {}", op, self.state, instruction);

        let mut io = Io {
            keys: &mut self.pressed_keys,
            rng: &mut self.rng,
            clear_keys_on_read: self.config.clear_keys_on_read,
        };
        if let Err(e) = execute(instruction, &mut self.state, &mut io) {
            self.state = previous;
            return Err(e);
        }

        // the draw flag only says what happened this cycle
        if (State { draw_flag: self.state.draw_flag, ..previous }) != self.state {
            self.save_state(previous);
        }

        Ok(if instruction.redraws() {
            Cycle::Redraw
        } else {
            Cycle::PollInput
        })
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn reverse_cpu(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                // whatever was on screen at that point needs showing again
                self.state.draw_flag = true;
                true
            }
            None => false,
        }
    }

    /// Puts `state` in previous_states
    /// - if there are already `history` saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.config.history == 0 {
            return;
        }
        if self.previous_states.len() == self.config.history {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// Ticks the delay and sound timers once.
    /// When the sound timer runs out a tone is signalled; if the last one hasn't been played
    /// yet the new one is dropped.
    pub fn advance_timers(&mut self) {
        if timers::tick(&mut self.state) {
            if self.audio.signal() {
                debug!("sound timer expired");
            } else {
                debug!("sound timer expired but a tone is still pending");
            }
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    fn get_op(&self) -> Result<u16> {
        self.state
            .read_word(self.state.pc as usize)
            .map_err(|_| Chip8Error::MemoryOutOfBounds {
                addr: self.state.pc as usize,
            })
    }
}
