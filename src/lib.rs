//! # chippy
//!
//! A Chip-8 interpreter core. It knows nothing about windows, keyboards or speakers:
//! frontends implement [`Frontend`] (or drive [`Chip8`] by hand) to show the frame buffer,
//! report held keys and play the tone.

pub use crate::chip8::{Chip8, Cycle};
pub use crate::config::Config;
pub use crate::constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH, TIMER_SPEED};
pub use crate::driver::{Control, Driver, Frontend};
pub use crate::error::{Chip8Error, Result};
pub use crate::signal::{AudioReceiver, Shutdown};
pub use crate::state::{FrameBuffer, Keypad};

mod chip8;
mod config;
pub mod constants;
mod driver;
mod error;
pub mod instruction;
pub mod opcode;
mod operations;
mod pacer;
mod signal;
pub mod state;
mod timers;
