//! SDL2 collaborators for chippy: a window that shows the frame buffer and a speaker that
//! plays the tone.

pub use crate::audio::Beeper;
pub use crate::display::Display;

mod audio;
mod display;
