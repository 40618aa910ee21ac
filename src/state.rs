use std::fmt;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_OFFSET, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START,
    SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::{Chip8Error, Result};

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound)
///
/// ## Memory
/// - 16 entry stack
///     - stores return addresses when subroutines are called
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - ROMs are loaded at 0x200
/// - 32x64 byte frame buffer
///     - stores the contents of the next frame to be drawn
///
/// Input lives outside of the snapshot so that rewinding never replays stale key presses.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_OFFSET..FONT_OFFSET + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// Copies a rom into memory at `PROGRAM_START`.
    /// Nothing is written if the rom doesn't fit.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { addr })
    }

    pub fn write_byte(&mut self, addr: usize, value: u8) -> Result<()> {
        let byte = self
            .memory
            .get_mut(addr)
            .ok_or(Chip8Error::MemoryOutOfBounds { addr })?;
        *byte = value;
        Ok(())
    }

    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let left = u16::from(self.read_byte(addr)?);
        let right = u16::from(self.read_byte(addr + 1)?);
        Ok(left << 8 | right)
    }

    pub fn write_word(&mut self, addr: usize, value: u16) -> Result<()> {
        self.memory_mut(addr, 2)?.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// The `len` bytes starting at `addr`
    pub fn memory(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.memory
            .get(addr..addr + len)
            .ok_or(Chip8Error::MemoryOutOfBounds {
                addr: addr + len - 1,
            })
    }

    pub fn memory_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        self.memory
            .get_mut(addr..addr + len)
            .ok_or(Chip8Error::MemoryOutOfBounds {
                addr: addr + len - 1,
            })
    }

    /// Pushes a return address, failing instead of growing past `STACK_DEPTH`.
    pub fn push(&mut self, addr: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow { pc: self.pc })?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc{:04X} i{:04X} sp{:02X} dt{:02X} st{:02X} v{:02X?}",
            self.pc, self.i, self.sp, self.delay_timer, self.sound_timer, self.v
        )
    }
}

/// The FrameBuffer is indexed as [y][x]; lit pixels are 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Down states of keys 0..F
pub type Keypad = [bool; 16];
