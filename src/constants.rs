/// Width of the frame buffer in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the frame buffer in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Highest valid memory address
pub const MAX_ADDRESS: u16 = 0xFFF;

/// Where ROMs are loaded and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits above `PROGRAM_START`
pub const MAX_ROM_SIZE: usize = (MAX_ADDRESS - PROGRAM_START) as usize;

/// Where the sprite sheet lives; the interpreter runs natively so 0x000..0x200 is free
pub const FONT_OFFSET: usize = 0x000;

/// Bytes per hex digit sprite
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Maximum nesting of subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Index of the flag register VF
pub const FLAG: usize = 0xF;

/// Default instruction cadence in Hz
pub const CLOCK_SPEED: u32 = 60;

/// Timers always count down at 60Hz
pub const TIMER_SPEED: u32 = 60;

/// How many past states are kept for rewinding
pub const MAX_SAVED_STATES: usize = 256;

/// # Sprite Sheet
/// Hex digits 0..F, 5 bytes each. Each byte is one row of a 4x5 sprite; only the
/// high nibble is lit.
///
/// ```text
/// "0"     Binary   Hex
/// ****    11110000 0xF0
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// ****    11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
