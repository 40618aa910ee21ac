use thiserror::Error;

/// Everything that can go wrong while building or running a Chip-8.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("rom is {size} bytes but at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("stack overflow calling from {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at {addr:#06X}")]
    MemoryOutOfBounds { addr: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("frontend error: {0}")]
    Frontend(String),
}

impl Chip8Error {
    /// Whether execution can carry on after this error.
    /// Only unknown opcodes are skipped; everything else halts the machine.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Chip8Error::UnknownOpcode(_))
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
