use std::fmt;

use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` index registers, `kk` is an immediate byte, `addr` a 12-bit address and
/// `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SeImm { x: usize, kk: u8 },
    /// 4xkk
    SneImm { x: usize, kk: u8 },
    /// 5xy0
    SeReg { x: usize, y: usize },
    /// 6xkk
    LdImm { x: usize, kk: u8 },
    /// 7xkk
    AddImm { x: usize, kk: u8 },
    /// 8xy0
    LdReg { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    Shr { x: usize, y: usize },
    /// 8xy7
    Subn { x: usize, y: usize },
    /// 8xyE
    Shl { x: usize, y: usize },
    /// 9xy0
    SneReg { x: usize, y: usize },
    /// Annn
    LdI { addr: u16 },
    /// Bnnn
    JpV0 { addr: u16 },
    /// Cxkk
    Rnd { x: usize, kk: u8 },
    /// Dxyn
    Drw { x: usize, y: usize, n: u8 },
    /// Ex9E
    Skp { x: usize },
    /// ExA1
    Sknp { x: usize },
    /// Fx07
    LdVxDt { x: usize },
    /// Fx0A
    LdVxK { x: usize },
    /// Fx15
    LdDtVx { x: usize },
    /// Fx18
    LdStVx { x: usize },
    /// Fx1E
    AddI { x: usize },
    /// Fx29
    LdF { x: usize },
    /// Fx33
    LdB { x: usize },
    /// Fx55
    LdMemVx { x: usize },
    /// Fx65
    LdVxMem { x: usize },
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode.
    /// 0nnn (jump to a native routine) is not supported and is reported as unknown.
    pub fn from_op(op: u16) -> Result<Self> {
        let x = op.x() as usize;
        let y = op.y() as usize;
        let kk = op.kk();
        let addr = op.addr();

        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x1, ..) => Instruction::Jp { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SeImm { x, kk },
            (0x4, ..) => Instruction::SneImm { x, kk },
            (0x5, .., 0x0) => Instruction::SeReg { x, y },
            (0x6, ..) => Instruction::LdImm { x, kk },
            (0x7, ..) => Instruction::AddImm { x, kk },
            (0x8, .., 0x0) => Instruction::LdReg { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x, y },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x, y },
            (0x9, .., 0x0) => Instruction::SneReg { x, y },
            (0xA, ..) => Instruction::LdI { addr },
            (0xB, ..) => Instruction::JpV0 { addr },
            (0xC, ..) => Instruction::Rnd { x, kk },
            (0xD, .., n) => Instruction::Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::Skp { x },
            (0xE, _, 0xA, 0x1) => Instruction::Sknp { x },
            (0xF, _, 0x0, 0x7) => Instruction::LdVxDt { x },
            (0xF, _, 0x0, 0xA) => Instruction::LdVxK { x },
            (0xF, _, 0x1, 0x5) => Instruction::LdDtVx { x },
            (0xF, _, 0x1, 0x8) => Instruction::LdStVx { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, _, 0x2, 0x9) => Instruction::LdF { x },
            (0xF, _, 0x3, 0x3) => Instruction::LdB { x },
            (0xF, _, 0x5, 0x5) => Instruction::LdMemVx { x },
            (0xF, _, 0x6, 0x5) => Instruction::LdVxMem { x },
            _ => return Err(Chip8Error::UnknownOpcode(op)),
        };
        Ok(instruction)
    }

    /// Whether executing this instruction changes the frame buffer
    pub fn redraws(&self) -> bool {
        matches!(self, Instruction::Cls | Instruction::Drw { .. })
    }
}

/// Disassembles into the conventional mnemonics, e.g. `DRW V1, V2, 5`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp { addr } => write!(f, "JP {:03X}", addr),
            Call { addr } => write!(f, "CALL {:03X}", addr),
            SeImm { x, kk } => write!(f, "SE V{:X}, {:02X}", x, kk),
            SneImm { x, kk } => write!(f, "SNE V{:X}, {:02X}", x, kk),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdImm { x, kk } => write!(f, "LD V{:X}, {:02X}", x, kk),
            AddImm { x, kk } => write!(f, "ADD V{:X}, {:02X}", x, kk),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { addr } => write!(f, "LD I, {:03X}", addr),
            JpV0 { addr } => write!(f, "JP V0, {:03X}", addr),
            Rnd { x, kk } => write!(f, "RND V{:X}, {:02X}", x, kk),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            LdVxK { x } => write!(f, "LD V{:X}, K", x),
            LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdF { x } => write!(f, "LD F, V{:X}", x),
            LdB { x } => write!(f, "LD B, V{:X}", x),
            LdMemVx { x } => write!(f, "LD [I], V{:X}", x),
            LdVxMem { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;

    #[test]
    fn test_decodes_every_family() {
        let cases = [
            (0x00E0, Instruction::Cls),
            (0x00EE, Instruction::Ret),
            (0x1ABC, Instruction::Jp { addr: 0xABC }),
            (0x2123, Instruction::Call { addr: 0x123 }),
            (0x3A11, Instruction::SeImm { x: 0xA, kk: 0x11 }),
            (0x4A11, Instruction::SneImm { x: 0xA, kk: 0x11 }),
            (0x5120, Instruction::SeReg { x: 0x1, y: 0x2 }),
            (0x6A05, Instruction::LdImm { x: 0xA, kk: 0x05 }),
            (0x7122, Instruction::AddImm { x: 0x1, kk: 0x22 }),
            (0x8120, Instruction::LdReg { x: 0x1, y: 0x2 }),
            (0x8121, Instruction::Or { x: 0x1, y: 0x2 }),
            (0x8122, Instruction::And { x: 0x1, y: 0x2 }),
            (0x8123, Instruction::Xor { x: 0x1, y: 0x2 }),
            (0x8124, Instruction::AddReg { x: 0x1, y: 0x2 }),
            (0x8125, Instruction::Sub { x: 0x1, y: 0x2 }),
            (0x8126, Instruction::Shr { x: 0x1, y: 0x2 }),
            (0x8127, Instruction::Subn { x: 0x1, y: 0x2 }),
            (0x812E, Instruction::Shl { x: 0x1, y: 0x2 }),
            (0x9120, Instruction::SneReg { x: 0x1, y: 0x2 }),
            (0xAABC, Instruction::LdI { addr: 0xABC }),
            (0xBABC, Instruction::JpV0 { addr: 0xABC }),
            (0xC1F0, Instruction::Rnd { x: 0x1, kk: 0xF0 }),
            (0xD125, Instruction::Drw { x: 0x1, y: 0x2, n: 0x5 }),
            (0xE19E, Instruction::Skp { x: 0x1 }),
            (0xE1A1, Instruction::Sknp { x: 0x1 }),
            (0xF107, Instruction::LdVxDt { x: 0x1 }),
            (0xF10A, Instruction::LdVxK { x: 0x1 }),
            (0xF115, Instruction::LdDtVx { x: 0x1 }),
            (0xF118, Instruction::LdStVx { x: 0x1 }),
            (0xF11E, Instruction::AddI { x: 0x1 }),
            (0xF129, Instruction::LdF { x: 0x1 }),
            (0xF133, Instruction::LdB { x: 0x1 }),
            (0xF355, Instruction::LdMemVx { x: 0x3 }),
            (0xF365, Instruction::LdVxMem { x: 0x3 }),
        ];
        for (op, expected) in cases.iter() {
            assert_eq!(Instruction::from_op(*op), Ok(*expected), "{:04X}", op);
        }
    }

    #[test]
    fn test_unknown_opcodes() {
        let ops = [
            0x0123u16, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE19F, 0xF100, 0xFFFF,
        ];
        for op in ops.iter() {
            assert_eq!(
                Instruction::from_op(*op),
                Err(Chip8Error::UnknownOpcode(*op))
            );
        }
    }

    #[test]
    fn test_only_cls_and_drw_redraw() {
        assert!(Instruction::Cls.redraws());
        assert!(Instruction::Drw { x: 0, y: 0, n: 1 }.redraws());
        assert!(!Instruction::Ret.redraws());
        assert!(!Instruction::LdImm { x: 0, kk: 0 }.redraws());
    }

    #[test]
    fn test_disassembly() {
        let text = |op: u16| Instruction::from_op(op).unwrap().to_string();
        assert_eq!(text(0x00E0), "CLS");
        assert_eq!(text(0x6A05), "LD VA, 05");
        assert_eq!(text(0xD125), "DRW V1, V2, 5");
        assert_eq!(text(0xBABC), "JP V0, ABC");
        assert_eq!(text(0xF355), "LD [I], V3");
    }
}
