/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian. Their behavior is cased on some
/// combination of:
/// - `(n, _, _, _)` the family; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a family
/// - `(_, _, n, n)` more specific behavior within a family
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address (NNN)
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx (NN)
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
/// - `(_, _, _, n)` the height of a sprite (N)
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[f___]`
    fn family(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;

    /// All operand fields at once.
    fn fields(&self) -> Fields {
        Fields {
            family: self.family(),
            x: self.x(),
            y: self.y(),
            kk: self.kk(),
            addr: self.addr(),
            n: self.n(),
        }
    }
}

/// The operand fields of a single opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub family: u8,
    pub x: u8,
    pub y: u8,
    pub kk: u8,
    pub addr: u16,
    pub n: u8,
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_family() {
        let op: u16 = 0xABCD;
        assert_eq!(op.family(), 0xA);
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0xABCD;
        assert_eq!(op.kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0xABCD;
        assert_eq!(op.addr(), 0x0BCD);
    }

    #[test]
    fn test_fields_are_a_pure_function_of_the_word() {
        for op in [0x0000u16, 0x00E0, 0x6A05, 0xD125, 0xFFFF].iter() {
            assert_eq!(op.fields(), op.fields());
        }
        assert_eq!(
            0xD125u16.fields(),
            Fields {
                family: 0xD,
                x: 0x1,
                y: 0x2,
                kk: 0x25,
                addr: 0x125,
                n: 0x5,
            }
        );
    }
}
