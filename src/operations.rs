use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_GLYPH_SIZE, FONT_OFFSET};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::state::{Keypad, State};

/// What an instruction may touch besides the machine state
pub struct Io<'a> {
    pub keys: &'a mut Keypad,
    pub rng: &'a mut dyn RngCore,
    /// Release a key once an instruction has observed it being held
    pub clear_keys_on_read: bool,
}

impl Io<'_> {
    /// Keys are looked up by the low nibble of a register
    fn pressed(&mut self, key: u8) -> bool {
        let key = (key & 0xF) as usize;
        let pressed = self.keys[key];
        if pressed && self.clear_keys_on_read {
            self.keys[key] = false;
        }
        pressed
    }
}

/// Executes a single instruction.
///
/// Every handler leaves the pc pointing at the next instruction to run. On error the state is
/// left as it was before the instruction.
pub fn execute(instruction: Instruction, state: &mut State, io: &mut Io) -> Result<()> {
    use Instruction::*;
    match instruction {
        Cls => cls(state),
        Ret => ret(state)?,
        Jp { addr } => jp(addr, state),
        Call { addr } => call(addr, state)?,
        SeImm { x, kk } => skip_if(state.v[x] == kk, state),
        SneImm { x, kk } => skip_if(state.v[x] != kk, state),
        SeReg { x, y } => skip_if(state.v[x] == state.v[y], state),
        LdImm { x, kk } => ld(x, kk, state),
        AddImm { x, kk } => ld(x, state.v[x].wrapping_add(kk), state),
        LdReg { x, y } => ld(x, state.v[y], state),
        Or { x, y } => ld(x, state.v[x] | state.v[y], state),
        And { x, y } => ld(x, state.v[x] & state.v[y], state),
        Xor { x, y } => ld(x, state.v[x] ^ state.v[y], state),
        AddReg { x, y } => add(x, y, state),
        Sub { x, y } => sub(x, x, y, state),
        Shr { x, y } => shr(x, y, state),
        Subn { x, y } => sub(x, y, x, state),
        Shl { x, y } => shl(x, y, state),
        SneReg { x, y } => skip_if(state.v[x] != state.v[y], state),
        LdI { addr } => ldi(addr, state),
        JpV0 { addr } => jp(addr + u16::from(state.v[0x0]), state),
        Rnd { x, kk } => ld(x, io.rng.gen::<u8>() & kk, state),
        Drw { x, y, n } => drw(x, y, n, state)?,
        Skp { x } => skip_if(io.pressed(state.v[x]), state),
        Sknp { x } => skip_if(!io.pressed(state.v[x]), state),
        LdVxDt { x } => ld(x, state.delay_timer, state),
        LdVxK { x } => keyd(x, state, io),
        LdDtVx { x } => {
            state.delay_timer = state.v[x];
            next(state)
        }
        LdStVx { x } => {
            state.sound_timer = state.v[x];
            next(state)
        }
        AddI { x } => ldi(state.i.wrapping_add(u16::from(state.v[x])), state),
        LdF { x } => ldi(
            FONT_OFFSET as u16 + u16::from(state.v[x]) * FONT_GLYPH_SIZE,
            state,
        ),
        LdB { x } => bcd(x, state)?,
        LdMemVx { x } => stor(x, state)?,
        LdVxMem { x } => read(x, state)?,
    }
    Ok(())
}

fn next(state: &mut State) {
    state.pc += 0x2;
}

/// if cond then pc += 2 (on top of the usual advance)
fn skip_if(cond: bool, state: &mut State) {
    state.pc += if cond { 0x4 } else { 0x2 };
}

/// clear
fn cls(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    next(state);
}

/// PC = STACK.pop() + 2
fn ret(state: &mut State) -> Result<()> {
    state.pc = state.pop()? + 0x2;
    Ok(())
}

/// PC = addr
fn jp(addr: u16, state: &mut State) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
fn call(addr: u16, state: &mut State) -> Result<()> {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// Vx = value
fn ld(x: usize, value: u8, state: &mut State) {
    state.v[x] = value;
    next(state);
}

/// I = addr
fn ldi(addr: u16, state: &mut State) {
    state.i = addr;
    next(state);
}

/// Vx += Vy; VF = carry
fn add(x: usize, y: usize, state: &mut State) {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.v[FLAG] = over as u8;
    next(state);
}

/// Vx = Va - Vb; VF = !borrow
fn sub(x: usize, a: usize, b: usize, state: &mut State) {
    let (res, under) = state.v[a].overflowing_sub(state.v[b]);
    state.v[x] = res;
    state.v[FLAG] = !under as u8;
    next(state);
}

/// Vx = Vy >> 1; VF = the bit shifted out
fn shr(x: usize, y: usize, state: &mut State) {
    let vy = state.v[y];
    state.v[x] = vy >> 1;
    state.v[FLAG] = vy & 0x1;
    next(state);
}

/// Vx = Vy << 1; VF = the bit shifted out
fn shl(x: usize, y: usize, state: &mut State) {
    let vy = state.v[y];
    state.v[x] = vy << 1;
    state.v[FLAG] = vy >> 7;
    next(state);
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position Vx, Vy on the FrameBuffer.
/// Pixels that fall off the right or bottom edge are dropped.
/// Sets VF if any pixels were erased.
fn drw(x: usize, y: usize, n: u8, state: &mut State) -> Result<()> {
    let mut sprite = [0u8; 16];
    let rows = n as usize;
    sprite[..rows].copy_from_slice(state.memory(state.i as usize, rows)?);

    let left = state.v[x] as usize;
    let top = state.v[y] as usize;
    let mut collision = 0;

    for (row, byte) in sprite[..rows].iter().enumerate() {
        let py = top + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = left + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            let pixel = (byte >> (7 - bit)) & 1;
            collision |= pixel & state.frame_buffer[py][px];
            state.frame_buffer[py][px] ^= pixel;
        }
    }

    state.v[FLAG] = collision;
    state.draw_flag = true;
    next(state);
    Ok(())
}

/// await keypress for Vx
/// Takes the lowest key held; if none are held the pc stays put and this runs again next cycle.
fn keyd(x: usize, state: &mut State, io: &mut Io) {
    if let Some(key) = io.keys.iter().position(|&down| down) {
        if io.clear_keys_on_read {
            io.keys[key] = false;
        }
        state.v[x] = key as u8;
        next(state);
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(x: usize, state: &mut State) -> Result<()> {
    let vx = state.v[x];
    let i = state.i as usize;
    state
        .memory_mut(i, 3)?
        .copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    next(state);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(x: usize, state: &mut State) -> Result<()> {
    let v = state.v;
    let i = state.i as usize;
    state.memory_mut(i, x + 1)?.copy_from_slice(&v[..=x]);
    next(state);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(x: usize, state: &mut State) -> Result<()> {
    let mut v = state.v;
    v[..=x].copy_from_slice(state.memory(state.i as usize, x + 1)?);
    state.v = v;
    next(state);
    Ok(())
}
