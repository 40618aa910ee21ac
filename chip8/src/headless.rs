use std::io::Write;

use chippy::{Chip8Error, Control, FrameBuffer, Frontend, Keypad, Result};

const ON: char = '█';
const OFF: char = ' ';
/// Moves the cursor home so each frame overwrites the last
const HOME: &str = "\x1B[H";
const BELL: &str = "\x07";

/// A frontend without a window: frames go to a terminal as text and tones ring its bell.
/// It has no keyboard, so the keypad is never pressed.
pub struct Headless<W: Write> {
    out: W,
}

impl<W: Write> Headless<W> {
    pub fn new(out: W) -> Self {
        Headless { out }
    }
}

fn io_error(e: std::io::Error) -> Chip8Error {
    Chip8Error::Frontend(e.to_string())
}

impl<W: Write> Frontend for Headless<W> {
    fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let mut text = String::from(HOME);
        for row in frame.iter() {
            text.extend(row.iter().map(|&p| if p == 1 { ON } else { OFF }));
            text.push('\n');
        }
        self.out.write_all(text.as_bytes()).map_err(io_error)?;
        self.out.flush().map_err(io_error)
    }

    fn poll(&mut self, _keys: &mut Keypad) -> Result<Control> {
        Ok(Control::default())
    }

    fn beep(&mut self) -> Result<()> {
        self.out.write_all(BELL.as_bytes()).map_err(io_error)?;
        self.out.flush().map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chippy::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    #[test]
    fn test_render() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0] = 1;
        frame[31][63] = 1;

        let mut headless = Headless::new(Vec::new());
        headless.render(&frame).unwrap();
        let text = String::from_utf8(headless.out).unwrap();
        let rows: Vec<&str> = text
            .strip_prefix(HOME)
            .unwrap()
            .lines()
            .collect();

        assert_eq!(rows.len(), DISPLAY_HEIGHT);
        assert!(rows.iter().all(|r| r.chars().count() == DISPLAY_WIDTH));
        assert!(rows[0].starts_with(ON));
        assert!(rows[31].ends_with(ON));
        assert_eq!(text.matches(ON).count(), 2);
    }

    #[test]
    fn test_beep() {
        let mut headless = Headless::new(Vec::new());
        headless.beep().unwrap();
        assert_eq!(headless.out, BELL.as_bytes());
    }

    #[test]
    fn test_poll_presses_nothing() {
        let mut headless = Headless::new(Vec::new());
        let mut keys = [true; 16];
        let control = headless.poll(&mut keys).unwrap();
        assert!(!control.quit && !control.fast_forward && !control.rewind);
        assert_eq!(keys, [true; 16]);
    }
}
