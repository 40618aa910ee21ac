use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use chippy::{Chip8Error, Control, FrameBuffer, Frontend, Keypad, Result};
use display::{Beeper, Display};

use crate::keymap::keymap;

/// An SDL2 window with keyboard input and a speaker.
///
/// Holding Space fast-forwards and holding Escape rewinds.
pub struct Sdl {
    _context: sdl2::Sdl,
    display: Display,
    beeper: Beeper,
    events: EventPump,
    fast_forward: bool,
    rewind: bool,
}

impl Sdl {
    pub fn new() -> std::result::Result<Self, String> {
        let context = sdl2::init()?;
        let display = Display::new(&context)?;
        let beeper = Beeper::new(&context)?;
        let events = context.event_pump()?;

        Ok(Sdl {
            _context: context,
            display,
            beeper,
            events,
            fast_forward: false,
            rewind: false,
        })
    }
}

impl Frontend for Sdl {
    fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.display.render(frame).map_err(Chip8Error::Frontend)
    }

    fn poll(&mut self, keys: &mut Keypad) -> Result<Control> {
        self.beeper.update();

        let mut quit = false;
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. } => quit = true,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keys[kc] = true,
                    (Keycode::Space, _) => self.fast_forward = true,
                    (Keycode::Escape, _) => self.rewind = true,
                    _ => {}
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keys[kc] = false,
                    (Keycode::Space, _) => self.fast_forward = false,
                    (Keycode::Escape, _) => self.rewind = false,
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(Control {
            quit,
            fast_forward: self.fast_forward,
            rewind: self.rewind,
        })
    }

    fn beep(&mut self) -> Result<()> {
        self.beeper.beep();
        Ok(())
    }
}
