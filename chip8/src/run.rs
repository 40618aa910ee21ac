use std::fs;
use std::path::Path;
use std::process;
use std::thread;

use anyhow::Context;
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use chippy::{Chip8, Config, Driver, Frontend, Shutdown};

/// Loads the ROM at `rom` and drives it until the frontend quits, a signal arrives or
/// execution faults.
pub fn run(rom: &Path, config: Config) -> anyhow::Result<()> {
    let bytes = fs::read(rom).with_context(|| format!("unable to read {}", rom.display()))?;
    let chip8 = Chip8::with_rom(&bytes, config)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!("loaded {} ({} bytes)", rom.display(), bytes.len());

    let mut frontend = frontend()?;
    let mut driver = Driver::new(chip8, Shutdown::new());
    cancel_on_signal(driver.shutdown_handle())?;
    driver.run(frontend.as_mut())?;

    info!("stopped");
    Ok(())
}

/// Cancels `shutdown` on the first SIGINT or SIGTERM; a second one exits straight away
fn cancel_on_signal(shutdown: Shutdown) -> anyhow::Result<()> {
    let mut signals =
        Signals::new(&[SIGINT, SIGTERM]).context("unable to install signal handlers")?;
    thread::spawn(move || {
        for signal in signals.forever() {
            if shutdown.is_cancelled() {
                warn!("received signal {} again, exiting", signal);
                process::exit(128 + signal);
            }
            info!("received signal {}, shutting down", signal);
            shutdown.cancel();
        }
    });
    Ok(())
}

#[cfg(feature = "sdl")]
fn frontend() -> anyhow::Result<Box<dyn Frontend>> {
    let sdl = crate::sdl::Sdl::new().map_err(anyhow::Error::msg)?;
    Ok(Box::new(sdl))
}

#[cfg(not(feature = "sdl"))]
fn frontend() -> anyhow::Result<Box<dyn Frontend>> {
    Ok(Box::new(crate::headless::Headless::new(std::io::stdout())))
}
