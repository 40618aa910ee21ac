use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;

use chippy::{Config, CLOCK_SPEED};

#[cfg(not(feature = "sdl"))]
mod headless;
#[cfg(feature = "sdl")]
mod keymap;
mod run;
#[cfg(feature = "sdl")]
mod sdl;

/// chippy is a Chip-8 emulator
#[derive(Parser, Debug)]
#[command(name = "chippy", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run a ROM
    Run {
        /// Path to the ROM image
        rom: PathBuf,
        /// Instructions executed per second
        #[arg(long, default_value_t = CLOCK_SPEED)]
        refresh: u32,
        /// Seed for the RND instruction, entropy when absent
        #[arg(long)]
        seed: Option<u64>,
        /// Consume a key press once an instruction has read it
        #[arg(long)]
        clear_keys: bool,
    },
    /// Print the version
    Version,
}

impl Command {
    fn config(refresh: u32, seed: Option<u64>, clear_keys: bool) -> Config {
        Config {
            clock_hz: refresh,
            clear_keys_on_read: clear_keys,
            seed,
            ..Config::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let result = match Cli::parse().command {
        Command::Run {
            rom,
            refresh,
            seed,
            clear_keys,
        } => run::run(&rom, Command::config(refresh, seed, clear_keys)),
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["chippy", "run", "pong.ch8"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Run {
                rom: PathBuf::from("pong.ch8"),
                refresh: CLOCK_SPEED,
                seed: None,
                clear_keys: false,
            }
        );
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "chippy",
            "run",
            "pong.ch8",
            "--refresh",
            "500",
            "--seed",
            "7",
            "--clear-keys",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                refresh,
                seed,
                clear_keys,
                ..
            } => {
                let config = Command::config(refresh, seed, clear_keys);
                assert_eq!(config.clock_hz, 500);
                assert_eq!(config.seed, Some(7));
                assert!(config.clear_keys_on_read);
                assert_eq!(config.timer_hz, Config::default().timer_hz);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_version() {
        let cli = Cli::try_parse_from(["chippy", "version"]).unwrap();
        assert_eq!(cli.command, Command::Version);
    }

    #[test]
    fn test_run_requires_rom() {
        assert!(Cli::try_parse_from(["chippy", "run"]).is_err());
    }

    #[test]
    fn test_refresh_must_be_a_number() {
        assert!(Cli::try_parse_from(["chippy", "run", "a.ch8", "--refresh", "fast"]).is_err());
    }
}
