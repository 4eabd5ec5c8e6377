//! Runtime configuration for the `tui-tilegrid` binary.
//!
//! Everything comes from the command line and a couple of environment
//! variables; game rules stay in the core's compile-time defaults.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Overrides the directory holding `<mode>.json` saves.
pub const SAVE_DIR_ENV: &str = "TUI_TILEGRID_SAVE_DIR";
/// Path of a log file; logging is off when unset.
pub const LOG_FILE_ENV: &str = "TUI_TILEGRID_LOG";

pub const USAGE: &str = "\
usage: tui-tilegrid [slide|fall] [--seed N] [--fresh]

  slide      sliding merge puzzle (default)
  fall       falling block puzzle
  --seed N   seed the random generator
  --fresh    ignore the saved game

env: TUI_TILEGRID_SAVE_DIR (save directory), TUI_TILEGRID_LOG (log file),
     RUST_LOG (log filter)";

/// Which puzzle to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Slide,
    Fall,
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slide" | "2048" => Some(Mode::Slide),
            "fall" | "tetris" => Some(Mode::Fall),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Slide => "slide",
            Mode::Fall => "fall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Mode,
    /// Fixed RNG seed; the clock is used when absent
    pub seed: Option<u32>,
    /// Start a new game instead of restoring the save
    pub fresh: bool,
    pub save_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

impl AppConfig {
    /// Read the process arguments and environment.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Parse arguments (without the program name) against an environment lookup.
    pub fn parse<I, S>(args: I, env: impl Fn(&str) -> Option<PathBuf>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode = None;
        let mut seed = None;
        let mut fresh = false;
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    let value = value.as_ref();
                    let parsed = value
                        .parse::<u32>()
                        .with_context(|| format!("invalid seed: {value}"))?;
                    seed = Some(parsed);
                }
                "--fresh" => fresh = true,
                "-h" | "--help" => help = true,
                _ if arg.starts_with('-') => bail!("unknown option: {arg}"),
                _ => match (mode, Mode::from_str(arg)) {
                    (None, Some(parsed)) => mode = Some(parsed),
                    (Some(_), Some(_)) => bail!("mode given twice: {arg}"),
                    (_, None) => bail!("unknown mode: {arg}"),
                },
            }
        }

        let save_dir = match env(SAVE_DIR_ENV) {
            Some(dir) => dir,
            None => env("HOME")
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tui-tilegrid"),
        };

        Ok(Self {
            mode: mode.unwrap_or(Mode::Slide),
            seed,
            fresh,
            save_dir,
            log_file: env(LOG_FILE_ENV),
            help,
        })
    }

    /// `<save_dir>/<mode>.json`
    pub fn save_path(&self) -> PathBuf {
        self.save_dir.join(format!("{}.json", self.mode.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<PathBuf> {
        None
    }

    #[test]
    fn defaults_to_sliding_mode() {
        let config = AppConfig::parse(Vec::<String>::new(), no_env).unwrap();
        assert_eq!(config.mode, Mode::Slide);
        assert_eq!(config.seed, None);
        assert!(!config.fresh);
        assert_eq!(config.save_dir, PathBuf::from("./.tui-tilegrid"));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn parses_mode_seed_and_fresh() {
        let config = AppConfig::parse(["fall", "--seed", "42", "--fresh"], no_env).unwrap();
        assert_eq!(config.mode, Mode::Fall);
        assert_eq!(config.seed, Some(42));
        assert!(config.fresh);
    }

    #[test]
    fn environment_overrides_paths() {
        let env = |key: &str| match key {
            SAVE_DIR_ENV => Some(PathBuf::from("/tmp/saves")),
            LOG_FILE_ENV => Some(PathBuf::from("/tmp/tilegrid.log")),
            "HOME" => Some(PathBuf::from("/home/player")),
            _ => None,
        };
        let config = AppConfig::parse(["slide"], env).unwrap();
        assert_eq!(config.save_path(), PathBuf::from("/tmp/saves/slide.json"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tilegrid.log")));
    }

    #[test]
    fn home_directory_holds_saves_by_default() {
        let env = |key: &str| (key == "HOME").then(|| PathBuf::from("/home/player"));
        let config = AppConfig::parse(["fall"], env).unwrap();
        assert_eq!(
            config.save_path(),
            PathBuf::from("/home/player/.tui-tilegrid/fall.json")
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(AppConfig::parse(["--seed"], no_env).is_err());
        assert!(AppConfig::parse(["--seed", "abc"], no_env).is_err());
        assert!(AppConfig::parse(["--turbo"], no_env).is_err());
        assert!(AppConfig::parse(["chess"], no_env).is_err());
        assert!(AppConfig::parse(["slide", "fall"], no_env).is_err());
    }
}
