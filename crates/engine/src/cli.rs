//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which sample runs to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Every sample run
    #[default]
    All,
    /// AES-256-CBC round trip
    Encrypt,
    /// Digests, integrity checks and benchmarks
    Hash,
    /// Zlib round trip and ratio
    Compress,
}

impl Mode {
    pub fn includes(&self, other: Mode) -> bool {
        *self == Mode::All || *self == other
    }
}

/// HEX-CyberSphere engine demo runner
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[clap(name = "hexsphere", version, about = "Run the HEX-CyberSphere engine samples")]
pub struct Args {
    /// Sample runs to perform
    #[clap(value_enum, default_value = "all")]
    pub mode: Mode,

    /// JSON engine configuration
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults_to_all() {
        let args = Args::try_parse_from(["hexsphere"]).unwrap();
        assert_eq!(args.mode, Mode::All);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_mode_and_config() {
        let args = Args::try_parse_from(["hexsphere", "hash", "--config", "engine.json"]).unwrap();
        assert_eq!(args.mode, Mode::Hash);
        assert_eq!(args.config, Some(PathBuf::from("engine.json")));

        let args = Args::try_parse_from(["hexsphere", "-c", "engine.json", "compress"]).unwrap();
        assert_eq!(args.mode, Mode::Compress);
        assert_eq!(args.config, Some(PathBuf::from("engine.json")));
    }

    #[test]
    fn test_rejects_bad_input() {
        let err = Args::try_parse_from(["hexsphere", "decrypt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        assert!(Args::try_parse_from(["hexsphere", "--config"]).is_err());
        assert!(Args::try_parse_from(["hexsphere", "hash", "compress"]).is_err());
    }

    #[test]
    fn test_help_is_handled_by_parser() {
        let err = Args::try_parse_from(["hexsphere", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("encrypt"));
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_mode_includes() {
        assert!(Mode::All.includes(Mode::Compress));
        assert!(Mode::Hash.includes(Mode::Hash));
        assert!(!Mode::Hash.includes(Mode::Encrypt));
    }
}
