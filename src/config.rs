//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::highscore::DEFAULT_FILE_NAME;
use crate::types::DEFAULT_TICK_RATE_MS;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Seed for the piece randomizer [default: derived from the clock]
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Base gravity interval in milliseconds, divided by the level
    #[arg(
        long,
        env = "BLOCKFALL_TICK_RATE_MS",
        default_value_t = DEFAULT_TICK_RATE_MS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub tick_rate_ms: u32,

    /// Where the best score is kept
    #[arg(long, env = "BLOCKFALL_HIGH_SCORE_FILE", default_value = DEFAULT_FILE_NAME)]
    pub high_score_file: PathBuf,

    /// Write tracing output here (stdout belongs to the game)
    #[arg(long, env = "BLOCKFALL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The configured seed, or one taken from the wall clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let args = Args::try_parse_from([
            "blockfall",
            "--seed",
            "42",
            "--tick-rate-ms",
            "250",
            "--high-score-file",
            "/tmp/hs",
        ])
        .unwrap();
        assert_eq!(args.resolved_seed(), 42);
        assert_eq!(args.tick_rate_ms, 250);
        assert_eq!(args.high_score_file, PathBuf::from("/tmp/hs"));
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        assert!(Args::try_parse_from(["blockfall", "--tick-rate-ms", "0"]).is_err());
    }

    #[test]
    fn test_bad_seed_rejected() {
        assert!(Args::try_parse_from(["blockfall", "--seed", "abc"]).is_err());
    }
}
