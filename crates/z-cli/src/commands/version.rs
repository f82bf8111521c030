//! Version command implementation.

use clap::Parser;
use rand::Rng;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Animal emoji, from U+1F400 (rat) to U+1F43B (bear).
const ANIMALS: std::ops::RangeInclusive<u32> = 0x1F400..=0x1F43B;

/// Display version information
#[derive(Debug, Parser)]
pub struct VersionCommand {}

fn random_animal<R: Rng>(rng: &mut R) -> char {
    char::from_u32(rng.gen_range(ANIMALS)).unwrap_or('\u{1F43B}')
}

impl VersionCommand {
    pub async fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        let mut rng = rand::thread_rng();
        let (a, b, c) = (
            random_animal(&mut rng),
            random_animal(&mut rng),
            random_animal(&mut rng),
        );

        println!("v({a}).({b}).({c})");
        eprintln!(
            "(not versioned, enjoy the animals; build {})",
            env!("CARGO_PKG_VERSION")
        );
        Ok(())
    }
}
