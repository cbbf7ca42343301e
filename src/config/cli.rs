use crate::domain::model::{AstrologyMode, Timeframe};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "celestial-compass.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "celestial-compass")]
#[command(about = "Zodiac wheel, horoscopes and cosmic trivia from the terminal")]
pub struct CliConfig {
    /// TOML configuration file. `celestial-compass.toml` is used when present.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Selection store file, overriding `[store] path`.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Astrology mode for this command. Defaults to the remembered mode.
    #[arg(long, global = true)]
    pub mode: Option<AstrologyMode>,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the sign wheel with each sign's position.
    Wheel,
    /// Show or switch the remembered astrology mode.
    Mode { mode: Option<AstrologyMode> },
    /// Select a sign and load its profile and horoscope.
    Select { sign: String },
    /// Change the horoscope timeframe (Daily, Weekly, Monthly).
    Timeframe { timeframe: Timeframe },
    /// Reload the horoscope for the remembered sign and timeframe.
    Horoscope,
    /// Check compatibility between two signs.
    Compat { first: String, second: String },
    /// Load content for every remembered sign.
    Restore,
    /// Look up a planet of the solar system.
    Planet { name: String },
    /// Find the planet currently closest to Earth.
    ClosestPlanet,
    /// Tell an astronomy myth or story, with an illustration.
    Story { topic: String },
    /// Explain a cosmic mystery, with an illustration.
    Mystery { topic: String },
    /// Today's three facts.
    Facts,
    /// Today's astrological events.
    Events,
    /// Work out both signs from birth data and remember them.
    Discover {
        /// Birth date as YYYY-MM-DD.
        #[arg(long)]
        date: String,
        #[arg(long)]
        place: String,
    },
    /// List the story and mystery topics.
    Topics,
}

impl Command {
    /// Whether the command talks to the content provider.
    pub fn needs_provider(&self) -> bool {
        !matches!(
            self,
            Command::Wheel | Command::Mode { .. } | Command::Timeframe { .. } | Command::Topics
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(store) = &self.store {
            validation::validate_path("--store", store)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_with_global_flags() {
        let cli = CliConfig::try_parse_from([
            "celestial-compass",
            "select",
            "Leo",
            "--mode",
            "western",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.mode, Some(AstrologyMode::Western));
        assert!(matches!(cli.command, Command::Select { ref sign } if sign == "Leo"));
        assert!(cli.command.needs_provider());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_timeframe_and_mode() {
        let cli = CliConfig::try_parse_from(["celestial-compass", "timeframe", "Weekly"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Timeframe {
                timeframe: Timeframe::Weekly
            }
        ));
        assert!(!cli.command.needs_provider());

        assert!(CliConfig::try_parse_from(["celestial-compass", "timeframe", "Yearly"]).is_err());
        assert!(CliConfig::try_parse_from(["celestial-compass", "mode", "vedic"]).is_err());
    }

    #[test]
    fn test_blank_discover_fields_pass_validation() {
        let cli = CliConfig::try_parse_from([
            "celestial-compass",
            "discover",
            "--date",
            " ",
            "--place",
            "Lisbon",
        ])
        .unwrap();
        // Blank birth data is skipped by discovery, not reported as an error.
        assert!(cli.validate().is_ok());
        assert!(cli.command.needs_provider());
    }
}
