//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use till::pricing::OfferPolicy;

/// Offer policy as selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OfferPolicyArg {
    /// Apply the bundle formula to every quantity.
    Literal,

    /// Apply the bundle price only once the trigger quantity is reached.
    Threshold,
}

impl From<OfferPolicyArg> for OfferPolicy {
    fn from(arg: OfferPolicyArg) -> Self {
        match arg {
            OfferPolicyArg::Literal => OfferPolicy::Literal,
            OfferPolicyArg::Threshold => OfferPolicy::Threshold,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Till grocery invoice configuration
#[derive(Debug, Parser)]
#[command(name = "till", about = "Prints a grocery invoice", long_about = None)]
pub struct Config {
    /// Fixture directory holding `catalog/<set>.yml` and `offers/<set>.yml`.
    /// The built-in grocery prices are used when omitted.
    #[arg(short, long, env = "TILL_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Fixture set to load from the fixture directory
    #[arg(short, long, env = "TILL_SET", default_value = "grocery")]
    pub set: String,

    /// How offers apply when fewer units than the trigger quantity are bought
    #[arg(long, env = "TILL_OFFER_POLICY", value_enum, default_value_t = OfferPolicyArg::Literal)]
    pub offer_policy: OfferPolicyArg,

    /// Comma separated purchases; read from stdin when omitted
    #[arg(short, long)]
    pub items: Option<String>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
