//! Application configuration.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use pizzeria::fingerprint::ToppingOrder;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(flatten)]
    pub store: StoreConfig,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
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

/// Whether the order of toppings within a list tells two pizzas apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToppingOrderSetting {
    /// Same toppings in a different order make a different pizza.
    Significant,

    /// Topping lists are compared as multisets.
    Insensitive,
}

impl From<ToppingOrderSetting> for ToppingOrder {
    fn from(setting: ToppingOrderSetting) -> Self {
        match setting {
            ToppingOrderSetting::Significant => Self::Significant,
            ToppingOrderSetting::Insensitive => Self::Insensitive,
        }
    }
}

/// Cart store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding one JSON document per cart
    #[arg(long, env = "CART_STORE_DIR", default_value = ".carts")]
    pub store_dir: PathBuf,

    /// Topping order policy (significant, insensitive)
    #[arg(
        long,
        env = "TOPPING_ORDER",
        value_enum,
        default_value_t = ToppingOrderSetting::Significant
    )]
    pub topping_order: ToppingOrderSetting,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn defaults_apply_without_arguments() -> Result<(), clap::Error> {
        let cli = TestCli::try_parse_from(["pizzeria-app"])?;

        assert_eq!(cli.config.logging.log_format, LogFormat::Compact);
        assert_eq!(
            ToppingOrder::from(cli.config.store.topping_order),
            ToppingOrder::Significant
        );

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> Result<(), clap::Error> {
        let cli = TestCli::try_parse_from([
            "pizzeria-app",
            "--log-format",
            "json",
            "--store-dir",
            "/tmp/carts",
            "--topping-order",
            "insensitive",
        ])?;

        assert_eq!(cli.config.logging.log_format, LogFormat::Json);
        assert_eq!(cli.config.store.store_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(
            ToppingOrder::from(cli.config.store.topping_order),
            ToppingOrder::Insensitive
        );

        Ok(())
    }
}
