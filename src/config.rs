//! Runtime configuration, read from environment variables (a `.env` file is honoured
//! by the binary). Every value has a default, so an empty environment is valid.

use std::env;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Payee details embedded in issued payment tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfig {
    /// UPI virtual payment address (`pa`).
    pub upi_id: String,
    /// Payee name (`pn`).
    pub merchant_name: String,
    /// Merchant category code (`mc`). Omitted from the token when empty.
    pub merchant_code: String,
    pub currency: String,
    /// Prefix of the transaction note (`tn`), followed by `Order #<id>`.
    pub note_prefix: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            upi_id: "8125358163@ybl".into(),
            merchant_name: "Arruri Bharath".into(),
            merchant_code: "5814".into(),
            currency: "INR".into(),
            note_prefix: "Order Payment -".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
    pub payment: PaymentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            payment: PaymentConfig::default(),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let channel_buffer = match lookup("DISPATCH_CHANNEL_BUFFER") {
            None => defaults.channel_buffer,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DISPATCH_CHANNEL_BUFFER",
                        value: raw,
                    })
                }
            },
        };

        let text = |name: &str, default: String| lookup(name).unwrap_or(default);
        let payment = PaymentConfig {
            upi_id: text("UPI_ID", defaults.payment.upi_id),
            merchant_name: text("UPI_MERCHANT_NAME", defaults.payment.merchant_name),
            merchant_code: text("UPI_MERCHANT_CODE", defaults.payment.merchant_code),
            currency: text("UPI_CURRENCY", defaults.payment.currency),
            note_prefix: text("UPI_NOTE_PREFIX", defaults.payment.note_prefix),
        };

        Ok(Self {
            channel_buffer,
            payment,
        })
    }
}
