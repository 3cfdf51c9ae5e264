// 5.0 settings.rs: display settings. language and fiat currency, nothing else.
// 5.1 DisplaySettings::from_env reads overrides, validate() checks them.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const LANGUAGE_ENV: &str = "METRICS_LANGUAGE";
pub const FIAT_CURRENCY_ENV: &str = "METRICS_FIAT_CURRENCY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Ru,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ru => "ru",
            Language::Zh => "zh",
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "ru" => Ok(Language::Ru),
            "zh" => Ok(Language::Zh),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

// Fiat the dashboard quotes values in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl FiatCurrency {
    pub fn code(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Gbp => "GBP",
            FiatCurrency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "$",
            FiatCurrency::Eur => "€",
            FiatCurrency::Gbp => "£",
            FiatCurrency::Jpy => "¥",
        }
    }
}

impl FromStr for FiatCurrency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::Usd),
            "EUR" => Ok(FiatCurrency::Eur),
            "GBP" => Ok(FiatCurrency::Gbp),
            "JPY" => Ok(FiatCurrency::Jpy),
            other => Err(ConfigError::UnknownCurrency(other.to_string())),
        }
    }
}

/** 5.1: everything the renderer needs from the app. defaults: english, USD */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub language: Language,
    pub fiat_currency: FiatCurrency,
    // Placeholder for values that aren't available
    pub placeholder: String,
}

impl DisplaySettings {
    pub const DEFAULT_PLACEHOLDER: &'static str = "-";

    pub fn new(language: Language, fiat_currency: FiatCurrency) -> Self {
        Self {
            language,
            fiat_currency,
            placeholder: Self::DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    // Unset vars fall back to defaults, set-but-bad vars are an error
    pub fn from_env() -> Result<Self, ConfigError> {
        let language = match env::var(LANGUAGE_ENV) {
            Ok(v) => v.parse()?,
            Err(_) => Language::default(),
        };
        let fiat_currency = match env::var(FIAT_CURRENCY_ENV) {
            Ok(v) => v.parse()?,
            Err(_) => FiatCurrency::default(),
        };
        let settings = Self::new(language, fiat_currency);
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(())
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.fiat_currency.symbol()
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(Language::default(), FiatCurrency::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("Unknown fiat currency '{0}'")]
    UnknownCurrency(String),

    #[error("Placeholder for unavailable values must not be empty")]
    EmptyPlaceholder,
}
