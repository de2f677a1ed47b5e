use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// International calling code, stored as its bare digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Accepts `+256`, `256` or ` +256 `. Calling codes are 1-3 digits.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty()
            || digits.len() > 3
            || !digits.chars().all(|ch| ch.is_ascii_digit())
            || digits.starts_with('0')
        {
            return Err(CoreError::InvalidCountryCode(raw.to_string()));
        }
        Ok(Self(digits.to_string()))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn with_plus(&self) -> String {
        format!("+{}", self.0)
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self(DEFAULT_COUNTRY_DIGITS.to_string())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

impl FromStr for CountryCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.to_string()
    }
}

const DEFAULT_COUNTRY_DIGITS: &str = "256";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownCountry {
    pub code: &'static str,
    pub name: &'static str,
}

pub const KNOWN_COUNTRIES: &[KnownCountry] = &[
    KnownCountry {
        code: "+256",
        name: "Uganda",
    },
    KnownCountry {
        code: "+254",
        name: "Kenya",
    },
    KnownCountry {
        code: "+255",
        name: "Tanzania",
    },
    KnownCountry {
        code: "+250",
        name: "Rwanda",
    },
    KnownCountry {
        code: "+234",
        name: "Nigeria",
    },
    KnownCountry {
        code: "+27",
        name: "South Africa",
    },
    KnownCountry {
        code: "+233",
        name: "Ghana",
    },
];

pub fn known_country(code: &CountryCode) -> Option<&'static KnownCountry> {
    KNOWN_COUNTRIES
        .iter()
        .find(|country| country.code.trim_start_matches('+') == code.digits())
}
