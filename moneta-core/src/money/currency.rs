use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::interface::MoneyError;

lazy_static! {
    /// Exactly 3 uppercase ASCII letters.
    /// e.g.
    /// USD
    /// EUR
    /// IDR
    pub(crate) static ref CURRENCY_FORMAT_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Z]{3}$").expect("failed compiling currency format regex");
}

/// ISO-4217-style currency code. Any 3-uppercase-letter code is accepted;
/// the code is not checked against the ISO registry, so pseudo codes coming
/// from rate tables still construct (conversion to them can still fail when
/// a table lacks the entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    pub const USD: Currency = Currency(*b"USD");
    pub const EUR: Currency = Currency(*b"EUR");
    pub const CAD: Currency = Currency(*b"CAD");
    pub const GBP: Currency = Currency(*b"GBP");
    pub const ILS: Currency = Currency(*b"ILS");
    pub const IDR: Currency = Currency(*b"IDR");

    pub fn code(&self) -> &str {
        // the constructors only ever store ASCII uppercase
        std::str::from_utf8(&self.0).expect("currency code is always ASCII")
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !CURRENCY_FORMAT_REGEX.is_match(s) {
            return Err(MoneyError::InvalidCurrency(s.to_owned()));
        }

        let mut code = [0u8; 3];
        code.copy_from_slice(s.as_bytes());

        Ok(Currency(code))
    }
}

impl TryFrom<&str> for Currency {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_owned()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
