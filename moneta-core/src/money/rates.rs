use std::collections::BTreeMap;

use anyhow::anyhow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::interface::{MoneyError, MoneyResult};

/// Multiplicative conversion table: 1 unit of the source currency equals
/// `factor` units of the keyed currency. Factors are validated on the way
/// in, so a constructed table never holds a zero or negative rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Currency, Decimal>", into = "BTreeMap<Currency, Decimal>")]
pub struct Rates {
    table: BTreeMap<Currency, Decimal>,
}

impl Rates {
    pub fn new() -> Rates {
        Rates::default()
    }

    /// Builder-style insert. Replaces an existing entry for the currency.
    pub fn with_rate(mut self, currency: Currency, factor: Decimal) -> MoneyResult<Rates> {
        validate_factor(currency, factor)?;
        self.table.insert(currency, factor);

        Ok(self)
    }

    pub fn from_pairs<I>(pairs: I) -> MoneyResult<Rates>
    where
        I: IntoIterator<Item = (Currency, Decimal)>,
    {
        let mut rates = Rates::new();
        for (currency, factor) in pairs {
            rates = rates.with_rate(currency, factor)?;
        }

        Ok(rates)
    }

    pub fn rate(&self, currency: Currency) -> Option<Decimal> {
        self.table.get(&currency).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn validate_factor(currency: Currency, factor: Decimal) -> MoneyResult<()> {
    if factor <= Decimal::ZERO {
        return Err(MoneyError::InvalidExchangeRates(anyhow!(
            "conversion factor for {} must be positive, got {}",
            currency,
            factor
        )));
    }

    Ok(())
}

impl TryFrom<BTreeMap<Currency, Decimal>> for Rates {
    type Error = MoneyError;

    fn try_from(table: BTreeMap<Currency, Decimal>) -> Result<Self, Self::Error> {
        for (currency, factor) in &table {
            validate_factor(*currency, *factor)?;
        }

        Ok(Rates { table })
    }
}

impl From<Rates> for BTreeMap<Currency, Decimal> {
    fn from(value: Rates) -> Self {
        value.table
    }
}
