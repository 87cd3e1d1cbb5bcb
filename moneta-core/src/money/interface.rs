use anyhow::anyhow;
use async_trait::async_trait;
use thiserror::Error;

use super::currency::Currency;
use super::rates::Rates;

pub(super) const ERROR_PREFIX: &str = "[MONEY]";

pub type MoneyResult<T> = Result<T, MoneyError>;

#[derive(Debug, Error)]
pub enum MoneyError {
    /// Malformed operand: bad amount literal, empty aggregation list,
    /// unsupported rounding-mode value, zero divisor, decimal overflow.
    #[error("{ERROR_PREFIX} invalid argument: {0}")]
    InvalidArgument(anyhow::Error),

    /// Currency code does not match `^[A-Z]{3}$`.
    #[error("{ERROR_PREFIX} invalid currency {0:?}: the code must be exactly 3 uppercase letters")]
    InvalidCurrency(String),

    /// Both operands must carry the same currency.
    #[error("{ERROR_PREFIX} currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// The target currency has no entry in the supplied rate table.
    #[error("{ERROR_PREFIX} currency not found in rates: {0}")]
    CurrencyNotFound(Currency),

    /// Rate table carrying an unusable conversion factor.
    #[error("{ERROR_PREFIX} invalid exchange rates: {0}")]
    InvalidExchangeRates(anyhow::Error),
}

impl MoneyError {
    pub fn invalid_argument(err_msg: &str) -> Self {
        MoneyError::InvalidArgument(anyhow!(err_msg.to_owned()))
    }

    pub fn invalid_exchange_rates(err_msg: &str) -> Self {
        MoneyError::InvalidExchangeRates(anyhow!(err_msg.to_owned()))
    }
}

pub trait AsInvalidArgument<T> {
    fn as_invalid_argument(self) -> MoneyResult<T>;
}

impl<T, E> AsInvalidArgument<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn as_invalid_argument(self) -> MoneyResult<T> {
        self.map_err(|e| MoneyError::InvalidArgument(e.into()))
    }
}

/// External source of conversion factors, injected into the async exchange
/// operations. Implementations own any timeout/retry policy; the conversion
/// itself adds none.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the rate table for converting `from` into `to`. The returned
    /// table is keyed by target currency with factors relative to `from`.
    async fn rates(&self, from: Currency, to: Currency) -> MoneyResult<Rates>;
}
