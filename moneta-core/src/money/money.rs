use std::{cmp::Ordering, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context};
use lazy_static::lazy_static;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::interface::{AsInvalidArgument, MoneyError, MoneyResult};
use super::rates::Rates;

/// Default number of fractional digits used by [`Money::to_fixed`] and by
/// division. Callers wanting another precision pass it explicitly to
/// [`Money::to_fixed_scale`]; there is no mutable process-wide setting.
pub const DEFAULT_SCALE: u32 = 6;

pub(crate) const ERROR_MONEY_FORMAT: &str = "The money must be written as <AMOUNT><CODE>: an optional minus sign, integer digits, an optional dot separated fraction, then exactly 3 uppercase letters. E.g. 12.34USD or -0.5EUR.";

lazy_static! {
    /// Decimal amount immediately followed by the currency code, no separator.
    /// e.g.
    /// 12USD
    /// 12.34USD
    /// -0.5EUR
    pub(crate) static ref MONEY_FORMAT_REGEX: regex::Regex =
        regex::Regex::new(r"^(-?\d+(?:\.\d+)?)([A-Z]{3})$").expect("failed compiling money format regex");
}

/// Rounding used by [`Money::integer_value`]. The wire values follow the
/// conventional encoding: 0 rounds toward zero, 3 rounds away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    TowardZero,
    AwayFromZero,
}

impl RoundingMode {
    pub const ROUND_DOWN: u32 = 0;
    pub const ROUND_UP: u32 = 3;

    /// Decode a dynamic rounding-mode value. Only 0 and 3 are supported.
    pub fn from_value(value: u32) -> MoneyResult<RoundingMode> {
        match value {
            Self::ROUND_DOWN => Ok(RoundingMode::TowardZero),
            Self::ROUND_UP => Ok(RoundingMode::AwayFromZero),
            other => Err(MoneyError::InvalidArgument(anyhow!(
                "unsupported rounding mode {}, expected {} (toward zero) or {} (away from zero)",
                other,
                Self::ROUND_DOWN,
                Self::ROUND_UP
            ))),
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            RoundingMode::TowardZero => Self::ROUND_DOWN,
            RoundingMode::AwayFromZero => Self::ROUND_UP,
        }
    }
}

/// Immutable amount + currency pair. Every operation returns a new value;
/// amounts are exact decimals and are only ever rounded by the explicit
/// rounding/formatting operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Wire shape: `{"amount": "<fixed-point string>", "currency": "<CODE>"}`.
#[derive(Debug, Serialize, Deserialize)]
struct MoneyRepr {
    amount: String,
    currency: Currency,
}

impl From<Money> for MoneyRepr {
    fn from(value: Money) -> Self {
        Self {
            amount: value.to_fixed(),
            currency: value.currency,
        }
    }
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(value: MoneyRepr) -> Result<Self, Self::Error> {
        Money::parse(&value.amount, value.currency.code())
    }
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Money {
        Money { amount, currency }
    }

    /// The (decimal-string, code-string) pair form.
    pub fn parse(amount: &str, currency: &str) -> MoneyResult<Money> {
        let currency = currency.parse::<Currency>()?;
        let amount = Decimal::from_str(amount)
            .with_context(|| format!("parsing money amount from {:?}", amount))
            .as_invalid_argument()?;

        Ok(Money::new(amount, currency))
    }

    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Checked pass-through for call sites that require a USD value.
    pub fn as_usd(self) -> MoneyResult<Money> {
        if self.currency != Currency::USD {
            return Err(MoneyError::CurrencyMismatch {
                expected: Currency::USD,
                found: self.currency,
            });
        }

        Ok(self)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    fn ensure_same_currency(&self, other: &Money) -> MoneyResult<()> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }

        Ok(())
    }

    /// Decimal comparison. Both operands must carry the same currency.
    pub fn cmp(&self, other: &Money) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn eq(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? == Ordering::Equal)
    }

    pub fn ne(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? != Ordering::Equal)
    }

    pub fn gt(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? == Ordering::Greater)
    }

    pub fn gte(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? != Ordering::Less)
    }

    pub fn lt(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? == Ordering::Less)
    }

    pub fn lte(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.cmp(other)? != Ordering::Greater)
    }

    pub fn plus(&self, other: &Money) -> MoneyResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| MoneyError::invalid_argument("money addition overflowed the decimal range"))?;

        Ok(Money::new(amount, self.currency))
    }

    pub fn minus(&self, other: &Money) -> MoneyResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| MoneyError::invalid_argument("money subtraction overflowed the decimal range"))?;

        Ok(Money::new(amount, self.currency))
    }

    pub fn mul(&self, factor: Decimal) -> MoneyResult<Money> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| MoneyError::invalid_argument("money multiplication overflowed the decimal range"))?;

        Ok(Money::new(amount, self.currency))
    }

    /// Scalar division. The quotient is quantized to [`DEFAULT_SCALE`]
    /// fractional digits, rounding half away from zero.
    pub fn div(&self, divisor: Decimal) -> MoneyResult<Money> {
        if divisor.is_zero() {
            return Err(MoneyError::invalid_argument("money division by zero"));
        }

        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or_else(|| MoneyError::invalid_argument("money division overflowed the decimal range"))?;
        let amount =
            quotient.round_dp_with_strategy(DEFAULT_SCALE, RoundingStrategy::MidpointAwayFromZero);

        Ok(Money::new(amount, self.currency))
    }

    /// Remainder of truncated division, carrying the sign of the dividend.
    pub fn rem(&self, divisor: Decimal) -> MoneyResult<Money> {
        if divisor.is_zero() {
            return Err(MoneyError::invalid_argument("money remainder by zero"));
        }

        let amount = self
            .amount
            .checked_rem(divisor)
            .ok_or_else(|| MoneyError::invalid_argument("money remainder overflowed the decimal range"))?;

        Ok(Money::new(amount, self.currency))
    }

    pub fn negated(&self) -> Money {
        Money::new(-self.amount, self.currency)
    }

    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency)
    }

    /// Rounds to zero fractional digits with the given mode.
    pub fn integer_value(&self, mode: RoundingMode) -> Money {
        let strategy = match mode {
            RoundingMode::TowardZero => RoundingStrategy::ToZero,
            RoundingMode::AwayFromZero => RoundingStrategy::AwayFromZero,
        };

        Money::new(self.amount.round_dp_with_strategy(0, strategy), self.currency)
    }

    /// Canonical rendering at the default precision: the amount rounded half
    /// away from zero to [`DEFAULT_SCALE`] fractional digits, without
    /// trailing zeros.
    pub fn to_fixed(&self) -> String {
        self.amount
            .round_dp_with_strategy(DEFAULT_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string()
    }

    /// Fixed-point rendering at an explicit precision, zero padded to
    /// exactly `scale` fractional digits. Never touches the stored amount.
    pub fn to_fixed_scale(&self, scale: u32) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);

        format!("{:.1$}", rounded, scale as usize)
    }

    /// Lossy conversion for display/logging only.
    pub fn to_number(&self) -> f64 {
        self.amount.to_f64().unwrap_or(f64::NAN)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// True for any non-negative amount. Zero counts as positive.
    pub fn is_positive(&self) -> bool {
        self.amount >= Decimal::ZERO
    }

    /// Non-empty, single-currency pairwise-plus fold.
    pub fn sum(monies: &[Money]) -> MoneyResult<Money> {
        let (first, rest) = monies
            .split_first()
            .ok_or_else(|| MoneyError::invalid_argument("sum requires at least one money"))?;

        let mut total = *first;
        for m in rest {
            total = total.plus(m)?;
        }

        Ok(total)
    }

    /// Largest element by `cmp`. The candidate is only replaced on a
    /// strictly-greater comparison, so the first occurrence wins ties.
    pub fn max(monies: &[Money]) -> MoneyResult<Money> {
        let (first, rest) = monies
            .split_first()
            .ok_or_else(|| MoneyError::invalid_argument("max requires at least one money"))?;

        let mut extremal = *first;
        for m in rest {
            if extremal.lt(m)? {
                extremal = *m;
            }
        }

        Ok(extremal)
    }

    /// Smallest element by `cmp`, first occurrence winning ties.
    pub fn min(monies: &[Money]) -> MoneyResult<Money> {
        let (first, rest) = monies
            .split_first()
            .ok_or_else(|| MoneyError::invalid_argument("min requires at least one money"))?;

        let mut extremal = *first;
        for m in rest {
            if extremal.gt(m)? {
                extremal = *m;
            }
        }

        Ok(extremal)
    }

    /// Convert into `to` through a caller-supplied rate table. Converting a
    /// money into its own currency returns it unchanged without consulting
    /// the table.
    pub fn exchange(&self, to: Currency, rates: &Rates) -> MoneyResult<Money> {
        if self.currency == to {
            return Ok(*self);
        }

        let factor = rates.rate(to).ok_or(MoneyError::CurrencyNotFound(to))?;
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| MoneyError::invalid_argument("money conversion overflowed the decimal range"))?;

        Ok(Money::new(amount, to))
    }

    fn parse_str(input: &str) -> MoneyResult<Money> {
        let captures = MONEY_FORMAT_REGEX
            .captures(input)
            .ok_or_else(|| MoneyError::invalid_argument(ERROR_MONEY_FORMAT))?;

        let amount = Decimal::from_str(&captures[1])
            .context("money literal amount to Decimal")
            .as_invalid_argument()?;
        let currency = captures[2].parse::<Currency>()?;

        Ok(Money::new(amount, currency))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ret = Self::parse_str(s)?;
        Ok(ret)
    }
}

impl TryFrom<&str> for Money {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}
