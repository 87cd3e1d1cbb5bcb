pub mod currency;
pub use currency::Currency;

pub mod rates;
pub use rates::Rates;

pub mod interface;
pub use interface::{MoneyError, MoneyResult, RateProvider};

pub mod money;
pub use money::{Money, RoundingMode, DEFAULT_SCALE};

pub mod service;



#[cfg(test)]
mod rates_test;

#[cfg(test)]
mod service_test;
