use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::money::service::{exchange, exchange_many};
use crate::money::{Currency, Money, MoneyError, MoneyResult, RateProvider, Rates};

/// In-memory provider returning a fixed table and counting invocations.
struct MockRateProvider {
    rates: Rates,
    calls: AtomicUsize,
}

impl MockRateProvider {
    fn new(rates: Rates) -> Self {
        Self {
            rates,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    async fn rates(&self, _from: Currency, _to: Currency) -> MoneyResult<Rates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rates.clone())
    }
}

struct FailingRateProvider;

#[async_trait]
impl RateProvider for FailingRateProvider {
    async fn rates(&self, _from: Currency, _to: Currency) -> MoneyResult<Rates> {
        Err(MoneyError::invalid_exchange_rates("rates unavailable"))
    }
}

fn test_rates() -> Rates {
    Rates::from_pairs([
        (Currency::USD, dec!(1)),
        (Currency::CAD, dec!(2)),
        (Currency::ILS, dec!(0.5)),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_exchange_converts_through_provider() {
    let provider = MockRateProvider::new(test_rates());
    let money = Money::usd(dec!(12.34));

    let ret = exchange(&provider, money, Currency::CAD).await.unwrap();

    assert_eq!(ret.amount(), dec!(24.68));
    assert_eq!(ret.currency(), Currency::CAD);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_exchange_same_currency_skips_provider() {
    let provider = MockRateProvider::new(test_rates());
    let money = Money::usd(dec!(12.34));

    let ret = exchange(&provider, money, Currency::USD).await.unwrap();

    assert!(ret.eq(&money).unwrap());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_exchange_provider_failure_propagates() {
    let provider = FailingRateProvider;
    let money = Money::usd(dec!(12.34));

    let ret = exchange(&provider, money, Currency::CAD).await;

    assert!(matches!(ret, Err(MoneyError::InvalidExchangeRates(_))));
}

#[tokio::test]
async fn test_exchange_missing_target_in_fetched_table() {
    let provider = MockRateProvider::new(test_rates());
    let money = Money::usd(dec!(12.34));

    let ret = exchange(&provider, money, Currency::GBP).await;

    assert!(matches!(
        ret,
        Err(MoneyError::CurrencyNotFound(currency)) if currency == Currency::GBP
    ));
}

#[tokio::test]
async fn test_exchange_many() {
    let provider = MockRateProvider::new(test_rates());
    let monies = vec![
        Money::usd(dec!(1)),
        Money::usd(dec!(2.5)),
        Money::new(dec!(100), Currency::CAD),
    ];

    let ret = exchange_many(&provider, monies, Currency::CAD).await.unwrap();

    assert_eq!(ret.len(), 3);
    assert_eq!(ret[0].amount(), dec!(2));
    assert_eq!(ret[1].amount(), dec!(5.0));
    // the CAD element passes through untouched
    assert_eq!(ret[2].amount(), dec!(100));
    assert!(ret.iter().all(|m| m.currency() == Currency::CAD));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_exchange_many_fails_fast() {
    let provider = FailingRateProvider;
    let monies = vec![Money::usd(dec!(1)), Money::usd(dec!(2))];

    let ret = exchange_many(&provider, monies, Currency::CAD).await;

    assert!(ret.is_err());
}
