use rust_decimal_macros::dec;

use crate::money::{Currency, MoneyError, Rates};

#[test]
fn test_rates_from_pairs() {
    let rates = Rates::from_pairs([
        (Currency::USD, dec!(1)),
        (Currency::CAD, dec!(2)),
        (Currency::ILS, dec!(0.5)),
    ])
    .unwrap();

    assert_eq!(rates.len(), 3);
    assert!(!rates.is_empty());

    assert_eq!(rates.rate(Currency::CAD), Some(dec!(2)));
    assert_eq!(rates.rate(Currency::ILS), Some(dec!(0.5)));
    assert_eq!(rates.rate(Currency::EUR), None);
}

#[test]
fn test_rates_with_rate_replaces() {
    let rates = Rates::new()
        .with_rate(Currency::CAD, dec!(2))
        .unwrap()
        .with_rate(Currency::CAD, dec!(3))
        .unwrap();

    assert_eq!(rates.len(), 1);
    assert_eq!(rates.rate(Currency::CAD), Some(dec!(3)));
}

#[test]
fn test_rates_reject_non_positive_factors() {
    let ret = Rates::new().with_rate(Currency::CAD, dec!(0));
    assert!(matches!(ret, Err(MoneyError::InvalidExchangeRates(_))));

    let ret = Rates::new().with_rate(Currency::CAD, dec!(-1));
    assert!(matches!(ret, Err(MoneyError::InvalidExchangeRates(_))));

    let ret = Rates::from_pairs([(Currency::USD, dec!(1)), (Currency::CAD, dec!(0))]);
    assert!(matches!(ret, Err(MoneyError::InvalidExchangeRates(_))));
}

#[test]
fn test_rates_serde() {
    let expected = Rates::from_pairs([(Currency::USD, dec!(1)), (Currency::CAD, dec!(2))]).unwrap();

    let ret: Rates =
        serde_json::from_value(serde_json::json!({"USD": "1", "CAD": "2"})).unwrap();
    assert_eq!(ret, expected);

    let ret = serde_json::to_value(expected).unwrap();
    let reparsed: Rates = serde_json::from_value(ret).unwrap();
    assert_eq!(reparsed.rate(Currency::CAD), Some(dec!(2)));

    // deserialization re-runs factor validation
    let ret = serde_json::from_value::<Rates>(serde_json::json!({"CAD": "-1"}));
    assert!(ret.is_err());

    // malformed keys are rejected
    let ret = serde_json::from_value::<Rates>(serde_json::json!({"cad": "2"}));
    assert!(ret.is_err());
}
