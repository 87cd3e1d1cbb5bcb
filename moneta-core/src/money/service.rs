use tracing::{debug, instrument};

use super::currency::Currency;
use super::interface::{MoneyResult, RateProvider};
use super::money::Money;

/// Convert `money` into `to` using rates fetched from `provider`. A
/// same-currency conversion returns the input without calling the provider.
#[instrument(skip(provider))]
pub async fn exchange<P>(provider: &P, money: Money, to: Currency) -> MoneyResult<Money>
where
    P: RateProvider,
{
    if money.currency() == to {
        return Ok(money);
    }

    let rates = provider.rates(money.currency(), to).await?;
    let converted = money.exchange(to, &rates)?;
    debug!(%money, %converted, "converted through provider rates");

    Ok(converted)
}

/// Convert a batch into one target currency, failing on the first error.
pub async fn exchange_many<P>(
    provider: &P,
    monies: Vec<Money>,
    to: Currency,
) -> MoneyResult<Vec<Money>>
where
    P: RateProvider,
{
    let mut results: Vec<Money> = vec![];

    for money in monies {
        let ret = exchange(provider, money, to).await?;

        results.push(ret);
    }

    Ok(results)
}
