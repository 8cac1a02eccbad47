use super::coin::{CoinPool, Denomination};
use super::money::Cents;

/// Picks coins from `pool` summing exactly to `amount`, largest denomination
/// first.
///
/// Each denomination contributes `min(remaining / value, available)` coins.
/// Returns `None` when a remainder is left over; the greedy walk never pays a
/// different amount than asked.
///
/// Greedy is only guaranteed to find the minimum-coin answer because the
/// denomination set is canonical. Changing [`Denomination::ALL`] means
/// re-checking that, or replacing this with an exhaustive subset-sum search.
pub fn make_change(amount: Cents, pool: &CoinPool) -> Option<CoinPool> {
    let mut remaining = amount.value();
    let mut change = CoinPool::new();

    for denomination in Denomination::ALL {
        if remaining == 0 {
            break;
        }
        let value = u64::from(denomination.value());
        let take = (remaining / value).min(u64::from(pool.count(denomination)));
        if take == 0 {
            continue;
        }
        // take <= pool count, which is a u32
        change.set(denomination, take as u32);
        remaining -= take * value;
    }

    (remaining == 0).then_some(change)
}
