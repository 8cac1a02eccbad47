use super::money::Cents;
use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A coin face value accepted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Denomination {
    Hundred,
    Fifty,
    Ten,
    Five,
    Two,
    One,
}

impl Denomination {
    /// Every accepted denomination, largest face value first.
    pub const ALL: [Self; 6] = [
        Self::Hundred,
        Self::Fifty,
        Self::Ten,
        Self::Five,
        Self::Two,
        Self::One,
    ];

    pub const fn value(self) -> u32 {
        match self {
            Self::Hundred => 100,
            Self::Fifty => 50,
            Self::Ten => 10,
            Self::Five => 5,
            Self::Two => 2,
            Self::One => 1,
        }
    }

    /// Value of `count` coins of this denomination.
    pub fn worth(self, count: u32) -> Cents {
        Cents(u64::from(self.value()) * u64::from(count))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for Denomination {
    type Error = VendingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or(VendingError::InvalidDenomination(value))
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Coin counts per denomination.
///
/// Backs both the machine's vault and a customer's inserted coins. Counts are
/// stored per [`Denomination`], so a pool can only ever hold valid coins.
/// Growing a count past `u32::MAX` fails instead of dropping coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, u32>", into = "BTreeMap<u32, u32>")]
pub struct CoinPool {
    counts: [u32; 6],
}

impl CoinPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool holding `count` coins of every denomination.
    pub fn uniform(count: u32) -> Self {
        Self {
            counts: [count; 6],
        }
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts[denomination.index()]
    }

    /// Adds `count` coins, or returns `None` if the count would overflow.
    pub fn checked_add(&self, denomination: Denomination, count: u32) -> Option<CoinPool> {
        let mut result = *self;
        let slot = &mut result.counts[denomination.index()];
        *slot = slot.checked_add(count)?;
        Some(result)
    }

    pub fn set(&mut self, denomination: Denomination, count: u32) {
        self.counts[denomination.index()] = count;
    }

    /// Both pools combined, or `None` if any denomination would overflow.
    pub fn checked_merge(&self, other: &CoinPool) -> Option<CoinPool> {
        other
            .iter()
            .try_fold(*self, |pool, (denomination, count)| {
                pool.checked_add(denomination, count)
            })
    }

    /// Removes the coins of `other`, or returns `None` if any denomination
    /// would go negative.
    pub fn checked_sub(&self, other: &CoinPool) -> Option<CoinPool> {
        let mut result = *self;
        for (denomination, count) in other.iter() {
            let slot = &mut result.counts[denomination.index()];
            *slot = slot.checked_sub(count)?;
        }
        Some(result)
    }

    /// Empties the pool, returning what it held.
    pub fn take(&mut self) -> CoinPool {
        std::mem::take(self)
    }

    pub fn total(&self) -> Cents {
        self.iter().map(|(d, count)| d.worth(count)).sum()
    }

    pub fn coin_count(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Every denomination with its count, largest face value first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.count(d)))
    }
}

/// Builds a pool from `(denomination, count)` pairs. A repeated denomination
/// replaces the earlier count.
impl FromIterator<(Denomination, u32)> for CoinPool {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut pool = CoinPool::new();
        for (denomination, count) in iter {
            pool.set(denomination, count);
        }
        pool
    }
}

impl TryFrom<BTreeMap<u32, u32>> for CoinPool {
    type Error = VendingError;

    fn try_from(map: BTreeMap<u32, u32>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(value, count)| Denomination::try_from(value).map(|d| (d, count)))
            .collect()
    }
}

impl From<CoinPool> for BTreeMap<u32, u32> {
    fn from(pool: CoinPool) -> Self {
        pool.iter().map(|(d, count)| (d.value(), count)).collect()
    }
}

/// Formats non-empty denominations as `100x2 50x1`, or `none`.
impl fmt::Display for CoinPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (denomination, count) in self.iter().filter(|&(_, count)| count > 0) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{denomination}x{count}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denomination_lookup() {
        assert_eq!(Denomination::try_from(50).unwrap(), Denomination::Fifty);
        assert!(matches!(
            Denomination::try_from(20),
            Err(VendingError::InvalidDenomination(20))
        ));
        assert!(Denomination::ALL.windows(2).all(|w| w[0].value() > w[1].value()));
    }

    #[test]
    fn test_pool_total_and_emptiness() {
        assert!(CoinPool::new().is_empty());
        let pool = CoinPool::new()
            .checked_add(Denomination::Hundred, 2)
            .and_then(|pool| pool.checked_add(Denomination::Two, 3))
            .unwrap();
        assert_eq!(pool.total(), Cents(206));
        assert_eq!(pool.coin_count(), 5);
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_checked_sub_refuses_negative_counts() {
        let vault: CoinPool = [(Denomination::Ten, 2)].into_iter().collect();
        let too_many: CoinPool = [(Denomination::Ten, 3)].into_iter().collect();
        let fine: CoinPool = [(Denomination::Ten, 1)].into_iter().collect();

        assert_eq!(vault.checked_sub(&too_many), None);
        assert_eq!(vault.checked_sub(&fine).unwrap().count(Denomination::Ten), 1);
    }

    #[test]
    fn test_take_resets_pool() {
        let mut pool = CoinPool::uniform(1);
        let taken = pool.take();
        assert!(pool.is_empty());
        assert_eq!(taken.total(), Cents(168));
    }

    #[test]
    fn test_checked_add_refuses_overflow() {
        let full = CoinPool::new().checked_add(Denomination::One, u32::MAX).unwrap();
        assert_eq!(full.checked_add(Denomination::One, 1), None);
        assert_eq!(full.checked_add(Denomination::One, 0), Some(full));
        assert_eq!(
            full.checked_add(Denomination::Two, 1).unwrap().total(),
            Cents(u64::from(u32::MAX) + 2)
        );
    }

    #[test]
    fn test_checked_merge() {
        let vault = CoinPool::uniform(2);
        let inserted: CoinPool = [(Denomination::Fifty, 3)].into_iter().collect();
        let merged = vault.checked_merge(&inserted).unwrap();
        assert_eq!(merged.count(Denomination::Fifty), 5);
        assert_eq!(merged.total(), vault.total() + inserted.total());

        let near_full: CoinPool = [(Denomination::One, u32::MAX - 1)].into_iter().collect();
        assert_eq!(vault.checked_merge(&near_full), None);
    }

    #[test]
    fn test_collect_keeps_last_count_per_denomination() {
        let pool: CoinPool = [(Denomination::Ten, 4), (Denomination::Ten, 1)]
            .into_iter()
            .collect();
        assert_eq!(pool.count(Denomination::Ten), 1);
    }

    #[test]
    fn test_pool_serializes_as_face_value_map() {
        let pool: CoinPool = [(Denomination::Fifty, 1), (Denomination::One, 4)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&pool).unwrap();
        assert_eq!(json, r#"{"1":4,"2":0,"5":0,"10":0,"50":1,"100":0}"#);

        let back: CoinPool = serde_json::from_str(r#"{"50":1,"1":4}"#).unwrap();
        assert_eq!(back, pool);
        assert!(serde_json::from_str::<CoinPool>(r#"{"3":1}"#).is_err());
    }

    #[test]
    fn test_display_lists_non_empty_denominations() {
        let pool: CoinPool = [(Denomination::Hundred, 2), (Denomination::Five, 1)]
            .into_iter()
            .collect();
        assert_eq!(pool.to_string(), "100x2 5x1");
        assert_eq!(CoinPool::new().to_string(), "none");
    }
}
