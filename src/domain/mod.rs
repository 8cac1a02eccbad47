//! Domain model: money, coins, products and the exact-change algorithm.

pub mod change;
pub mod coin;
pub mod money;
pub mod ports;
pub mod product;
