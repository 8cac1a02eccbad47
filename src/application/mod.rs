//! Application layer: the vending machine aggregate and the command session
//! that drives it.
//!
//! `VendingMachine` holds all state and enforces the purchase invariants;
//! `Session` maps typed commands onto it and tracks the operator role.

pub mod command;
pub mod machine;
pub mod session;
