//! Script input and report output for the command-line front end.

pub mod csv;
