#![allow(dead_code)]

use coinvend::application::machine::VendingMachine;
use coinvend::config::MachineConfig;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "action, arg, value, count";

/// Writes a command script (header included) to a temporary file.
pub fn write_script(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// A machine with the factory products, vault and password.
pub fn factory_machine() -> VendingMachine {
    VendingMachine::from_config(&MachineConfig::default()).unwrap()
}

/// Writes `cycles` stock-and-sell cycles run as admin: add a fresh water
/// slot, pay for it with a 100-coin, buy it and top up the 10-coins used for
/// change. Each row of a cycle succeeds against the factory machine.
pub fn generate_script(path: &Path, cycles: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(["action", "arg", "value", "count"])?;
    wtr.write_record(["login", "pass"])?;
    for i in 0..cycles {
        // factory stock uses ids 1..=3
        let id = (i + 4).to_string();
        wtr.write_record(["add_product", "Water", "0.90", "1"])?;
        wtr.write_record(["insert", "100", "", "1"])?;
        wtr.write_record(["buy", id.as_str()])?;
        wtr.write_record(["add_coins", "10", "", "1"])?;
    }

    wtr.flush()?;
    Ok(())
}
