use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

pub mod check_config;
pub mod serve;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
