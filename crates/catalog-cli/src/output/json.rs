//! JSON and JSON Lines printers.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

/// Print `value` as a pretty JSON document.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Print each item as a single-line JSON object.
pub fn print_jsonl<I>(items: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Serialize,
{
    let mut stdout = io::stdout().lock();
    for item in items {
        serde_json::to_writer(&mut stdout, &item)?;
        writeln!(stdout)?;
    }
    Ok(())
}
