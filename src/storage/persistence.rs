use crate::core::{Ledger, LedgerSnapshot};
use crate::error::{LedgerError, Result};
use crate::registry::SignatureScheme;
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Default location of the persisted ledger document.
pub const LEDGER_FILE: &str = "ledger_data.json";

/// Write the ledger's durable form to disk as one JSON document with the
/// three top-level fields `chain`, `manufacturers`, `difficulty`.
pub fn save_to_file<P: AsRef<Path>>(ledger: &Ledger, path: P) -> Result<()> {
    let snapshot = ledger.snapshot();
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.flush()?;
    info!("Ledger saved to {}", path.as_ref().display());
    Ok(())
}

/// Load a ledger from disk.
///
/// A missing file is a clean `Ok(None)` - the caller falls back to a fresh
/// genesis-only ledger. A present but malformed file is an error; nothing is
/// partially applied, the caller's in-memory ledger stays whatever it was.
///
/// Stored `hash` and `merkle_root` fields are trusted verbatim; call
/// `validate()` on the result to actually check them.
pub fn load_from_file<P: AsRef<Path>>(path: P, scheme: SignatureScheme) -> Result<Option<Ledger>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: LedgerSnapshot = serde_json::from_reader(reader).map_err(|e| {
        LedgerError::Persistence(format!(
            "Malformed ledger file {}: {e}",
            path.display()
        ))
    })?;

    let ledger = Ledger::from_snapshot(snapshot, scheme)?;
    info!("Ledger loaded from {}", path.display());
    Ok(Some(ledger))
}
