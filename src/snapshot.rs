//! Snapshot output: indented JSON followed by the run's wall-clock time.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write snapshot: {0}")]
    Write(#[from] std::io::Error),
}

/// Serialize `value` with four-space indentation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `value` as JSON. Nothing is written if serialization fails.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<W, T>(out: &mut W, value: &T) -> Result<(), SnapshotError>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let buf = to_pretty_json(value)?;
    out.write_all(&buf)?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the write fails.
pub fn write_elapsed<W: Write + ?Sized>(out: &mut W, elapsed: Duration) -> Result<(), SnapshotError> {
    writeln!(out, "{elapsed:?}")?;
    Ok(())
}
