//! JSON lines I/O
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line
//! - UTF-8 only; blank lines are skipped

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Reads JSON requests line by line. Blank lines are skipped.
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<Value>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(serde_json::from_str(&line).map_err(CliError::from)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Writes a success response
pub fn write_response<W: Write, T: Serialize>(writer: &mut W, data: &T) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Writes an error response. `errors` carries per-field messages when the
/// error is a validation failure.
pub fn write_error<W: Write>(
    writer: &mut W,
    code: &str,
    message: &str,
    errors: Option<Value>,
) -> CliResult<()> {
    let mut response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if let Some(errors) = errors {
        response["errors"] = errors;
    }
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
