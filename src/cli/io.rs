//! JSON output for the CLI
//!
//! One JSON object per invocation on stdout, UTF-8 only. Logs go to stderr.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&mut io::stdout().lock(), &json!({ "status": "ok", "data": data }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = json!({ "status": "error", "code": code, "message": message });
    write_line(&mut io::stdout().lock(), &response)
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_json_line() {
        let mut out = Vec::new();
        write_line(&mut out, &json!({ "status": "ok", "data": { "text": "a\nb" } })).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let back: Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(back["data"]["text"], "a\nb");
    }
}
