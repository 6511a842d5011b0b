//! JSON output for the CLI
//!
//! One JSON object per invocation on stdout:
//! - success: `{"status":"ok","data":...}`
//! - failure: `{"status":"error","code":...,"message":...}`

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

fn success_body(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

fn error_body(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_line(body: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, body)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&success_body(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&error_body(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let body = success_body(json!({"count": 2}));
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["count"], 2);
    }

    #[test]
    fn test_error_body() {
        let body = error_body("FILEKEEP_NOT_FOUND", "open failed");
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "FILEKEEP_NOT_FOUND");
        assert_eq!(body["message"], "open failed");
    }
}
