//! Line-oriented check loop behind `numcheck check`.
//!
//! Reads one identifier per line and reports whether the stored value is
//! valid. Generic over reader and writer so it runs against in-memory buffers
//! in tests.

use crate::core::error::NumcheckError;
use crate::core::store::NumberStore;
use crate::core::time;
use crate::service::NumberService;
use serde_json::Value as JsonValue;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const ENVELOPE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = NumcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(NumcheckError::InvalidInput(format!(
                "unknown format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Outcome of checking a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub id: Option<i64>,
    pub error: Option<String>,
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn render_text(&self) -> String {
        match &self.error {
            None => "result valid".to_string(),
            Some(err) => format!("result invalid: {}", err),
        }
    }

    pub fn render_json(&self) -> JsonValue {
        let status = if self.is_valid() { "ok" } else { "invalid" };
        serde_json::json!({
            "envelope_version": ENVELOPE_VERSION,
            "ts": time::now_epoch_z(),
            "event_id": time::new_event_id(),
            "cmd": "check",
            "status": status,
            "id": self.id,
            "valid": self.is_valid(),
            "error": self.error,
        })
    }
}

pub fn check_id<S: NumberStore>(service: &NumberService<S>, id: i64) -> CheckOutcome {
    CheckOutcome {
        id: Some(id),
        error: service.get_number(id).err().map(|e| e.to_string()),
    }
}

pub fn write_outcome<W: Write>(
    output: &mut W,
    outcome: &CheckOutcome,
    format: OutputFormat,
) -> Result<(), NumcheckError> {
    match format {
        OutputFormat::Text => writeln!(output, "{}", outcome.render_text())?,
        OutputFormat::Json => writeln!(output, "{}", outcome.render_json())?,
    }
    output.flush()?;
    Ok(())
}

/// Check one raw input line. `None` for blank lines.
pub fn check_line<S: NumberStore>(service: &NumberService<S>, line: &str) -> Option<CheckOutcome> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let outcome = match trimmed.parse::<i64>() {
        Ok(id) => check_id(service, id),
        Err(_) => CheckOutcome {
            id: None,
            error: Some(format!("invalid id: {}", trimmed)),
        },
    };
    Some(outcome)
}

/// Totals reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub valid: usize,
    pub invalid: usize,
}

impl std::fmt::Display for LoopSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "checked {} ids: {} valid, {} invalid",
            self.valid + self.invalid,
            self.valid,
            self.invalid
        )
    }
}

/// Run the check loop until `input` is exhausted, writing one line per identifier.
pub fn run_check_loop<S, R, W>(
    service: &NumberService<S>,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<LoopSummary, NumcheckError>
where
    S: NumberStore,
    R: BufRead,
    W: Write,
{
    let mut summary = LoopSummary::default();
    for line in input.lines() {
        let line = line?;
        let Some(outcome) = check_line(service, &line) else {
            continue;
        };
        if outcome.is_valid() {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
        }
        write_outcome(output, &outcome, format)?;
    }
    Ok(summary)
}
