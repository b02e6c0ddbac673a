//! Check command - evaluate a gate version against the current version

use crate::output::{print_json, print_text};
use anyhow::Result;
use brint_core::version::{gate_passes, parse_version};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckResult {
    gate: String,
    current: String,
    arrived: bool,
    /// Side a gate with both replacements would pick
    active: &'static str,
}

/// Execute `brint check <VERSION>`
pub fn execute_check(gate: &str, json: bool) -> Result<()> {
    let gate = parse_version(gate)?;
    let located = super::require_config(&super::current_dir()?)?;
    let current = located.config.current_version()?;

    let arrived = gate_passes(&gate, &current);
    log::debug!("gate {} against current {}: arrived={}", gate, current, arrived);

    let result = CheckResult {
        gate: gate.to_string(),
        current: current.to_string(),
        arrived,
        active: if arrived { "new" } else { "old" },
    };

    if json {
        return print_json(&result);
    }

    if arrived {
        print_text(&format!(
            "{} {} has arrived (current {}), new implementations are active",
            "✓".green().bold(),
            result.gate,
            result.current
        ))?;
    } else {
        print_text(&format!(
            "{} {} has not arrived (current {}), old implementations are active",
            "→".cyan(),
            result.gate,
            result.current
        ))?;
    }
    Ok(())
}
