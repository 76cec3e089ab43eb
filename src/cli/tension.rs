//! Value tension command

use ponder_core::{error::Result, types::parse_history, PonderConfig, TensionDetector};
use std::path::Path;
use tracing::debug;

/// Handle value tension command
pub fn handle(config: &PonderConfig, history_path: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(history_path)?;
    let history = parse_history(&raw)?;
    debug!(
        "Loaded {} check-ins from {}",
        history.len(),
        history_path.display()
    );

    let detector = TensionDetector::new(config.load_taxonomy()?);
    let report = detector.detect_tension(&history);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_calm() {
        println!("No value tension detected");
        return Ok(());
    }

    if !report.conflicts.is_empty() {
        println!("Conflicts:");
        for conflict in &report.conflicts {
            println!("  - {}", conflict);
        }
    }
    if !report.swings.is_empty() {
        println!("Rapid swings:");
        for swing in &report.swings {
            println!("  - {}", swing);
        }
    }

    Ok(())
}
