//! Canonicalize command implementation.

use notecheck_canonical::{canonical_string, UnsignedEvent};

use crate::path;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = path::read_input(input)?;

    // id and sig, when present, are ignored
    let event: UnsignedEvent =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid event JSON: {}", e))?;

    let canonical = canonical_string(&event.commitment())
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", canonical);
    Ok(())
}
