//! Event ID command implementation.

use notecheck_canonical::{compute_event_id, UnsignedEvent};

use crate::path;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = path::read_input(input)?;

    let event: UnsignedEvent =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid event JSON: {}", e))?;

    let id = compute_event_id(&event.commitment())
        .map_err(|e| format!("Event ID computation failed: {}", e))?;

    println!("{}", id);
    Ok(())
}
