//! Sign command implementation.

use notecheck_canonical::UnsignedEvent;
use notecheck_core::signing;

use crate::path;

pub fn run(secret: String, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = path::read_input(input)?;

    let template: UnsignedEvent =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid event template: {}", e))?;

    let event = signing::sign_event(&secret, &template)
        .map_err(|e| format!("Signing failed: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
