//! Conditions command implementation.

use notecheck_core::parse_conditions;

pub fn run(conditions: String) -> Result<(), Box<dyn std::error::Error>> {
    let constraints = parse_conditions(&conditions)
        .map_err(|e| format!("Invalid delegation conditions: {}", e))?;
    println!("{}", serde_json::to_string_pretty(&constraints)?);
    Ok(())
}
