//! Delegate command implementation.

use notecheck_canonical::PublicKeyHex;
use notecheck_core::{parse_conditions, signing};

pub fn run(
    secret: String,
    delegatee: String,
    conditions: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let delegatee =
        PublicKeyHex::parse(delegatee).map_err(|e| format!("Invalid delegatee: {}", e))?;

    // Conditions must parse before they are signed.
    parse_conditions(&conditions)
        .map_err(|e| format!("Invalid delegation conditions: {}", e))?;

    let token = signing::sign_delegation(&secret, delegatee.as_ref(), &conditions)
        .map_err(|e| format!("Signing failed: {}", e))?;

    println!("{}", serde_json::to_string(&token.to_tag())?);
    Ok(())
}
