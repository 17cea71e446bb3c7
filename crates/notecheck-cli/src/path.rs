//! Input path helpers.

use std::io::{self, Read};
use std::path::PathBuf;

/// Checks that `path` names an existing regular file.
pub fn validate_input_path(path: &str) -> Result<PathBuf, String> {
    let p = PathBuf::from(path);
    if !p.exists() {
        return Err(format!("{} does not exist", path));
    }
    if !p.is_file() {
        return Err(format!("{} is not a file", path));
    }
    Ok(p)
}

/// Reads a file, refusing files larger than `max_size` bytes.
pub fn read_file(path: &str, max_size: Option<u64>) -> Result<String, Box<dyn std::error::Error>> {
    let p = validate_input_path(path)?;
    if let Some(max_bytes) = max_size {
        let len = std::fs::metadata(&p)?.len();
        if len > max_bytes {
            return Err(format!("{} is {} bytes, maximum is {}", path, len, max_bytes).into());
        }
    }
    std::fs::read_to_string(&p).map_err(|e| format!("Failed to read file {}: {}", path, e).into())
}

/// Reads from a file when given, otherwise from stdin.
pub fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => read_file(&path, None),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
