//! Verify command implementation.

use notecheck_canonical::Event;
use notecheck_core::{Limits, Verifier};
use serde_json::json;

use crate::output::{self, Row};
use crate::path;

pub fn run(
    files: Vec<String>,
    strict: bool,
    json_output: bool,
    limits: Option<String>,
    max_size: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let limits = match limits {
        Some(p) => {
            let text = path::read_file(&p, None)?;
            serde_json::from_str::<Limits>(&text)
                .map_err(|e| format!("Invalid limits file {}: {}", p, e))?
        }
        None => Limits::default(),
    };
    let verifier = Verifier::new();

    let mut all_ok = true;
    let mut rows = Vec::new();

    for file in files {
        let text = match path::read_file(&file, max_size) {
            Ok(t) => t,
            Err(e) => {
                all_ok = false;
                rows.push(Row::unreadable(&file, e.to_string()));
                continue;
            }
        };
        let event: Event = match serde_json::from_str(&text) {
            Ok(ev) => ev,
            Err(e) => {
                all_ok = false;
                rows.push(Row::unreadable(&file, format!("invalid event JSON: {}", e)));
                continue;
            }
        };

        let result = verifier.validate_with_limits(&event, &limits);
        all_ok = all_ok && result.is_ok();
        rows.push(Row::from_result(&file, &event, &result));
    }

    if json_output {
        let json_rows: Vec<_> = rows
            .iter()
            .map(|r| {
                json!({
                    "file": r.file,
                    "event_id": r.event_id,
                    "kind": r.kind,
                    "created_at": r.created_at,
                    "author": r.author,
                    "verdict": r.verdict,
                    "reason": r.reason,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_rows)?);
    } else {
        output::print_table_header();
        for r in &rows {
            println!("{}", output::format_table_row(r));
        }
    }

    if strict && !all_ok {
        std::process::exit(1);
    }

    Ok(())
}
