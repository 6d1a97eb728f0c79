use schemars::schema_for;
use serde_json::json;

use crate::model::{Portfolio, YieldSummary};

/// JSON Schema for the data the dashboard exchanges with a frontend.
pub fn get_schema_json() -> String {
    let schema = json!({
        "portfolio": schema_for!(Portfolio),
        "yieldSummary": schema_for!(YieldSummary),
    });
    serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        json!({ "error": format!("Serialization error: {e}") }).to_string()
    })
}

/// Print the schema to stdout.
pub fn run() -> anyhow::Result<()> {
    println!("{}", get_schema_json());
    Ok(())
}
