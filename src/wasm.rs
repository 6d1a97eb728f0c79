use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::chart::{self, ChartOptions};
use crate::format;
use crate::mock;
use crate::model::ChartPoint;

/// Render `[{date, value}, ...]` to SVG markup (or the no-data placeholder).
#[wasm_bindgen]
pub fn render_chart_svg(
    points: JsValue,
    title: &str,
    height: Option<f64>,
    color: Option<String>,
) -> Result<String, JsValue> {
    let points: Vec<ChartPoint> = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("invalid chart points: {e}")))?;
    let mut options = ChartOptions::new(title);
    if let Some(h) = height {
        options = options.with_height(h);
    }
    if let Some(c) = color {
        options = options.with_color(c);
    }
    Ok(chart::render(&points, &options).to_html())
}

#[wasm_bindgen]
pub fn format_currency(amount: f64) -> String {
    format::format_usd(amount)
}

/// Seeded mock yield summary as JSON. `today` is `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn mock_yield_summary_json(seed: u64, today: &str) -> String {
    let today = match NaiveDate::parse_from_str(today, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            return serde_json::json!({ "error": format!("invalid date '{today}': {e}") })
                .to_string();
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let summary = mock::mock_yield_summary(today, &mut rng);
    serde_json::to_string(&summary).unwrap_or_else(|e| {
        serde_json::json!({ "error": format!("Serialization error: {e}") }).to_string()
    })
}

#[wasm_bindgen]
pub fn get_schema() -> String {
    crate::schema::get_schema_json()
}
