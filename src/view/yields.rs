use std::fmt::Write;

use alloy::primitives::Address;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use tracing::debug;

use super::{FetchState, card, status};
use crate::chart::escape_xml;
use crate::format::{format_long_date, format_usd};
use crate::mock::mock_yield_summary;
use crate::model::{Timeframe, YieldHistoryEntry, YieldSummary};

/// Rows shown in the history list.
pub const VISIBLE_ENTRIES: usize = 10;

pub struct YieldHistoryView {
    today: NaiveDate,
    rng: StdRng,
    address: Option<Address>,
    timeframe: Timeframe,
    state: FetchState<YieldSummary>,
}

impl YieldHistoryView {
    pub fn new(today: NaiveDate, rng: StdRng) -> Self {
        Self {
            today,
            rng,
            address: None,
            timeframe: Timeframe::default(),
            state: FetchState::default(),
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn state(&self) -> &FetchState<YieldSummary> {
        &self.state
    }

    pub fn summary(&self) -> Option<&YieldSummary> {
        self.state.data.as_ref()
    }

    /// Refetches when the address changes; `None` clears the view.
    pub fn set_address(&mut self, address: Option<Address>) {
        if address == self.address {
            return;
        }
        self.address = address;
        if address.is_none() {
            self.state.clear();
            return;
        }
        self.refresh();
    }

    /// Regenerate the summary for the current address.
    pub fn refresh(&mut self) {
        let Some(address) = self.address else {
            return;
        };
        self.state.start();
        debug!(%address, "generating yield history");
        let summary = mock_yield_summary(self.today, &mut self.rng);
        self.state.succeed(summary);
    }

    /// Switch timeframe. Reads from the summary already loaded; never fetches.
    pub fn select_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    /// Every entry for the selected timeframe, newest first.
    pub fn current_entries(&self) -> &[YieldHistoryEntry] {
        self.summary()
            .map(|s| s.entries(self.timeframe))
            .unwrap_or_default()
    }

    pub fn visible_entries(&self) -> &[YieldHistoryEntry] {
        let entries = self.current_entries();
        &entries[..entries.len().min(VISIBLE_ENTRIES)]
    }

    pub fn render_html(&self) -> String {
        if self.state.loading {
            return status("Loading yield history...");
        }
        let Some(summary) = self.summary() else {
            return String::new();
        };

        let mut body = String::new();
        body.push_str(
            "<div style=\"display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px\">\n  \
             <h3>Yield History</h3>\n  <div style=\"display: flex; gap: 10px\">\n",
        );
        for tf in Timeframe::ALL {
            let (bg, fg) = if tf == self.timeframe {
                ("#007bff", "white")
            } else {
                ("#f8f9fa", "black")
            };
            let _ = writeln!(
                body,
                "    <button data-timeframe=\"{tf}\" style=\"padding: 5px 10px; background-color: {bg}; color: {fg}; \
                 border: 1px solid #ddd; border-radius: 4px\">{}</button>",
                tf.label()
            );
        }
        body.push_str("  </div>\n</div>\n");

        let _ = write!(
            body,
            "<div style=\"margin-bottom: 20px; padding: 15px; background-color: #f5f5f5; border-radius: 5px\">\n  \
             <h4 style=\"margin: 0 0 10px 0\">Total Earned</h4>\n  \
             <div style=\"font-size: 24px; font-weight: bold; color: #28a745\">{}</div>\n</div>\n",
            format_usd(summary.total_yield_usd)
        );

        let _ = writeln!(body, "<div>\n  <h4>Recent Yields ({})</h4>", self.timeframe);
        let entries = self.visible_entries();
        if entries.is_empty() {
            body.push_str("  <p style=\"color: #666\">No yield history found</p>\n");
        } else {
            body.push_str("  <div style=\"border: 1px solid #eee; border-radius: 5px\">\n");
            for entry in entries {
                let _ = write!(
                    body,
                    "    <div style=\"padding: 12px; display: flex; justify-content: space-between; align-items: center\">\n      \
                     <div><div style=\"font-weight: bold\">{} {}</div>\
                     <div style=\"font-size: 12px; color: #666\">{} • {} • {}</div></div>\n      \
                     <div style=\"text-align: right; color: #28a745; font-weight: bold\">+{}</div>\n    </div>\n",
                    entry.yield_amount,
                    escape_xml(&entry.token_symbol),
                    escape_xml(&entry.protocol),
                    escape_xml(&entry.pool_name),
                    format_long_date(entry.date),
                    format_usd(entry.usd_value)
                );
            }
            body.push_str("  </div>\n");
        }
        body.push_str("</div>\n");

        card(&body)
    }
}
