//! Report bundling for the browser front end
//!
//! Browsers refuse `fetch` on `file://` pages, so the viewer first looks for
//! a `window.DEFAULT_DATA` global. Wrapping the report in a script lets it
//! be opened straight from disk.

use crate::report::ConsolidatedReport;

/// Default output file for the bundled report
pub const DEFAULT_BUNDLE_FILE: &str = "data.js";

/// Render the report as `window.DEFAULT_DATA = {...};`
pub fn render_data_js(report: &ConsolidatedReport) -> serde_json::Result<String> {
    let json = serde_json::to_string(report)?;
    Ok(format!("window.DEFAULT_DATA = {};\n", json))
}
