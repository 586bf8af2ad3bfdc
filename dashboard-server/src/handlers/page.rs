//! Dashboard page handler
//!
//! Serves the single-page layout. Summary boxes are rendered server-side;
//! chart regions are hydrated client-side from the figure endpoints.

use axum::extract::State;
use axum::response::Html;

use crate::charts::aggregate;
use crate::AppState;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Fraud Detection Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
body { font-family: sans-serif; margin: 2rem; }
.summary-row { display: flex; gap: 1rem; }
.summary-box { flex: 1; border: 1px solid #ccc; border-radius: 6px; padding: 1rem; text-align: center; }
.summary-box h3 { margin: 0 0 0.5rem 0; }
.bar-charts { display: flex; flex-wrap: wrap; }
.bar-charts > div { flex: 1; min-width: 320px; }
</style>
</head>
<body>
<h1>Fraud Detection Dashboard</h1>

<div class="summary-row">
  <div class="summary-box"><h3>Total Transactions</h3><p>__TOTAL_TRANSACTIONS__</p></div>
  <div class="summary-box"><h3>Total Fraud Cases</h3><p>__TOTAL_FRAUD_CASES__</p></div>
  <div class="summary-box"><h3>Fraud Percentage</h3><p>__FRAUD_PERCENTAGE__%</p></div>
</div>

<div id="fraud-trend"></div>
<div id="fraud-map"></div>

<div class="bar-charts">
  <div id="fraud-by-device"></div>
  <div id="fraud-by-source"></div>
  <div id="fraud-by-browser"></div>
</div>

<script>
const charts = ["fraud-trend", "fraud-map", "fraud-by-device", "fraud-by-source", "fraud-by-browser"];
for (const id of charts) {
  fetch("/api/v1/charts/" + id)
    .then((response) => response.json())
    .then((figure) => Plotly.newPlot(id, figure.data, figure.layout));
}
</script>
</body>
</html>
"#;

/// Render the dashboard page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let summary = aggregate::summary(&state.dataset);

    let page = PAGE_TEMPLATE
        .replace("__TOTAL_TRANSACTIONS__", &summary.total_transactions.to_string())
        .replace("__TOTAL_FRAUD_CASES__", &summary.total_fraud_cases.to_string())
        .replace("__FRAUD_PERCENTAGE__", &format!("{:.2}", summary.fraud_percentage));

    Html(page)
}
