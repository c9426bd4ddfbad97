//! Card wrapping a pre-rendered SVG chart.

use leptos::*;

#[component]
pub fn ChartCard(
    /// Heading above the chart.
    title: &'static str,
    /// SVG markup produced by `agrivision_common::insights`.
    svg: String,
) -> impl IntoView {
    view! {
        <div class="card chart-card">
            <h3>{title}</h3>
            <div class="chart" inner_html=svg></div>
        </div>
    }
}
