//! Aggregate statistics and charts from the prediction service.

use leptos::*;
use tracing::error;

use agrivision_common::api::ApiClient;
use agrivision_common::insights::{render_charts, stat_cards, InsightsView};
use agrivision_common::model::Insights;

use crate::components::chart::ChartCard;

#[component]
pub fn InsightsPage() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let view_state = create_rw_signal(InsightsView::Loading);

    let load = move || {
        view_state.set(InsightsView::Loading);
        spawn_local(async move {
            let outcome = api.get_value().insights().await;
            view_state.try_set(InsightsView::from_outcome(outcome));
        });
    };

    // Fetch once on mount.
    create_effect(move |prev: Option<()>| {
        if prev.is_none() {
            load();
        }
    });

    view! {
        <div class="page insights-page">
            {move || match view_state.get() {
                InsightsView::Loading => view! {
                    <div class="centered">
                        <span class="spinner"></span>
                        <p>"Loading insights..."</p>
                    </div>
                }
                .into_view(),
                InsightsView::Failed(message) => view! {
                    <div class="card notice notice-error centered">
                        <h3>"Error Loading Insights"</h3>
                        <p>{message}</p>
                        <button class="btn btn-secondary" on:click=move |_| load()>"Retry"</button>
                    </div>
                }
                .into_view(),
                InsightsView::Empty(insights) | InsightsView::Loaded(insights) => {
                    view! { <InsightsBody insights/> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn InsightsBody(insights: Insights) -> impl IntoView {
    let charts = render_charts(&insights.frequent_diseases).unwrap_or_else(|e| {
        error!("Cannot render insights charts: {e}");
        None
    });

    view! {
        <h1 class="text-gradient">"Detection Insights"</h1>
        <p class="lead">"Analytics and trends from disease detection data"</p>

        <div class="grid grid-3">
            {stat_cards(&insights)
                .into_iter()
                .map(|card| view! {
                    <div class="card stat-card">
                        <p class="stat-label">{card.label}</p>
                        <p class=format!("stat-value {}", card.class)>{card.value}</p>
                    </div>
                })
                .collect_view()}
        </div>

        {match charts {
            Some(charts) => view! {
                <div class="grid grid-2">
                    <ChartCard title="Most Frequent Diseases" svg=charts.bar_svg/>
                    <ChartCard title="Disease Distribution" svg=charts.pie_svg/>
                </div>
            }
            .into_view(),
            None => view! {
                <div class="card empty-state">
                    <h3>"No Data Available"</h3>
                    <p>"Start detecting diseases to see insights here"</p>
                </div>
            }
            .into_view(),
        }}
    }
}
