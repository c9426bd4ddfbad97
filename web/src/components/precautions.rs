//! Weather widget plus the standing crop-care advice cards.

use leptos::*;

use super::weather::WeatherWidget;

#[derive(Clone, Copy)]
enum Severity {
    Info,
    Warning,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Info => "advice advice-info",
            Severity::Warning => "advice advice-warning",
        }
    }
}

const ADVICE: [(&str, &str, Severity); 4] = [
    (
        "Temperature Alert",
        "Moderate temperatures are ideal for most crops. Monitor for heat stress during peak hours.",
        Severity::Info,
    ),
    (
        "Humidity Level",
        "Current humidity levels are suitable. High humidity can promote fungal diseases, so ensure proper ventilation.",
        Severity::Warning,
    ),
    (
        "Crop Protection",
        "Regular monitoring and early detection are key. Check plants daily for signs of disease or pests.",
        Severity::Info,
    ),
    (
        "Watering Schedule",
        "Maintain a consistent watering schedule. Avoid overwatering, which can lead to root diseases.",
        Severity::Info,
    ),
];

#[component]
pub fn Precautions() -> impl IntoView {
    view! {
        <div class="precautions">
            <WeatherWidget/>
            <div class="card">
                <h3 class="card-title">"⚠️ Precautions & Alerts"</h3>
                <div class="advice-list">
                    {ADVICE
                        .iter()
                        .map(|&(title, message, severity)| view! {
                            <div class=severity.class()>
                                <h4>{title}</h4>
                                <p>{message}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
                <p class="tip">
                    <strong>"Tip: "</strong>
                    "Use the detection tool regularly to catch diseases early and protect your crops."
                </p>
            </div>
        </div>
    }
}
