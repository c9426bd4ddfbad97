//! Landing page.

use leptos::*;
use leptos_router::*;

use crate::components::precautions::Precautions;

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "🔍",
        "Early Detection",
        "Identify diseases before they spread and cause significant damage to your crops.",
    ),
    (
        "⚡",
        "Instant Results",
        "Get AI-powered predictions in seconds with high accuracy and confidence scores.",
    ),
    (
        "💊",
        "Treatment Advice",
        "Receive specific recommendations and remedies for each detected disease.",
    ),
    (
        "🌦️",
        "Weather Integration",
        "Real-time weather data helps you make informed decisions about crop care.",
    ),
];

const QUICK_STATS: [(&str, &str, &str); 3] = [
    ("Detection Accuracy", "95%+", "stat-primary"),
    ("Response Time", "< 3s", "stat-secondary"),
    ("Disease Classes", "38+", "stat-accent"),
];

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="page home-page">
            <section class="hero">
                <h1 class="text-gradient">"Crop Disease Detection"</h1>
                <p class="lead">
                    "AI-powered disease detection for your crops with real-time weather insights and expert recommendations"
                </p>
                <div class="hero-actions">
                    <A href="/detect" class="btn btn-primary">"Get Started"</A>
                    <A href="/insights" class="btn btn-secondary">"View Insights"</A>
                </div>
            </section>

            <section class="features">
                <h2 class="text-gradient">"Powerful Features"</h2>
                <p class="section-sub">"Everything you need to protect your crops"</p>
                <div class="grid grid-4">
                    {FEATURES
                        .iter()
                        .map(|&(icon, title, text)| view! {
                            <div class="card feature-card">
                                <span class="feature-icon">{icon}</span>
                                <h3>{title}</h3>
                                <p>{text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="grid grid-2">
                <Precautions/>
                <div class="card">
                    <h3 class="card-title">"Quick Stats"</h3>
                    <div class="quick-stats">
                        {QUICK_STATS
                            .iter()
                            .map(|&(label, value, class)| view! {
                                <div class="quick-stat">
                                    <span>{label}</span>
                                    <span class=class>{value}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>
        </div>
    }
}
