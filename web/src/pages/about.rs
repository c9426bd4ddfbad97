//! Static project description.

use leptos::*;

struct Member {
    name: &'static str,
    role: &'static str,
    blurb: &'static str,
}

const TEAM: [Member; 4] = [
    Member {
        name: "Alex Johnson",
        role: "Data Collection & Preparation",
        blurb: "Responsible for gathering and preprocessing the PlantVillage dataset.",
    },
    Member {
        name: "Sarah Williams",
        role: "AI Model Development",
        blurb: "Designed and trained the CNN model for disease classification.",
    },
    Member {
        name: "Michael Chen",
        role: "Backend & Deployment",
        blurb: "Built the prediction API and deployed the application infrastructure.",
    },
    Member {
        name: "Emily Davis",
        role: "Frontend Development",
        blurb: "Created the web interface.",
    },
];

const STACK: [&str; 4] = ["Rust", "Leptos", "TensorFlow", "Flask"];

const STATS: [(&str, &str, &str); 3] = [
    ("38+", "Disease Classes", "stat-primary"),
    ("95%+", "Accuracy", "stat-secondary"),
    ("< 3s", "Detection Time", "stat-accent"),
];

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect()
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page about-page">
            <h1 class="text-gradient">"About AgriVision"</h1>
            <p class="lead">"Empowering farmers with AI-powered crop disease detection"</p>

            <div class="card mission">
                <h2>"Mission"</h2>
                <p>
                    "AgriVision is an AI-powered solution designed to help farmers detect crop diseases early, "
                    "protecting their harvest and ensuring food security. Our mission is to make advanced "
                    "agricultural technology accessible to farmers worldwide, enabling them to make informed "
                    "decisions and maximize their crop yields."
                </p>
            </div>

            <h2>"Technology Stack"</h2>
            <div class="grid grid-4">
                {STACK.iter().map(|name| view! { <div class="card tech-card">{*name}</div> }).collect_view()}
            </div>

            <h2>"Our Team"</h2>
            <div class="grid grid-4">
                {TEAM
                    .iter()
                    .map(|m| view! {
                        <div class="card team-card">
                            <span class="avatar">{initials(m.name)}</span>
                            <h3>{m.name}</h3>
                            <p class="role">{m.role}</p>
                            <p>{m.blurb}</p>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="grid grid-3">
                {STATS
                    .iter()
                    .map(|&(value, label, class)| view! {
                        <div class="card stat-card">
                            <p class=class>{value}</p>
                            <p>{label}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
