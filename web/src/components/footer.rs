//! Site footer.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Local::now().format("%Y").to_string();

    view! {
        <footer class="site-footer">
            <div class="footer-brand">
                <span class="nav-logo-badge">"AV"</span>
                <p>"AgriVision – AI-powered crop disease detection for healthier harvests."</p>
            </div>
            <div class="footer-links">
                <A href="/detect">"Detect"</A>
                <A href="/insights">"Insights"</A>
                <A href="/about">"About"</A>
                <A href="/contact">"Contact"</A>
            </div>
            <p class="footer-copy">{format!("© {year} AgriVision. All rights reserved.")}</p>
        </footer>
    }
}
