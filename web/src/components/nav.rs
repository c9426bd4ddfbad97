//! Top navigation bar component.

use leptos::*;
use leptos_router::*;

use agrivision_common::theme::Theme;

use crate::theme::use_theme;

const LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/detect", "Detect"),
    ("/insights", "Insights"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

/// Site-wide navigation bar with theme toggle and collapsible mobile menu.
#[component]
pub fn Nav() -> impl IntoView {
    let theme = use_theme();
    let pathname = use_location().pathname;
    let (menu_open, set_menu_open) = create_signal(false);

    let links = move || {
        LINKS
            .iter()
            .map(|&(href, label)| {
                let is_active = move || pathname.get() == href;
                view! {
                    <A href=href class="nav-link">
                        {label}
                        <Show when=is_active>
                            <span class="nav-indicator"></span>
                        </Show>
                    </A>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <A href="/" class="nav-logo">
                    <span class="nav-logo-badge">"AV"</span>
                    <span class="nav-logo-text">"AgriVision"</span>
                </A>
            </div>
            <div class="nav-links">{links}</div>
            <div class="nav-actions">
                <button
                    class="theme-toggle"
                    title="Toggle theme"
                    on:click=move |_| theme.toggle()
                >
                    {move || match theme.theme() {
                        Theme::Light => "🌙",
                        Theme::Dark => "☀️",
                    }}
                </button>
                <button
                    class="menu-toggle"
                    title="Menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>
            <Show when=move || menu_open.get()>
                <div class="nav-mobile" on:click=move |_| set_menu_open.set(false)>
                    {links}
                </div>
            </Show>
        </nav>
    }
}
