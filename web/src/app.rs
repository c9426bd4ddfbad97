//! Root Leptos application component with routing.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use agrivision_common::api::ApiClient;
use agrivision_common::config::Config;
use agrivision_common::theme::boot_script;
use agrivision_common::weather::WeatherClient;

use crate::components::footer::Footer;
use crate::components::nav::Nav;
use crate::pages::{
    about::AboutPage, contact::ContactPage, detect::DetectPage, home::Home,
    insights::InsightsPage,
};
use crate::theme::provide_theme;

/// The root `<App/>` component.
///
/// The SSR server may provide a [`Config`] as context; the browser bundle
/// falls back to the configuration captured at build time.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let theme = provide_theme();

    let config = use_context::<Config>().unwrap_or_else(Config::from_build_env);
    provide_context(ApiClient::new(config.api_url.clone()));
    provide_context(WeatherClient::new(&config));
    provide_context(config);

    view! {
        <Html class=move || theme.theme().as_str()/>
        <Stylesheet id="leptos" href="/pkg/agrivision-web.css"/>
        <Link rel="icon" type_="image/svg+xml" href="/favicon.svg"/>
        <Title text="AgriVision – Crop Disease Detection"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1"/>
        <Meta name="description" content="AI-powered crop disease detection with treatment advice"/>

        // Applies the stored theme before the body paints.
        <script inner_html=boot_script()></script>
        <Router>
            <Nav/>
            <main class="main-content">
                <Routes>
                    <Route path="/" view=Home/>
                    <Route path="/detect" view=DetectPage/>
                    <Route path="/insights" view=InsightsPage/>
                    <Route path="/about" view=AboutPage/>
                    <Route path="/contact" view=ContactPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
