//! Server entry-point – Axum + Leptos SSR.
//!
//! Usage: `agrivision-web [config-file]`. Without a file the
//! `AGRIVISION_*` environment variables are used.

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::{
        extract::State,
        response::{IntoResponse, Response},
        Router,
    };
    use leptos::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::services::ServeDir;

    use agrivision_common::api::ApiClient;
    use agrivision_common::config::Config;
    use agrivision_web::app::App;

    // ── Tracing ──────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "agrivision_web=info,agrivision_common=info,tower_http=info".into()
            }),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let conf = get_configuration(None)
        .await
        .context("Cannot read Leptos configuration")?;
    let leptos_options = conf.leptos_options.clone();
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read config file {path}"))?;
            Config::from_conf_text(&text)
        }
        None => Config::from_lookup(|key| std::env::var(key).ok()),
    };

    // The browser bundle only sees what was set when it was compiled.
    let bundled = Config::from_build_env();
    if bundled != config {
        tracing::warn!(
            "Server config (api_url={}) differs from the config compiled into the \
             browser bundle (api_url={}); pages will switch after hydration",
            config.api_url,
            bundled.api_url
        );
    }
    tracing::info!("Prediction service at {}", config.api_url);
    match ApiClient::new(config.api_url.clone()).health().await {
        Ok(status) => tracing::info!("Prediction service health: {status:?}"),
        Err(e) => tracing::warn!("{e}; detection will fail until it is reachable"),
    }

    // ── Routes ───────────────────────────────────────────────────────────
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let config = config.clone();
                move || provide_context(config.clone())
            },
            App,
        )
        .nest_service("/pkg", ServeDir::new(format!("{site_root}/pkg")))
        .fallback(fallback_handler)
        .with_state(leptos_options);

    tracing::info!("AgriVision listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    /// Fallback: serve a file from the site root (favicon etc.), else 404.
    async fn fallback_handler(
        State(options): State<LeptosOptions>,
        req: axum::http::Request<axum::body::Body>,
    ) -> Response {
        let uri_path = req.uri().path();
        if uri_path.contains("..") {
            return (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response();
        }
        let path = format!("{}{}", options.site_root, uri_path);

        match tokio::fs::read(&path).await {
            Ok(bytes) => (
                axum::http::StatusCode::OK,
                [(axum::http::header::CONTENT_TYPE, mime_for(&path))],
                bytes,
            )
                .into_response(),
            Err(_) => (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response(),
        }
    }

    fn mime_for(path: &str) -> &'static str {
        match path.rsplit('.').next().unwrap_or("") {
            "css" => "text/css",
            "js" => "application/javascript",
            "wasm" => "application/wasm",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This binary is only built with the `ssr` feature.
    // The WASM entry point is `lib::hydrate()`.
}
