//! Upload an image, run detection and download the report.

use leptos::*;
use tracing::error;

use agrivision_common::api::ApiClient;
use agrivision_common::detect::DetectFlow;
use agrivision_common::model::Prediction;
use agrivision_common::report::REPORT_FILE_NAME;

use crate::browser::{self, ObjectUrls, SelectedFile};

#[component]
pub fn DetectPage() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let flow = create_rw_signal(DetectFlow::new(ObjectUrls));
    let input_ref = create_node_ref::<html::Input>();

    // Leaving the page releases the live preview.
    on_cleanup(move || {
        flow.try_update(|f| f.reset());
    });

    // ─── Handlers ────────────────────────────────────────────────────────────

    let select = move |file: SelectedFile| flow.update(|f| f.select(file));

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        if let Some(file) = browser::dropped_image(&ev) {
            select(file);
        }
    };

    let on_change = move |ev: ev::Event| {
        if let Some(file) = browser::picked_file(&ev) {
            select(file);
        }
    };

    let detect = move |_: ev::MouseEvent| {
        let Some(Ok(submission)) = flow.try_update(|f| f.begin_submit()) else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let outcome = match browser::read_upload(&submission.image).await {
                Ok(upload) => api.predict(upload).await,
                Err(e) => Err(e),
            };
            flow.try_update(|f| f.finish(submission.ticket, outcome));
        });
    };

    let reset = move || {
        flow.update(|f| f.reset());
        browser::clear_picker(&input_ref);
    };

    let download = move |_: ev::MouseEvent| {
        let Some(report) = flow.with(|f| f.report(chrono::Local::now().date_naive())) else {
            return;
        };
        match report.to_pdf() {
            Ok(bytes) => {
                if let Err(e) = browser::download(REPORT_FILE_NAME, "application/pdf", &bytes) {
                    error!("Cannot save report: {e}");
                }
            }
            Err(e) => error!("Cannot build report: {e}"),
        }
    };

    // ─── Derived state ───────────────────────────────────────────────────────

    let preview = move || flow.with(|f| f.preview_url().map(str::to_owned));
    let submitting = move || flow.with(|f| f.is_submitting());
    let error_message = move || flow.with(|f| f.error().map(str::to_owned));
    let result = move || flow.with(|f| f.result().cloned());

    view! {
        <div class="page detect-page">
            <h1 class="text-gradient">"Detect Disease"</h1>
            <p class="lead">"Upload a plant leaf image to get instant AI-powered disease detection"</p>

            <div class="card">
                <div
                    class="drop-zone"
                    on:dragover=|ev: ev::DragEvent| ev.prevent_default()
                    on:drop=on_drop
                    on:click=move |_| browser::open_picker(&input_ref)
                >
                    {move || match preview() {
                        None => view! {
                            <div class="drop-hint">
                                <span class="drop-icon">"📷"</span>
                                <p>"Drag and drop an image here, or click to select"</p>
                                <p class="muted">"Supports: JPG, PNG, JPEG"</p>
                            </div>
                        }
                        .into_view(),
                        Some(url) => view! {
                            <div class="preview">
                                <img src=url alt="Preview"/>
                                <button
                                    class="preview-clear"
                                    title="Remove image"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        reset();
                                    }
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                        .into_view(),
                    }}
                    <input
                        node_ref=input_ref
                        type="file"
                        accept="image/*"
                        class="hidden"
                        on:change=on_change
                    />
                </div>

                <div class="detect-actions">
                    <button class="btn btn-primary" disabled=submitting on:click=detect>
                        {move || if submitting() { "Analyzing..." } else { "Detect Disease" }}
                    </button>
                    <Show when=move || preview().is_some()>
                        <button class="btn btn-secondary" on:click=move |_| reset()>
                            "Reset"
                        </button>
                    </Show>
                </div>
            </div>

            <Show when=submitting>
                <div class="card loading-card">
                    <span class="spinner"></span>
                    <p>"Analyzing your image..."</p>
                    <p class="muted">"This may take a few seconds"</p>
                </div>
            </Show>

            {move || error_message().map(|message| view! {
                <div class="card notice notice-error">"⚠️ " {message}</div>
            })}

            {move || result().map(|p| view! { <ResultCard prediction=p on_download=download/> })}
        </div>
    }
}

#[component]
fn ResultCard<F>(prediction: Prediction, on_download: F) -> impl IntoView
where
    F: Fn(ev::MouseEvent) + 'static,
{
    let width = format!("width: {}%", prediction.confidence.clamp(0.0, 100.0));

    view! {
        <div class="card result-card">
            <h2>"✅ Detection Results"</h2>
            <div class="result-field">
                <label>"Detected Disease"</label>
                <p class="result-label">{prediction.label.clone()}</p>
            </div>
            <div class="result-field">
                <label>"Confidence Score"</label>
                <div class="confidence-row">
                    <div class="confidence-track">
                        <div class=prediction.confidence_class() style=width></div>
                    </div>
                    <span class="confidence-value">{prediction.confidence_label()}</span>
                </div>
            </div>
            <div class="result-field">
                <label>"Recommended Treatment"</label>
                <p class="remedy">{prediction.remedy.clone()}</p>
            </div>
            <button class="btn btn-primary btn-block" on:click=on_download>
                "Download Report (PDF)"
            </button>
        </div>
    }
}
