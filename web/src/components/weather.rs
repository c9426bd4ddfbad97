//! Local weather widget.

use leptos::*;

use agrivision_common::model::{format_number, WeatherReading};
use agrivision_common::weather::{condition_icon, coordinates_or_fallback, WeatherClient};

use crate::browser;

/// Current conditions at the visitor's position (or the fallback location).
#[component]
pub fn WeatherWidget() -> impl IntoView {
    let client = store_value(expect_context::<WeatherClient>());
    let reading = create_rw_signal(None::<WeatherReading>);

    let load = move || {
        reading.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let at = coordinates_or_fallback(browser::current_position().await);
            let fetched = client.current(at).await;
            // The widget may be gone by now.
            reading.try_set(Some(fetched));
        });
    };

    create_effect(move |prev: Option<()>| {
        if prev.is_none() {
            load();
        }
    });

    view! {
        <div class="card weather-card">
            <div class="weather-header">
                <h3>"Current Weather"</h3>
                <button class="btn btn-ghost" title="Refresh" on:click=move |_| load()>
                    "↻"
                </button>
            </div>
            {move || match reading.get() {
                None => view! {
                    <div class="weather-loading">
                        <span class="spinner"></span>
                        <p>"Loading weather…"</p>
                    </div>
                }
                .into_view(),
                Some(w) => view! {
                    <div class="weather-body">
                        <div class="weather-main">
                            <span class="weather-icon">{condition_icon(&w.condition)}</span>
                            <div>
                                <p class="weather-temp">
                                    {format!("{}°C", format_number(w.temperature.round()))}
                                </p>
                                <p class="weather-desc">{w.description.clone()}</p>
                                <p class="weather-place">{w.place.clone()}</p>
                            </div>
                        </div>
                        <div class="weather-details">
                            <div>
                                <span class="label">"Feels like"</span>
                                <span>{format!("{}°C", format_number(w.feels_like.round()))}</span>
                            </div>
                            <div>
                                <span class="label">"Humidity"</span>
                                <span>{format!("{}%", w.humidity)}</span>
                            </div>
                            <div>
                                <span class="label">"Wind"</span>
                                <span>{format!("{} m/s", format_number(w.wind_speed))}</span>
                            </div>
                        </div>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}
