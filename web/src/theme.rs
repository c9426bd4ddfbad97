//! Theme context shared by every component under `<App/>`.

use leptos::*;

use agrivision_common::theme::{Theme, ThemeStore};

use crate::browser::{self, LocalStorage};

/// Reactive handle on the persisted theme store.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    theme: ReadSignal<Theme>,
    set_theme: WriteSignal<Theme>,
    store: StoredValue<ThemeStore<LocalStorage>>,
}

impl ThemeContext {
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) {
        let mut next = Theme::default();
        self.store.update_value(|s| next = s.toggle());
        self.set_theme.set(next);
    }
}

/// Initialise the store and provide it as context. Call once, at the root.
pub fn provide_theme() -> ThemeContext {
    let store = ThemeStore::init(LocalStorage, browser::prefers_dark());
    let (theme, set_theme) = create_signal(store.theme());
    let ctx = ThemeContext {
        theme,
        set_theme,
        store: store_value(store),
    };

    create_effect(move |_| browser::apply_document_theme(theme.get()));

    provide_context(ctx);
    ctx
}

/// The theme context. Panics outside `provide_theme`.
pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}
