//! Browser bindings: local storage, object URLs, geolocation, file reading
//! and downloads.
//!
//! The SSR build gets inert stand-ins with the same signatures; none of
//! them is reached on the server because event handlers and effects only
//! run in the browser.

use agrivision_common::error::{ApiError, StorageError};
use agrivision_common::model::{Coordinates, ImageUpload};
use agrivision_common::theme::{PreferenceStorage, Theme};
use leptos::{html, NodeRef};

/// A file chosen through the picker or dropped on the upload zone.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    #[cfg(feature = "hydrate")]
    file: web_sys::File,
    pub name: String,
    pub mime: String,
}

/// How long a download's object URL outlives the click that started it.
pub const DOWNLOAD_URL_LIFETIME: std::time::Duration = std::time::Duration::from_secs(40);

/// `localStorage`-backed preference storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

/// Object-URL previews (`URL.createObjectURL` / `URL.revokeObjectURL`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrls;

cfg_if::cfg_if! {
    if #[cfg(feature = "hydrate")] {
        use agrivision_common::api::PREDICT_FALLBACK;
        use agrivision_common::detect::PreviewSource;
        use agrivision_common::model::is_image_mime;
        use tracing::warn;
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;

        fn window() -> Option<web_sys::Window> {
            web_sys::window()
        }

        fn js_msg(v: &JsValue) -> String {
            v.as_string().unwrap_or_else(|| format!("{v:?}"))
        }

        impl LocalStorage {
            fn storage() -> Result<web_sys::Storage, StorageError> {
                window()
                    .ok_or_else(|| StorageError("no window".into()))?
                    .local_storage()
                    .map_err(|e| StorageError(js_msg(&e)))?
                    .ok_or_else(|| StorageError("localStorage not available".into()))
            }
        }

        impl PreferenceStorage for LocalStorage {
            fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
                Self::storage()?.get_item(key).map_err(|e| StorageError(js_msg(&e)))
            }

            fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
                Self::storage()?.set_item(key, value).map_err(|e| StorageError(js_msg(&e)))
            }
        }

        impl PreviewSource for ObjectUrls {
            type Image = SelectedFile;

            fn create(&self, image: &SelectedFile) -> String {
                web_sys::Url::create_object_url_with_blob(&image.file).unwrap_or_else(|e| {
                    warn!("Cannot create preview for {}: {}", image.name, js_msg(&e));
                    String::new()
                })
            }

            fn release(&self, url: &str) {
                if !url.is_empty() {
                    if let Err(e) = web_sys::Url::revoke_object_url(url) {
                        warn!("Cannot release preview {url}: {}", js_msg(&e));
                    }
                }
            }
        }

        impl From<web_sys::File> for SelectedFile {
            fn from(file: web_sys::File) -> Self {
                SelectedFile {
                    name: file.name(),
                    mime: file.type_(),
                    file,
                }
            }
        }

        /// OS colour-scheme preference, if the browser can tell.
        pub fn prefers_dark() -> Option<bool> {
            window()?
                .match_media("(prefers-color-scheme: dark)")
                .ok()
                .flatten()
                .map(|mq| mq.matches())
        }

        /// Swap the `light`/`dark` marker class on `<html>`.
        pub fn apply_document_theme(theme: Theme) {
            let Some(root) = window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
            else {
                return;
            };
            let classes = root.class_list();
            if let Err(e) = classes
                .remove_2(Theme::Light.as_str(), Theme::Dark.as_str())
                .and_then(|_| classes.add_1(theme.as_str()))
            {
                warn!("Cannot update document theme: {}", js_msg(&e));
            }
        }

        /// Open the file picker behind a hidden `<input type="file">`.
        pub fn open_picker(input: &NodeRef<html::Input>) {
            if let Some(el) = input.get_untracked() {
                el.click();
            }
        }

        /// Forget the picker's selection so the same file can be chosen again.
        pub fn clear_picker(input: &NodeRef<html::Input>) {
            if let Some(el) = input.get_untracked() {
                el.set_value("");
            }
        }

        /// First file of an `<input type="file">` change event.
        pub fn picked_file(ev: &leptos::ev::Event) -> Option<SelectedFile> {
            let input: web_sys::HtmlInputElement = ev.target()?.dyn_into().ok()?;
            input.files()?.get(0).map(SelectedFile::from)
        }

        /// First dropped file, provided it is an image.
        pub fn dropped_image(ev: &leptos::ev::DragEvent) -> Option<SelectedFile> {
            let file = ev.data_transfer()?.files()?.get(0)?;
            is_image_mime(&file.type_()).then(|| SelectedFile::from(file))
        }

        /// Read the selected file into an upload payload.
        pub async fn read_upload(image: &SelectedFile) -> Result<ImageUpload, ApiError> {
            let buffer = JsFuture::from(image.file.array_buffer()).await.map_err(|e| {
                warn!("Cannot read {}: {}", image.name, js_msg(&e));
                ApiError::Remote(PREDICT_FALLBACK.into())
            })?;
            Ok(ImageUpload {
                file_name: image.name.clone(),
                mime: image.mime.clone(),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            })
        }

        /// Ask the browser for the current position.
        pub async fn current_position() -> Result<Coordinates, String> {
            let geo = window()
                .ok_or("no window")?
                .navigator()
                .geolocation()
                .map_err(|e| js_msg(&e))?;

            let promise = js_sys::Promise::new(&mut |resolve, reject| {
                if let Err(e) = geo.get_current_position_with_error_callback(&resolve, Some(&reject)) {
                    let _ = reject.call1(&JsValue::NULL, &e);
                }
            });
            let position: web_sys::Position = JsFuture::from(promise)
                .await
                .map_err(|e| format!("geolocation denied: {}", js_msg(&e)))?
                .unchecked_into();
            let coords = position.coords();
            Ok(Coordinates {
                latitude: coords.latitude(),
                longitude: coords.longitude(),
            })
        }

        /// Save `bytes` as a file download.
        pub fn download(file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
            let document = window().and_then(|w| w.document()).ok_or("no document")?;

            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(mime);
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| js_msg(&e))?;
            let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| js_msg(&e))?;

            let anchor: web_sys::HtmlAnchorElement = document
                .create_element("a")
                .map_err(|e| js_msg(&e))?
                .unchecked_into();
            anchor.set_href(&url);
            anchor.set_download(file_name);
            anchor.click();

            // The download may not have started yet; keep the URL alive a while.
            leptos::set_timeout(
                move || {
                    if let Err(e) = web_sys::Url::revoke_object_url(&url) {
                        warn!("Cannot release download URL: {}", js_msg(&e));
                    }
                },
                DOWNLOAD_URL_LIFETIME,
            );
            Ok(())
        }
    } else {
        use agrivision_common::detect::PreviewSource;

        impl PreferenceStorage for LocalStorage {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }

            fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Ok(())
            }
        }

        impl PreviewSource for ObjectUrls {
            type Image = SelectedFile;

            fn create(&self, _image: &SelectedFile) -> String {
                String::new()
            }

            fn release(&self, _url: &str) {}
        }

        pub fn prefers_dark() -> Option<bool> {
            None
        }

        pub fn apply_document_theme(_theme: Theme) {}

        pub fn open_picker(_input: &NodeRef<html::Input>) {}

        pub fn clear_picker(_input: &NodeRef<html::Input>) {}

        pub fn picked_file(_ev: &leptos::ev::Event) -> Option<SelectedFile> {
            None
        }

        pub fn dropped_image(_ev: &leptos::ev::DragEvent) -> Option<SelectedFile> {
            None
        }

        pub async fn read_upload(_image: &SelectedFile) -> Result<ImageUpload, ApiError> {
            Err(ApiError::Validation("file reading requires a browser".into()))
        }

        pub async fn current_position() -> Result<Coordinates, String> {
            Err("geolocation requires a browser".into())
        }

        pub fn download(_file_name: &str, _mime: &str, _bytes: &[u8]) -> Result<(), String> {
            Err("downloads require a browser".into())
        }
    }
}
