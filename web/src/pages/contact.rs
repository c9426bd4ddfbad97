//! Contact page. The form is local only.

use std::time::Duration;

use leptos::*;

use agrivision_common::contact::{ContactForm, Field, CONFIRMATION_MS};

const CONTACT_INFO: [(&str, &str, &str); 3] = [
    ("✉️", "Email", "contact@agrivision.com"),
    ("📞", "Phone", "+1 (555) 123-4567"),
    ("📍", "Address", "123 Farm Street, Agriculture City"),
];

#[component]
pub fn ContactPage() -> impl IntoView {
    let form = create_rw_signal(ContactForm::default());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        form.update(|f| f.submit());
        set_timeout(
            move || {
                form.try_update(|f| f.clear());
            },
            Duration::from_millis(CONFIRMATION_MS),
        );
    };

    view! {
        <div class="page contact-page">
            <h1 class="text-gradient">"Contact Us"</h1>
            <p class="lead">"Get in touch with our team"</p>

            <div class="grid grid-2">
                <div>
                    <h2>"Get in Touch"</h2>
                    <p>
                        "Have questions or feedback? We'd love to hear from you. "
                        "Send us a message and we'll respond as soon as possible."
                    </p>
                    {CONTACT_INFO
                        .iter()
                        .map(|&(icon, title, value)| view! {
                            <div class="card contact-info">
                                <span class="contact-icon">{icon}</span>
                                <div>
                                    <h3>{title}</h3>
                                    <p>{value}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>

                <div class="card">
                    <Show when=move || form.with(|f| f.submitted)>
                        <div class="notice notice-success">
                            "✅ Message sent successfully! We'll get back to you soon."
                        </div>
                    </Show>
                    <form class="contact-form" on:submit=on_submit>
                        <FormField form field=Field::Name label="Name" kind="text" placeholder="Your name"/>
                        <FormField form field=Field::Email label="Email" kind="email" placeholder="your@email.com"/>
                        <FormField form field=Field::Subject label="Subject" kind="text" placeholder="What's this about?"/>
                        <label for="message">"Message"</label>
                        <textarea
                            id="message"
                            rows="6"
                            required
                            placeholder="Your message..."
                            class="input-field"
                            prop:value=move || form.with(|f| f.draft.message.clone())
                            on:input=move |ev| {
                                form.update(|f| f.draft.set(Field::Message, event_target_value(&ev)))
                            }
                        ></textarea>
                        <button type="submit" class="btn btn-primary">"Send Message"</button>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// Single-line input bound to one draft field.
#[component]
fn FormField(
    form: RwSignal<ContactForm>,
    field: Field,
    label: &'static str,
    kind: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    let id = label.to_lowercase();
    view! {
        <label for=id.clone()>{label}</label>
        <input
            id=id
            type=kind
            required
            placeholder=placeholder
            class="input-field"
            prop:value=move || form.with(|f| f.draft.get(field).to_string())
            on:input=move |ev| form.update(|f| f.draft.set(field, event_target_value(&ev)))
        />
    }
}
