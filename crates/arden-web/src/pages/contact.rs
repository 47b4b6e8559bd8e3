//! Contact Page

use arden_core::{
    notice::{CONTACT_SENT, FORM_FIX_ERRORS},
    ContactForm, FormErrors,
};
use leptos::{ev::SubmitEvent, prelude::*};

use super::{bind, FORM_DELAY};
use crate::components::FieldError;
use crate::state::use_app;
use crate::wallet::sleep;

#[component]
pub fn ContactPage() -> impl IntoView {
    let app = use_app();
    let form = RwSignal::new(ContactForm::default());
    let errors = RwSignal::new(FormErrors::new());
    let loading = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let found = form.with_untracked(ContactForm::validate);
        if !found.is_empty() {
            errors.set(found);
            app.fail(FORM_FIX_ERRORS);
            return;
        }

        loading.set(true);
        let app = app.clone();
        leptos::task::spawn_local(async move {
            sleep(FORM_DELAY).await;
            tracing::info!("Contact message submitted");
            loading.set(false);
            form.set(ContactForm::default());
            errors.set(FormErrors::new());
            app.success(CONTACT_SENT);
        });
    };

    view! {
        <div class="contact">
            <h1>"Get in Touch"</h1>
            <p class="subtitle">"Questions about running a campaign? We'd love to hear from you."</p>

            <form class="card form" on:submit=on_submit>
                <label>"Name"</label>
                <input
                    type="text"
                    name="name"
                    placeholder="Your name"
                    class:invalid=move || errors.with(|e| e.get("name").is_some())
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=bind(form, errors, "name", |f, v| f.name = v)
                />
                <FieldError errors=errors field="name" />

                <label>"Email"</label>
                <input
                    type="email"
                    name="email"
                    placeholder="you@example.com"
                    class:invalid=move || errors.with(|e| e.get("email").is_some())
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=bind(form, errors, "email", |f, v| f.email = v)
                />
                <FieldError errors=errors field="email" />

                <label>"Message"</label>
                <textarea
                    name="message"
                    rows="5"
                    placeholder="How can we help?"
                    class:invalid=move || errors.with(|e| e.get("message").is_some())
                    prop:value=move || form.with(|f| f.message.clone())
                    on:input=bind(form, errors, "message", |f, v| f.message = v)
                ></textarea>
                <FieldError errors=errors field="message" />

                <button type="submit" class="btn btn-primary wide" disabled=move || loading.get()>
                    {move || if loading.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>
        </div>
    }
}
