//! Register Page
//!
//! Saves the profile locally and, when a wallet is linked, registers the
//! user with the on-chain registry.

use std::time::Duration;

use arden_core::{
    notice::{ACCOUNT_CREATED, FORM_FIX_ERRORS, REGISTRATION_FAILED, REGISTRATION_SENT},
    store::keys,
    FormErrors, KeyValueStoreExt, Notice, RegistrationForm, Result, UserRole, WriteState,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

use super::{bind, FORM_DELAY};
use crate::components::FieldError;
use crate::state::{use_app, AppContext};
use crate::wallet::{await_confirmation, sleep};

const REDIRECT_DELAY: Duration = Duration::from_secs(2);

fn save_locally(app: &AppContext, form: &RegistrationForm) -> Result<()> {
    let store = app.repo.store();
    store.write(keys::USER_NAME, form.name.trim())?;
    store.write(keys::USER_DATA, form)
}

/// Send `registerUser` and follow it to a receipt
async fn register_on_chain(app: &AppContext, form: &RegistrationForm, chain: RwSignal<WriteState>) {
    let Some(address) = app.wallet.get_untracked() else {
        return;
    };
    let (first, last) = form.name_parts();

    chain.set(WriteState::Submitting);
    match app.registry.register_user(&address, &first, form.role, &last).await {
        Ok(tx) => {
            app.notify(Notice::info(REGISTRATION_SENT));
            chain.set(WriteState::Submitted(tx.clone()));
            match await_confirmation(app.registry.as_ref(), &tx, &app.config).await {
                Ok(true) => chain.set(WriteState::Confirmed(tx)),
                Ok(false) => tracing::warn!(%tx, "Registration still pending"),
                Err(e) => chain.set(WriteState::Failed(e.to_string())),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            chain.set(WriteState::Failed(e.to_string()));
            app.fail(REGISTRATION_FAILED);
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let form = RwSignal::new(app.user_data().unwrap_or_default());
    let errors = RwSignal::new(FormErrors::new());
    let loading = RwSignal::new(false);
    let chain = RwSignal::new(WriteState::Idle);
    let wallet = app.wallet;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let found = form.with_untracked(RegistrationForm::validate);
        if !found.is_empty() {
            errors.set(found);
            app.fail(FORM_FIX_ERRORS);
            return;
        }

        loading.set(true);
        let app = app.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            sleep(FORM_DELAY).await;
            let submitted = form.get_untracked();

            if let Err(e) = save_locally(&app, &submitted) {
                loading.set(false);
                app.report(&e);
                return;
            }
            app.success(ACCOUNT_CREATED);
            register_on_chain(&app, &submitted, chain).await;

            sleep(REDIRECT_DELAY).await;
            loading.set(false);
            navigate("/dashboard", Default::default());
        });
    };

    let chain_status = move || match chain.get() {
        WriteState::Idle => None,
        WriteState::Submitting => Some("Confirm the registration in your wallet...".to_string()),
        WriteState::Submitted(tx) => Some(format!("Transaction {tx} sent, waiting for confirmation")),
        WriteState::Confirmed(_) => Some("Registered on-chain".to_string()),
        WriteState::Failed(e) => Some(format!("On-chain registration failed: {e}")),
    };

    view! {
        <div class="register">
            <h1>"Join Arden"</h1>
            <p class="subtitle">"Create your account to get started"</p>

            <form class="card form" on:submit=on_submit>
                <label>"Full Name"</label>
                <input
                    type="text"
                    name="name"
                    placeholder="Enter your full name"
                    class:invalid=move || errors.with(|e| e.get("name").is_some())
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=bind(form, errors, "name", |f, v| f.name = v)
                />
                <FieldError errors=errors field="name" />

                <label>"Email Address"</label>
                <input
                    type="email"
                    name="email"
                    placeholder="Enter your email"
                    class:invalid=move || errors.with(|e| e.get("email").is_some())
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=bind(form, errors, "email", |f, v| f.email = v)
                />
                <FieldError errors=errors field="email" />

                <label>"I am a"</label>
                <select
                    name="role"
                    prop:value=move || form.with(|f| f.role.as_str())
                    on:change=bind(form, errors, "role", |f, v| f.role = UserRole::from_label(&v))
                >
                    <option value="user">"User (Discover campaigns)"</option>
                    <option value="builder">"Builder (Create campaigns)"</option>
                </select>

                <label>"Tell us about yourself"</label>
                <textarea
                    name="description"
                    rows="4"
                    placeholder="What brings you to Arden?"
                    class:invalid=move || errors.with(|e| e.get("description").is_some())
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=bind(form, errors, "description", |f, v| f.description = v)
                ></textarea>
                <FieldError errors=errors field="description" />

                <Show when=move || wallet.with(Option::is_none)>
                    <p class="muted">"Connect a wallet to also register on-chain."</p>
                </Show>

                <button type="submit" class="btn btn-primary wide" disabled=move || loading.get()>
                    {move || if loading.get() { "Creating Account..." } else { "Create Account" }}
                </button>
                {move || chain_status().map(|s| view! { <p class="muted">{s}</p> })}
            </form>
        </div>
    }
}
