//! UI Components

use arden_core::{
    registry::{load_profile, ReadState, UserProfile, WriteState},
    notice::{VERIFICATION_FAILED, VERIFICATION_SENT},
    view::CampaignView,
    CampaignFilter, CampaignId, FormErrors, Task,
};
use leptos::prelude::*;

use crate::state::use_app;
use crate::wallet::await_confirmation;

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/about", "About Us"),
    ("/contact", "Contact"),
    ("/dashboard", "Dashboard"),
];

/// Top navigation with the wallet button
#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app();
    let wallet_open = RwSignal::new(false);
    let connected = app.wallet_connected;
    let wallet = app.wallet;

    let label = move || match wallet.get() {
        Some(address) => address.short(),
        None if connected.get() => "Wallet".to_string(),
        None => "Connect".to_string(),
    };

    view! {
        <nav class="navbar">
            <a href="/" class="brand">
                <img src="/logo.png" alt="Arden Logo" width="32" height="32" />
                <span>"Arden"</span>
            </a>
            <div class="nav-links">
                {NAV_LINKS
                    .iter()
                    .map(|(href, label)| view! { <a href=*href class="nav-link">{*label}</a> })
                    .collect_view()}
            </div>
            <button class="btn btn-primary" on:click=move |_| wallet_open.set(true)>
                {label}
            </button>
        </nav>
        <WalletModal open=wallet_open />
    }
}

/// Side panel for linking or unlinking the wallet
#[component]
pub fn WalletModal(open: RwSignal<bool>) -> impl IntoView {
    let app = use_app();
    let wallet = app.wallet;
    let connected = app.wallet_connected;
    let (connect_app, disconnect_app) = (app.clone(), app);
    let disconnect = Callback::new(move |()| disconnect_app.disconnect_wallet());

    view! {
        <Modal open=open title="Wallet" on_close=move || open.set(false)>
            <Show
                when=move || connected.get()
                fallback={
                    let app = connect_app.clone();
                    move || {
                        let app = app.clone();
                        view! {
                            <p class="muted">
                                "Connect your Account Abstraction wallet to start participating in campaigns."
                            </p>
                            <button class="btn btn-primary wide" on:click=move |_| app.link_wallet(true)>
                                "Connect Wallet"
                            </button>
                        }
                    }
                }
            >
                <div class="panel">
                    <InfoItem label="Status" value="Connected" />
                    <InfoItem
                        label="Address"
                        value=Signal::derive(move || {
                            wallet.get().map_or_else(|| "Linking...".to_string(), |w| w.short())
                        })
                    />
                </div>
                <button
                    class="btn wide"
                    on:click=move |_| disconnect.run(())
                >
                    "Disconnect"
                </button>
            </Show>
        </Modal>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();
    view! {
        <footer class="footer">
            <p>"© " {year} " Arden. Build, engage, reward."</p>
        </footer>
    }
}

/// Overlay dialog
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
            <div class="modal" role="dialog">
                <header class="modal-header">
                    <h2>{title.clone()}</h2>
                    <button class="icon-btn" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <div class="modal-body">{children()}</div>
            </div>
        </Show>
    }
}

/// The app-wide dismissable notice
#[component]
pub fn AlertBox() -> impl IntoView {
    let app = use_app();
    let notice = app.notice;

    move || {
        notice.get().map(|(_, notice)| {
            let app = app.clone();
            let class = format!("alert alert-{}", notice.variant.as_str());
            view! {
                <div class=class role="status">
                    <strong>{notice.variant.title()}</strong>
                    <p>{notice.message}</p>
                    <button class="icon-btn" on:click=move |_| app.dismiss()>"×"</button>
                </div>
            }
        })
    }
}

/// Inline error under a form field
#[component]
pub fn FieldError(#[prop(into)] errors: Signal<FormErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field).map(str::to_string))
            .map(|message| view! { <div class="field-error">"⚠ " {message}</div> })
    }
}

/// Label/value row
#[component]
pub fn InfoItem(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] value_class: String,
) -> impl IntoView {
    view! {
        <div class="info-item">
            <span class="info-label">{label} ":"</span>
            <span class=format!("info-value {value_class}")>{move || value.get()}</span>
        </div>
    }
}

/// One card in either grid
#[component]
pub fn CampaignCard(
    card: CampaignView,
    #[prop(into)] on_join: Callback<CampaignId>,
    #[prop(into)] on_leave: Callback<CampaignId>,
    #[prop(optional, into)] on_open: Option<Callback<CampaignId>>,
) -> impl IntoView {
    let href = card.href();
    let id = card.id().clone();

    match card {
        CampaignView::Discover(card) => {
            let action = if card.is_joined {
                let id = id.clone();
                view! {
                    <button class="btn" on:click=move |ev| {
                        ev.prevent_default();
                        on_leave.run(id.clone());
                    }>"Leave"</button>
                }
                .into_any()
            } else {
                let id = id.clone();
                view! {
                    <button class="btn btn-primary" on:click=move |ev| {
                        ev.prevent_default();
                        on_join.run(id.clone());
                    }>"Join"</button>
                }
                .into_any()
            };

            view! {
                <a href=href class="card campaign-card">
                    <h3>{card.title}</h3>
                    <p class="muted">{card.description}</p>
                    <div class="card-meta">
                        <span>{card.participants} " participants"</span>
                        <span class="accent">{card.reward.to_string()} " ETH"</span>
                    </div>
                    {action}
                </a>
            }
            .into_any()
        }
        CampaignView::Builder(card) => {
            let (status, status_class) = if card.is_active { ("Active", "ok") } else { ("Inactive", "bad") };
            let open = move |_| {
                if let Some(on_open) = on_open {
                    on_open.run(id.clone());
                }
            };

            view! {
                <div class="card campaign-card builder" on:click=open>
                    <h3>{card.title}</h3>
                    <p class="muted">{card.description}</p>
                    <div class="card-meta">
                        <span>{card.task_count} " tasks"</span>
                        <span>{card.remaining_budget.to_string()} " / " {card.total_budget.to_string()} " ETH"</span>
                        <span class=status_class>{status}</span>
                    </div>
                    <a href=href class="link">"View page"</a>
                </div>
            }
            .into_any()
        }
    }
}

/// Discover-grid filter
#[component]
pub fn FilterDropdown(filter: RwSignal<CampaignFilter>) -> impl IntoView {
    view! {
        <select
            class="filter"
            prop:value=move || filter.get().label()
            on:change=move |ev| filter.set(CampaignFilter::from_label(&event_target_value(&ev)))
        >
            {CampaignFilter::OPTIONS
                .iter()
                .map(|f| view! { <option value=f.label()>{f.label()}</option> })
                .collect_view()}
        </select>
    }
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let (status, class) = if task.is_active { ("Active", "ok") } else { ("Inactive", "bad") };
    let completed = task.completed;
    view! {
        <div class="card task-card" class:completed=completed>
            <h3>
                {task.title}
                {completed.then(|| view! { <span class="badge ok">" ✓ Completed"</span> })}
            </h3>
            <p class="muted">{task.description}</p>
            <div class="card-meta">
                <span class="accent">{task.reward.to_string()} " Reward"</span>
                <span>{task.completion_count} " Completions"</span>
                <span class=class>{status}</span>
            </div>
        </div>
    }
}

/// Profile with on-chain registry status
#[component]
pub fn ProfileModal(open: RwSignal<bool>) -> impl IntoView {
    let app = use_app();
    let profile = RwSignal::new(ReadState::<UserProfile>::Pending);
    let verify = RwSignal::new(WriteState::Idle);
    let kyc_input = RwSignal::new(String::new());

    // Reload the profile every time the modal opens with a linked wallet
    Effect::new({
        let app = app.clone();
        move |_| {
            if !open.get() {
                return;
            }
            let Some(address) = app.wallet.get() else {
                profile.set(ReadState::Pending);
                return;
            };
            let registry = app.registry.clone();
            leptos::task::spawn_local(async move {
                let loaded = load_profile(registry.as_ref(), &address).await;
                profile.set(ReadState::Ready(loaded));
            });
        }
    });

    let submit_kyc = {
        let app = app.clone();
        move |_| {
            let Some(address) = app.wallet.get_untracked() else {
                app.report(&arden_core::ArdenError::WalletNotLinked);
                return;
            };
            let kyc = kyc_input.get_untracked().trim().to_string();
            if kyc.is_empty() {
                app.fail("Please enter a KYC reference");
                return;
            }

            verify.set(WriteState::Submitting);
            let app = app.clone();
            leptos::task::spawn_local(async move {
                match app.registry.verify_user(&address, &address, &kyc).await {
                    Ok(tx) => {
                        app.notify(arden_core::Notice::info(VERIFICATION_SENT));
                        verify.set(WriteState::Submitted(tx.clone()));
                        match await_confirmation(app.registry.as_ref(), &tx, &app.config).await {
                            Ok(true) => verify.set(WriteState::Confirmed(tx)),
                            Ok(false) => {}
                            Err(e) => verify.set(WriteState::Failed(e.to_string())),
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Verification failed");
                        verify.set(WriteState::Failed(e.to_string()));
                        app.fail(VERIFICATION_FAILED);
                    }
                }
            });
        }
    };

    let created = {
        let app = app.clone();
        move || {
            app.revision.get();
            app.repo.builder_campaigns(app.owner().as_deref()).len()
        }
    };
    let joined = {
        let app = app.clone();
        move || {
            app.revision.get();
            app.repo.joined_ids().len()
        }
    };
    let name = app.user_name().unwrap_or_else(|| "User".into());
    let email = app.user_data().map(|d| d.email).unwrap_or_default();

    view! {
        <Modal open=open title="Profile" on_close=move || open.set(false)>
            <div class="profile">
                <h3>{name.clone()}</h3>
                <p class="muted">{email.clone()}</p>
                <div class="stats">
                    <div class="stat"><strong>{created.clone()}</strong>" Created Campaigns"</div>
                    <div class="stat"><strong>{joined.clone()}</strong>" Joined Campaigns"</div>
                </div>
                {move || match profile.get() {
                    ReadState::Pending => view! { <p class="muted">"Connect your wallet to load your registry profile."</p> }.into_any(),
                    ReadState::Failed(_) => view! { <p class="muted">"Registry profile unavailable."</p> }.into_any(),
                    ReadState::Ready(p) => {
                        let status = match &p.user {
                            Some(u) if !u.is_unregistered() && u.is_verified => "Verified",
                            Some(u) if !u.is_unregistered() => "Registered",
                            _ => "Not registered",
                        };
                        let role = p.user.as_ref().map(|u| u.role().as_str().to_string()).unwrap_or_default();
                        let totals = format!(
                            "{} registered / {} verified",
                            p.total_registered.map_or("-".into(), |n| n.to_string()),
                            p.total_verified.map_or("-".into(), |n| n.to_string()),
                        );
                        view! {
                            <div class="panel">
                                <InfoItem label="Registry" value=status.to_string() />
                                <InfoItem label="Role" value=role />
                                <InfoItem label="KYC" value=p.kyc_hash.clone().unwrap_or_else(|| "None".into()) />
                                <InfoItem label="Users" value=totals />
                            </div>
                        }
                        .into_any()
                    }
                }}
                <div class="kyc">
                    <input
                        type="text"
                        placeholder="KYC reference"
                        prop:value=move || kyc_input.get()
                        on:input=move |ev| kyc_input.set(event_target_value(&ev))
                    />
                    <button
                        class="btn btn-primary"
                        disabled=move || verify.with(WriteState::is_pending)
                        on:click=submit_kyc.clone()
                    >
                        {move || match verify.get() {
                            WriteState::Submitting => "Waiting for wallet...",
                            WriteState::Submitted(_) => "Confirming...",
                            WriteState::Confirmed(_) => "Verified",
                            _ => "Submit KYC",
                        }}
                    </button>
                </div>
                {move || verify.with(|v| v.error().map(|e| view! { <p class="field-error">{e.to_string()}</p> }))}
            </div>
        </Modal>
    }
}
