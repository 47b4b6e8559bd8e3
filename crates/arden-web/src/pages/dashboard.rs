//! Dashboard Page
//!
//! Two tabs: "Discover" over every campaign, and "My Campaigns" for the
//! builder's own campaigns with the create and add-task flows.

use arden_core::{
    notice::{CAMPAIGN_CREATED, CAMPAIGN_JOINED, CAMPAIGN_LEFT, FORM_INVALID},
    store::keys,
    CampaignFilter, CampaignForm, CampaignId, CampaignQuery, CampaignView, FormErrors,
    TaskConfirmation, TaskFlowState,
};
use chrono::Utc;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

use super::bind;
use crate::components::{
    CampaignCard, FieldError, FilterDropdown, InfoItem, Modal, ProfileModal, TaskCard,
};
use crate::state::{use_app, AppContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Discover,
    Builder,
}

/// Join and leave handlers shared by the grids and the detail page
pub(super) fn membership_actions(app: &AppContext) -> (Callback<CampaignId>, Callback<CampaignId>) {
    let join = {
        let app = app.clone();
        Callback::new(move |id: CampaignId| match app.repo.join(&id) {
            Ok(changed) => {
                app.touch();
                if changed {
                    app.success(CAMPAIGN_JOINED);
                }
            }
            Err(e) => app.report(&e),
        })
    };
    let leave = {
        let app = app.clone();
        Callback::new(move |id: CampaignId| match app.repo.leave(&id) {
            Ok(changed) => {
                app.touch();
                if changed {
                    app.success(CAMPAIGN_LEFT);
                }
            }
            Err(e) => app.report(&e),
        })
    };
    (join, leave)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let tab = RwSignal::new(Tab::Discover);
    let profile_open = RwSignal::new(false);
    let logout_open = RwSignal::new(false);
    let user_name = app.user_name().unwrap_or_else(|| "Builder".into());
    let leaving = StoredValue::new(false);

    // Signed-out visitors register first
    Effect::new({
        let app = app.clone();
        let navigate = navigate.clone();
        move |_| {
            if !leaving.get_value() && !app.is_signed_in() {
                tracing::info!("Not signed in, redirecting to register");
                navigate("/register", Default::default());
            }
        }
    });

    let logout = move |_| {
        leaving.set_value(true);
        app.disconnect_wallet();
        for key in [keys::USER_NAME, keys::USER_DATA] {
            if let Err(e) = app.repo.store().remove(key) {
                tracing::warn!(key, error = %e, "Could not clear stored profile");
            }
        }
        logout_open.set(false);
        tracing::info!("Logged out");
        navigate("/", Default::default());
    };

    let tab_class = move |t: Tab| if tab.get() == t { "tab active" } else { "tab" };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div>
                    <h1>"Welcome back, " {user_name}</h1>
                    <p class="muted">"Discover campaigns or manage your own."</p>
                </div>
                <div class="actions">
                    <button class="btn" on:click=move |_| profile_open.set(true)>"Profile"</button>
                    <button class="btn" on:click=move |_| logout_open.set(true)>"Logout"</button>
                </div>
            </header>

            <nav class="tabs">
                <button class=move || tab_class(Tab::Discover) on:click=move |_| tab.set(Tab::Discover)>
                    "Discover"
                </button>
                <button class=move || tab_class(Tab::Builder) on:click=move |_| tab.set(Tab::Builder)>
                    "My Campaigns"
                </button>
            </nav>

            {move || match tab.get() {
                Tab::Discover => view! { <DiscoverTab /> }.into_any(),
                Tab::Builder => view! { <BuilderTab /> }.into_any(),
            }}
        </div>

        <ProfileModal open=profile_open />
        <Modal open=logout_open title="Logout" on_close=move || logout_open.set(false)>
            <p>"Are you sure you want to log out? Your wallet will be disconnected."</p>
            <div class="actions">
                <button class="btn" on:click=move |_| logout_open.set(false)>"Cancel"</button>
                <button class="btn btn-danger" on:click=logout.clone()>"Logout"</button>
            </div>
        </Modal>
    }
}

#[component]
fn DiscoverTab() -> impl IntoView {
    let app = use_app();
    let search = RwSignal::new(String::new());
    let filter = RwSignal::new(CampaignFilter::All);
    let (on_join, on_leave) = membership_actions(&app);
    let revision = app.revision;
    let repo = app.repo.clone();

    let cards = move || {
        revision.track();
        let query = CampaignQuery::new(filter.get(), search.get());
        let joined = repo.joined_ids();
        repo.filter(&query)
            .iter()
            .map(|c| CampaignView::discover(c, joined.contains(&c.id)))
            .collect::<Vec<_>>()
    };

    view! {
        <section class="discover">
            <div class="toolbar">
                <input
                    type="search"
                    placeholder="Search campaigns..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <FilterDropdown filter=filter />
            </div>
            <div class="grid">
                {move || {
                    let cards = cards();
                    if cards.is_empty() {
                        view! { <p class="empty">"No campaigns match your search."</p> }.into_any()
                    } else {
                        cards
                            .into_iter()
                            .map(|card| view! { <CampaignCard card=card on_join=on_join on_leave=on_leave /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}

#[component]
fn BuilderTab() -> impl IntoView {
    let app = use_app();
    let create_open = RwSignal::new(false);
    let selected = RwSignal::new(None::<CampaignId>);
    let (on_join, on_leave) = membership_actions(&app);
    let on_open = Callback::new(move |id: CampaignId| selected.set(Some(id)));

    let cards = move || {
        app.revision.track();
        app.wallet.track();
        app.repo
            .builder_campaigns(app.owner().as_deref())
            .iter()
            .map(CampaignView::builder)
            .collect::<Vec<_>>()
    };

    view! {
        <section class="builder">
            <div class="toolbar">
                <h2>"My Campaigns"</h2>
                <button class="btn btn-primary" on:click=move |_| create_open.set(true)>
                    "+ Create Campaign"
                </button>
            </div>
            <div class="grid">
                {move || {
                    let cards = cards();
                    if cards.is_empty() {
                        view! {
                            <div class="empty">
                                <h3>"No campaigns yet"</h3>
                                <p class="muted">"Create your first campaign to start engaging users."</p>
                            </div>
                        }
                        .into_any()
                    } else {
                        cards
                            .into_iter()
                            .map(|card| {
                                view! {
                                    <CampaignCard
                                        card=card
                                        on_join=on_join
                                        on_leave=on_leave
                                        on_open=on_open
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </section>

        <CreateCampaignModal open=create_open />
        <OwnedCampaignModal selected=selected />
    }
}

#[component]
fn CreateCampaignModal(open: RwSignal<bool>) -> impl IntoView {
    let app = use_app();
    let form = RwSignal::new(CampaignForm::default());
    let errors = RwSignal::new(FormErrors::new());
    let loading = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let found = form.with_untracked(|f| f.validate(Utc::now()));
        if !found.is_empty() {
            errors.set(found);
            app.fail(FORM_INVALID);
            return;
        }

        loading.set(true);
        let app = app.clone();
        leptos::task::spawn_local(async move {
            app.simulate_latency(app.config.submit_delay()).await;

            let owner = app.owner().unwrap_or_default();
            let created = form
                .with_untracked(|f| f.submit(owner, Utc::now()))
                .and_then(|new| app.repo.create(new));
            loading.set(false);

            match created {
                Ok(_) => {
                    app.touch();
                    app.success(CAMPAIGN_CREATED);
                    form.set(CampaignForm::default());
                    errors.set(FormErrors::new());
                    open.set(false);
                }
                Err(e) => app.report(&e),
            }
        });
    };

    let invalid = move |field: &'static str| move || errors.with(|e| e.get(field).is_some());

    view! {
        <Modal open=open title="Create New Campaign" on_close=move || open.set(false)>
            <form class="form" on:submit=on_submit.clone()>
                <label>"Campaign Name"</label>
                <input
                    type="text"
                    name="campaignName"
                    class:invalid=invalid("campaignName")
                    prop:value=move || form.with(|f| f.campaign_name.clone())
                    on:input=bind(form, errors, "campaignName", |f, v| f.campaign_name = v)
                />
                <FieldError errors=errors field="campaignName" />

                <label>"Description"</label>
                <textarea
                    name="description"
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=bind(form, errors, "description", |f, v| f.description = v)
                ></textarea>

                <label>"DApp Link"</label>
                <input
                    type="url"
                    name="dappLink"
                    placeholder="https://"
                    class:invalid=invalid("dappLink")
                    prop:value=move || form.with(|f| f.dapp_link.clone())
                    on:input=bind(form, errors, "dappLink", |f, v| f.dapp_link = v)
                />
                <FieldError errors=errors field="dappLink" />

                <label>"Total Budget (ETH)"</label>
                <input
                    type="number"
                    name="totalBudget"
                    step="any"
                    class:invalid=invalid("totalBudget")
                    prop:value=move || form.with(|f| f.total_budget.clone())
                    on:input=bind(form, errors, "totalBudget", |f, v| f.total_budget = v)
                />
                <FieldError errors=errors field="totalBudget" />

                <label>"Campaign End Time"</label>
                <input
                    type="datetime-local"
                    name="campaignEndTime"
                    class:invalid=invalid("campaignEndTime")
                    prop:value=move || form.with(|f| f.campaign_end_time.clone())
                    on:input=bind(form, errors, "campaignEndTime", |f, v| f.campaign_end_time = v)
                />
                <FieldError errors=errors field="campaignEndTime" />

                <button type="submit" class="btn btn-primary wide" disabled=move || loading.get()>
                    {move || if loading.get() { "Creating..." } else { "Create Campaign" }}
                </button>
            </form>
        </Modal>
    }
}

/// Details of one of the builder's campaigns
#[component]
fn OwnedCampaignModal(selected: RwSignal<Option<CampaignId>>) -> impl IntoView {
    let app = use_app();
    let flow = RwSignal::new(None::<TaskConfirmation>);
    let open = Signal::derive(move || selected.with(Option::is_some));

    let details = move || {
        app.revision.track();
        let id = selected.get()?;
        let campaign = match app.repo.find(id.as_str()) {
            Ok(campaign) => campaign,
            Err(e) => {
                tracing::warn!(campaign = %id, error = %e, "Selected campaign vanished");
                return None;
            }
        };

        let tasks = campaign.tasks().to_vec();
        let add_task = {
            let id = campaign.id.clone();
            move |_| flow.set(Some(TaskConfirmation::new(id.clone())))
        };
        let status = if campaign.is_active { "Active" } else { "Inactive" };

        Some(view! {
            <div class="campaign-detail">
                <h3>{campaign.campaign_name.clone()}</h3>
                <div class="panel">
                    <InfoItem label="Total Budget" value=format!("{} ETH", campaign.total_budget) />
                    <InfoItem
                        label="Remaining Budget"
                        value=format!("{} ETH", campaign.remaining_budget())
                    />
                    <InfoItem label="Tasks" value=campaign.task_counter().to_string() />
                    <InfoItem
                        label="Status"
                        value=status.to_string()
                        value_class=if campaign.is_active { "ok" } else { "bad" }
                    />
                </div>
                <div class="toolbar">
                    <h4>"Tasks"</h4>
                    <button class="btn btn-primary" on:click=add_task>"+ Add Task"</button>
                </div>
                {if tasks.is_empty() {
                    view! { <p class="muted">"No tasks yet. Add the first one."</p> }.into_any()
                } else {
                    tasks
                        .into_iter()
                        .map(|task| view! { <TaskCard task=task /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        })
    };

    view! {
        <Modal open=open title="Campaign Details" on_close=move || selected.set(None)>
            {details.clone()}
        </Modal>
        <AddTaskFlow flow=flow />
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Closed,
    Composing,
    Confirming,
}

/// Compose, review, then confirm or cancel a new task
#[component]
fn AddTaskFlow(flow: RwSignal<Option<TaskConfirmation>>) -> impl IntoView {
    let app = use_app();

    // Inputs re-render only when the stage changes, not on every keystroke
    let stage = Memo::new(move |_| {
        flow.with(|f| match f.as_ref().map(TaskConfirmation::state) {
            Some(TaskFlowState::Composing { .. }) => Stage::Composing,
            Some(TaskFlowState::Confirming(_)) => Stage::Confirming,
            _ => Stage::Closed,
        })
    });

    let cancel = move || {
        let Some(mut current) = flow.get_untracked() else {
            return;
        };
        match current.cancel() {
            Ok(notice) => app.notify(notice),
            Err(e) => tracing::debug!(error = %e, "Nothing to cancel"),
        }
        flow.set(None);
    };

    view! {
        <Modal
            open=Signal::derive(move || stage.get() != Stage::Closed)
            title="Add New Task"
            on_close=cancel
        >
            {move || match stage.get() {
                Stage::Composing => view! { <TaskComposer flow=flow /> }.into_any(),
                Stage::Confirming => view! { <TaskSummary flow=flow /> }.into_any(),
                Stage::Closed => ().into_any(),
            }}
        </Modal>
    }
}

#[component]
fn TaskComposer(flow: RwSignal<Option<TaskConfirmation>>) -> impl IntoView {
    let app = use_app();

    let errors = Signal::derive(move || {
        flow.with(|f| match f.as_ref().map(TaskConfirmation::state) {
            Some(TaskFlowState::Composing { errors, .. }) => errors.clone(),
            _ => FormErrors::new(),
        })
    });

    let edit = move |field: &'static str| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            flow.update(|f| {
                if let Some(f) = f {
                    if let Err(e) = f.update_field(field, value) {
                        tracing::warn!(field, error = %e, "Task form edit rejected");
                    }
                }
            });
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut accepted = false;
        flow.update(|f| {
            if let Some(f) = f {
                accepted = f.submit().is_ok();
            }
        });
        if !accepted {
            app.fail(FORM_INVALID);
        }
    };

    view! {
        <form class="form" on:submit=on_submit>
            <label>"Task Title"</label>
            <input type="text" name="title" on:input=edit("title") />
            <FieldError errors=errors field="title" />

            <label>"Description"</label>
            <textarea name="description" rows="3" on:input=edit("description")></textarea>
            <FieldError errors=errors field="description" />

            <label>"Reward (ETH)"</label>
            <input type="number" name="reward" step="any" on:input=edit("reward") />
            <FieldError errors=errors field="reward" />

            <p class="muted">"Tasks cannot be edited or deleted once added."</p>
            <button type="submit" class="btn btn-primary wide">"Review Task"</button>
        </form>
    }
}

#[component]
fn TaskSummary(flow: RwSignal<Option<TaskConfirmation>>) -> impl IntoView {
    let app = use_app();
    let draft = flow.with_untracked(|f| f.as_ref().and_then(TaskConfirmation::pending).cloned());

    let confirm = {
        let app = app.clone();
        move |_| {
            let Some(mut current) = flow.get_untracked() else {
                return;
            };
            match current.confirm(&app.repo) {
                Ok((_, notice)) => {
                    app.touch();
                    app.notify(notice);
                    flow.set(None);
                }
                Err(e) => app.report(&e),
            }
        }
    };

    let cancel = move |_| {
        let Some(mut current) = flow.get_untracked() else {
            return;
        };
        match current.cancel() {
            Ok(notice) => app.notify(notice),
            Err(e) => app.report(&e),
        }
        flow.set(None);
    };

    view! {
        <div class="task-summary">
            <p>"Please confirm the task details. This cannot be changed later."</p>
            {draft.map(|d| view! {
                <div class="panel">
                    <InfoItem label="Title" value=d.title />
                    <InfoItem label="Description" value=d.description />
                    <InfoItem label="Reward" value=format!("{} ETH", d.reward) value_class="accent" />
                </div>
            })}
            <div class="actions">
                <button class="btn" on:click=cancel>"Cancel"</button>
                <button class="btn btn-primary" on:click=confirm>"Confirm & Add"</button>
            </div>
        </div>
    }
}
