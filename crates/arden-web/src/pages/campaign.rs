//! Campaign Detail Page

use arden_core::{CampaignDetailView, CampaignId, CampaignStatus};
use chrono::Utc;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::dashboard::membership_actions;
use super::NotFound;
use crate::components::{InfoItem, TaskCard};
use crate::state::use_app;

#[component]
pub fn CampaignPage() -> impl IntoView {
    let app = use_app();
    let params = use_params_map();
    let (on_join, on_leave) = membership_actions(&app);

    let campaign = move || {
        app.revision.track();
        let segment = params.read().get("id").unwrap_or_default();
        match app.repo.find(&segment) {
            Ok(campaign) => {
                let joined = app.repo.is_joined(&campaign.id);
                Some((CampaignDetailView::new(&campaign, Utc::now()), joined))
            }
            Err(e) => {
                tracing::info!(error = %e, "Campaign route did not resolve");
                None
            }
        }
    };

    move || match campaign() {
        None => view! { <NotFound /> }.into_any(),
        Some((detail, joined)) => {
            view! { <CampaignDetail detail=detail joined=joined on_join=on_join on_leave=on_leave /> }
                .into_any()
        }
    }
}

#[component]
fn CampaignDetail(
    detail: CampaignDetailView,
    joined: bool,
    on_join: Callback<CampaignId>,
    on_leave: Callback<CampaignId>,
) -> impl IntoView {
    let id = detail.id.clone();
    let toggle = move |_| {
        if joined {
            on_leave.run(id.clone());
        } else {
            on_join.run(id.clone());
        }
    };
    let status_class = if detail.status == CampaignStatus::Active { "ok" } else { "bad" };
    let dapp_href = detail.dapp_link.clone();

    view! {
        <div class="campaign-page">
            <header class="campaign-header">
                <div>
                    <h1>{detail.title}</h1>
                    <p class="muted">{detail.description}</p>
                </div>
                <button
                    class=if joined { "btn" } else { "btn btn-primary" }
                    on:click=toggle
                >
                    {if joined { "Leave Campaign" } else { "Join Campaign" }}
                </button>
            </header>

            <section class="card panel">
                <InfoItem label="Factory" value=detail.factory />
                <InfoItem label="Owner" value=detail.owner />
                <InfoItem label="Total Budget" value=format!("{} ETH", detail.total_budget) />
                <InfoItem
                    label="Remaining Budget"
                    value=format!("{} ETH", detail.remaining_budget)
                    value_class="accent"
                />
                <InfoItem
                    label="Raised"
                    value=format!("{} / {} ETH", detail.current_amount, detail.target_amount)
                />
                <InfoItem label="Progress" value=format!("{}%", detail.progress) />
                <InfoItem label="Backers" value=detail.backers.to_string() />
                <InfoItem label="End Date" value=detail.end_date />
                <InfoItem label="Status" value=detail.status.label().to_string() value_class=status_class />
                <InfoItem label="Tasks" value=detail.task_count.to_string() />
                <div class="info-item">
                    <span class="info-label">"DApp:"</span>
                    <a href=dapp_href target="_blank" rel="noopener noreferrer" class="link">
                        {detail.dapp_link}
                    </a>
                </div>
            </section>

            <section class="tasks">
                <h2>"Tasks"</h2>
                {if detail.tasks.is_empty() {
                    view! { <p class="muted">"No tasks defined for this campaign yet."</p> }.into_any()
                } else {
                    detail
                        .tasks
                        .into_iter()
                        .map(|task| view! { <TaskCard task=task /> })
                        .collect_view()
                        .into_any()
                }}
            </section>
        </div>
    }
}
