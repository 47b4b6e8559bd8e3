//! About Page

use leptos::prelude::*;

const VALUES: [(&str, &str); 3] = [
    ("Transparency", "Budgets, tasks and rewards are visible to everyone taking part."),
    ("Fairness", "Every completed task is rewarded the way the campaign promised."),
    ("Community", "Builders and users grow together through honest feedback."),
];

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about">
            <h1>"About Arden"</h1>
            <p class="subtitle">
                "Arden is a campaign and rewards platform where dApp builders meet the users who make them better."
            </p>
            <section class="values">
                {VALUES
                    .iter()
                    .map(|(title, text)| view! {
                        <div class="feature">
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
