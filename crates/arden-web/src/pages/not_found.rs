use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"We couldn't find that page or campaign."</p>
            <a href="/dashboard" class="btn btn-primary">"Back to Dashboard"</a>
        </div>
    }
}
