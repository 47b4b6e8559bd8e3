//! Home Page

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home" id="home">
            <header class="hero">
                <h1>"Grow your dApp with real users"</h1>
                <p class="tagline">
                    "Arden connects builders with users. Launch campaigns, define tasks and reward genuine engagement."
                </p>
                <div class="cta">
                    <a href="/dashboard" class="btn btn-primary">"Explore Campaigns"</a>
                    <a href="/register" class="btn">"Join Arden"</a>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"For Builders"</h3>
                    <p>"Create campaigns with a budget and tasks, and watch completions roll in."</p>
                </div>
                <div class="feature">
                    <h3>"For Users"</h3>
                    <p>"Discover new dApps, complete tasks and earn rewards for your feedback."</p>
                </div>
                <div class="feature">
                    <h3>"On-chain Identity"</h3>
                    <p>"Register once with your wallet and carry your verified profile everywhere."</p>
                </div>
            </section>
        </div>
    }
}
