//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::components::{AlertBox, Footer, Navbar};
use crate::pages::{
    AboutPage, CampaignPage, ContactPage, DashboardPage, HomePage, NotFound, RegisterPage,
};
use crate::state::AppContext;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let app = AppContext::new();
    if app.wallet_connected.get_untracked() {
        app.link_wallet(false);
    }
    provide_context(app);

    view! {
        <Router>
            <Navbar />
            <main class="app">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/about") view=AboutPage />
                    <Route path=path!("/contact") view=ContactPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/campaign/:id") view=CampaignPage />
                </Routes>
            </main>
            <Footer />
            <AlertBox />
        </Router>
    }
}
