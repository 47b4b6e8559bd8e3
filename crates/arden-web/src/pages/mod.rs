//! Page Components

mod about;
mod campaign;
mod contact;
mod dashboard;
mod home;
mod not_found;
mod register;

pub use about::AboutPage;
pub use campaign::CampaignPage;
pub use contact::ContactPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use not_found::NotFound;
pub use register::RegisterPage;

use std::time::Duration;

use arden_core::FormErrors;
use leptos::prelude::*;

/// Simulated latency of the contact and register submissions
const FORM_DELAY: Duration = Duration::from_millis(1_000);

/// Input handler writing one form field and clearing its error
fn bind<T>(
    form: RwSignal<T>,
    errors: RwSignal<FormErrors>,
    field: &'static str,
    set: fn(&mut T, String),
) -> impl Fn(leptos::ev::Event) + Clone + 'static
where
    T: Send + Sync + 'static,
{
    move |ev| {
        let value = event_target_value(&ev);
        form.update(|f| set(f, value));
        errors.update(|e| e.clear_field(field));
    }
}
