//! Built-in showcase campaigns
//!
//! End times are relative to `now` so the showcase never looks expired.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{Campaign, Task};

fn task(id: u32, title: &str, description: &str, reward: Decimal, active: bool, done: u32) -> Task {
    Task {
        id,
        title: title.into(),
        description: description.into(),
        reward,
        is_active: active,
        completion_count: done,
        completed: false,
    }
}

fn days(now: DateTime<Utc>, n: i64) -> i64 {
    (now + Duration::days(n)).timestamp()
}

/// The six showcase campaigns
pub fn seed_campaigns(now: DateTime<Utc>) -> Vec<Campaign> {
    let mut analytics = Campaign::with_budget(
        "1",
        "Launch Analytics Dashboard",
        "https://analytics.example.com",
        dec!(1000),
        dec!(500),
        days(now, 7),
    )
    .with_task(task(1, "Test Dashboard Features", "Explore all features and report any bugs.", dec!(100), true, 50))
    .with_task(task(2, "Provide UI/UX Feedback", "Submit suggestions for improving the user interface.", dec!(150), true, 30))
    .with_task(task(3, "Write a Short Review", "Publish a short review on your social media.", dec!(250), false, 20));
    analytics.factory = "0x123abc...".into();
    analytics.description = "Put a new analytics dashboard through its paces before launch.".into();

    let mut database = Campaign::with_budget(
        "2",
        "Beta Test Database Tool",
        "https://database.example.com",
        dec!(800),
        dec!(300),
        days(now, 14),
    )
    .with_task(task(1, "Stress Test Database", "Run performance tests and report benchmarks.", dec!(200), true, 10))
    .with_task(task(2, "Document Setup Process", "Create a step-by-step guide for tool setup.", dec!(100), true, 5))
    .with_task_counter(4);
    database.factory = "0x456def...".into();
    database.description = "Early access to a developer database tool.".into();

    let mut design = Campaign::with_budget(
        "3",
        "Design System Review",
        "https://design.example.com",
        dec!(600),
        dec!(600),
        days(now, 3),
    )
    .with_task(task(1, "Review Color Palette", "Evaluate the new color scheme for accessibility.", dec!(100), true, 15))
    .with_task_counter(2);
    design.factory = "0x789ghi...".into();
    design.description = "Audit a design system for accessibility and consistency.".into();
    design.is_active = false;

    let mut api = Campaign::with_budget(
        "4",
        "API Integration Testing",
        "https://api.example.com",
        dec!(700),
        dec!(200),
        days(now, 10),
    )
    .with_task(task(1, "Test User Authentication", "Verify all authentication endpoints.", dec!(150), true, 25))
    .with_task(task(2, "Data Retrieval Tests", "Ensure data is correctly retrieved from the API.", dec!(100), true, 20))
    .with_task_counter(5);
    api.factory = "0xabcjkl...".into();
    api.description = "Exercise a public API end to end.".into();

    let mut mobile = Campaign::with_budget(
        "5",
        "Mobile App Feedback",
        "https://mobile.example.com",
        dec!(900),
        dec!(400),
        days(now, 5),
    )
    .with_task(task(1, "Test iOS App on iPhone 15", "Install and test the app on the latest iPhone.", dec!(200), true, 10))
    .with_task_counter(3);
    mobile.factory = "0xdefmno...".into();
    mobile.description = "Hands-on feedback for a mobile release candidate.".into();

    let mut components = Campaign::with_budget(
        "6",
        "Component Library Testing",
        "https://components.example.com",
        dec!(550),
        dec!(150),
        days(now, 12),
    )
    .with_task(task(1, "Review Button Components", "Check all button states and responsiveness.", dec!(75), true, 30))
    .with_task_counter(4);
    components.factory = "0xghipqr...".into();
    components.description = "Review a UI component library across devices.".into();

    vec![analytics, database, design, api, mobile, components]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_invariants() {
        let now = Utc::now();
        let seeds = seed_campaigns(now);
        assert_eq!(seeds.len(), 6);

        for campaign in &seeds {
            assert!(campaign.remaining_budget() <= campaign.total_budget);
            assert!(!campaign.has_ended(now));
            assert!(campaign.slug.ends_with(campaign.id.as_str()));
            assert!(campaign.task_counter() as usize >= campaign.tasks().len());
        }
    }
}
