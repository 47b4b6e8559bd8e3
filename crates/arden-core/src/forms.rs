//! Form models
//!
//! Raw string state for each form on the site plus its validation rules.
//! Field keys match the input `name` attributes the pages render.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ArdenError, Result};
use crate::model::{NewCampaign, TaskDraft};
use crate::validation::{
    parse_datetime, validate_email, validate_future_datetime, validate_min_length,
    validate_number, validate_required, validate_url, FormErrors,
};

/// Minimum characters for free-text descriptions and messages
pub const MIN_TEXT_LENGTH: usize = 10;

fn parse_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|e| ArdenError::Other(format!("amount {raw:?}: {e}")))
}

/// Builder's "Create Campaign" form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignForm {
    pub campaign_name: String,
    pub description: String,
    pub dapp_link: String,
    pub total_budget: String,
    /// `datetime-local` value
    pub campaign_end_time: String,
}

impl CampaignForm {
    pub fn validate(&self, now: DateTime<Utc>) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .check(
                "campaignName",
                validate_required(&self.campaign_name, "Campaign Name"),
            )
            .check(
                "dappLink",
                validate_required(&self.dapp_link, "DApp Link")
                    .or_else(|| validate_url(&self.dapp_link, "DApp Link")),
            )
            .check(
                "totalBudget",
                validate_number(&self.total_budget, "Total Budget"),
            )
            .check(
                "campaignEndTime",
                validate_required(&self.campaign_end_time, "Campaign End Time").or_else(|| {
                    validate_future_datetime(&self.campaign_end_time, "Campaign End Time", now)
                }),
            );
        errors
    }

    /// Validate and convert into the fields of a new campaign
    pub fn submit(&self, owner: impl Into<String>, now: DateTime<Utc>) -> Result<NewCampaign> {
        self.validate(now).into_result()?;

        let end = parse_datetime(&self.campaign_end_time)
            .ok_or_else(|| ArdenError::Other("end time vanished after validation".into()))?;

        Ok(NewCampaign {
            campaign_name: self.campaign_name.trim().to_string(),
            description: self.description.trim().to_string(),
            owner: owner.into(),
            dapp_link: self.dapp_link.trim().to_string(),
            total_budget: parse_amount(&self.total_budget)?,
            campaign_end_time: end.timestamp(),
        })
    }
}

/// "Add New Task" form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub reward: String,
}

impl TaskForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .check("title", validate_required(&self.title, "Title"))
            .check(
                "description",
                validate_min_length(&self.description, "Description", MIN_TEXT_LENGTH),
            )
            .check("reward", validate_number(&self.reward, "Reward"));
        errors
    }

    pub fn submit(&self) -> Result<TaskDraft> {
        self.validate().into_result()?;
        Ok(TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            reward: parse_amount(&self.reward)?,
        })
    }

    /// Set a field by its input name; unknown names are ignored
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "title" => self.title = value,
            "description" => self.description = value,
            "reward" => self.reward = value,
            _ => tracing::debug!(field, "Ignoring unknown task form field"),
        }
    }
}

/// Contact page form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .check("name", validate_required(&self.name, "Name"))
            .check("email", validate_email(&self.email))
            .check(
                "message",
                validate_min_length(&self.message, "Message", MIN_TEXT_LENGTH),
            );
        errors
    }
}

/// Role picked on the register page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Builder,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Builder => "builder",
            UserRole::User => "user",
        }
    }

    /// Role from a select value; anything but `builder` is a plain user
    pub fn from_label(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "builder" => UserRole::Builder,
            _ => UserRole::User,
        }
    }

    /// Role code stored by the registry contract
    pub fn code(&self) -> u8 {
        match self {
            UserRole::User => 0,
            UserRole::Builder => 1,
        }
    }

    pub fn from_code(code: u8) -> Self {
        if code == 1 { UserRole::Builder } else { UserRole::User }
    }
}

/// Register page form, cached under `userData` on success
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub description: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors
            .check("name", validate_required(&self.name, "Name"))
            .check("email", validate_email(&self.email))
            .check(
                "description",
                validate_min_length(&self.description, "Description", MIN_TEXT_LENGTH),
            );
        errors
    }

    /// First and last name as the registry stores them
    pub fn name_parts(&self) -> (String, String) {
        let name = self.name.trim();
        match name.split_once(char::is_whitespace) {
            Some((first, last)) => (first.to_string(), last.trim().to_string()),
            None => (name.to_string(), String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn beta_form(now: DateTime<Utc>) -> CampaignForm {
        CampaignForm {
            campaign_name: "Beta Test".into(),
            description: String::new(),
            dapp_link: "https://beta.example.com".into(),
            total_budget: "100".into(),
            campaign_end_time: (now + Duration::days(2)).to_rfc3339(),
        }
    }

    #[test]
    fn test_campaign_form_ok() {
        let now = Utc::now();
        let new = beta_form(now).submit("0xabc", now).unwrap();
        assert_eq!(new.total_budget, dec!(100));
        assert!(new.campaign_end_time > now.timestamp());
    }

    #[test]
    fn test_campaign_form_collects_every_field() {
        let now = Utc::now();
        let form = CampaignForm {
            total_budget: "-5".into(),
            campaign_end_time: (now - Duration::hours(1)).to_rfc3339(),
            ..CampaignForm::default()
        };
        let errors = form.validate(now);
        assert_eq!(errors.get("campaignName"), Some("Campaign Name is required"));
        assert_eq!(errors.get("dappLink"), Some("DApp Link is required"));
        assert_eq!(errors.get("totalBudget"), Some("Total Budget must be a number"));
        assert_eq!(
            errors.get("campaignEndTime"),
            Some("Campaign End Time must be in the future")
        );
        assert!(matches!(form.submit("x", now), Err(ArdenError::Validation(e)) if e.len() == 4));
    }

    #[test]
    fn test_oversized_amounts_are_field_errors() {
        let now = Utc::now();
        let form = CampaignForm {
            total_budget: "9".repeat(32),
            ..beta_form(now)
        };
        let errors = form.validate(now);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("totalBudget"), Some("Total Budget is too large"));
        assert!(matches!(form.submit("0xabc", now), Err(ArdenError::Validation(_))));

        let task = TaskForm {
            title: "Review".into(),
            description: "Long enough description".into(),
            reward: "9".repeat(40),
        };
        assert_eq!(task.validate().get("reward"), Some("Reward is too large"));
        assert!(matches!(task.submit(), Err(ArdenError::Validation(_))));
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(UserRole::from_label("Builder"), UserRole::Builder);
        assert_eq!(UserRole::from_label("user"), UserRole::User);
        assert_eq!(UserRole::from_label("admin"), UserRole::User);
    }

    #[test]
    fn test_task_form() {
        let mut form = TaskForm::default();
        form.set("title", "Review".into());
        form.set("description", "too short".into());
        form.set("reward", "5".into());
        assert_eq!(
            form.validate().get("description"),
            Some("Description must be at least 10 characters")
        );

        form.set("description", "Long enough description".into());
        assert_eq!(form.submit().unwrap().reward, dec!(5));
    }

    #[test]
    fn test_contact_form() {
        let form = ContactForm {
            name: "Ada".into(),
            email: "a@b".into(),
            message: "Hello there, friends".into(),
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
    }

    #[test]
    fn test_registration_name_parts() {
        let form = RegistrationForm {
            name: "  Ada King Lovelace ".into(),
            ..RegistrationForm::default()
        };
        assert_eq!(form.name_parts(), ("Ada".into(), "King Lovelace".into()));
        assert_eq!(UserRole::from_code(UserRole::Builder.code()), UserRole::Builder);
    }
}
