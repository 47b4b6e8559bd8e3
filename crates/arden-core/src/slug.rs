//! Campaign slugs: `launch-analytics-dashboard-1`

use crate::model::CampaignId;

/// Lowercase the name, collapse every run of non-alphanumerics into a single
/// `-`, trim the ends and append the id. Falls back to the bare id when the
/// name has nothing to keep.
pub fn slugify(name: &str, id: &CampaignId) -> String {
    let mut base = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !base.is_empty() {
                base.push('-');
            }
            pending_dash = false;
            base.push(c);
        } else {
            pending_dash = true;
        }
    }

    if base.is_empty() {
        id.to_string()
    } else {
        format!("{}-{}", base, id)
    }
}
