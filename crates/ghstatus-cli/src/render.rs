//! Plain-text reports for API responses.

use ghstatus_github::{CombinedStatus, CreatedStatus};

/// Report for `get`: header fields, then one block per status in API order.
#[must_use]
pub fn combined_status(identifier: &str, status: &CombinedStatus) -> String {
    let mut lines = vec![
        format!("pr={identifier}"),
        format!("state={}", status.state),
        format!("repository={}", status.repository.full_name),
        format!("sha={}", status.sha),
        "statuses:".to_string(),
    ];

    for entry in &status.statuses {
        lines.push(format!("  - state={}", entry.state));
        lines.push(format!("    context={}", entry.context));
        lines.push(format!("    description={}", or_empty(entry.description.as_deref())));
        lines.push(format!("    target_url={}", or_empty(entry.target_url.as_deref())));
    }

    lines.join("\n")
}

/// Report for `create`.
#[must_use]
pub fn created_status(identifier: &str, sha: &str, created: &CreatedStatus) -> String {
    [
        format!("pr={identifier}, sha={sha}"),
        format!("url={}", created.url),
        format!("state={}", created.state),
        format!("description={}", or_empty(created.description.as_deref())),
        format!("target_url={}", or_empty(created.target_url.as_deref())),
        format!("context={}", created.context),
    ]
    .join("\n")
}

fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}
