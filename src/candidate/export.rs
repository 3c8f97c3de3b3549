//! CSV export of candidate records

use super::record::Candidate;

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "Phone",
    "Country",
    "Tier",
    "Tier Name",
    "Registration Date",
    "Notification Sent",
];

/// Quote a text field, doubling embedded quotes
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render candidates as CSV. Text fields are quoted, the tier is bare.
pub fn to_csv(candidates: &[Candidate]) -> String {
    let mut lines = Vec::with_capacity(candidates.len() + 1);

    lines.push(
        CSV_HEADERS
            .iter()
            .map(|header| quoted(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for candidate in candidates {
        let row = [
            quoted(&candidate.name),
            quoted(&candidate.email),
            quoted(&candidate.phone),
            quoted(candidate.country.as_deref().unwrap_or("N/A")),
            candidate.assigned_tier.value().to_string(),
            quoted(candidate.assigned_tier.name()),
            quoted(&candidate.created_at.format("%Y-%m-%d").to_string()),
            quoted(if candidate.notification_sent { "Yes" } else { "No" }),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// File name for an export produced on `date`
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("candidates_export_{}.csv", date.format("%Y-%m-%d"))
}
