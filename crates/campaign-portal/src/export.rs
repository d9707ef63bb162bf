//! CSV report of one campaign and its submissions.

use std::fmt::Write;

use crate::model::{Campaign, Submission};
use crate::stats::CampaignStatistics;

/// Default file name for a campaign report
pub fn report_file_name(campaign_id: &str) -> String {
    format!("campaign-{}-export.csv", campaign_id)
}

/// Quote a field when it holds a separator, quote or line break
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn row(out: &mut String, values: &[String]) {
    let line: Vec<String> = values.iter().map(|v| field(v)).collect();
    let _ = writeln!(out, "{}", line.join(","));
}

const SUBMISSION_COLUMNS: [&str; 8] = [
    "id",
    "creator_id",
    "status",
    "views",
    "earnings",
    "submitted_at",
    "social_media_link",
    "video_links",
];

/// Render the report: a `key,value` campaign section including statistics,
/// a blank line, then a submissions table. The table header is written only
/// when there are submissions.
pub fn campaign_report_csv(
    campaign: &Campaign,
    stats: &CampaignStatistics,
    submissions: &[&Submission],
) -> String {
    let mut out = String::from("Campaign Details\n");
    let details = [
        ("id", campaign.id.clone()),
        ("title", campaign.title.clone()),
        ("description", campaign.description.clone()),
        ("requirements", campaign.requirements.clone()),
        ("status", campaign.status.to_string()),
        ("content_type", campaign.content_type.to_string()),
        ("earnings_per_1k_views", campaign.earnings_per_1k_views.to_string()),
        ("total_budget", campaign.total_budget.to_string()),
        ("created_at", campaign.created_at.to_rfc3339()),
        ("total_views", stats.total_views.to_string()),
        ("total_spent", stats.total_spent.to_string()),
        ("total_creators", stats.total_creators.to_string()),
    ];
    for (key, value) in details {
        row(&mut out, &[key.to_string(), value]);
    }

    out.push_str("\nSubmissions\n");
    if !submissions.is_empty() {
        row(
            &mut out,
            &SUBMISSION_COLUMNS.map(str::to_string),
        );
        for sub in submissions {
            row(
                &mut out,
                &[
                    sub.id.clone(),
                    sub.creator_id.clone(),
                    sub.status.to_string(),
                    sub.views.to_string(),
                    sub.earnings.to_string(),
                    sub.submitted_at.to_rfc3339(),
                    sub.social_media_link.clone(),
                    sub.video_links.join(", "),
                ],
            );
        }
    }
    out
}
