//! Derived numbers: earnings, per-campaign statistics, creator dashboards
//! and competition standings.
//!
//! Everything here is a pure function of the rows passed in.

mod earnings;
mod ranking;
mod statistics;

pub use earnings::{earnings_for_views, VIEWS_PER_PAYOUT};
pub use ranking::{competition_standings, CompetitionStanding, PODIUM_PLACES};
pub use statistics::{
    budget_usage, campaign_statistics, creator_summary, daily_metrics, total_earnings,
    BudgetUsage, CampaignStatistics, CreatorSummary, DailyMetric, Period,
};
