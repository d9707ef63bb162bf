//! Local copies of both tables and the queries answered from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::browse::{self, CampaignFilter, EarningsFilter, SubmissionFilter};
use crate::model::{Campaign, Submission};
use crate::stats::{self, BudgetUsage, CampaignStatistics, CompetitionStanding, CreatorSummary, DailyMetric, Period};

/// Campaigns and submissions as of the last refresh or mutation.
///
/// Queries never touch the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalState {
    pub campaigns: Vec<Campaign>,
    pub submissions: Vec<Submission>,
}

impl PortalState {
    pub fn get_campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn get_submission(&self, id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    pub fn submissions_by_campaign(&self, campaign_id: &str) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.campaign_id == campaign_id)
            .collect()
    }

    pub fn submissions_by_creator(&self, creator_id: &str) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.creator_id == creator_id)
            .collect()
    }

    /// Campaigns the creator has submitted to, in campaign order
    pub fn campaigns_for_creator(&self, creator_id: &str) -> Vec<&Campaign> {
        let joined: HashSet<&str> = self
            .submissions
            .iter()
            .filter(|s| s.creator_id == creator_id)
            .map(|s| s.campaign_id.as_str())
            .collect();
        self.campaigns
            .iter()
            .filter(|c| joined.contains(c.id.as_str()))
            .collect()
    }

    pub fn total_earnings_by_creator(&self, creator_id: &str) -> Decimal {
        stats::total_earnings(self.submissions.iter().filter(|s| s.creator_id == creator_id))
    }

    pub fn campaign_statistics(&self, campaign_id: &str) -> CampaignStatistics {
        stats::campaign_statistics(self.submissions.iter().filter(|s| s.campaign_id == campaign_id))
    }

    /// `None` for an unknown campaign
    pub fn budget_usage(&self, campaign_id: &str) -> Option<BudgetUsage> {
        let campaign = self.get_campaign(campaign_id)?;
        Some(stats::budget_usage(campaign, &self.campaign_statistics(campaign_id)))
    }

    /// Standings by views. `None` for an unknown campaign.
    pub fn competition_standings(&self, campaign_id: &str) -> Option<Vec<CompetitionStanding>> {
        let campaign = self.get_campaign(campaign_id)?;
        Some(stats::competition_standings(
            self.submissions.iter().filter(|s| s.campaign_id == campaign_id),
            campaign.competition_prizes(),
        ))
    }

    /// Earnings dashboard totals. The status filter does not narrow the
    /// active campaign count.
    pub fn creator_summary(&self, creator_id: &str, filter: &EarningsFilter) -> CreatorSummary {
        let campaigns: Vec<&Campaign> = self
            .campaigns_for_creator(creator_id)
            .into_iter()
            .filter(|c| filter.matches_campaign(c))
            .collect();
        stats::creator_summary(&self.creator_submissions(creator_id, filter), &campaigns)
    }

    pub fn creator_daily_metrics(
        &self,
        creator_id: &str,
        filter: &EarningsFilter,
        period: Period,
        today: NaiveDate,
    ) -> Vec<DailyMetric> {
        stats::daily_metrics(&self.creator_submissions(creator_id, filter), period, today)
    }

    fn creator_submissions(&self, creator_id: &str, filter: &EarningsFilter) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.creator_id == creator_id && filter.matches_submission(s))
            .collect()
    }

    pub fn available_campaigns(&self, filter: &CampaignFilter) -> Vec<&Campaign> {
        browse::browse_campaigns(&self.campaigns, &self.submissions, filter)
    }

    pub fn filter_submissions(&self, filter: &SubmissionFilter) -> Vec<&Submission> {
        browse::filter_submissions(&self.submissions, &self.campaigns, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CampaignStatus, ContentType, Prizes, SubmissionStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: id.into(),
            title: format!("Campaign {}", id),
            description: String::new(),
            requirements: String::new(),
            content_type: ContentType::Ugc,
            status: CampaignStatus::Active,
            total_budget: dec!(100),
            spent_budget: Decimal::ZERO,
            earnings_per_1k_views: dec!(10),
            user_id: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
            file_links: vec![],
            logo_url: None,
            thumbnail_url: None,
            has_competition: true,
            prizes: Some(Prizes {
                first: dec!(100),
                second: dec!(50),
                third: dec!(25),
                fourth: dec!(10),
                fifth: dec!(5),
            }),
            allowed_platforms: None,
        }
    }

    fn submission(id: &str, campaign: &str, creator: &str, views: u64, earnings: Decimal) -> Submission {
        Submission {
            id: id.into(),
            campaign_id: campaign.into(),
            creator_id: creator.into(),
            social_media_link: "https://tiktok.com/@x".into(),
            video_links: vec![],
            submitted_at: Utc::now(),
            updated_at: None,
            status: SubmissionStatus::Approved,
            views,
            earnings,
            competition_rank: None,
            competition_prize: None,
        }
    }

    fn state() -> PortalState {
        PortalState {
            campaigns: vec![campaign("c1"), campaign("c2"), campaign("c3")],
            submissions: vec![
                submission("s1", "c1", "u1", 1000, dec!(10)),
                submission("s2", "c1", "u2", 2000, dec!(20)),
                submission("s3", "c3", "u1", 5000, dec!(50)),
            ],
        }
    }

    #[test]
    fn test_lookups() {
        let state = state();
        assert!(state.get_campaign("c2").is_some());
        assert!(state.get_campaign("nope").is_none());
        assert_eq!(state.submissions_by_campaign("c1").len(), 2);
        assert!(state.submissions_by_campaign("c2").is_empty());
        assert_eq!(state.submissions_by_creator("u1").len(), 2);
    }

    #[test]
    fn test_campaigns_for_creator() {
        let state = state();
        let ids: Vec<&str> = state
            .campaigns_for_creator("u1")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1", "c3"]);
        assert!(state.campaigns_for_creator("nobody").is_empty());
    }

    #[test]
    fn test_aggregates() {
        let state = state();
        assert_eq!(state.total_earnings_by_creator("u1"), dec!(60));

        let stats = state.campaign_statistics("c1");
        assert_eq!(stats.total_views, 3000);
        assert_eq!(stats.total_spent, dec!(30));
        assert_eq!(stats.total_creators, 2);

        let usage = state.budget_usage("c1").unwrap();
        assert_eq!(usage.remaining, dec!(70));
        assert!(state.budget_usage("missing").is_none());
    }

    #[test]
    fn test_standings_for_campaign() {
        let state = state();
        let standings = state.competition_standings("c1").unwrap();
        assert_eq!(standings[0].submission_id, "s2");
        assert_eq!(standings[0].prize, Some(dec!(100)));
        assert!(state.competition_standings("missing").is_none());
    }

    #[test]
    fn test_creator_summary() {
        let summary = state().creator_summary("u1", &EarningsFilter::default());
        assert_eq!(summary.total_views, 6000);
        assert_eq!(summary.approved_videos, 2);
        assert_eq!(summary.active_campaigns, 2);
    }

    #[test]
    fn test_creator_summary_filtered() {
        let mut state = state();
        state.submissions[2].status = SubmissionStatus::Pending;

        let by_campaign = EarningsFilter {
            campaign_id: Some("c3".into()),
            ..Default::default()
        };
        let summary = state.creator_summary("u1", &by_campaign);
        assert_eq!(summary.total_earnings, dec!(50));
        assert_eq!(summary.pending_earnings, dec!(50));
        assert_eq!(summary.active_campaigns, 1);

        let approved = EarningsFilter {
            status: Some(SubmissionStatus::Approved),
            ..Default::default()
        };
        let summary = state.creator_summary("u1", &approved);
        assert_eq!(summary.total_views, 1000);
        assert_eq!(summary.approved_videos, 1);
        assert_eq!(summary.active_campaigns, 2);

        let today = Utc::now().date_naive();
        let metrics = state.creator_daily_metrics("u1", &by_campaign, Period::Week, today);
        assert_eq!(metrics.iter().map(|m| m.views).sum::<u64>(), 5000);
    }
}
