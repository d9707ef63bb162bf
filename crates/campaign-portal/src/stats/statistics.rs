use chrono::{Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::model::{Campaign, Submission};

/// Aggregates over one campaign's submissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignStatistics {
    /// Sum of submission earnings
    pub total_spent: Decimal,
    pub total_views: u64,
    /// Distinct creators who submitted
    pub total_creators: usize,
}

/// Compute statistics for a set of submissions.
pub fn campaign_statistics<'a, I>(submissions: I) -> CampaignStatistics
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut stats = CampaignStatistics::default();
    let mut creators = HashSet::new();
    for sub in submissions {
        stats.total_spent = stats.total_spent.saturating_add(sub.earnings);
        stats.total_views = stats.total_views.saturating_add(sub.views);
        creators.insert(sub.creator_id.as_str());
    }
    stats.total_creators = creators.len();
    stats
}

/// Sum of earnings
pub fn total_earnings<'a, I>(submissions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Submission>,
{
    submissions
        .into_iter()
        .fold(Decimal::ZERO, |sum, s| sum.saturating_add(s.earnings))
}

/// How much of a campaign's budget its submissions have consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetUsage {
    pub total: Decimal,
    pub spent: Decimal,
    /// Never negative, even when earnings overshoot the budget
    pub remaining: Decimal,
    /// Rounded to two places; zero for a zero budget
    pub percent_used: Decimal,
}

pub fn budget_usage(campaign: &Campaign, stats: &CampaignStatistics) -> BudgetUsage {
    let total = campaign.total_budget;
    let spent = stats.total_spent;
    let remaining = total.saturating_sub(spent).max(Decimal::ZERO);
    let percent_used = if total.is_zero() {
        Decimal::ZERO
    } else {
        spent
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };
    BudgetUsage {
        total,
        spent,
        remaining,
        percent_used,
    }
}

/// Headline numbers of a creator's earnings dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatorSummary {
    pub total_earnings: Decimal,
    pub total_views: u64,
    pub approved_videos: usize,
    /// Earnings still awaiting review
    pub pending_earnings: Decimal,
    pub active_campaigns: usize,
}

/// Summarize a creator's submissions and the campaigns they joined.
pub fn creator_summary(submissions: &[&Submission], campaigns: &[&Campaign]) -> CreatorSummary {
    let mut summary = CreatorSummary {
        active_campaigns: campaigns.iter().filter(|c| c.is_active()).count(),
        ..Default::default()
    };
    for sub in submissions {
        summary.total_earnings = summary.total_earnings.saturating_add(sub.earnings);
        summary.total_views = summary.total_views.saturating_add(sub.views);
        if sub.is_approved() {
            summary.approved_videos += 1;
        }
        if sub.is_pending() {
            summary.pending_earnings = summary.pending_earnings.saturating_add(sub.earnings);
        }
    }
    summary
}

/// Reporting window of the earnings dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl Period {
    /// First day of the window ending at `today`
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        let earliest = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
        let start = match self {
            Period::Week => today.checked_sub_days(Days::new(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
            Period::All => Some(earliest),
        };
        start.unwrap_or(earliest)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        })
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// Views and earnings of submissions made on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub views: u64,
    pub earnings: Decimal,
}

/// One entry per day of `period`, both ends inclusive, bucketed by the UTC
/// submission date. Days without submissions report zero.
pub fn daily_metrics(submissions: &[&Submission], period: Period, today: NaiveDate) -> Vec<DailyMetric> {
    let start = period.start(today);
    let mut buckets: BTreeMap<NaiveDate, (u64, Decimal)> = BTreeMap::new();
    for sub in submissions {
        let day = sub.submitted_at.date_naive();
        if day < start || day > today {
            continue;
        }
        let bucket = buckets.entry(day).or_insert((0, Decimal::ZERO));
        bucket.0 = bucket.0.saturating_add(sub.views);
        bucket.1 = bucket.1.saturating_add(sub.earnings);
    }

    start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| {
            let (views, earnings) = buckets.get(&date).copied().unwrap_or((0, Decimal::ZERO));
            DailyMetric {
                date,
                views,
                earnings,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CampaignStatus, ContentType, SubmissionStatus};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sub(creator: &str, views: u64, earnings: Decimal, status: SubmissionStatus, day: u32) -> Submission {
        Submission {
            id: format!("{}-{}", creator, views),
            campaign_id: "c1".into(),
            creator_id: creator.into(),
            social_media_link: "https://youtube.com/shorts/x".into(),
            video_links: vec![],
            submitted_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            updated_at: None,
            status,
            views,
            earnings,
            competition_rank: None,
            competition_prize: None,
        }
    }

    fn campaign(budget: Decimal, status: CampaignStatus) -> Campaign {
        Campaign {
            id: "c1".into(),
            title: "Launch".into(),
            description: String::new(),
            requirements: String::new(),
            content_type: ContentType::Ugc,
            status,
            total_budget: budget,
            spent_budget: Decimal::ZERO,
            earnings_per_1k_views: dec!(10),
            user_id: "admin".into(),
            created_at: Utc::now(),
            updated_at: None,
            file_links: vec![],
            logo_url: None,
            thumbnail_url: None,
            has_competition: false,
            prizes: None,
            allowed_platforms: None,
        }
    }

    #[test]
    fn test_statistics_distinct_creators() {
        let one = [
            sub("u1", 1000, dec!(10), SubmissionStatus::Approved, 1),
            sub("u1", 2000, dec!(20), SubmissionStatus::Approved, 2),
        ];
        let stats = campaign_statistics(&one);
        assert_eq!(stats.total_views, 3000);
        assert_eq!(stats.total_spent, dec!(30));
        assert_eq!(stats.total_creators, 1);

        let two = [
            sub("u1", 1000, dec!(10), SubmissionStatus::Approved, 1),
            sub("u2", 2000, dec!(20), SubmissionStatus::Approved, 2),
        ];
        assert_eq!(campaign_statistics(&two).total_creators, 2);
    }

    #[test]
    fn test_statistics_saturate() {
        let subs = [
            sub("u1", u64::MAX, Decimal::MAX, SubmissionStatus::Approved, 1),
            sub("u2", 10, Decimal::MAX, SubmissionStatus::Approved, 2),
        ];
        let stats = campaign_statistics(&subs);
        assert_eq!(stats.total_views, u64::MAX);
        assert_eq!(stats.total_spent, Decimal::MAX);
        assert_eq!(total_earnings(&subs), Decimal::MAX);

        let usage = budget_usage(&campaign(dec!(0.0000001), CampaignStatus::Active), &stats);
        assert_eq!(usage.remaining, Decimal::ZERO);
        assert!(usage.percent_used > dec!(100));
    }

    #[test]
    fn test_empty_statistics() {
        let stats = campaign_statistics(std::iter::empty());
        assert_eq!(stats, CampaignStatistics::default());
    }

    #[test]
    fn test_budget_usage_clamps_remaining() {
        let stats = CampaignStatistics {
            total_spent: dec!(150),
            total_views: 15000,
            total_creators: 1,
        };
        let usage = budget_usage(&campaign(dec!(100), CampaignStatus::Active), &stats);
        assert_eq!(usage.remaining, Decimal::ZERO);
        assert_eq!(usage.percent_used, dec!(150));

        let usage = budget_usage(&campaign(dec!(300), CampaignStatus::Active), &stats);
        assert_eq!(usage.remaining, dec!(150));
        assert_eq!(usage.percent_used, dec!(50));

        let usage = budget_usage(&campaign(Decimal::ZERO, CampaignStatus::Active), &stats);
        assert_eq!(usage.percent_used, Decimal::ZERO);
    }

    #[test]
    fn test_creator_summary() {
        let subs = [
            sub("u1", 1000, dec!(10), SubmissionStatus::Approved, 1),
            sub("u1", 3000, dec!(30), SubmissionStatus::Pending, 2),
            sub("u1", 500, dec!(0), SubmissionStatus::Rejected, 3),
        ];
        let refs: Vec<&Submission> = subs.iter().collect();
        let active = campaign(dec!(100), CampaignStatus::Active);
        let done = campaign(dec!(100), CampaignStatus::Completed);

        let summary = creator_summary(&refs, &[&active, &done]);
        assert_eq!(summary.total_earnings, dec!(40));
        assert_eq!(summary.total_views, 4500);
        assert_eq!(summary.approved_videos, 1);
        assert_eq!(summary.pending_earnings, dec!(30));
        assert_eq!(summary.active_campaigns, 1);
    }

    #[test]
    fn test_daily_metrics_week() {
        let subs = [
            sub("u1", 1000, dec!(10), SubmissionStatus::Approved, 8),
            sub("u1", 2000, dec!(20), SubmissionStatus::Approved, 8),
            sub("u1", 4000, dec!(40), SubmissionStatus::Approved, 1),
        ];
        let refs: Vec<&Submission> = subs.iter().collect();
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let metrics = daily_metrics(&refs, Period::Week, today);
        assert_eq!(metrics.len(), 8);
        assert_eq!(metrics[0].date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        let may8 = metrics.iter().find(|m| m.date.to_string() == "2024-05-08").unwrap();
        assert_eq!(may8.views, 3000);
        assert_eq!(may8.earnings, dec!(30));
        assert_eq!(metrics.iter().map(|m| m.views).sum::<u64>(), 3000);
    }

    #[test]
    fn test_period_starts() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(Period::Month.start(today), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(Period::Year.start(today), NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
        assert_eq!(Period::All.start(today), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!("YEAR".parse::<Period>().unwrap(), Period::Year);
    }
}
