use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Prizes, Submission};

/// Places that receive a prize
pub const PODIUM_PLACES: usize = 3;

/// One submission's place in a competition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionStanding {
    /// 1-based
    pub rank: u32,
    pub submission_id: String,
    pub creator_id: String,
    pub views: u64,
    pub prize: Option<Decimal>,
}

/// Rank submissions by views, highest first.
///
/// The sort is stable, so tied submissions keep the order they were given in.
/// Only the first [`PODIUM_PLACES`] places are paid.
pub fn competition_standings<'a, I>(submissions: I, prizes: Option<&Prizes>) -> Vec<CompetitionStanding>
where
    I: IntoIterator<Item = &'a Submission>,
{
    let mut ranked: Vec<&Submission> = submissions.into_iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, sub)| {
            let place = index + 1;
            let prize = if place <= PODIUM_PLACES {
                prizes.and_then(|p| p.for_place(place))
            } else {
                None
            };
            CompetitionStanding {
                rank: place as u32,
                submission_id: sub.id.clone(),
                creator_id: sub.creator_id.clone(),
                views: sub.views,
                prize,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SubmissionStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sub(id: &str, views: u64) -> Submission {
        Submission {
            id: id.into(),
            campaign_id: "c1".into(),
            creator_id: format!("creator-{}", id),
            social_media_link: format!("https://tiktok.com/@x/video/{}", id),
            video_links: vec![],
            submitted_at: Utc::now(),
            updated_at: None,
            status: SubmissionStatus::Approved,
            views,
            earnings: Decimal::ZERO,
            competition_rank: None,
            competition_prize: None,
        }
    }

    fn prizes() -> Prizes {
        Prizes {
            first: dec!(100),
            second: dec!(50),
            third: dec!(25),
            fourth: dec!(10),
            fifth: dec!(5),
        }
    }

    #[test]
    fn test_podium_with_tie() {
        let subs = vec![sub("a", 500), sub("b", 1500), sub("c", 1500), sub("d", 300)];
        let standings = competition_standings(&subs, Some(&prizes()));

        assert_eq!(standings[0].views, 1500);
        assert_eq!(standings[0].prize, Some(dec!(100)));
        assert_eq!(standings[1].views, 1500);
        assert_eq!(standings[1].prize, Some(dec!(50)));
        assert_eq!(standings[2].submission_id, "a");
        assert_eq!(standings[2].prize, Some(dec!(25)));
        assert_eq!(standings[3].rank, 4);
        assert_eq!(standings[3].prize, None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let subs = vec![sub("b", 1500), sub("c", 1500)];
        let standings = competition_standings(&subs, Some(&prizes()));
        assert_eq!(standings[0].submission_id, "b");
        assert_eq!(standings[1].submission_id, "c");
    }

    #[test]
    fn test_no_prize_table() {
        let subs = vec![sub("a", 10)];
        let standings = competition_standings(&subs, None);
        assert_eq!(standings[0].rank, 1);
        assert!(standings[0].prize.is_none());
    }
}
