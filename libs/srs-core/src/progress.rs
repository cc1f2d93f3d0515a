//! Progress analytics computed from card schedules and the review ledger.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::types::{CardSchedule, ProgressReport, ReviewRecord};

/// Aggregate a deck's schedules and ledger entries into a progress report.
///
/// `reviews` pairs each ledger entry with the id of the card it belongs
/// to. Decks reviewed only under the legacy Leitner scheduler have no
/// ledger rows; for those, `reviewed_cards` falls back to counting cards
/// with a `last_reviewed` date.
pub fn compute_progress<Id: Ord>(
    schedules: &[(Id, CardSchedule)],
    reviews: &[(Id, ReviewRecord)],
    today: NaiveDate,
) -> ProgressReport {
    let total_cards = schedules.len();

    let reviewed_cards = if reviews.is_empty() {
        schedules
            .iter()
            .filter(|(_, schedule)| schedule.last_reviewed.is_some())
            .count()
    } else {
        reviews
            .iter()
            .map(|(id, _)| id)
            .collect::<BTreeSet<_>>()
            .len()
    };

    let correct_reviews = reviews.iter().filter(|(_, r)| r.correct).count();

    let accuracy = if reviews.is_empty() {
        0.0
    } else {
        correct_reviews as f64 / reviews.len() as f64 * 100.0
    };

    ProgressReport {
        total_cards,
        reviewed_cards,
        correct_reviews,
        accuracy,
        streak: streak(reviews.iter().map(|(_, r)| r.reviewed_on), today),
    }
}

/// Consecutive calendar days ending `today` with at least one review.
///
/// Distinct review dates are walked newest-first; the count stops at the
/// first missing day. A day with no review yet today yields 0.
pub fn streak<I>(review_dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = review_dates
        .into_iter()
        .filter(|date| *date <= today)
        .collect();

    let mut count = 0;
    for (i, date) in dates.iter().rev().enumerate() {
        if *date == today - Duration::days(i as i64) {
            count += 1;
        } else {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Algorithm;
    use pretty_assertions::assert_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn reviewed_card(on: u32) -> CardSchedule {
        let mut schedule = CardSchedule::new(Algorithm::Leitner, date(1));
        schedule.last_reviewed = Some(date(on));
        schedule
    }

    fn entry(card_id: i64, on: u32, correct: bool) -> (i64, ReviewRecord) {
        (
            card_id,
            ReviewRecord {
                reviewed_on: date(on),
                correct,
            },
        )
    }

    #[test]
    fn empty_deck_reports_zeroes() {
        let report = compute_progress::<i64>(&[], &[], date(10));
        assert_eq!(
            report,
            ProgressReport {
                total_cards: 0,
                reviewed_cards: 0,
                correct_reviews: 0,
                accuracy: 0.0,
                streak: 0,
            }
        );
    }

    #[test]
    fn accuracy_zero_without_reviews() {
        let schedules = vec![(1_i64, CardSchedule::new(Algorithm::Sm2, date(1)))];
        let report = compute_progress(&schedules, &[], date(10));
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.reviewed_cards, 0);
    }

    #[test]
    fn accuracy_hundred_when_all_correct() {
        let schedules = vec![
            (1_i64, CardSchedule::new(Algorithm::Sm2, date(1))),
            (2, CardSchedule::new(Algorithm::Sm2, date(1))),
        ];
        let reviews = vec![entry(1, 9, true), entry(1, 10, true), entry(2, 10, true)];
        let report = compute_progress(&schedules, &reviews, date(10));
        assert_eq!(report.accuracy, 100.0);
        assert_eq!(report.correct_reviews, 3);
        assert_eq!(report.reviewed_cards, 2);
    }

    #[test]
    fn accuracy_counts_all_ledger_entries() {
        let schedules = vec![(1_i64, CardSchedule::new(Algorithm::Sm2, date(1)))];
        let reviews = vec![
            entry(1, 8, true),
            entry(1, 9, false),
            entry(1, 10, true),
            entry(1, 10, false),
        ];
        let report = compute_progress(&schedules, &reviews, date(10));
        assert_eq!(report.accuracy, 50.0);
    }

    #[test]
    fn leitner_deck_counts_last_reviewed() {
        let schedules = vec![
            (1_i64, reviewed_card(5)),
            (2, reviewed_card(6)),
            (3, CardSchedule::new(Algorithm::Leitner, date(1))),
        ];
        let report = compute_progress(&schedules, &[], date(10));
        assert_eq!(report.total_cards, 3);
        assert_eq!(report.reviewed_cards, 2);
        assert_eq!(report.accuracy, 0.0);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        // Reviews on today, -1, -2 and -4: the gap at -3 ends the run.
        let dates = [date(10), date(9), date(8), date(6)];
        assert_eq!(streak(dates, date(10)), 3);
    }

    #[test]
    fn streak_zero_without_review_today() {
        let dates = [date(9), date(8)];
        assert_eq!(streak(dates, date(10)), 0);
    }

    #[test]
    fn streak_ignores_duplicate_days_and_future_dates() {
        let dates = [date(10), date(10), date(9), date(12)];
        assert_eq!(streak(dates, date(10)), 2);
    }

    #[test]
    fn never_reviewed_user_has_streak_zero() {
        assert_eq!(streak(std::iter::empty(), date(10)), 0);
    }
}
