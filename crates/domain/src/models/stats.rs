//! Aggregate feedback statistics.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;

/// Dashboard statistics payload.
///
/// Carries each figure under both its legacy snake_case key and the
/// dashboard's camelCase key; the duplication is part of the API contract.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackStats {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
    pub average_rating: f64,

    #[serde(rename = "totalFeedback")]
    pub total_feedback: i64,
    #[serde(rename = "pendingReviews")]
    pub pending_reviews: i64,
    #[serde(rename = "approvedReviews")]
    pub approved_reviews: i64,
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
    #[serde(rename = "thisWeekFeedback")]
    pub this_week_feedback: i64,
    #[serde(rename = "lastWeekFeedback")]
    pub last_week_feedback: i64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: i64,
    #[serde(rename = "totalUsers")]
    pub total_users: i64,
    #[serde(rename = "responseRate")]
    pub response_rate: f64,
}

impl FeedbackStats {
    /// Builds the stats payload from raw aggregates.
    ///
    /// The average of zero records is 0, not an error; the response rate is
    /// the approved share of all feedback, as a percentage rounded to one
    /// decimal place.
    pub fn from_counts(
        total: i64,
        approved: i64,
        average_rating: f64,
        this_week: i64,
        last_week: i64,
    ) -> Self {
        let average_rating = round_to_places(average_rating, 2);
        let response_rate = if total > 0 {
            round_to_places(approved as f64 / total as f64 * 100.0, 1)
        } else {
            0.0
        };

        Self {
            total,
            approved,
            pending: total - approved,
            average_rating,
            total_feedback: total,
            pending_reviews: total - approved,
            approved_reviews: approved,
            avg_rating: average_rating,
            this_week_feedback: this_week,
            last_week_feedback: last_week,
            total_reviews: approved,
            total_users: total,
            response_rate,
        }
    }
}

/// Rounds to the given number of decimal places, half away from zero.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Start of the Monday-aligned calendar week containing `now`, at midnight UTC.
///
/// Both the "this week" and "last week" windows are derived from this
/// boundary, so the two counts never overlap.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    monday.and_time(NaiveTime::MIN).and_utc()
}
