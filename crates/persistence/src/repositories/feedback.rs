//! Feedback repository for database operations.

use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};

use domain::models::stats::start_of_week;
use domain::models::{FeedbackSortKey, FeedbackStats, NewFeedback, SortOrder};

use crate::entities::FeedbackEntity;
use crate::metrics::QueryTimer;

const FEEDBACK_COLUMNS: &str =
    "id, name, email, message, rating, is_approved, created_at, updated_at";

/// Repository for feedback-related database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new feedback record.
    ///
    /// Id and timestamps are assigned by the database; new records always
    /// start unapproved. Validation is the caller's responsibility.
    pub async fn insert(&self, new: &NewFeedback) -> Result<FeedbackEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_feedback");
        let result = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            INSERT INTO feedback (name, email, message, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING {FEEDBACK_COLUMNS}
            "#,
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.message)
        .bind(new.rating)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists feedback as a sorted snapshot.
    ///
    /// Ties on the sort column fall back to id order, so equal-rated records
    /// keep their insertion order. A positive limit truncates after sorting.
    pub async fn list(
        &self,
        approved_only: bool,
        sort: FeedbackSortKey,
        order: SortOrder,
        limit: Option<i64>,
    ) -> Result<Vec<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feedback");

        let mut sql = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback");
        if approved_only {
            sql.push_str(" WHERE is_approved = TRUE");
        }
        sql.push_str(&format!(
            " ORDER BY {} {}, id ASC",
            sort.column(),
            order.as_sql()
        ));
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let result = sqlx::query_as::<_, FeedbackEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Sets the approval flag, returning the refreshed row.
    ///
    /// Returns `None` when no record has the given id.
    pub async fn set_approval(
        &self,
        id: i64,
        approved: bool,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_feedback_approval");
        let result = sqlx::query_as::<_, FeedbackEntity>(&format!(
            r#"
            UPDATE feedback
            SET is_approved = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {FEEDBACK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes a feedback record permanently.
    ///
    /// Returns `false` when no record has the given id.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_feedback");
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Computes aggregate statistics over all feedback.
    ///
    /// Week windows are Monday-aligned relative to `now`: "this week" is
    /// everything on or after the current week's start, "last week" is the
    /// seven days before it.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<FeedbackStats, sqlx::Error> {
        let this_week_start = start_of_week(now);
        let last_week_start = this_week_start - Duration::days(7);

        let timer = QueryTimer::new("feedback_stats");
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE is_approved = true) as approved,
                COALESCE(AVG(rating)::float8, 0.0) as average_rating,
                COUNT(*) FILTER (WHERE created_at >= $1) as this_week,
                COUNT(*) FILTER (WHERE created_at >= $2 AND created_at < $1) as last_week
            FROM feedback
            "#,
        )
        .bind(this_week_start)
        .bind(last_week_start)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        let row = row?;

        Ok(FeedbackStats::from_counts(
            row.get::<i64, _>("total"),
            row.get::<i64, _>("approved"),
            row.get::<f64, _>("average_rating"),
            row.get::<i64, _>("this_week"),
            row.get::<i64, _>("last_week"),
        ))
    }
}
