use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{DateRange, Insight, InsightType};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::InsightStorage;

const INSIGHT_COLUMNS: &str = "id, family_member_id, insight_type, title, description, \
     confidence, data_points, range_start, range_end, dismissed, created_at";

#[derive(Clone)]
pub struct InsightRepository {
    db: DbConnection,
}

impl InsightRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_insight(row: &SqliteRow) -> Result<Insight> {
        let insight_type: String = row.try_get("insight_type")?;
        Ok(Insight {
            id: row.try_get("id")?,
            family_member_id: row.try_get("family_member_id")?,
            insight_type: insight_type
                .parse::<InsightType>()
                .context("Corrupt insight_type column in insights")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            confidence: row.try_get("confidence")?,
            data_points: row.try_get("data_points")?,
            date_range: DateRange {
                start: row.try_get("range_start")?,
                end: row.try_get("range_end")?,
            },
            dismissed: row.try_get("dismissed")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl InsightStorage for InsightRepository {
    async fn store_insight(&self, insight: &Insight) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO insights (
                id, family_member_id, insight_type, title, description,
                confidence, data_points, range_start, range_end, dismissed, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&insight.id)
        .bind(&insight.family_member_id)
        .bind(insight.insight_type.as_str())
        .bind(&insight.title)
        .bind(&insight.description)
        .bind(insight.confidence)
        .bind(insight.data_points)
        .bind(&insight.date_range.start)
        .bind(&insight.date_range.end)
        .bind(insight.dismissed)
        .bind(insight.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_insight(&self, insight_id: &str) -> Result<Option<Insight>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM insights WHERE id = ?",
            INSIGHT_COLUMNS
        ))
        .bind(insight_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_insight).transpose()
    }

    async fn list_insights(&self, member_id: &str, include_dismissed: bool) -> Result<Vec<Insight>> {
        let sql = if include_dismissed {
            format!(
                "SELECT {} FROM insights WHERE family_member_id = ? ORDER BY created_at DESC",
                INSIGHT_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM insights WHERE family_member_id = ? AND dismissed = 0 \
                 ORDER BY created_at DESC",
                INSIGHT_COLUMNS
            )
        };

        let rows = sqlx::query(&sql)
            .bind(member_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_insight).collect()
    }

    async fn dismiss_insight(&self, insight_id: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE insights SET dismissed = 1 WHERE id = ?")
            .bind(insight_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::sqlite::test_utils::seed_member;

    fn insight(member_id: &str, title: &str, created_at: i64) -> Insight {
        Insight {
            id: Insight::generate_id(),
            family_member_id: member_id.to_string(),
            insight_type: InsightType::Correlation,
            title: title.to_string(),
            description: "Inflammation rises within two days of dairy".to_string(),
            confidence: 0.72,
            data_points: 21,
            date_range: DateRange {
                start: "2026-01-01".to_string(),
                end: "2026-01-31".to_string(),
            },
            dismissed: false,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_list_insights_newest_first_and_dismiss() {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let member = seed_member(&db, "user_parent").await;
        let repo = InsightRepository::new(db);

        let older = insight(&member.id, "Dairy may cause inflammation", 1_000);
        let newer = insight(&member.id, "Mood dips every Monday", 2_000);
        repo.store_insight(&older).await.unwrap();
        repo.store_insight(&newer).await.unwrap();

        let listed = repo.list_insights(&member.id, false).await.unwrap();
        assert_eq!(listed, vec![newer.clone(), older.clone()]);

        assert!(repo.dismiss_insight(&newer.id).await.unwrap());
        let visible = repo.list_insights(&member.id, false).await.unwrap();
        assert_eq!(visible, vec![older]);

        let everything = repo.list_insights(&member.id, true).await.unwrap();
        assert_eq!(everything.len(), 2);
        assert!(everything[0].dismissed);

        assert!(!repo.dismiss_insight("insight::missing").await.unwrap());
        assert!(repo.get_insight(&newer.id).await.unwrap().unwrap().dismissed);
    }
}
