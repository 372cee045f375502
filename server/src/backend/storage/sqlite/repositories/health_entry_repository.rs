use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{BowelQuality, HealthEntry};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::HealthEntryStorage;

const ENTRY_COLUMNS: &str = "id, family_member_id, date, mood, energy, inflammation, \
     bowel_movements, bowel_quality, notes, created_at, updated_at, logged_by";

/// Repository for daily health entries
#[derive(Clone)]
pub struct HealthEntryRepository {
    db: DbConnection,
}

impl HealthEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &SqliteRow) -> Result<HealthEntry> {
        let bowel_quality: Option<String> = row.try_get("bowel_quality")?;
        let bowel_quality = bowel_quality
            .map(|value| value.parse::<BowelQuality>())
            .transpose()
            .context("Corrupt bowel_quality column in health_entries")?;

        Ok(HealthEntry {
            id: row.try_get("id")?,
            family_member_id: row.try_get("family_member_id")?,
            date: row.try_get("date")?,
            mood: row.try_get("mood")?,
            energy: row.try_get("energy")?,
            inflammation: row.try_get("inflammation")?,
            bowel_movements: row.try_get("bowel_movements")?,
            bowel_quality,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            logged_by: row.try_get("logged_by")?,
        })
    }
}

#[async_trait]
impl HealthEntryStorage for HealthEntryRepository {
    async fn get_entry(&self, entry_id: &str) -> Result<Option<HealthEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM health_entries WHERE id = ?",
            ENTRY_COLUMNS
        ))
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn get_entry_by_date(&self, member_id: &str, date: &str) -> Result<Option<HealthEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM health_entries WHERE family_member_id = ? AND date = ? LIMIT 2",
            ENTRY_COLUMNS
        ))
        .bind(member_id)
        .bind(date)
        .fetch_all(self.db.pool())
        .await?;

        if rows.len() > 1 {
            anyhow::bail!(
                "Found more than one health entry for member {} on {}",
                member_id,
                date
            );
        }

        rows.first().map(Self::row_to_entry).transpose()
    }

    async fn store_entry(&self, entry: &HealthEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO health_entries (
                id, family_member_id, date, mood, energy, inflammation,
                bowel_movements, bowel_quality, notes, created_at, updated_at, logged_by
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.family_member_id)
        .bind(&entry.date)
        .bind(entry.mood)
        .bind(entry.energy)
        .bind(entry.inflammation)
        .bind(entry.bowel_movements)
        .bind(entry.bowel_quality.map(|q| q.as_str()))
        .bind(&entry.notes)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .bind(&entry.logged_by)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_entry(&self, entry: &HealthEntry) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE health_entries
            SET mood = ?, energy = ?, inflammation = ?, bowel_movements = ?,
                bowel_quality = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(entry.mood)
        .bind(entry.energy)
        .bind(entry.inflammation)
        .bind(entry.bowel_movements)
        .bind(entry.bowel_quality.map(|q| q.as_str()))
        .bind(&entry.notes)
        .bind(entry.updated_at)
        .bind(&entry.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            anyhow::bail!("Health entry not found: {}", entry.id);
        }
        Ok(())
    }

    async fn list_recent_entries(&self, member_id: &str, limit: u32) -> Result<Vec<HealthEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM health_entries WHERE family_member_id = ? ORDER BY date DESC LIMIT ?",
            ENTRY_COLUMNS
        ))
        .bind(member_id)
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }
}
