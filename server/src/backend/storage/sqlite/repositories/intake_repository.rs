use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{FoodEntry, MealType, MedicationEntry, VitaminEntry};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::IntakeStorage;

/// Repository for food, vitamin and medication entries
#[derive(Clone)]
pub struct IntakeRepository {
    db: DbConnection,
}

impl IntakeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_food(row: &SqliteRow) -> Result<FoodEntry> {
        let meal_type: String = row.try_get("meal_type")?;
        Ok(FoodEntry {
            id: row.try_get("id")?,
            health_entry_id: row.try_get("health_entry_id")?,
            family_member_id: row.try_get("family_member_id")?,
            date: row.try_get("date")?,
            meal_type: meal_type
                .parse::<MealType>()
                .context("Corrupt meal_type column in food_entries")?,
            description: row.try_get("description")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn row_to_vitamin(row: &SqliteRow) -> Result<VitaminEntry> {
        Ok(VitaminEntry {
            id: row.try_get("id")?,
            health_entry_id: row.try_get("health_entry_id")?,
            family_member_id: row.try_get("family_member_id")?,
            date: row.try_get("date")?,
            vitamin_name: row.try_get("vitamin_name")?,
            dosage: row.try_get("dosage")?,
            taken: row.try_get("taken")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn row_to_medication(row: &SqliteRow) -> Result<MedicationEntry> {
        Ok(MedicationEntry {
            id: row.try_get("id")?,
            health_entry_id: row.try_get("health_entry_id")?,
            family_member_id: row.try_get("family_member_id")?,
            date: row.try_get("date")?,
            medication_name: row.try_get("medication_name")?,
            dosage: row.try_get("dosage")?,
            taken: row.try_get("taken")?,
            timestamp: row.try_get("timestamp")?,
            scheduled_time: row.try_get("scheduled_time")?,
        })
    }
}

#[async_trait]
impl IntakeStorage for IntakeRepository {
    async fn store_food(&self, food: &FoodEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO food_entries (id, health_entry_id, family_member_id, date, meal_type, description, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&food.id)
        .bind(&food.health_entry_id)
        .bind(&food.family_member_id)
        .bind(&food.date)
        .bind(food.meal_type.as_str())
        .bind(&food.description)
        .bind(food.timestamp)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn store_vitamin(&self, vitamin: &VitaminEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vitamin_entries (id, health_entry_id, family_member_id, date, vitamin_name, dosage, taken, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vitamin.id)
        .bind(&vitamin.health_entry_id)
        .bind(&vitamin.family_member_id)
        .bind(&vitamin.date)
        .bind(&vitamin.vitamin_name)
        .bind(&vitamin.dosage)
        .bind(vitamin.taken)
        .bind(vitamin.timestamp)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn store_medication(&self, medication: &MedicationEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO medication_entries (
                id, health_entry_id, family_member_id, date, medication_name,
                dosage, taken, timestamp, scheduled_time
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&medication.id)
        .bind(&medication.health_entry_id)
        .bind(&medication.family_member_id)
        .bind(&medication.date)
        .bind(&medication.medication_name)
        .bind(&medication.dosage)
        .bind(medication.taken)
        .bind(medication.timestamp)
        .bind(&medication.scheduled_time)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_foods(&self, health_entry_id: &str) -> Result<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, health_entry_id, family_member_id, date, meal_type, description, timestamp
            FROM food_entries
            WHERE health_entry_id = ?
            ORDER BY timestamp ASC, ROWID ASC
            "#,
        )
        .bind(health_entry_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_food).collect()
    }

    async fn list_vitamins(&self, health_entry_id: &str) -> Result<Vec<VitaminEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, health_entry_id, family_member_id, date, vitamin_name, dosage, taken, timestamp
            FROM vitamin_entries
            WHERE health_entry_id = ?
            ORDER BY timestamp ASC, ROWID ASC
            "#,
        )
        .bind(health_entry_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_vitamin).collect()
    }

    async fn list_medications(&self, health_entry_id: &str) -> Result<Vec<MedicationEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, health_entry_id, family_member_id, date, medication_name,
                   dosage, taken, timestamp, scheduled_time
            FROM medication_entries
            WHERE health_entry_id = ?
            ORDER BY timestamp ASC, ROWID ASC
            "#,
        )
        .bind(health_entry_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_medication).collect()
    }
}
