use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{MedicationFrequency, MedicationSchedule};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::MedicationScheduleStorage;

const SCHEDULE_COLUMNS: &str = "id, family_member_id, medication_name, dosage, frequency, \
     times, active, start_date, end_date, reminder_enabled";

/// Repository for recurring medication schedules.
///
/// The `times` list is stored as a JSON array in a single text column.
#[derive(Clone)]
pub struct MedicationScheduleRepository {
    db: DbConnection,
}

impl MedicationScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_schedule(row: &SqliteRow) -> Result<MedicationSchedule> {
        let frequency: String = row.try_get("frequency")?;
        let times: String = row.try_get("times")?;

        Ok(MedicationSchedule {
            id: row.try_get("id")?,
            family_member_id: row.try_get("family_member_id")?,
            medication_name: row.try_get("medication_name")?,
            dosage: row.try_get("dosage")?,
            frequency: frequency
                .parse::<MedicationFrequency>()
                .context("Corrupt frequency column in medication_schedules")?,
            times: serde_json::from_str(&times)
                .context("Corrupt times column in medication_schedules")?,
            active: row.try_get("active")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            reminder_enabled: row.try_get("reminder_enabled")?,
        })
    }
}

#[async_trait]
impl MedicationScheduleStorage for MedicationScheduleRepository {
    async fn store_schedule(&self, schedule: &MedicationSchedule) -> Result<()> {
        let times = serde_json::to_string(&schedule.times)?;

        sqlx::query(
            r#"
            INSERT INTO medication_schedules (
                id, family_member_id, medication_name, dosage, frequency,
                times, active, start_date, end_date, reminder_enabled
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&schedule.id)
        .bind(&schedule.family_member_id)
        .bind(&schedule.medication_name)
        .bind(&schedule.dosage)
        .bind(schedule.frequency.as_str())
        .bind(times)
        .bind(schedule.active)
        .bind(&schedule.start_date)
        .bind(&schedule.end_date)
        .bind(schedule.reminder_enabled)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_schedule(&self, schedule_id: &str) -> Result<Option<MedicationSchedule>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM medication_schedules WHERE id = ?",
            SCHEDULE_COLUMNS
        ))
        .bind(schedule_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_schedule).transpose()
    }

    async fn list_schedules(&self, member_id: &str, active_only: bool) -> Result<Vec<MedicationSchedule>> {
        let sql = if active_only {
            format!(
                "SELECT {} FROM medication_schedules WHERE family_member_id = ? AND active = 1 \
                 ORDER BY medication_name ASC",
                SCHEDULE_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM medication_schedules WHERE family_member_id = ? \
                 ORDER BY medication_name ASC",
                SCHEDULE_COLUMNS
            )
        };

        let rows = sqlx::query(&sql)
            .bind(member_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::row_to_schedule).collect()
    }

    async fn set_schedule_active(&self, schedule_id: &str, active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE medication_schedules SET active = ? WHERE id = ?")
            .bind(active)
            .bind(schedule_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
