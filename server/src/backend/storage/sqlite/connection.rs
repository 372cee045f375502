use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

/// Table and index definitions, applied in order at startup.
///
/// Dates are ISO `YYYY-MM-DD` text so they sort in calendar order, and
/// timestamps are epoch millis.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS families (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        owner_id TEXT NOT NULL,
        created_at INTEGER NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_families_by_owner ON families(owner_id);",
    r#"
    CREATE TABLE IF NOT EXISTS family_members (
        id TEXT PRIMARY KEY,
        family_id TEXT NOT NULL,
        user_id TEXT,
        name TEXT NOT NULL,
        date_of_birth TEXT,
        is_child INTEGER NOT NULL,
        avatar_emoji TEXT,
        role TEXT NOT NULL,
        FOREIGN KEY (family_id) REFERENCES families (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_family_members_by_family ON family_members(family_id);",
    "CREATE INDEX IF NOT EXISTS idx_family_members_by_user ON family_members(user_id);",
    r#"
    CREATE TABLE IF NOT EXISTS health_entries (
        id TEXT PRIMARY KEY,
        family_member_id TEXT NOT NULL,
        date TEXT NOT NULL,
        mood INTEGER,
        energy INTEGER,
        inflammation INTEGER,
        bowel_movements INTEGER,
        bowel_quality TEXT,
        notes TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        logged_by TEXT NOT NULL,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_health_entries_by_member_and_date ON health_entries(family_member_id, date);",
    "CREATE INDEX IF NOT EXISTS idx_health_entries_by_date ON health_entries(date);",
    r#"
    CREATE TABLE IF NOT EXISTS food_entries (
        id TEXT PRIMARY KEY,
        health_entry_id TEXT NOT NULL,
        family_member_id TEXT NOT NULL,
        date TEXT NOT NULL,
        meal_type TEXT NOT NULL,
        description TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        FOREIGN KEY (health_entry_id) REFERENCES health_entries (id) ON DELETE CASCADE,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_food_entries_by_health_entry ON food_entries(health_entry_id);",
    "CREATE INDEX IF NOT EXISTS idx_food_entries_by_member_and_date ON food_entries(family_member_id, date);",
    r#"
    CREATE TABLE IF NOT EXISTS vitamin_entries (
        id TEXT PRIMARY KEY,
        health_entry_id TEXT NOT NULL,
        family_member_id TEXT NOT NULL,
        date TEXT NOT NULL,
        vitamin_name TEXT NOT NULL,
        dosage TEXT,
        taken INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        FOREIGN KEY (health_entry_id) REFERENCES health_entries (id) ON DELETE CASCADE,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vitamin_entries_by_health_entry ON vitamin_entries(health_entry_id);",
    "CREATE INDEX IF NOT EXISTS idx_vitamin_entries_by_member_and_date ON vitamin_entries(family_member_id, date);",
    r#"
    CREATE TABLE IF NOT EXISTS medication_entries (
        id TEXT PRIMARY KEY,
        health_entry_id TEXT NOT NULL,
        family_member_id TEXT NOT NULL,
        date TEXT NOT NULL,
        medication_name TEXT NOT NULL,
        dosage TEXT NOT NULL,
        taken INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        scheduled_time TEXT,
        FOREIGN KEY (health_entry_id) REFERENCES health_entries (id) ON DELETE CASCADE,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_medication_entries_by_health_entry ON medication_entries(health_entry_id);",
    "CREATE INDEX IF NOT EXISTS idx_medication_entries_by_member_and_date ON medication_entries(family_member_id, date);",
    "CREATE INDEX IF NOT EXISTS idx_medication_entries_by_scheduled_time ON medication_entries(family_member_id, scheduled_time);",
    r#"
    CREATE TABLE IF NOT EXISTS medication_schedules (
        id TEXT PRIMARY KEY,
        family_member_id TEXT NOT NULL,
        medication_name TEXT NOT NULL,
        dosage TEXT NOT NULL,
        frequency TEXT NOT NULL,
        times TEXT NOT NULL,
        active INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT,
        reminder_enabled INTEGER NOT NULL,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_medication_schedules_by_member ON medication_schedules(family_member_id);",
    "CREATE INDEX IF NOT EXISTS idx_medication_schedules_by_active ON medication_schedules(active);",
    r#"
    CREATE TABLE IF NOT EXISTS insights (
        id TEXT PRIMARY KEY,
        family_member_id TEXT NOT NULL,
        insight_type TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        confidence REAL NOT NULL,
        data_points INTEGER NOT NULL,
        range_start TEXT NOT NULL,
        range_end TEXT NOT NULL,
        dismissed INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        FOREIGN KEY (family_member_id) REFERENCES family_members (id) ON DELETE CASCADE
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_insights_by_member ON insights(family_member_id);",
    "CREATE INDEX IF NOT EXISTS idx_insights_by_dismissed ON insights(dismissed);",
];

/// DbConnection manages the SQLite pool shared by every repository
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and apply the schema
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::from_pool(pool).await
    }

    /// Open a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires, since an
    /// in-memory database disappears with its last connection.
    pub async fn init_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::setup_schema(&pool).await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }
}
