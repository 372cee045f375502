use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{Family, FamilyMember, MemberRole};
use sqlx::{sqlite::SqliteRow, Row};

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::FamilyStorage;

const MEMBER_COLUMNS: &str =
    "id, family_id, user_id, name, date_of_birth, is_child, avatar_emoji, role";

/// Repository for families and family members
#[derive(Clone)]
pub struct FamilyRepository {
    db: DbConnection,
}

impl FamilyRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_family(row: &SqliteRow) -> Result<Family> {
        Ok(Family {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            owner_id: row.try_get("owner_id")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_member(row: &SqliteRow) -> Result<FamilyMember> {
        let role: String = row.try_get("role")?;
        Ok(FamilyMember {
            id: row.try_get("id")?,
            family_id: row.try_get("family_id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            date_of_birth: row.try_get("date_of_birth")?,
            is_child: row.try_get("is_child")?,
            avatar_emoji: row.try_get("avatar_emoji")?,
            role: role
                .parse::<MemberRole>()
                .context("Corrupt role column in family_members")?,
        })
    }
}

#[async_trait]
impl FamilyStorage for FamilyRepository {
    async fn get_family_by_owner(&self, owner_id: &str) -> Result<Option<Family>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, owner_id, created_at
            FROM families
            WHERE owner_id = ?
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_family).transpose()
    }

    async fn create_family_with_member(&self, family: &Family, member: &FamilyMember) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO families (id, name, owner_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&family.id)
        .bind(&family.name)
        .bind(&family.owner_id)
        .bind(family.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO family_members (id, family_id, user_id, name, date_of_birth, is_child, avatar_emoji, role)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&member.id)
        .bind(&member.family_id)
        .bind(&member.user_id)
        .bind(&member.name)
        .bind(&member.date_of_birth)
        .bind(member.is_child)
        .bind(&member.avatar_emoji)
        .bind(member.role.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_member(&self, member_id: &str) -> Result<Option<FamilyMember>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM family_members WHERE id = ?",
            MEMBER_COLUMNS
        ))
        .bind(member_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn get_member_by_user(&self, user_id: &str) -> Result<Option<FamilyMember>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM family_members WHERE user_id = ? ORDER BY ROWID ASC LIMIT 1",
            MEMBER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_member).transpose()
    }

    async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM family_members WHERE family_id = ? ORDER BY is_child ASC, name ASC",
            MEMBER_COLUMNS
        ))
        .bind(family_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_member).collect()
    }

    async fn store_member(&self, member: &FamilyMember) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO family_members (id, family_id, user_id, name, date_of_birth, is_child, avatar_emoji, role)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&member.id)
        .bind(&member.family_id)
        .bind(&member.user_id)
        .bind(&member.name)
        .bind(&member.date_of_birth)
        .bind(member.is_child)
        .bind(&member.avatar_emoji)
        .bind(member.role.as_str())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
