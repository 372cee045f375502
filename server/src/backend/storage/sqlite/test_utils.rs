//! Fixtures shared by the SQLite repository and service tests.

use shared::{Family, FamilyMember, HealthEntry, MemberRole};

use super::connection::DbConnection;
use super::repositories::{FamilyRepository, HealthEntryRepository};
use crate::backend::storage::traits::{FamilyStorage, HealthEntryStorage};

pub fn sample_family(owner_id: &str) -> Family {
    Family {
        id: Family::generate_id(),
        name: "Pieron Family".to_string(),
        owner_id: owner_id.to_string(),
        created_at: 1_770_940_800_000,
    }
}

pub fn sample_parent(family: &Family, user_id: &str) -> FamilyMember {
    FamilyMember {
        id: FamilyMember::generate_id(),
        family_id: family.id.clone(),
        user_id: Some(user_id.to_string()),
        name: "Jack".to_string(),
        date_of_birth: None,
        is_child: false,
        avatar_emoji: Some("👤".to_string()),
        role: MemberRole::Parent,
    }
}

pub fn sample_entry(member_id: &str, date: &str) -> HealthEntry {
    HealthEntry {
        id: HealthEntry::generate_id(),
        family_member_id: member_id.to_string(),
        date: date.to_string(),
        mood: Some(7),
        energy: Some(6),
        inflammation: Some(2),
        bowel_movements: None,
        bowel_quality: None,
        notes: None,
        created_at: 1_770_940_800_000,
        updated_at: 1_770_940_800_000,
        logged_by: "user_parent".to_string(),
    }
}

/// Create a family owned by `owner_id` and return its parent member
pub async fn seed_member(db: &DbConnection, owner_id: &str) -> FamilyMember {
    let family = sample_family(owner_id);
    let member = sample_parent(&family, owner_id);
    FamilyRepository::new(db.clone())
        .create_family_with_member(&family, &member)
        .await
        .expect("Failed to seed family");
    member
}

/// Seed a member plus one health entry for `date`
pub async fn seed_entry(db: &DbConnection, date: &str) -> HealthEntry {
    let member = seed_member(db, "user_parent").await;
    let entry = sample_entry(&member.id, date);
    HealthEntryRepository::new(db.clone())
        .store_entry(&entry)
        .await
        .expect("Failed to seed entry");
    entry
}
