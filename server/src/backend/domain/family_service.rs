use std::sync::Arc;
use tracing::{info, warn};

use shared::{
    CreateChildMemberRequest, Family, FamilyBootstrapResponse, FamilyMember, FamilyMemberResponse,
    MemberRole,
};

use super::errors::{DomainError, DomainResult};
use super::identity::{require_identity, Identity};
use super::now_millis;
use super::validation::{parse_iso_date, validate_required_text, MAX_NAME_LENGTH};
use crate::backend::storage::FamilyStorage;

const DEFAULT_AVATAR: &str = "👤";

/// Service for families and the members inside them
#[derive(Clone)]
pub struct FamilyService {
    storage: Arc<dyn FamilyStorage>,
}

impl FamilyService {
    pub fn new(storage: Arc<dyn FamilyStorage>) -> Self {
        Self { storage }
    }

    /// Return the caller's family, creating it and a parent member on first use.
    ///
    /// Not guarded against two concurrent first calls for the same user: both
    /// may miss the lookup and each create a family.
    pub async fn get_or_create_family(
        &self,
        identity: Option<&Identity>,
    ) -> DomainResult<FamilyBootstrapResponse> {
        let identity = require_identity(identity)?;
        let user_id = identity.subject.as_str();

        if let Some(family) = self.storage.get_family_by_owner(user_id).await? {
            let member = self.storage.get_member_by_user(user_id).await?;
            if member.is_none() {
                warn!("Family {} exists but owner {} has no member record", family.id, user_id);
            }
            return Ok(FamilyBootstrapResponse { family, member });
        }

        info!("Creating family for user {}", user_id);

        let family = Family {
            id: Family::generate_id(),
            name: format!("{} Family", identity.name.as_deref().unwrap_or("My")),
            owner_id: user_id.to_string(),
            created_at: now_millis(),
        };
        let member = FamilyMember {
            id: FamilyMember::generate_id(),
            family_id: family.id.clone(),
            user_id: Some(user_id.to_string()),
            name: identity.name.clone().unwrap_or_else(|| "Me".to_string()),
            date_of_birth: None,
            is_child: false,
            avatar_emoji: Some(DEFAULT_AVATAR.to_string()),
            role: MemberRole::Parent,
        };

        self.storage.create_family_with_member(&family, &member).await?;

        info!("Created family {} with member {}", family.id, member.id);

        Ok(FamilyBootstrapResponse {
            family,
            member: Some(member),
        })
    }

    /// The member linked to the caller, or None when anonymous or not set up yet
    pub async fn get_my_member(&self, identity: Option<&Identity>) -> DomainResult<Option<FamilyMember>> {
        let Some(identity) = identity else {
            return Ok(None);
        };

        Ok(self.storage.get_member_by_user(&identity.subject).await?)
    }

    /// Members of the family the caller owns, adults first
    pub async fn list_family_members(&self, identity: Option<&Identity>) -> DomainResult<Vec<FamilyMember>> {
        let identity = require_identity(identity)?;

        match self.storage.get_family_by_owner(&identity.subject).await? {
            Some(family) => Ok(self.storage.list_members(&family.id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Add a child (no identity subject of their own) to the caller's family
    pub async fn add_child_member(
        &self,
        identity: Option<&Identity>,
        request: CreateChildMemberRequest,
    ) -> DomainResult<FamilyMemberResponse> {
        let identity = require_identity(identity)?;

        let name = validate_required_text("Member name", &request.name, MAX_NAME_LENGTH)?;
        if let Some(ref dob) = request.date_of_birth {
            parse_iso_date("Date of birth", dob)?;
        }

        let family = self
            .storage
            .get_family_by_owner(&identity.subject)
            .await?
            .ok_or_else(|| DomainError::not_found("Family for user", &identity.subject))?;

        let member = FamilyMember {
            id: FamilyMember::generate_id(),
            family_id: family.id,
            user_id: None,
            name,
            date_of_birth: request.date_of_birth,
            is_child: true,
            avatar_emoji: request.avatar_emoji,
            role: MemberRole::Child,
        };

        self.storage.store_member(&member).await?;

        info!("Added child {} to family {}", member.id, member.family_id);

        Ok(FamilyMemberResponse {
            member,
            success_message: "Family member added successfully".to_string(),
        })
    }

    /// Look up a member by id, failing with NotFound if absent
    pub async fn require_member(&self, member_id: &str) -> DomainResult<FamilyMember> {
        self.storage
            .get_member(member_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Family member", member_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::sqlite::{DbConnection, FamilyRepository};

    async fn create_test_service() -> FamilyService {
        let db = DbConnection::init_in_memory().await.expect("Failed to init test DB");
        FamilyService::new(Arc::new(FamilyRepository::new(db)))
    }

    fn jack() -> Identity {
        Identity::new("user_jack", Some("Jack".to_string()))
    }

    #[tokio::test]
    async fn test_bootstrap_creates_family_and_parent() {
        let service = create_test_service().await;

        let response = service.get_or_create_family(Some(&jack())).await.unwrap();

        assert_eq!(response.family.name, "Jack Family");
        assert_eq!(response.family.owner_id, "user_jack");
        let member = response.member.expect("member should be created");
        assert_eq!(member.name, "Jack");
        assert_eq!(member.user_id.as_deref(), Some("user_jack"));
        assert_eq!(member.role, MemberRole::Parent);
        assert!(!member.is_child);
        assert_eq!(member.avatar_emoji.as_deref(), Some("👤"));
        assert_eq!(member.family_id, response.family.id);
    }

    #[tokio::test]
    async fn test_bootstrap_defaults_when_identity_has_no_name() {
        let service = create_test_service().await;
        let anonymous_name = Identity::new("user_x", None);

        let response = service.get_or_create_family(Some(&anonymous_name)).await.unwrap();

        assert_eq!(response.family.name, "My Family");
        assert_eq!(response.member.unwrap().name, "Me");
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let service = create_test_service().await;

        let first = service.get_or_create_family(Some(&jack())).await.unwrap();
        let second = service.get_or_create_family(Some(&jack())).await.unwrap();

        assert_eq!(first.family, second.family);
        assert_eq!(first.member, second.member);
        assert_eq!(service.list_family_members(Some(&jack())).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_requires_identity() {
        let service = create_test_service().await;

        let result = service.get_or_create_family(None).await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));

        // Nothing was written
        assert!(service.get_my_member(Some(&jack())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_my_member() {
        let service = create_test_service().await;
        assert!(service.get_my_member(None).await.unwrap().is_none());
        assert!(service.get_my_member(Some(&jack())).await.unwrap().is_none());

        let created = service.get_or_create_family(Some(&jack())).await.unwrap();

        let mine = service.get_my_member(Some(&jack())).await.unwrap();
        assert_eq!(mine, created.member);
        assert!(service.get_my_member(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_child_member() {
        let service = create_test_service().await;
        service.get_or_create_family(Some(&jack())).await.unwrap();

        let request = CreateChildMemberRequest {
            name: "  Roxy ".to_string(),
            date_of_birth: Some("2017-09-02".to_string()),
            avatar_emoji: Some("👧".to_string()),
        };
        let response = service.add_child_member(Some(&jack()), request).await.unwrap();

        assert_eq!(response.member.name, "Roxy");
        assert!(response.member.is_child);
        assert!(response.member.user_id.is_none());
        assert_eq!(response.member.role, MemberRole::Child);

        let members = service.list_family_members(Some(&jack())).await.unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Jack", "Roxy"]);
    }

    #[tokio::test]
    async fn test_add_child_member_validation_and_missing_family() {
        let service = create_test_service().await;

        let request = CreateChildMemberRequest {
            name: "Aero".to_string(),
            date_of_birth: None,
            avatar_emoji: None,
        };
        let result = service.add_child_member(Some(&jack()), request.clone()).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));

        service.get_or_create_family(Some(&jack())).await.unwrap();

        let empty_name = CreateChildMemberRequest {
            name: "  ".to_string(),
            ..request.clone()
        };
        let result = service.add_child_member(Some(&jack()), empty_name).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let bad_dob = CreateChildMemberRequest {
            date_of_birth: Some("02/09/2017".to_string()),
            ..request.clone()
        };
        let result = service.add_child_member(Some(&jack()), bad_dob).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = service.add_child_member(None, request).await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_list_members_without_family_is_empty() {
        let service = create_test_service().await;
        assert!(service.list_family_members(Some(&jack())).await.unwrap().is_empty());
        assert!(matches!(
            service.list_family_members(None).await,
            Err(DomainError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_require_member() {
        let service = create_test_service().await;
        let created = service.get_or_create_family(Some(&jack())).await.unwrap();
        let member = created.member.unwrap();

        assert_eq!(service.require_member(&member.id).await.unwrap(), member);
        let missing = service.require_member("member::missing").await.unwrap_err();
        assert_eq!(missing.to_string(), "Family member not found: member::missing");
    }
}
