use std::sync::Arc;
use tracing::info;

use shared::{Insight, RecordInsightRequest};

use super::errors::{DomainError, DomainResult};
use super::family_service::FamilyService;
use super::identity::{require_identity, Identity};
use super::now_millis;
use super::validation::{parse_iso_date, validate_required_text};

use crate::backend::storage::InsightStorage;

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Service for precomputed analytics insights.
///
/// Insights are produced elsewhere (an analysis job) and recorded here; users
/// can only read and dismiss them.
#[derive(Clone)]
pub struct InsightService {
    storage: Arc<dyn InsightStorage>,
    family_service: FamilyService,
}

impl InsightService {
    pub fn new(storage: Arc<dyn InsightStorage>, family_service: FamilyService) -> Self {
        Self {
            storage,
            family_service,
        }
    }

    pub async fn record_insight(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
        request: RecordInsightRequest,
    ) -> DomainResult<Insight> {
        require_identity(identity)?;

        let title = validate_required_text("Insight title", &request.title, MAX_TITLE_LENGTH)?;
        let description =
            validate_required_text("Insight description", &request.description, MAX_DESCRIPTION_LENGTH)?;
        if !(0.0..=1.0).contains(&request.confidence) {
            return Err(DomainError::validation("Confidence must be between 0 and 1"));
        }
        if request.data_points < 0 {
            return Err(DomainError::validation("Data points cannot be negative"));
        }
        let start = parse_iso_date("Range start", &request.date_range.start)?;
        let end = parse_iso_date("Range end", &request.date_range.end)?;
        if end < start {
            return Err(DomainError::validation("Range end cannot be before range start"));
        }

        self.family_service.require_member(member_id).await?;

        let insight = Insight {
            id: Insight::generate_id(),
            family_member_id: member_id.to_string(),
            insight_type: request.insight_type,
            title,
            description,
            confidence: request.confidence,
            data_points: request.data_points,
            date_range: request.date_range,
            dismissed: false,
            created_at: now_millis(),
        };
        self.storage.store_insight(&insight).await?;

        info!("Recorded {} insight {} for member {}", insight.insight_type, insight.id, member_id);
        Ok(insight)
    }

    /// Newest first
    pub async fn list_insights(
        &self,
        identity: Option<&Identity>,
        member_id: &str,
        include_dismissed: bool,
    ) -> DomainResult<Vec<Insight>> {
        require_identity(identity)?;
        Ok(self.storage.list_insights(member_id, include_dismissed).await?)
    }

    pub async fn dismiss_insight(&self, identity: Option<&Identity>, insight_id: &str) -> DomainResult<Insight> {
        require_identity(identity)?;

        if !self.storage.dismiss_insight(insight_id).await? {
            return Err(DomainError::not_found("Insight", insight_id));
        }

        info!("Dismissed insight {}", insight_id);
        self.storage
            .get_insight(insight_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Insight", insight_id))
    }
}
