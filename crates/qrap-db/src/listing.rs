//! Read paths: point lookups and filtered, paginated listings.
//!
//! Every listing runs its page query and its `COUNT(*)` over the same
//! predicates concurrently and returns both as a [`Page`].

use qrap_core::entities::{Assessment, Finding, Organization};
use qrap_core::enums::EntityType;
use qrap_core::pagination::{Page, Pagination};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::query::{AssessmentFilter, FindingFilter};
use crate::service::QrapService;

impl QrapService {
    pub async fn get_organization(&self, id: Uuid) -> Result<Organization, ServiceError> {
        self.fetch_organization(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, EntityType::Organization, id))
    }

    /// Organizations, newest first.
    pub async fn list_organizations(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Organization>, ServiceError> {
        let (items, total) = tokio::try_join!(
            self.query_organizations(pagination),
            self.count_organizations()
        )?;
        Ok(Page::new(items, total, pagination))
    }

    /// Assessments matching `filter`, newest first.
    pub async fn list_assessments(
        &self,
        filter: &AssessmentFilter,
        pagination: Pagination,
    ) -> Result<Page<Assessment>, ServiceError> {
        let (items, total) = tokio::try_join!(
            self.query_assessments(filter, pagination),
            self.count_assessments(filter)
        )?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get_finding(&self, id: Uuid) -> Result<Finding, ServiceError> {
        self.fetch_finding(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, EntityType::Finding, id))
    }

    /// One assessment's findings matching `filter`, by risk level text then
    /// newest first.
    pub async fn list_findings(
        &self,
        filter: &FindingFilter,
        pagination: Pagination,
    ) -> Result<Page<Finding>, ServiceError> {
        let (items, total) = tokio::try_join!(
            self.query_findings(filter, pagination),
            self.count_findings(filter)
        )?;
        Ok(Page::new(items, total, pagination))
    }
}
