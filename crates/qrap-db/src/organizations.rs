//! Organization create and update.

use qrap_core::entities::Organization;
use qrap_core::enums::EntityType;
use qrap_core::validation::validate_name;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::service::QrapService;

impl QrapService {
    pub async fn create_organization(
        &self,
        name: &str,
        description: Option<&str>,
        created_by: &str,
    ) -> Result<Organization, ServiceError> {
        validate_name("name", name)?;

        let now = self.now();
        let org = Organization {
            id: self.next_id(),
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
            created_by: created_by.to_string(),
            created_at: now,
            updated_by: None,
            updated_at: now,
        };
        self.insert_organization(&org).await?;

        tracing::info!(organization_id = %org.id, name = %org.name, "organization created");
        Ok(org)
    }

    /// Replace an organization's name and description.
    pub async fn update_organization(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        updated_by: &str,
    ) -> Result<Organization, ServiceError> {
        validate_name("name", name)?;

        let changed = self
            .update_organization_row(
                id,
                name,
                description.unwrap_or_default(),
                updated_by,
                self.now(),
            )
            .await?;
        if changed == 0 {
            return Err(ServiceError::not_found(EntityType::Organization, id));
        }

        tracing::info!(organization_id = %id, "organization updated");
        self.get_organization(id).await
    }
}
