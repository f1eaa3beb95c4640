//! Organization repository.

use chrono::{DateTime, Utc};
use qrap_core::entities::Organization;
use qrap_core::pagination::Pagination;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_count, get_opt_string, parse_datetime, parse_uuid};
use crate::service::QrapService;

const SELECT_COLS: &str =
    "id, name, description, created_by, created_at, updated_by, updated_at";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: parse_uuid(&row.get::<String>(0)?)?,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?.unwrap_or_default(),
        created_by: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_by: get_opt_string(row, 5)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl QrapService {
    pub async fn insert_organization(&self, org: &Organization) -> Result<(), DatabaseError> {
        let id = org.id.to_string();
        let created_at = format_datetime(&org.created_at);
        let updated_at = format_datetime(&org.updated_at);
        self.db()
            .execute_with(
                "INSERT INTO organizations (id, name, description, created_by, created_at, updated_by, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                || {
                    libsql::params![
                        id.as_str(),
                        org.name.as_str(),
                        org.description.as_str(),
                        org.created_by.as_str(),
                        created_at.as_str(),
                        org.updated_by.as_deref(),
                        updated_at.as_str()
                    ]
                },
            )
            .await?;
        Ok(())
    }

    pub async fn fetch_organization(&self, id: Uuid) -> Result<Organization, DatabaseError> {
        let id = id.to_string();
        let sql = format!("SELECT {SELECT_COLS} FROM organizations WHERE id = ?1");
        let mut rows = self.db().query_with(&sql, || [id.as_str()]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_organization(&row)
    }

    pub async fn query_organizations(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<Organization>, DatabaseError> {
        let limit = i64::from(pagination.limit);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM organizations ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params![limit, pagination.offset])
            .await?;

        let mut orgs = Vec::new();
        while let Some(row) = rows.next().await? {
            orgs.push(row_to_organization(&row)?);
        }
        Ok(orgs)
    }

    pub async fn count_organizations(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .query_with("SELECT COUNT(*) FROM organizations", || ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// Overwrite name and description. Returns the number of rows changed.
    pub async fn update_organization_row(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
        updated_by: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let id = id.to_string();
        let updated_at = format_datetime(&now);
        self.db()
            .execute_with(
                "UPDATE organizations SET name = ?1, description = ?2, updated_by = ?3, updated_at = ?4
                 WHERE id = ?5",
                || {
                    libsql::params![
                        name,
                        description,
                        updated_by,
                        updated_at.as_str(),
                        id.as_str()
                    ]
                },
            )
            .await
    }
}
