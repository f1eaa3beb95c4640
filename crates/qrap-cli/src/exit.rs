use qrap_core::errors::CoreError;
use qrap_db::error::ServiceError;

/// Process exit code for a failed command.
///
/// | code | meaning |
/// |------|---------|
/// | 1 | configuration, store, or other failure |
/// | 2 | validation |
/// | 3 | not found |
/// | 4 | invalid state |
/// | 5 | run failed partway (assessment marked FAILED) |
#[must_use]
pub fn code_for(error: &anyhow::Error) -> i32 {
    if let Some(service) = error.downcast_ref::<ServiceError>() {
        return match service {
            ServiceError::Validation(_) => 2,
            ServiceError::NotFound { .. } => 3,
            ServiceError::InvalidState(_) => 4,
            ServiceError::PartialFailure { .. } => 5,
            ServiceError::Store(_) => 1,
        };
    }
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::Validation(_)) => 2,
        Some(CoreError::InvalidTransition { .. }) => 4,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use qrap_core::enums::EntityType;
    use qrap_core::errors::CoreError;
    use qrap_db::error::{DatabaseError, ServiceError};

    use super::code_for;

    #[test]
    fn maps_service_errors() {
        let not_found = anyhow::Error::new(ServiceError::NotFound {
            entity_type: EntityType::Assessment,
            id: "x".to_string(),
        });
        assert_eq!(code_for(&not_found), 3);

        let invalid = anyhow::Error::new(ServiceError::InvalidState("busy".to_string()));
        assert_eq!(code_for(&invalid), 4);

        let store = anyhow::Error::new(ServiceError::Store(DatabaseError::NoResult));
        assert_eq!(code_for(&store), 1);
    }

    #[test]
    fn maps_core_validation_from_argument_parsing() {
        let error = anyhow::Error::new(CoreError::Validation("bad id".to_string()));
        assert_eq!(code_for(&error), 2);
    }

    #[test]
    fn context_wrapped_errors_still_map() {
        let error = anyhow::Error::new(ServiceError::Validation("empty".to_string()))
            .context("while creating assessment");
        assert_eq!(code_for(&error), 2);
    }

    #[test]
    fn unknown_errors_are_generic_failures() {
        assert_eq!(code_for(&anyhow::anyhow!("boom")), 1);
    }
}
