use crate::shared::errors::{AppError, AppResult};

pub struct Validator;

impl Validator {
    /// Parse a route-supplied catalog id. Absent, zero or non-numeric ids are
    /// rejected before any request is planned.
    pub fn validate_entity_id(raw: Option<&str>) -> AppResult<u64> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(AppError::ValidationError("Invalid ID.".to_string()));
        }
        match raw.parse::<u64>() {
            Ok(0) | Err(_) => Err(AppError::ValidationError("Invalid ID.".to_string())),
            Ok(id) => Ok(id),
        }
    }

    pub fn validate_page(page: u32) -> AppResult<u32> {
        if page == 0 {
            return Err(AppError::ValidationError(
                "Page numbers start at 1".to_string(),
            ));
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_accepts_positive_integers() {
        assert_eq!(Validator::validate_entity_id(Some("550")).unwrap(), 550);
        assert_eq!(Validator::validate_entity_id(Some(" 1399 ")).unwrap(), 1399);
    }

    #[test]
    fn test_entity_id_rejects_absent_zero_and_garbage() {
        for raw in [None, Some(""), Some("0"), Some("abc"), Some("-4"), Some("12.5")] {
            let err = Validator::validate_entity_id(raw).unwrap_err();
            assert_eq!(err, AppError::ValidationError("Invalid ID.".to_string()));
        }
    }

    #[test]
    fn test_page_validation() {
        assert!(Validator::validate_page(0).is_err());
        assert_eq!(Validator::validate_page(2).unwrap(), 2);
    }
}
