use crate::modules::aggregation::domain::errors::AggregationError;
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog id that has passed validation. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(id: u64) -> Result<Self, AggregationError> {
        if id == 0 {
            return Err(AggregationError::InvalidRequest("Invalid ID.".to_string()));
        }
        Ok(Self(id))
    }

    /// Parse a raw route parameter
    pub fn parse(raw: Option<&str>) -> Result<Self, AggregationError> {
        Validator::validate_entity_id(raw).map(Self).map_err(|e| {
            AggregationError::InvalidRequest(e.message().unwrap_or("Invalid ID.").to_string())
        })
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
