use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskdeckError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), TaskdeckError> {
        if self.name.trim().is_empty() {
            return Err(TaskdeckError::InvalidInput("name must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}
