/*
 * Responsibility
 * - Technologies の request/response DTO
 * - PATCH は部分更新: None のフィールドは触らない
 * - icons はカタログ照合。並びは挿入順のまま保持する
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{icon_catalog, validation::FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTechnologyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icons: Option<Vec<String>>,
}

impl UpdateTechnologyRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Some(name) = self.name.as_deref() {
            errors
                .check_str("name", Some(name))
                .required()
                .max_chars(255);
        }
        if let Some(description) = self.description.as_deref() {
            errors
                .check_str("description", Some(description))
                .required()
                .max_chars(500);
        }
        if let Some(icons) = &self.icons {
            for icon in icons {
                if !icon_catalog::contains(icon) {
                    errors.add("icons", format!("The selected icon \"{icon}\" is invalid."));
                }
            }
        }

        errors
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TechnologyResponse {
    pub id: i64,
    pub public_id: String, // encoded
    pub name: String,
    pub description: String,
    pub icons: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
