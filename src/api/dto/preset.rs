//! DTOs for presets and status labels.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AddPresetRequest {
    #[validate(length(min = 1, max = 100))]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct PresetListResponse {
    pub items: Vec<String>,
}

/// Request body for `PUT /api/presets/statuses/{status}`.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusLabelRequest {
    #[validate(length(min = 1, max = 50))]
    pub label: String,
}
