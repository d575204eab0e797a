//! DTOs for backup endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ClearQuery {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub restored: Vec<&'static str>,
}
