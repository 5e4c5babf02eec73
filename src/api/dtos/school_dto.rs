use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::RankedResult;

/// A coordinate as it arrives in a JSON body: clients send either a number or a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            CoordinateInput::Number(value) => value.to_string().into(),
            CoordinateInput::Text(text) => text.as_str().into(),
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        CoordinateInput::Number(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddSchoolRequest {
    #[validate(required, length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, max = 512))]
    pub address: Option<String>,

    #[validate(required)]
    pub latitude: Option<CoordinateInput>,

    #[validate(required)]
    pub longitude: Option<CoordinateInput>,
}

impl AddSchoolRequest {
    /// Trims text fields; a field left blank counts as missing.
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            address: trimmed(self.address),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Query string for `GET /listSchools`. Values stay as text so that a missing or
/// non-numeric coordinate is reported per field instead of as a generic parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSchoolsQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub max_distance_km: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSchoolResponse {
    pub message: String,
    pub school_id: i64,
}

impl AddSchoolResponse {
    pub fn created(school_id: i64) -> Self {
        Self {
            message: "School added successfully!".to_string(),
            school_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolWithDistanceResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl From<RankedResult> for SchoolWithDistanceResponse {
    fn from(result: RankedResult) -> Self {
        Self {
            id: result.school.id,
            name: result.school.name,
            address: result.school.address,
            latitude: result.school.location.latitude,
            longitude: result.school.location.longitude,
            distance_km: result.distance_km,
        }
    }
}
