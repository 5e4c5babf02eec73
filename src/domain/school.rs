use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// A stored school. The id is assigned by the storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

/// Insert payload for a school that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

impl NewSchool {
    pub fn into_record(self, id: i64) -> SchoolRecord {
        SchoolRecord {
            id,
            name: self.name,
            address: self.address,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_record_keeps_fields_and_assigns_id() {
        let new_school = NewSchool {
            name: "Greenwood High".to_string(),
            address: "12 Park Street".to_string(),
            location: GeoPoint::new(12.9716, 77.5946),
        };

        let record = new_school.clone().into_record(42);

        assert_eq!(record.id, 42);
        assert_eq!(record.name, new_school.name);
        assert_eq!(record.address, new_school.address);
        assert_eq!(record.location, new_school.location);
    }

    #[test]
    fn school_record_deserializes_from_json() {
        let json = r#"{
            "id": 7,
            "name": "Riverside School",
            "address": "1 River Road",
            "location": { "latitude": 51.5, "longitude": -0.12 }
        }"#;

        let record: SchoolRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.location, GeoPoint::new(51.5, -0.12));
    }
}
