use sqlx::FromRow;

use crate::domain::{GeoPoint, SchoolRecord};

pub(super) const SELECT_ALL_SCHOOLS: &str =
    "SELECT id, name, address, latitude, longitude FROM schools ORDER BY id ASC";

/// Column layout shared by both backends' `schools` table.
#[derive(Debug, Clone, FromRow)]
pub(super) struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<SchoolRow> for SchoolRecord {
    fn from(row: SchoolRow) -> Self {
        SchoolRecord {
            id: row.id,
            name: row.name,
            address: row.address,
            location: GeoPoint::new(row.latitude, row.longitude),
        }
    }
}
