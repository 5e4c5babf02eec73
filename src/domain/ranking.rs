use serde::Serialize;

use super::geo::GeoPoint;
use super::school::SchoolRecord;

/// Caller-controlled ranking knobs. The default returns every record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankOptions {
    pub max_distance_km: Option<f64>,
}

impl RankOptions {
    pub const fn within(max_distance_km: f64) -> Self {
        Self {
            max_distance_km: Some(max_distance_km),
        }
    }

    fn admits(&self, distance_km: f64) -> bool {
        self.max_distance_km
            .map_or(true, |max_distance_km| distance_km <= max_distance_km)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub school: SchoolRecord,
    pub distance_km: f64,
}

/// Pairs every record with its distance from `query` and orders them nearest first.
///
/// The sort is stable, so records at the same distance keep their input order.
/// With `max_distance_km` set, records farther than the radius are dropped.
pub fn rank<I>(query: GeoPoint, records: I, options: RankOptions) -> Vec<RankedResult>
where
    I: IntoIterator<Item = SchoolRecord>,
{
    let mut ranked: Vec<RankedResult> = records
        .into_iter()
        .map(|school| RankedResult {
            distance_km: query.distance_to(&school.location),
            school,
        })
        .filter(|result| options.admits(result.distance_km))
        .collect();

    ranked.sort_by(|left, right| left.distance_km.total_cmp(&right.distance_km));
    ranked
}
