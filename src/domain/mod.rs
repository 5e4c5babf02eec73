pub mod errors;
pub mod geo;
pub mod ranking;
pub mod school;

pub use errors::DomainError;
pub use geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use ranking::{rank, RankOptions, RankedResult};
pub use school::{NewSchool, SchoolRecord};
