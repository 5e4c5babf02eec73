use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use crate::api::dtos::{
    AddSchoolRequest, AddSchoolResponse, CoordinateInput, ListSchoolsQuery,
    SchoolWithDistanceResponse,
};
use crate::config::RankingConfig;
use crate::domain::{rank, GeoPoint, NewSchool, RankOptions, RankedResult};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::SchoolRepository;

#[derive(Clone)]
pub struct SchoolService {
    school_repo: Arc<dyn SchoolRepository>,
    ranking: RankingConfig,
}

impl SchoolService {
    pub fn new(school_repo: Arc<dyn SchoolRepository>) -> Self {
        Self {
            school_repo,
            ranking: RankingConfig::default(),
        }
    }

    pub fn with_ranking_config(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    pub async fn add(&self, request: AddSchoolRequest) -> AppResult<AddSchoolResponse> {
        let request = request.normalized();
        request.validate()?;

        let name = required_text("name", request.name)?;
        let address = required_text("address", request.address)?;
        let latitude = parse_number(
            "latitude",
            request.latitude.as_ref().map(CoordinateInput::as_text),
        )?;
        let longitude = parse_number(
            "longitude",
            request.longitude.as_ref().map(CoordinateInput::as_text),
        )?;
        let location = GeoPoint::try_new(latitude, longitude)?;

        let school_id = self
            .school_repo
            .insert(&NewSchool {
                name,
                address,
                location,
            })
            .await
            .inspect_err(log_storage_failure("insert"))?;

        info!(school_id, "school created");
        Ok(AddSchoolResponse::created(school_id))
    }

    pub async fn list_nearby(
        &self,
        query: ListSchoolsQuery,
    ) -> AppResult<Vec<SchoolWithDistanceResponse>> {
        let latitude = parse_number("latitude", query.latitude.as_deref().map(Into::into))?;
        let longitude = parse_number("longitude", query.longitude.as_deref().map(Into::into))?;
        let origin = GeoPoint::try_new(latitude, longitude)?;

        let options = match query.max_distance_km.as_deref().map(str::trim) {
            None | Some("") => RankOptions {
                max_distance_km: self.ranking.default_max_distance_km,
            },
            Some(raw) => RankOptions::within(parse_radius(raw)?),
        };

        let ranked = self.rank_from(origin, options).await?;
        Ok(ranked
            .into_iter()
            .map(SchoolWithDistanceResponse::from)
            .collect())
    }

    /// Ranks the current snapshot of stored schools around `origin`.
    pub async fn rank_from(
        &self,
        origin: GeoPoint,
        options: RankOptions,
    ) -> AppResult<Vec<RankedResult>> {
        let records = self
            .school_repo
            .list_all()
            .await
            .inspect_err(log_storage_failure("list_all"))?;
        let candidates = records.len();
        let ranked = rank(origin, records, options);

        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            candidates,
            returned = ranked.len(),
            max_distance_km = ?options.max_distance_km,
            "ranked schools by distance"
        );
        Ok(ranked)
    }
}

fn log_storage_failure(operation: &'static str) -> impl FnOnce(&AppError) {
    move |error| {
        if error.is_storage_error() {
            warn!(operation, code = error.error_code(), %error, "school storage failure");
        }
    }
}

fn required(field: &'static str) -> AppError {
    AppError::field_error(field, "required", format!("{field} is required"))
}

fn required_text(field: &'static str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| required(field))
}

fn parse_number(field: &'static str, raw: Option<Cow<'_, str>>) -> AppResult<f64> {
    let raw = raw
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| required(field))?;

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            AppError::field_error(field, "numeric", format!("{field} must be a number"))
        })
}

fn parse_radius(raw: &str) -> AppResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|radius| radius.is_finite() && *radius >= 0.0)
        .ok_or_else(|| {
            AppError::field_error(
                "max_distance_km",
                "range",
                "max_distance_km must be a non-negative number",
            )
        })
}
