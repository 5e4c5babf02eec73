use actix_web::{web, HttpResponse};

use crate::api::dtos::{AddSchoolRequest, ListSchoolsQuery};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/addSchool", web::post().to(add_school))
        .route("/listSchools", web::get().to(list_schools));
}

async fn add_school(
    state: web::Data<AppState>,
    payload: web::Json<AddSchoolRequest>,
) -> AppResult<HttpResponse> {
    let result = state.school_service.add(payload.into_inner()).await?;
    state.metrics.record_school_created();
    Ok(HttpResponse::Created().json(result))
}

async fn list_schools(
    state: web::Data<AppState>,
    query: web::Query<ListSchoolsQuery>,
) -> AppResult<HttpResponse> {
    let result = state.school_service.list_nearby(query.into_inner()).await?;
    state.metrics.record_ranking(result.len());
    Ok(HttpResponse::Ok().json(result))
}
