mod common;

use actix_rt::test;
use common::TestDb;
use school_locator::api::dtos::{AddSchoolRequest, ListSchoolsQuery};
use school_locator::application::SchoolService;
use school_locator::domain::{GeoPoint, NewSchool};

fn new_school(name: &str, latitude: f64, longitude: f64) -> NewSchool {
    NewSchool {
        name: name.to_string(),
        address: format!("{name} campus"),
        location: GeoPoint::new(latitude, longitude),
    }
}

#[test]
async fn insert_assigns_increasing_ids() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = db.repository();

    let first = repo
        .insert(&new_school("North", 10.0, 10.0))
        .await
        .expect("insert");
    let second = repo
        .insert(&new_school("South", -10.0, 10.0))
        .await
        .expect("insert");

    assert!(first > 0);
    assert!(second > first);
}

#[test]
async fn list_all_returns_rows_in_insertion_order() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = db.repository();

    for (name, latitude, longitude) in [("A", 1.0, 1.0), ("B", 2.0, 2.0), ("C", 1.0, 1.0)] {
        repo.insert(&new_school(name, latitude, longitude))
            .await
            .expect("insert");
    }

    let schools = repo.list_all().await.expect("list");
    let names: Vec<&str> = schools.iter().map(|school| school.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(schools[1].location, GeoPoint::new(2.0, 2.0));
    assert_eq!(schools[1].address, "B campus");
}

#[test]
async fn list_all_on_empty_table_is_empty() {
    let Some(db) = TestDb::new().await else {
        return;
    };

    let schools = db.repository().list_all().await.expect("list");
    assert!(schools.is_empty());
}

#[test]
async fn ping_and_pool_stats_report_live_pool() {
    let Some(db) = TestDb::new().await else {
        return;
    };

    db.database().ping().await.expect("ping");
    let (size, _idle) = db.database().pool_stats();
    assert!(size >= 1);
}

#[test]
async fn service_round_trip_ranks_stored_schools() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let service = SchoolService::new(db.repository());

    for (name, latitude, longitude) in [("Far", 0.0, 90.0), ("Near", 0.0, 1.0), ("Twin", 0.0, 1.0)]
    {
        service
            .add(AddSchoolRequest {
                name: Some(name.to_string()),
                address: Some("Somewhere".to_string()),
                latitude: Some(latitude.into()),
                longitude: Some(longitude.into()),
            })
            .await
            .expect("add");
    }

    let results = service
        .list_nearby(ListSchoolsQuery {
            latitude: Some("0".to_string()),
            longitude: Some("0".to_string()),
            max_distance_km: None,
        })
        .await
        .expect("list");

    let names: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Twin", "Far"]);
    assert!((results[2].distance_km - 10007.54).abs() < 0.01);
}
