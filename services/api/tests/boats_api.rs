mod common;

use api_lib::web::rest::ListQuery;
use api_lib::web::{
    create_activity_handler, create_boat_handler, delete_boat_handler, get_activity_handler,
    get_boat_handler, list_boat_activities_handler, list_boats_handler, update_boat_handler,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::{app_state, at, new_activity, new_boat};
use sailing_log_core::domain::{BoatType, Purpose};

#[tokio::test]
async fn create_then_fetch_boat() {
    let state = app_state();
    let (status, Json(created)) = create_boat_handler(
        State(state.clone()),
        Json(new_boat("  Wind Dancer ", Some(BoatType::Monohull), 34.0)),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.name, "Wind Dancer");

    let Json(fetched) = get_boat_handler(State(state), Path(created.id)).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn invalid_boat_is_rejected_with_every_reason() {
    let state = app_state();
    let mut payload = new_boat("", None, -3.0);
    payload.color_hex = Some("blue".to_string());

    let (status, msg) = create_boat_handler(State(state.clone()), Json(payload))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(msg.contains("name"));
    assert!(msg.contains("lengthFt"));
    assert!(msg.contains("colorHex"));

    let Json(page) = list_boats_handler(State(state), Query(ListQuery::default()))
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn missing_boat_is_not_found() {
    let state = app_state();
    let (status, _) = get_boat_handler(State(state.clone()), Path(42)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = update_boat_handler(
        State(state.clone()),
        Path(42),
        Json(new_boat("Ghost", None, 20.0)),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_boat_handler(State(state), Path(42)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_editable_fields() {
    let state = app_state();
    let (_, Json(boat)) = create_boat_handler(
        State(state.clone()),
        Json(new_boat("Arrow", Some(BoatType::Racer), 24.0)),
    )
    .await
    .unwrap();

    let mut edit = new_boat("Arrow II", Some(BoatType::Racer), 26.0);
    edit.home_port = Some("Newport".to_string());
    let Json(updated) = update_boat_handler(State(state), Path(boat.id), Json(edit))
        .await
        .unwrap();

    assert_eq!(updated.id, boat.id);
    assert_eq!(updated.name, "Arrow II");
    assert_eq!(updated.length_ft, 26.0);
    assert_eq!(updated.home_port.as_deref(), Some("Newport"));
}

#[tokio::test]
async fn list_boats_pages_and_sorts() {
    let state = app_state();
    for (name, length) in [("Charlie", 30.0), ("Alpha", 22.0), ("Bravo", 41.0)] {
        create_boat_handler(State(state.clone()), Json(new_boat(name, None, length)))
            .await
            .unwrap();
    }

    let query = ListQuery {
        page: Some("1".to_string()),
        limit: Some("2".to_string()),
        sort_by: Some("name".to_string()),
        sort_order: Some("asc".to_string()),
    };
    let Json(page) = list_boats_handler(State(state.clone()), Query(query)).await.unwrap();
    let names: Vec<_> = page.data.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert!(page.meta.has_next_page);
    assert!(!page.meta.has_prev_page);

    // Default ordering is id descending.
    let Json(page) = list_boats_handler(State(state), Query(ListQuery::default())).await.unwrap();
    let names: Vec<_> = page.data.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Bravo", "Alpha", "Charlie"]);
    assert_eq!(page.meta.limit, 10);
}

#[tokio::test]
async fn malformed_paging_falls_back_instead_of_failing() {
    let state = app_state();
    create_boat_handler(State(state.clone()), Json(new_boat("Solo", None, 18.0)))
        .await
        .unwrap();

    let query = ListQuery {
        page: Some("-1".to_string()),
        limit: Some("0".to_string()),
        sort_by: Some("hull_speed".to_string()),
        sort_order: Some("sideways".to_string()),
    };
    let Json(page) = list_boats_handler(State(state), Query(query)).await.unwrap();
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.limit, 1);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let state = app_state();
    create_boat_handler(State(state.clone()), Json(new_boat("Solo", None, 18.0)))
        .await
        .unwrap();

    let query = ListQuery {
        page: Some("9".to_string()),
        ..Default::default()
    };
    let Json(page) = list_boats_handler(State(state), Query(query)).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 1);
    assert!(page.meta.has_prev_page);
    assert!(!page.meta.has_next_page);
}

#[tokio::test]
async fn deleting_a_boat_removes_its_activities() {
    let state = app_state();
    let (_, Json(boat)) = create_boat_handler(
        State(state.clone()),
        Json(new_boat("Doomed", Some(BoatType::Catamaran), 38.0)),
    )
    .await
    .unwrap();
    let (_, Json(activity)) = create_activity_handler(
        State(state.clone()),
        Json(new_activity(boat.id, at(2024, 6, 1, 9), 3, Some(10.0), Some(Purpose::Cruising))),
    )
    .await
    .unwrap();

    let status = delete_boat_handler(State(state.clone()), Path(boat.id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_activity_handler(State(state), Path(activity.id))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn boat_activities_are_scoped_to_the_boat() {
    let state = app_state();
    let (_, Json(first)) =
        create_boat_handler(State(state.clone()), Json(new_boat("First", None, 30.0)))
            .await
            .unwrap();
    let (_, Json(second)) =
        create_boat_handler(State(state.clone()), Json(new_boat("Second", None, 30.0)))
            .await
            .unwrap();
    for boat_id in [first.id, second.id, first.id] {
        create_activity_handler(
            State(state.clone()),
            Json(new_activity(boat_id, at(2024, 6, 1, 9), 1, None, None)),
        )
        .await
        .unwrap();
    }

    let Json(page) = list_boat_activities_handler(
        State(state.clone()),
        Path(first.id),
        Query(ListQuery::default()),
    )
    .await
    .unwrap();
    assert_eq!(page.meta.total, 2);
    assert!(page.data.iter().all(|a| a.boat_id == first.id));

    let (status, _) =
        list_boat_activities_handler(State(state), Path(999), Query(ListQuery::default()))
            .await
            .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}
