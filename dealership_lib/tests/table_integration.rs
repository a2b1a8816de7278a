//! End-to-end table flows over EntityService and wiremock.

use std::sync::Arc;

use dealership_lib::table::AssumeYes;
use dealership_lib::types::Car;
use dealership_lib::{
    Client, DeleteOutcome, EntityKind, EntityService, MemoryNotifier, Phase, StateChange, Table,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cars(ids: impl Iterator<Item = i64>) -> Vec<Value> {
    ids.map(|id| {
        json!({
            "id": id,
            "title": format!("Car {}", id),
            "slug": format!("car-{}", id),
            "brandId": 1,
            "modelId": 2,
            "yearId": 3,
            "price": 10000.0 + id as f64,
            "status": "active",
            "brand": {"id": 1, "name": "Audi"}
        })
    })
    .collect()
}

fn page(ids: impl Iterator<Item = i64>, total: i64, current: i64) -> Value {
    json!({
        "data": cars(ids),
        "pagination": {
            "totalItems": total,
            "totalPages": (total + 9) / 10,
            "currentPage": current
        }
    })
}

async fn setup() -> (Table<Car>, MockServer) {
    let mock_server = MockServer::start().await;
    let client = Client::new(&format!("{}/api", mock_server.uri())).expect("create client");
    let service: EntityService<Car> =
        EntityService::new(Arc::new(client), Arc::new(MemoryNotifier::new()));
    let kind = EntityKind::Car;
    let table = Table::new(Arc::new(service), kind.columns())
        .with_status_options(kind.status_options())
        .with_page_size(10);
    (table, mock_server)
}

#[tokio::test]
async fn test_second_page_then_delete() {
    let (mut table, mock_server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/car"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1..=10, 23, 1)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/car"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(11..=20, 23, 2)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/car"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            (11..=21).filter(|id| *id != 15),
            22,
            2,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/car/15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    table.refresh().await;
    assert_eq!(table.summary(), "Page 1/3 (23 total)");

    table.change(StateChange::Page(2)).await;
    let ids: Vec<i64> = table.records().iter().map(|c| c.id).collect();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    assert_eq!(table.pagination().current_page, 2);
    assert_eq!(table.rows()[0][2], "Audi");
    assert_eq!(table.rows()[0][4], "$10011.00");

    let outcome = table.delete_row(15, &AssumeYes).await;
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(table.pagination().total_items, 22);
    assert!(table.records().iter().all(|c| c.id != 15));

    let requests = mock_server.received_requests().await.expect("recorded");
    let lists = requests.iter().filter(|r| r.method.as_str() == "GET").count();
    assert_eq!(lists, 3);
}

#[tokio::test]
async fn test_filters_reach_the_query_string() {
    let (mut table, mock_server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/car"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "audi"))
        .and(query_param("status", "inactive"))
        .and(query_param("sortBy", "price"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1..=2, 2, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/car"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1..=10, 23, 1)))
        .mount(&mock_server)
        .await;

    table.apply(StateChange::Search("audi".into()));
    table.apply(StateChange::Status(Some("inactive".into())));
    table.apply(StateChange::Sort("price".into()));
    table.change(StateChange::Sort("price".into())).await;

    assert_eq!(table.phase(), Phase::Loaded);
    assert_eq!(table.records().len(), 2);
}

#[tokio::test]
async fn test_server_error_shows_empty_page() {
    let (mut table, mock_server) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/car"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    table.refresh().await;
    assert_eq!(table.phase(), Phase::Error);
    assert!(table.rows().is_empty());
    assert_eq!(table.summary(), "Page 1/0 (0 total)");
}
