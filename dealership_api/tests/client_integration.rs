use dealership_api::types::{Brand, BrandInput, Car};
use dealership_api::{Client, Error, ListQuery, Query};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn list_brands_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("brands.json");

    Mock::given(method("GET"))
        .and(path("/brand"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let result = client
        .list::<Brand>(&ListQuery::default().with_limit(10))
        .await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.pagination.total_items, 23);
}

#[tokio::test]
async fn list_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/car"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("cars.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap().with_token("secret");
    let resp = client.list::<Car>(&ListQuery::default()).await.unwrap();
    assert_eq!(resp.data[0].id, 41);
}

#[tokio::test]
async fn list_server_error_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brand"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message":"Database unavailable"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let err = client
        .list::<Brand>(&ListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "Database unavailable");
}

#[tokio::test]
async fn list_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brand"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let result = client.list::<Brand>(&ListQuery::default()).await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn connection_refused_is_request_failed() {
    // Nothing listens on port 9 of localhost in the test environment.
    let client = Client::new("http://127.0.0.1:9").unwrap();
    let result = client.list::<Brand>(&ListQuery::default()).await;
    assert!(matches!(result, Err(Error::RequestFailed(_))));
}

#[tokio::test]
async fn get_by_id_hits_item_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brand/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("brand_detail.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let resp = client.get_by_id::<Brand>(1).await.unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.data.unwrap().slug, "audi");
}

#[tokio::test]
async fn create_posts_camel_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/brand"))
        .and(body_json(json!({"name": "Cupra", "slug": "cupra", "status": "active"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Brand created",
            "data": {"id": 9, "name": "Cupra", "slug": "cupra", "status": "active"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let input = BrandInput {
        name: "Cupra".into(),
        slug: "cupra".into(),
        logo: None,
        status: "active".into(),
    };
    let resp = client.create::<Brand>(&input).await.unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("Brand created"));
    assert_eq!(resp.data.unwrap().id, 9);
}

#[tokio::test]
async fn update_puts_to_item_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/brand/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let resp = client
        .update::<Brand>(9, &BrandInput::default())
        .await
        .unwrap();
    assert!(resp.is_success());
}

#[tokio::test]
async fn bulk_delete_sends_ids_in_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/car"))
        .and(body_json(json!({"ids": [4, 5, 6]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri()).unwrap();
    let resp = client.bulk_delete::<Car>(&[4, 5, 6]).await.unwrap();
    assert!(resp.is_success());
}

#[tokio::test]
async fn upload_posts_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/car/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Import started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = std::env::temp_dir().join("dealership_api_upload_test");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("cars.csv");
    std::fs::write(&file, "title,price\nA4,32500\n").unwrap();

    let client = Client::new(&mock_server.uri()).unwrap();
    let resp = client.upload("/car/import", &file).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Import started"));

    let requests = mock_server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"cars.csv\""));
}

#[tokio::test]
async fn upload_missing_file_fails_before_request() {
    let mock_server = MockServer::start().await;
    let client = Client::new(&mock_server.uri()).unwrap();
    let result = client
        .upload("/car/import", std::path::Path::new("/nonexistent/cars.csv"))
        .await;
    assert!(matches!(result, Err(Error::File { .. })));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
