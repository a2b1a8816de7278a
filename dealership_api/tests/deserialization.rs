use dealership_api::types::{ActionResult, Brand, Car, ListResult, User};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_brands() {
    let json = load_fixture("brands.json");
    let resp: ListResult<Brand> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.pagination.total_items, 23);
    assert_eq!(resp.pagination.total_pages, 3);
    assert_eq!(resp.pagination.current_page, 1);

    let audi = &resp.data[0];
    assert_eq!(audi.id, 1);
    assert_eq!(audi.slug, "audi");
    assert_eq!(audi.logo.as_deref(), Some("brands/audi.png"));
    assert!(audi.created_at.is_some());

    let bmw = &resp.data[1];
    assert_eq!(bmw.logo, None);
    assert_eq!(bmw.status, "inactive");
}

#[test]
fn deserialize_cars() {
    let json = load_fixture("cars.json");
    let resp: ListResult<Car> = serde_json::from_str(&json).unwrap();
    let car = &resp.data[0];
    assert_eq!(car.id, 41);
    assert_eq!(car.price, 32500.0);
    assert_eq!(car.trim_id, None);
    assert_eq!(car.feature_ids, vec![3, 5, 8]);
    assert!(car.is_featured);
    assert_eq!(car.brand.as_ref().map(|b| b.name.as_str()), Some("Audi"));
    assert_eq!(car.model.as_ref().map(|m| m.id), Some(7));
}

#[test]
fn deserialize_missing_pagination_is_zeroed() {
    let json = load_fixture("empty.json");
    let resp: ListResult<Brand> = serde_json::from_str(&json).unwrap();
    assert!(resp.data.is_empty());
    assert_eq!(resp.pagination.total_items, 0);
    assert_eq!(resp.pagination.total_pages, 0);
}

#[test]
fn deserialize_action_result() {
    let json = load_fixture("brand_detail.json");
    let resp: ActionResult<Brand> = serde_json::from_str(&json).unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.data.unwrap().name, "Audi");
}

#[test]
fn action_result_without_success_flag_is_failure() {
    let resp: ActionResult<User> = serde_json::from_str(r#"{"message":"queued"}"#).unwrap();
    assert!(!resp.is_success());
    assert_eq!(resp.message.as_deref(), Some("queued"));

    let resp: ActionResult<User> = serde_json::from_str(r#"{"success":false}"#).unwrap();
    assert!(!resp.is_success());
}

#[test]
fn user_input_omits_unset_password() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 5,
        "firstName": "Ada",
        "lastName": "Byron",
        "email": "ada@example.com"
    }))
    .unwrap();
    let input = dealership_api::types::Entity::to_input(&user);
    let body = serde_json::to_value(&input).unwrap();
    assert!(body.get("password").is_none());
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["status"], "active");
}
