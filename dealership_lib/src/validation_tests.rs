use dealership_api::types::{BrandInput, CarInput, UserInput};

use super::*;

fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
}

// -- Text --

#[test]
fn sanitize_strips_control_chars() {
    assert_eq!(sanitize_text("name", "  Audi\u{0007} A4 ", 50).unwrap(), "Audi A4");
}

#[test]
fn sanitize_rejects_long_input() {
    let err = sanitize_text("name", &"a".repeat(51), 50).unwrap_err();
    assert_eq!(err.field, "name");
}

#[test]
fn required_rejects_blank() {
    assert!(validate_required("name", "   ").is_err());
    assert!(validate_required("name", "\u{0000}").is_err());
    assert_eq!(validate_required("name", " BMW ").unwrap(), "BMW");
}

// -- Slugs --

#[test]
fn slug_valid() {
    assert_eq!(validate_slug("slug", "land-rover").unwrap(), "land-rover");
    assert_eq!(validate_slug("slug", "a4-2024").unwrap(), "a4-2024");
}

#[test]
fn slug_invalid() {
    assert!(validate_slug("slug", "Land Rover").is_err());
    assert!(validate_slug("slug", "land--rover").is_err());
    assert!(validate_slug("slug", "-audi").is_err());
    assert!(validate_slug("slug", "audi-").is_err());
    assert!(validate_slug("slug", "").is_err());
}

// -- Email --

#[test]
fn email_valid_is_lowercased() {
    assert_eq!(
        validate_email("email", "Sales@Dealer.COM").unwrap(),
        "sales@dealer.com"
    );
}

#[test]
fn email_invalid() {
    for bad in ["", "plain", "@dealer.com", "a@b", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
        assert!(validate_email("email", bad).is_err(), "{} should fail", bad);
    }
}

// -- Numbers --

#[test]
fn year_bounds() {
    assert!(validate_year("year", 2024).is_ok());
    assert!(validate_year("year", FIRST_MODEL_YEAR).is_ok());
    assert!(validate_year("year", 1885).is_err());
    assert!(validate_year("year", 3000).is_err());
}

#[test]
fn non_negative() {
    assert!(validate_non_negative("price", 0.0).is_ok());
    assert!(validate_non_negative("price", 32500.5).is_ok());
    assert!(validate_non_negative("price", -1.0).is_err());
    assert!(validate_non_negative("price", f64::NAN).is_err());
}

// -- Phone and URL --

#[test]
fn phone_formats() {
    assert!(validate_phone("phone", "+44 (20) 7946-0958").is_ok());
    assert!(validate_phone("phone", "5551234").is_ok());
    assert!(validate_phone("phone", "12-34").is_err());
    assert!(validate_phone("phone", "555 CALL NOW").is_err());
    assert!(validate_phone("phone", "55+51234").is_err());
}

#[test]
fn url_forms() {
    assert!(validate_url("image", "https://cdn.example.com/a.jpg").is_ok());
    assert!(validate_url("image", "/uploads/a.jpg").is_ok());
    assert!(validate_url("image", "//evil.example.com/a.jpg").is_err());
    assert!(validate_url("image", "ftp://example.com/a.jpg").is_err());
    assert!(validate_url("image", "a.jpg").is_err());
}

// -- Status --

#[test]
fn status_must_be_known() {
    assert_eq!(
        validate_status("status", "Active", RECORD_STATUSES).unwrap(),
        "active"
    );
    assert!(validate_status("status", "", RECORD_STATUSES).is_err());
    assert!(validate_status("status", "published", RECORD_STATUSES).is_err());
    assert!(validate_status("status", "published", BLOG_STATUSES).is_ok());
}

// -- Route ids --

#[test]
fn parse_id_accepts_positive_integers() {
    assert_eq!(parse_id("41").unwrap(), 41);
    assert_eq!(parse_id(" 7 ").unwrap(), 7);
}

#[test]
fn parse_id_rejects_everything_else() {
    for bad in ["abc", "", "0", "-3", "4.5", "12abc"] {
        let err = parse_id(bad).unwrap_err();
        assert_eq!(err.to_string(), "Invalid ID");
    }
}

// -- Entity schemas --

#[test]
fn brand_valid() {
    let input = BrandInput {
        name: "Audi".into(),
        slug: "audi".into(),
        logo: Some("/uploads/audi.png".into()),
        status: "active".into(),
    };
    assert!(input.validate().is_empty());
    assert!(input.check().is_ok());
}

#[test]
fn default_brand_reports_every_required_field() {
    let errors = BrandInput::default().validate();
    assert_eq!(fields(&errors), vec!["name", "slug", "status"]);
}

#[test]
fn blank_optional_fields_are_skipped() {
    let input = BrandInput {
        name: "Audi".into(),
        slug: "audi".into(),
        logo: Some("  ".into()),
        status: "inactive".into(),
    };
    assert!(input.validate().is_empty());
}

#[test]
fn car_checks_references_and_price() {
    let input = CarInput {
        title: "Audi A4".into(),
        slug: "audi-a4".into(),
        brand_id: 1,
        model_id: 0,
        trim_id: Some(0),
        year_id: 3,
        price: -10.0,
        mileage: Some(-1),
        images: vec!["/uploads/a4.jpg".into(), "not a url".into()],
        status: "active".into(),
        ..CarInput::default()
    };
    assert_eq!(
        fields(&input.validate()),
        vec!["modelId", "price", "trimId", "mileage", "images"]
    );
}

#[test]
fn user_password_is_optional_but_checked() {
    let mut input = UserInput {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        status: "active".into(),
        ..UserInput::default()
    };
    assert!(input.validate().is_empty());

    input.password = Some("short".into());
    let err = input.check().unwrap_err();
    match err {
        AdminError::Validation(errors) => assert_eq!(fields(&errors), vec!["password"]),
        other => panic!("unexpected error: {}", other),
    }
}
