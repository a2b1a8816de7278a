use super::*;

use dealership_lib::types::{Car, ListResult};
use dealership_lib::{EntityKind, FieldError};

fn load_cars_fixture() -> Vec<Car> {
    let json_str = include_str!("../../dealership_api/tests/fixtures/cars.json");
    let resp: ListResult<Car> = serde_json::from_str(json_str).unwrap();
    resp.data
}

fn car_rows() -> Rows {
    let columns = EntityKind::Car.columns();
    let mut rows = Rows::new(columns.iter().map(|c| c.title));
    for car in load_cars_fixture() {
        let json = serde_json::to_value(&car).unwrap();
        rows.push(columns.iter().map(|c| c.cell(&json)).collect());
    }
    rows
}

// -- format parsing --

#[test]
fn test_output_format_parse() {
    assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
    assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
    assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
    assert_eq!(OutputFormat::parse("anything"), OutputFormat::Table);
}

// -- format_size --

#[test]
fn test_format_size_bytes() {
    assert_eq!(format_size(512), "512 B");
}

#[test]
fn test_format_size_kilobytes() {
    assert_eq!(format_size(2048), "2.0 KB");
}

#[test]
fn test_format_size_megabytes() {
    assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
}

// -- Row rendering --

#[test]
fn test_car_rows_mapping() {
    let rows = car_rows();
    assert_eq!(
        rows.headers,
        vec!["ID", "Title", "Brand", "Model", "Price", "Featured", "Status"]
    );
    assert_eq!(rows.rows.len(), 1);
    let row = &rows.rows[0];
    assert_eq!(row[0], "41");
    assert_eq!(row[2], "Audi");
}

#[test]
fn test_table_contains_headers_and_values() {
    let out = render_table(&car_rows());
    assert!(out.contains("Title"));
    assert!(out.contains("Audi"));
}

#[test]
fn test_markdown_uses_pipes() {
    let out = render_markdown(&car_rows());
    let header = out.lines().next().unwrap();
    assert!(header.starts_with("| ID"));
    assert!(out.lines().nth(1).unwrap().starts_with("|-"));
}

#[test]
fn test_csv_output() {
    let mut rows = Rows::new(["ID", "Name"]);
    rows.push(vec!["1".into(), "Land Rover".into()]);
    rows.push(vec!["2".into(), "Mercedes, Benz".into()]);

    let mut buf = Vec::new();
    write_csv(&mut buf, &rows).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "ID,Name\n1,Land Rover\n2,\"Mercedes, Benz\"\n"
    );
}

#[test]
fn test_empty_rows_render_headers_only() {
    let rows = Rows::new(["ID", "Name"]);
    let mut buf = Vec::new();
    write_csv(&mut buf, &rows).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "ID,Name\n");
}

// -- Notifications --

#[test]
fn test_notification_lines() {
    assert_eq!(
        notification_line(&Notification::success("Brand created")),
        "[ok] Brand created"
    );
    assert_eq!(
        notification_line(&Notification::error(FieldError::new("name", "is required").to_string())),
        "[error] name: is required"
    );
}
