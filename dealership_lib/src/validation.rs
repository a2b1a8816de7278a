//! Client-side form schema: field checks run before any request is sent.

use chrono::{Datelike, Utc};
use dealership_api::types::{
    BannerInput, BlogCategoryInput, BlogPostInput, BlogTagInput, BrandInput, CarInput,
    CarModelInput, ContactEnquiryInput, EntityId, FeatureInput, NewsletterSubscriptionInput,
    PageInput, PermissionInput, RoleInput, SectionInput, SpecificationInput, TrimInput, UserInput,
    YearInput,
};

use crate::error::{AdminError, FieldError};

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_TEXT_LENGTH: usize = 5000;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const FIRST_MODEL_YEAR: i32 = 1886;

pub const RECORD_STATUSES: &[&str] = &["active", "inactive"];
pub const BLOG_STATUSES: &[&str] = &["draft", "published"];
pub const ENQUIRY_STATUSES: &[&str] = &["new", "read", "replied"];
pub const SUBSCRIPTION_STATUSES: &[&str] = &["subscribed", "unsubscribed"];

/// A form payload that can check itself.
pub trait Validate {
    /// Every failing field, in form order. Empty when valid.
    fn validate(&self) -> Vec<FieldError>;

    fn check(&self) -> Result<(), AdminError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(errors))
        }
    }
}

/// Strip ASCII control characters (except space), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(
    field: &'static str,
    input: &str,
    max_len: usize,
) -> Result<String, FieldError> {
    if input.len() > max_len {
        return Err(FieldError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ' || *c == '\n')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Non-blank text within [`MAX_NAME_LENGTH`].
pub fn validate_required(field: &'static str, input: &str) -> Result<String, FieldError> {
    let text = sanitize_text(field, input, MAX_NAME_LENGTH)?;
    if text.is_empty() {
        return Err(FieldError::new(field, "is required"));
    }
    Ok(text)
}

/// Lowercase letters, digits and single hyphens, e.g. `land-rover`.
pub fn validate_slug(field: &'static str, input: &str) -> Result<String, FieldError> {
    let slug = validate_required(field, input)?;
    let well_formed = slug
        .split('-')
        .all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        });
    if !well_formed {
        return Err(FieldError::new(
            field,
            "may only contain lowercase letters, digits and single hyphens",
        ));
    }
    Ok(slug)
}

pub fn validate_email(field: &'static str, input: &str) -> Result<String, FieldError> {
    let email = validate_required(field, input)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(FieldError::new(field, "must be a valid email address"));
    }
    Ok(email.to_lowercase())
}

/// A model year between the first motor car and next year.
pub fn validate_year(field: &'static str, year: i32) -> Result<i32, FieldError> {
    let latest = Utc::now().year() + 1;
    if !(FIRST_MODEL_YEAR..=latest).contains(&year) {
        return Err(FieldError::new(
            field,
            format!("must be between {} and {}", FIRST_MODEL_YEAR, latest),
        ));
    }
    Ok(year)
}

pub fn validate_non_negative(field: &'static str, value: f64) -> Result<f64, FieldError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FieldError::new(field, "must be zero or more"));
    }
    Ok(value)
}

/// Digits with optional `+`, spaces, hyphens and parentheses; 7 to 15 digits.
pub fn validate_phone(field: &'static str, input: &str) -> Result<String, FieldError> {
    let phone = input.trim();
    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| {
            c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0)
        });
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !allowed || !(7..=15).contains(&digits) {
        return Err(FieldError::new(field, "must be a valid phone number"));
    }
    Ok(phone.to_string())
}

/// Absolute http(s) URL or a site-relative path starting with `/`.
pub fn validate_url(field: &'static str, input: &str) -> Result<String, FieldError> {
    let value = input.trim();
    if value.starts_with('/') && !value.starts_with("//") {
        return Ok(value.to_string());
    }
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err(FieldError::new(field, "must be a valid URL")),
    }
}

/// A related record reference. Ids start at 1.
pub fn validate_reference(field: &'static str, id: EntityId) -> Result<EntityId, FieldError> {
    if id < 1 {
        return Err(FieldError::new(field, "must be selected"));
    }
    Ok(id)
}

pub fn validate_status(
    field: &'static str,
    input: &str,
    allowed: &[&str],
) -> Result<String, FieldError> {
    let status = input.trim().to_lowercase();
    if status.is_empty() {
        return Err(FieldError::new(field, "is required"));
    }
    if !allowed.contains(&status.as_str()) {
        return Err(FieldError::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
    }
    Ok(status)
}

/// Parses a route id. Anything but a positive integer is rejected.
pub fn parse_id(input: &str) -> Result<EntityId, AdminError> {
    match input.trim().parse::<EntityId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AdminError::InvalidId(input.to_string())),
    }
}

/// Collects failures while a form is checked field by field.
#[derive(Default)]
struct Checks(Vec<FieldError>);

impl Checks {
    fn add<T>(&mut self, result: Result<T, FieldError>) -> &mut Self {
        if let Err(e) = result {
            self.0.push(e);
        }
        self
    }

    fn optional<F, T>(&mut self, value: Option<&String>, check: F) -> &mut Self
    where
        F: FnOnce(&str) -> Result<T, FieldError>,
    {
        match value.map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(v) => self.add(check(v)),
            None => self,
        }
    }

    fn done(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.0)
    }
}

fn long_text(field: &'static str) -> impl FnOnce(&str) -> Result<String, FieldError> {
    move |v: &str| sanitize_text(field, v, MAX_TEXT_LENGTH)
}

impl Validate for BrandInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .add(validate_slug("slug", &self.slug))
            .optional(self.logo.as_ref(), |v| validate_url("logo", v))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for CarModelInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .add(validate_slug("slug", &self.slug))
            .add(validate_reference("brandId", self.brand_id))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for TrimInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .add(validate_reference("modelId", self.model_id))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for YearInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_year("year", self.year))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for FeatureInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .optional(self.category.as_ref(), |v| validate_required("category", v))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for SpecificationInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .optional(self.unit.as_ref(), |v| validate_required("unit", v))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for CarInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut checks = Checks::default();
        checks
            .add(validate_required("title", &self.title))
            .add(validate_slug("slug", &self.slug))
            .add(validate_reference("brandId", self.brand_id))
            .add(validate_reference("modelId", self.model_id))
            .add(validate_reference("yearId", self.year_id))
            .add(validate_non_negative("price", self.price))
            .optional(self.description.as_ref(), long_text("description"))
            .add(validate_status("status", &self.status, RECORD_STATUSES));
        if let Some(trim_id) = self.trim_id {
            checks.add(validate_reference("trimId", trim_id));
        }
        if let Some(mileage) = self.mileage {
            checks.add(validate_non_negative("mileage", mileage as f64));
        }
        for image in &self.images {
            checks.add(validate_url("images", image));
        }
        checks.done()
    }
}

impl Validate for PageInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("title", &self.title))
            .add(validate_slug("slug", &self.slug))
            .optional(self.meta_title.as_ref(), |v| validate_required("metaTitle", v))
            .optional(self.meta_description.as_ref(), long_text("metaDescription"))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for SectionInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_reference("pageId", self.page_id))
            .add(validate_required("title", &self.title))
            .optional(self.content.as_ref(), long_text("content"))
            .add(validate_non_negative("sortOrder", f64::from(self.sort_order)))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for BannerInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("title", &self.title))
            .add(validate_url("image", &self.image))
            .optional(self.link.as_ref(), |v| validate_url("link", v))
            .add(validate_non_negative("position", f64::from(self.position)))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for BlogPostInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut checks = Checks::default();
        checks
            .add(validate_required("title", &self.title))
            .add(validate_slug("slug", &self.slug))
            .optional(self.excerpt.as_ref(), long_text("excerpt"))
            .add(sanitize_text("content", &self.content, MAX_TEXT_LENGTH * 20).and_then(|c| {
                if c.is_empty() {
                    Err(FieldError::new("content", "is required"))
                } else {
                    Ok(c)
                }
            }))
            .optional(self.cover_image.as_ref(), |v| validate_url("coverImage", v))
            .add(validate_status("status", &self.status, BLOG_STATUSES));
        if let Some(category_id) = self.category_id {
            checks.add(validate_reference("categoryId", category_id));
        }
        checks.done()
    }
}

impl Validate for BlogTagInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .add(validate_slug("slug", &self.slug))
            .done()
    }
}

impl Validate for BlogCategoryInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .add(validate_slug("slug", &self.slug))
            .optional(self.description.as_ref(), long_text("description"))
            .add(validate_status("status", &self.status, RECORD_STATUSES))
            .done()
    }
}

impl Validate for UserInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut checks = Checks::default();
        checks
            .add(validate_required("firstName", &self.first_name))
            .add(validate_required("lastName", &self.last_name))
            .add(validate_email("email", &self.email))
            .optional(self.phone.as_ref(), |v| validate_phone("phone", v))
            .add(validate_status("status", &self.status, RECORD_STATUSES));
        if let Some(role_id) = self.role_id {
            checks.add(validate_reference("roleId", role_id));
        }
        if let Some(password) = &self.password {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                checks.add::<()>(Err(FieldError::new(
                    "password",
                    format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
                )));
            }
        }
        checks.done()
    }
}

impl Validate for RoleInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_required("name", &self.name))
            .optional(self.description.as_ref(), long_text("description"))
            .done()
    }
}

impl Validate for PermissionInput {
    fn validate(&self) -> Vec<FieldError> {
        let key_ok = !self.key.trim().is_empty()
            && self
                .key
                .trim()
                .chars()
                .all(|c| {
                    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-' | ':')
                });
        let mut checks = Checks::default();
        checks.add(validate_required("name", &self.name));
        if !key_ok {
            checks.add::<()>(Err(FieldError::new(
                "key",
                "must be lowercase, e.g. car.create",
            )));
        }
        checks
            .optional(self.module.as_ref(), |v| validate_required("module", v))
            .done()
    }
}

impl Validate for ContactEnquiryInput {
    fn validate(&self) -> Vec<FieldError> {
        let mut checks = Checks::default();
        checks
            .add(validate_required("name", &self.name))
            .add(validate_email("email", &self.email))
            .optional(self.phone.as_ref(), |v| validate_phone("phone", v))
            .optional(self.subject.as_ref(), |v| validate_required("subject", v))
            .add(sanitize_text("message", &self.message, MAX_TEXT_LENGTH).and_then(|m| {
                if m.is_empty() {
                    Err(FieldError::new("message", "is required"))
                } else {
                    Ok(m)
                }
            }))
            .add(validate_status("status", &self.status, ENQUIRY_STATUSES));
        if let Some(car_id) = self.car_id {
            checks.add(validate_reference("carId", car_id));
        }
        checks.done()
    }
}

impl Validate for NewsletterSubscriptionInput {
    fn validate(&self) -> Vec<FieldError> {
        Checks::default()
            .add(validate_email("email", &self.email))
            .add(validate_status("status", &self.status, SUBSCRIPTION_STATUSES))
            .done()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
