//! Every managed entity, described as data.
//!
//! A kind knows its CLI name, listing route, default columns, status filter
//! values and import settings. [`EntityKind::dispatch`] turns a runtime kind
//! into its concrete [`Entity`] type so the table, form and service code is
//! written once.

use std::fmt;
use std::str::FromStr;

use dealership_api::types::{
    Banner, BlogCategory, BlogPost, BlogTag, Brand, Car, CarModel, ContactEnquiry, Entity,
    EntityId, Feature, NewsletterSubscription, Page, Permission, Role, Section, Specification,
    Trim, User, Year,
};
use serde_json::Value;

use crate::columns::{Column, RowAction};
use crate::error::AdminError;
use crate::import::ImportConfig;
use crate::validation::{
    Validate, BLOG_STATUSES, ENQUIRY_STATUSES, RECORD_STATUSES, SUBSCRIPTION_STATUSES,
};

pub const ADMIN_ROUTE: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Brand,
    Model,
    Trim,
    Year,
    Feature,
    Specification,
    Car,
    Page,
    Section,
    Banner,
    BlogPost,
    BlogTag,
    BlogCategory,
    User,
    Role,
    Permission,
    Contact,
    Newsletter,
}

/// Generic code run for one concrete entity type.
pub trait EntityVisitor {
    type Output;

    fn visit<E>(self, kind: EntityKind) -> Self::Output
    where
        E: Entity,
        E::Input: Validate;
}

fn money(record: &Value) -> String {
    match record.get("price").and_then(Value::as_f64) {
        Some(price) => format!("${:.2}", price),
        None => String::new(),
    }
}

fn full_name(record: &Value) -> String {
    let part = |key: &str| record.get(key).and_then(Value::as_str).unwrap_or_default();
    format!("{} {}", part("firstName"), part("lastName"))
        .trim()
        .to_string()
}

fn count(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.len().to_string())
        .unwrap_or_default()
}

impl EntityKind {
    pub const ALL: [EntityKind; 18] = [
        EntityKind::Brand,
        EntityKind::Model,
        EntityKind::Trim,
        EntityKind::Year,
        EntityKind::Feature,
        EntityKind::Specification,
        EntityKind::Car,
        EntityKind::Page,
        EntityKind::Section,
        EntityKind::Banner,
        EntityKind::BlogPost,
        EntityKind::BlogTag,
        EntityKind::BlogCategory,
        EntityKind::User,
        EntityKind::Role,
        EntityKind::Permission,
        EntityKind::Contact,
        EntityKind::Newsletter,
    ];

    /// CLI and route segment, e.g. `blog-posts`.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Brand => "brands",
            EntityKind::Model => "models",
            EntityKind::Trim => "trims",
            EntityKind::Year => "years",
            EntityKind::Feature => "features",
            EntityKind::Specification => "specifications",
            EntityKind::Car => "cars",
            EntityKind::Page => "pages",
            EntityKind::Section => "sections",
            EntityKind::Banner => "banners",
            EntityKind::BlogPost => "blog-posts",
            EntityKind::BlogTag => "blog-tags",
            EntityKind::BlogCategory => "blog-categories",
            EntityKind::User => "users",
            EntityKind::Role => "roles",
            EntityKind::Permission => "permissions",
            EntityKind::Contact => "contacts",
            EntityKind::Newsletter => "newsletters",
        }
    }

    /// Heading for the listing page.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Brand => "Brands",
            EntityKind::Model => "Models",
            EntityKind::Trim => "Trims",
            EntityKind::Year => "Years",
            EntityKind::Feature => "Features",
            EntityKind::Specification => "Specifications",
            EntityKind::Car => "Cars",
            EntityKind::Page => "Pages",
            EntityKind::Section => "Sections",
            EntityKind::Banner => "Banners",
            EntityKind::BlogPost => "Blog Posts",
            EntityKind::BlogTag => "Blog Tags",
            EntityKind::BlogCategory => "Blog Categories",
            EntityKind::User => "Users",
            EntityKind::Role => "Roles",
            EntityKind::Permission => "Permissions",
            EntityKind::Contact => "Contact Enquiries",
            EntityKind::Newsletter => "Newsletter Subscriptions",
        }
    }

    pub fn listing_route(self) -> String {
        format!("{}/{}", ADMIN_ROUTE, self.name())
    }

    pub fn add_route(self) -> String {
        format!("{}/add", self.listing_route())
    }

    pub fn edit_route(self, id: EntityId) -> String {
        format!("{}/edit/{}", self.listing_route(), id)
    }

    pub fn columns(self) -> Vec<Column> {
        let id = Column::new("id", "ID").sortable();
        let status = Column::new("status", "Status").sortable();
        match self {
            EntityKind::Brand => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("slug", "Slug"),
                status,
            ],
            EntityKind::Model => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("brand.name", "Brand"),
                status,
            ],
            EntityKind::Trim => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("model.name", "Model"),
                status,
            ],
            EntityKind::Year => vec![id, Column::new("year", "Year").sortable(), status],
            EntityKind::Feature => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("category", "Category").sortable(),
                status,
            ],
            EntityKind::Specification => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("unit", "Unit"),
                status,
            ],
            EntityKind::Car => vec![
                id,
                Column::new("title", "Title").sortable(),
                Column::new("brand.name", "Brand"),
                Column::new("model.name", "Model"),
                Column::new("price", "Price").sortable().with_render(money),
                Column::new("isFeatured", "Featured"),
                status,
            ],
            EntityKind::Page => vec![
                id,
                Column::new("title", "Title").sortable(),
                Column::new("slug", "Slug"),
                status,
            ],
            EntityKind::Section => vec![
                id,
                Column::new("title", "Title").sortable(),
                Column::new("page.name", "Page"),
                Column::new("sortOrder", "Order").sortable(),
                status,
            ],
            EntityKind::Banner => vec![
                id,
                Column::new("title", "Title").sortable(),
                Column::new("image", "Image"),
                Column::new("position", "Position").sortable(),
                status,
            ],
            EntityKind::BlogPost => vec![
                id,
                Column::new("title", "Title").sortable(),
                Column::new("category.name", "Category"),
                Column::new("publishedAt", "Published").sortable(),
                status,
            ],
            EntityKind::BlogTag => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("slug", "Slug"),
            ],
            EntityKind::BlogCategory => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("slug", "Slug"),
                status,
            ],
            EntityKind::User => vec![
                id,
                Column::new("firstName", "Name").sortable().with_render(full_name),
                Column::new("email", "Email").sortable(),
                Column::new("role.name", "Role"),
                status,
            ],
            EntityKind::Role => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("permissionIds", "Permissions")
                    .with_render(|r| count(r, "permissionIds")),
            ],
            EntityKind::Permission => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("key", "Key").sortable(),
                Column::new("module", "Module"),
            ],
            EntityKind::Contact => vec![
                id,
                Column::new("name", "Name").sortable(),
                Column::new("email", "Email"),
                Column::new("subject", "Subject"),
                Column::new("createdAt", "Received").sortable(),
                status,
            ],
            EntityKind::Newsletter => vec![
                id,
                Column::new("email", "Email").sortable(),
                Column::new("subscribedAt", "Subscribed").sortable(),
                status,
            ],
        }
    }

    /// Values accepted by the status filter. Empty when the entity has no status.
    pub fn status_options(self) -> &'static [&'static str] {
        match self {
            EntityKind::BlogTag | EntityKind::Role | EntityKind::Permission => &[],
            EntityKind::BlogPost => BLOG_STATUSES,
            EntityKind::Contact => ENQUIRY_STATUSES,
            EntityKind::Newsletter => SUBSCRIPTION_STATUSES,
            _ => RECORD_STATUSES,
        }
    }

    /// Default per-row actions: edit everywhere except read-mostly inboxes.
    pub fn actions(self) -> Vec<RowAction> {
        let edit = RowAction::link("Edit", format!("{}/edit/{{id}}", self.listing_route()));
        match self {
            EntityKind::Contact | EntityKind::Newsletter => {
                vec![RowAction::link("View", format!("{}/{{id}}", self.listing_route()))]
            }
            _ => vec![edit],
        }
    }

    /// CSV import settings for the inventory kinds that support bulk upload.
    pub fn import_config(self) -> Option<ImportConfig> {
        let (endpoint, event) = match self {
            EntityKind::Car => ("/car/import", "car-import-progress"),
            EntityKind::Brand => ("/brand/import", "brand-import-progress"),
            EntityKind::Model => ("/model/import", "model-import-progress"),
            EntityKind::Trim => ("/trim/import", "trim-import-progress"),
            EntityKind::Feature => ("/feature/import", "feature-import-progress"),
            EntityKind::Specification => {
                ("/specification/import", "specification-import-progress")
            }
            _ => return None,
        };
        Some(ImportConfig::csv(endpoint, event))
    }

    /// Runs `visitor` with the concrete entity type for this kind.
    pub fn dispatch<V: EntityVisitor>(self, visitor: V) -> V::Output {
        match self {
            EntityKind::Brand => visitor.visit::<Brand>(self),
            EntityKind::Model => visitor.visit::<CarModel>(self),
            EntityKind::Trim => visitor.visit::<Trim>(self),
            EntityKind::Year => visitor.visit::<Year>(self),
            EntityKind::Feature => visitor.visit::<Feature>(self),
            EntityKind::Specification => visitor.visit::<Specification>(self),
            EntityKind::Car => visitor.visit::<Car>(self),
            EntityKind::Page => visitor.visit::<Page>(self),
            EntityKind::Section => visitor.visit::<Section>(self),
            EntityKind::Banner => visitor.visit::<Banner>(self),
            EntityKind::BlogPost => visitor.visit::<BlogPost>(self),
            EntityKind::BlogTag => visitor.visit::<BlogTag>(self),
            EntityKind::BlogCategory => visitor.visit::<BlogCategory>(self),
            EntityKind::User => visitor.visit::<User>(self),
            EntityKind::Role => visitor.visit::<Role>(self),
            EntityKind::Permission => visitor.visit::<Permission>(self),
            EntityKind::Contact => visitor.visit::<ContactEnquiry>(self),
            EntityKind::Newsletter => visitor.visit::<NewsletterSubscription>(self),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = AdminError;

    /// Accepts the plural CLI name or the singular form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|k| wanted == k.name() || wanted == singular(k.name()))
            .ok_or_else(|| {
                let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.name()).collect();
                AdminError::InvalidInput(format!(
                    "unknown entity '{}'. Valid values: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{}y", stem)
    } else {
        name.strip_suffix('s').unwrap_or(name).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PathOf;

    impl EntityVisitor for PathOf {
        type Output = (&'static str, &'static str);

        fn visit<E>(self, _kind: EntityKind) -> Self::Output
        where
            E: Entity,
            E::Input: Validate,
        {
            (E::PATH, E::NAME)
        }
    }

    #[test]
    fn dispatch_reaches_the_right_resource() {
        assert_eq!(EntityKind::Car.dispatch(PathOf), ("/car", "Car"));
        assert_eq!(EntityKind::User.dispatch(PathOf), ("/users", "User"));
        assert_eq!(EntityKind::BlogTag.dispatch(PathOf), ("/blog-tag", "Blog tag"));
        assert_eq!(EntityKind::Newsletter.dispatch(PathOf), ("/newsletter", "Newsletter subscription"));
    }

    #[test]
    fn every_kind_has_distinct_resources() {
        let mut paths: Vec<_> = EntityKind::ALL.iter().map(|k| k.dispatch(PathOf).0).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 18);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), kind);
        }
        assert_eq!("Car".parse::<EntityKind>().unwrap(), EntityKind::Car);
        assert_eq!("blog_category".parse::<EntityKind>().unwrap(), EntityKind::BlogCategory);
        assert!("garage".parse::<EntityKind>().is_err());
    }

    #[test]
    fn routes() {
        assert_eq!(EntityKind::Car.listing_route(), "/admin/cars");
        assert_eq!(EntityKind::Car.add_route(), "/admin/cars/add");
        assert_eq!(EntityKind::BlogPost.edit_route(3), "/admin/blog-posts/edit/3");
    }

    #[test]
    fn every_kind_has_columns_with_an_id() {
        for kind in EntityKind::ALL {
            let columns = kind.columns();
            assert_eq!(columns[0].accessor, "id", "{}", kind);
            assert!(columns.iter().any(|c| c.sortable), "{}", kind);
        }
    }

    #[test]
    fn only_inventory_kinds_import() {
        let importable: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|k| k.import_config().is_some())
            .collect();
        assert_eq!(
            importable,
            vec![
                EntityKind::Brand,
                EntityKind::Model,
                EntityKind::Trim,
                EntityKind::Feature,
                EntityKind::Specification,
                EntityKind::Car,
            ]
        );
        let car = EntityKind::Car.import_config().unwrap();
        assert!(car.picker().accepts("stock.csv"));
    }

    #[test]
    fn user_name_column_joins_parts() {
        let record = serde_json::json!({"id": 1, "firstName": "Ada", "lastName": "Lovelace"});
        let column = &EntityKind::User.columns()[1];
        assert_eq!(column.cell(&record), "Ada Lovelace");
    }
}
