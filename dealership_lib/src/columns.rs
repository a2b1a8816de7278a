//! Column descriptors and per-row actions for listing tables.

use std::fmt;
use std::sync::Arc;

use dealership_api::types::EntityId;
use serde_json::Value;

/// Custom cell renderer. Receives the whole record as JSON.
pub type Render = fn(&Value) -> String;

/// One column of a listing table.
#[derive(Clone)]
pub struct Column {
    /// Dot path into the record, e.g. `brand.name` or `images.0`.
    pub accessor: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub render: Option<Render>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("accessor", &self.accessor)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Column {
    pub const fn new(accessor: &'static str, title: &'static str) -> Self {
        Self {
            accessor,
            title,
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }

    /// Display text for this column of `record`. Blank when the path does not resolve.
    pub fn cell(&self, record: &Value) -> String {
        if let Some(render) = self.render {
            return render(record);
        }
        resolve_path(record, self.accessor)
            .map(display_value)
            .unwrap_or_default()
    }
}

/// Walks a dot path through objects and arrays.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Flattens a JSON value to table text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("title"))
            .map(display_value)
            .unwrap_or_default(),
    }
}

/// When a row action is offered.
#[derive(Clone)]
pub enum Visibility {
    Always,
    Never,
    When(fn(&Value) -> bool),
}

impl Visibility {
    pub fn allows(&self, record: &Value) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::Never => false,
            Visibility::When(predicate) => predicate(record),
        }
    }
}

/// What a row action does. An action either navigates or runs a callback.
#[derive(Clone)]
pub enum ActionTarget {
    /// Route template; `{id}` is replaced with the record id.
    Href(String),
    /// Invoked with the record id. Owns its own confirmation and reload.
    OnClick(Arc<dyn Fn(EntityId) + Send + Sync>),
}

#[derive(Clone)]
pub struct RowAction {
    pub label: String,
    pub show: Visibility,
    pub target: ActionTarget,
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            ActionTarget::Href(href) => href.as_str(),
            ActionTarget::OnClick(_) => "<callback>",
        };
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .field("target", &target)
            .finish()
    }
}

/// Result of activating a row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(String),
    Invoked,
    Hidden,
}

impl RowAction {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            show: Visibility::Always,
            target: ActionTarget::Href(href.into()),
        }
    }

    pub fn callback<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(EntityId) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            show: Visibility::Always,
            target: ActionTarget::OnClick(Arc::new(f)),
        }
    }

    pub fn shown(mut self, show: Visibility) -> Self {
        self.show = show;
        self
    }

    /// Runs the action for the record with `id`.
    pub fn activate(&self, id: EntityId, record: &Value) -> ActionOutcome {
        if !self.show.allows(record) {
            return ActionOutcome::Hidden;
        }
        match &self.target {
            ActionTarget::Href(template) => {
                ActionOutcome::Navigate(template.replace("{id}", &id.to_string()))
            }
            ActionTarget::OnClick(callback) => {
                callback(id);
                ActionOutcome::Invoked
            }
        }
    }
}

/// The actions whose `show` predicate accepts `record`.
pub fn visible_actions<'a>(actions: &'a [RowAction], record: &Value) -> Vec<&'a RowAction> {
    actions.iter().filter(|a| a.show.allows(record)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use serde_json::json;

    use super::*;

    fn car() -> Value {
        json!({
            "id": 41,
            "title": "Audi A4",
            "price": 32500.5,
            "isFeatured": true,
            "brand": {"id": 1, "name": "Audi"},
            "images": ["front.jpg", "side.jpg"],
            "trimId": null
        })
    }

    #[test]
    fn resolves_nested_paths() {
        let record = car();
        assert_eq!(Column::new("brand.name", "Brand").cell(&record), "Audi");
        assert_eq!(Column::new("images.1", "Image").cell(&record), "side.jpg");
        assert_eq!(Column::new("price", "Price").cell(&record), "32500.5");
        assert_eq!(Column::new("isFeatured", "Featured").cell(&record), "Yes");
    }

    #[test]
    fn unresolvable_paths_render_blank() {
        let record = car();
        assert_eq!(Column::new("model.name", "Model").cell(&record), "");
        assert_eq!(Column::new("trimId", "Trim").cell(&record), "");
        assert_eq!(Column::new("images.9", "Image").cell(&record), "");
        assert_eq!(Column::new("title.deep", "x").cell(&record), "");
    }

    #[test]
    fn embedded_objects_show_their_name() {
        assert_eq!(Column::new("brand", "Brand").cell(&car()), "Audi");
        assert_eq!(Column::new("images", "Images").cell(&car()), "front.jpg, side.jpg");
    }

    #[test]
    fn custom_render_wins() {
        let col = Column::new("price", "Price").with_render(|r| {
            format!("${}", r["price"].as_f64().unwrap_or_default().round())
        });
        assert_eq!(col.cell(&car()), "$32501");
    }

    #[test]
    fn href_action_substitutes_id() {
        let action = RowAction::link("Edit", "/admin/car/edit/{id}");
        assert_eq!(
            action.activate(41, &car()),
            ActionOutcome::Navigate("/admin/car/edit/41".to_string())
        );
    }

    #[test]
    fn callback_action_receives_id() {
        let seen = Arc::new(AtomicI64::new(0));
        let sink = Arc::clone(&seen);
        let action = RowAction::callback("Delete", move |id| sink.store(id, Ordering::SeqCst));
        assert_eq!(action.activate(41, &car()), ActionOutcome::Invoked);
        assert_eq!(seen.load(Ordering::SeqCst), 41);
    }

    #[test]
    fn visibility_is_evaluated_per_record() {
        let actions = vec![
            RowAction::link("View", "/v/{id}"),
            RowAction::link("Feature", "/f/{id}")
                .shown(Visibility::When(|r| r["isFeatured"] == json!(false))),
            RowAction::link("Hidden", "/h/{id}").shown(Visibility::Never),
        ];
        let featured = car();
        let mut plain = car();
        plain["isFeatured"] = json!(false);

        let labels = |r: &Value| {
            visible_actions(&actions, r)
                .iter()
                .map(|a| a.label.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&featured), vec!["View"]);
        assert_eq!(labels(&plain), vec!["View", "Feature"]);
        assert_eq!(actions[2].activate(1, &plain), ActionOutcome::Hidden);
    }
}
