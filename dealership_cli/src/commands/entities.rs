use anyhow::Result;
use dealership_lib::types::Entity;
use dealership_lib::{EntityKind, EntityVisitor, Validate};
use serde::Serialize;

use super::AppContext;
use crate::output::{print, Rows};

#[derive(Serialize)]
struct EntityInfo {
    name: &'static str,
    title: &'static str,
    route: String,
    resource: &'static str,
    statuses: &'static [&'static str],
    import: bool,
}

struct ResourcePath;

impl EntityVisitor for ResourcePath {
    type Output = &'static str;

    fn visit<E>(self, _kind: EntityKind) -> Self::Output
    where
        E: Entity,
        E::Input: Validate,
    {
        E::PATH
    }
}

fn describe(kind: EntityKind) -> EntityInfo {
    EntityInfo {
        name: kind.name(),
        title: kind.title(),
        route: kind.listing_route(),
        resource: kind.dispatch(ResourcePath),
        statuses: kind.status_options(),
        import: kind.import_config().is_some(),
    }
}

pub fn run(ctx: &AppContext) -> Result<()> {
    let infos: Vec<EntityInfo> = EntityKind::ALL.into_iter().map(describe).collect();
    let mut rows = Rows::new(["Name", "Title", "Route", "Resource", "Statuses", "Import"]);
    for info in &infos {
        rows.push(vec![
            info.name.to_string(),
            info.title.to_string(),
            info.route.clone(),
            info.resource.to_string(),
            info.statuses.join(", "),
            if info.import { "csv" } else { "" }.to_string(),
        ]);
    }
    print(ctx.format, &rows, &infos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_cars() {
        let info = describe(EntityKind::Car);
        assert_eq!(info.resource, "/car");
        assert_eq!(info.route, "/admin/cars");
        assert!(info.import);
    }

    #[test]
    fn roles_have_no_status_or_import() {
        let info = describe(EntityKind::Role);
        assert!(info.statuses.is_empty());
        assert!(!info.import);
    }
}
