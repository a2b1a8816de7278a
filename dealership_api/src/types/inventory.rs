use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, NamedRef};

fn active() -> String {
    "active".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Brand {
    type Input = BrandInput;
    const PATH: &'static str = "/brand";
    const NAME: &'static str = "Brand";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> BrandInput {
        BrandInput {
            name: self.name.clone(),
            slug: self.slug.clone(),
            logo: self.logo.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarModel {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub brand_id: EntityId,
    #[serde(default)]
    pub brand: Option<NamedRef>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarModelInput {
    pub name: String,
    pub slug: String,
    pub brand_id: EntityId,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for CarModel {
    type Input = CarModelInput;
    const PATH: &'static str = "/model";
    const NAME: &'static str = "Model";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> CarModelInput {
        CarModelInput {
            name: self.name.clone(),
            slug: self.slug.clone(),
            brand_id: self.brand_id,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trim {
    pub id: EntityId,
    pub name: String,
    pub model_id: EntityId,
    #[serde(default)]
    pub model: Option<NamedRef>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrimInput {
    pub name: String,
    pub model_id: EntityId,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Trim {
    type Input = TrimInput;
    const PATH: &'static str = "/trim";
    const NAME: &'static str = "Trim";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> TrimInput {
        TrimInput {
            name: self.name.clone(),
            model_id: self.model_id,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    pub id: EntityId,
    pub year: i32,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearInput {
    pub year: i32,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Year {
    type Input = YearInput;
    const PATH: &'static str = "/year";
    const NAME: &'static str = "Year";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> YearInput {
        YearInput {
            year: self.year,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Feature {
    type Input = FeatureInput;
    const PATH: &'static str = "/feature";
    const NAME: &'static str = "Feature";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> FeatureInput {
        FeatureInput {
            name: self.name.clone(),
            icon: self.icon.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Specification {
    type Input = SpecificationInput;
    const PATH: &'static str = "/specification";
    const NAME: &'static str = "Specification";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> SpecificationInput {
        SpecificationInput {
            name: self.name.clone(),
            unit: self.unit.clone(),
            status: self.status.clone(),
        }
    }
}

/// A vehicle listed in inventory.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub brand_id: EntityId,
    pub model_id: EntityId,
    #[serde(default)]
    pub trim_id: Option<EntityId>,
    pub year_id: EntityId,
    pub price: f64,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub feature_ids: Vec<EntityId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "active")]
    pub status: String,
    #[serde(default)]
    pub brand: Option<NamedRef>,
    #[serde(default)]
    pub model: Option<NamedRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub title: String,
    pub slug: String,
    pub brand_id: EntityId,
    pub model_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_id: Option<EntityId>,
    pub year_id: EntityId,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub feature_ids: Vec<EntityId>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Car {
    type Input = CarInput;
    const PATH: &'static str = "/car";
    const NAME: &'static str = "Car";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> CarInput {
        CarInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            brand_id: self.brand_id,
            model_id: self.model_id,
            trim_id: self.trim_id,
            year_id: self.year_id,
            price: self.price,
            mileage: self.mileage,
            fuel_type: self.fuel_type.clone(),
            transmission: self.transmission.clone(),
            color: self.color.clone(),
            description: self.description.clone(),
            images: self.images.clone(),
            feature_ids: self.feature_ids.clone(),
            is_featured: self.is_featured,
            status: self.status.clone(),
        }
    }
}
