use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, NamedRef};

fn active() -> String {
    "active".to_string()
}

fn draft() -> String {
    "draft".to_string()
}

/// A CMS page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Page {
    type Input = PageInput;
    const PATH: &'static str = "/page";
    const NAME: &'static str = "Page";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> PageInput {
        PageInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            meta_title: self.meta_title.clone(),
            meta_description: self.meta_description.clone(),
            status: self.status.clone(),
        }
    }
}

/// A content block belonging to a page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: EntityId,
    pub page_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub page: Option<NamedRef>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    pub page_id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Section {
    type Input = SectionInput;
    const PATH: &'static str = "/section";
    const NAME: &'static str = "Section";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> SectionInput {
        SectionInput {
            page_id: self.page_id,
            title: self.title.clone(),
            content: self.content.clone(),
            sort_order: self.sort_order,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BannerInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for Banner {
    type Input = BannerInput;
    const PATH: &'static str = "/banner";
    const NAME: &'static str = "Banner";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> BannerInput {
        BannerInput {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            position: self.position,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub tag_ids: Vec<EntityId>,
    #[serde(default = "draft")]
    pub status: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub tag_ids: Vec<EntityId>,
    #[serde(default = "draft")]
    pub status: String,
}

impl Entity for BlogPost {
    type Input = BlogPostInput;
    const PATH: &'static str = "/blog";
    const NAME: &'static str = "Blog post";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> BlogPostInput {
        BlogPostInput {
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            cover_image: self.cover_image.clone(),
            category_id: self.category_id,
            tag_ids: self.tag_ids.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogTag {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogTagInput {
    pub name: String,
    pub slug: String,
}

impl Entity for BlogTag {
    type Input = BlogTagInput;
    const PATH: &'static str = "/blog-tag";
    const NAME: &'static str = "Blog tag";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> BlogTagInput {
        BlogTagInput {
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategory {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for BlogCategory {
    type Input = BlogCategoryInput;
    const PATH: &'static str = "/blog-category";
    const NAME: &'static str = "Blog category";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> BlogCategoryInput {
        BlogCategoryInput {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        }
    }
}
