use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, NamedRef};

fn active() -> String {
    "active".to_string()
}

fn new_status() -> String {
    "new".to_string()
}

fn subscribed() -> String {
    "subscribed".to_string()
}

/// A back-office account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role_id: Option<EntityId>,
    #[serde(default)]
    pub role: Option<NamedRef>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,
    /// Only sent when creating an account or changing its password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "active")]
    pub status: String,
}

impl Entity for User {
    type Input = UserInput;
    const PATH: &'static str = "/users";
    const NAME: &'static str = "User";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> UserInput {
        UserInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role_id: self.role_id,
            password: None,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<EntityId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<EntityId>,
}

impl Entity for Role {
    type Input = RoleInput;
    const PATH: &'static str = "/role";
    const NAME: &'static str = "Role";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> RoleInput {
        RoleInput {
            name: self.name.clone(),
            description: self.description.clone(),
            permission_ids: self.permission_ids.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: EntityId,
    pub name: String,
    /// Machine key, e.g. `car.update`.
    pub key: String,
    #[serde(default)]
    pub module: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInput {
    pub name: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl Entity for Permission {
    type Input = PermissionInput;
    const PATH: &'static str = "/permission";
    const NAME: &'static str = "Permission";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> PermissionInput {
        PermissionInput {
            name: self.name.clone(),
            key: self.key.clone(),
            module: self.module.clone(),
        }
    }
}

/// A message left through the public contact form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactEnquiry {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub car_id: Option<EntityId>,
    #[serde(default = "new_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactEnquiryInput {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<EntityId>,
    #[serde(default = "new_status")]
    pub status: String,
}

impl Entity for ContactEnquiry {
    type Input = ContactEnquiryInput;
    const PATH: &'static str = "/contact";
    const NAME: &'static str = "Contact enquiry";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> ContactEnquiryInput {
        ContactEnquiryInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            car_id: self.car_id,
            status: self.status.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: EntityId,
    pub email: String,
    #[serde(default = "subscribed")]
    pub status: String,
    #[serde(default)]
    pub subscribed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriptionInput {
    pub email: String,
    #[serde(default = "subscribed")]
    pub status: String,
}

impl Entity for NewsletterSubscription {
    type Input = NewsletterSubscriptionInput;
    const PATH: &'static str = "/newsletter";
    const NAME: &'static str = "Newsletter subscription";

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_input(&self) -> NewsletterSubscriptionInput {
        NewsletterSubscriptionInput {
            email: self.email.clone(),
            status: self.status.clone(),
        }
    }
}
