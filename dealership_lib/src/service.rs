//! Remote data services: the terminal error boundary for every REST call.
//!
//! Nothing above this layer ever sees a `Result`. Failures become
//! notifications plus a safe fallback value (an empty page, a failed
//! `ActionResult`, `false`, `None`).

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use dealership_api::types::{ActionResult, Entity, EntityId, ListResult};
use dealership_api::{Client, ListQuery};

use crate::notify::{Notification, Notifier};

/// Operations a listing table or form needs from one entity's REST resource.
#[async_trait]
pub trait RemoteService<E: Entity>: Send + Sync {
    /// One page of records, or `None` when the request failed. The failure
    /// has already been reported through the notifier.
    async fn fetch(&self, query: &ListQuery) -> Option<ListResult<E>>;

    /// One page of records. Failure or an empty page yields the zeroed result.
    async fn list(&self, query: &ListQuery) -> ListResult<E> {
        self.fetch(query).await.unwrap_or_else(ListResult::empty)
    }

    /// A single record, or `None` when it could not be fetched.
    async fn get_by_id(&self, id: EntityId) -> Option<E>;

    async fn add(&self, input: &E::Input) -> ActionResult<E>;

    async fn update(&self, id: EntityId, input: &E::Input) -> ActionResult<E>;

    /// `true` only when the server confirmed the delete.
    async fn delete(&self, id: EntityId) -> bool;

    /// Deletes all ids in a single request. `false` means nothing was deleted.
    async fn bulk_delete(&self, ids: &[EntityId]) -> bool;
}

/// [`RemoteService`] backed by the HTTP [`Client`].
pub struct EntityService<E> {
    client: Arc<Client>,
    notifier: Arc<dyn Notifier>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            notifier: Arc::clone(&self.notifier),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(client: Arc<Client>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            _entity: PhantomData,
        }
    }

    fn fail<T>(&self, action: &str, err: dealership_api::Error) -> ActionResult<T> {
        let message = err.user_message();
        tracing::warn!("{} {} failed: {}", E::NAME, action, err);
        self.notifier.notify(Notification::error(message.clone()));
        ActionResult::failure(message)
    }

    fn settle<T>(&self, action: &str, resp: ActionResult<T>) -> ActionResult<T> {
        if resp.is_success() {
            let message = resp
                .message
                .clone()
                .unwrap_or_else(|| format!("{} {}", E::NAME, action));
            self.notifier.notify(Notification::success(message));
            resp
        } else {
            let message = resp
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| dealership_api::FALLBACK_MESSAGE.to_string());
            tracing::warn!("{} {} rejected: {}", E::NAME, action, message);
            self.notifier.notify(Notification::error(message.clone()));
            ActionResult {
                success: Some(false),
                message: Some(message),
                data: resp.data,
            }
        }
    }
}

#[async_trait]
impl<E: Entity> RemoteService<E> for EntityService<E> {
    async fn fetch(&self, query: &ListQuery) -> Option<ListResult<E>> {
        match self.client.list::<E>(query).await {
            Ok(resp) if resp.data.is_empty() => {
                tracing::debug!("{} list returned no records", E::NAME);
                Some(ListResult::empty())
            }
            Ok(resp) => Some(resp),
            Err(err) => {
                tracing::warn!("{} list failed: {}", E::NAME, err);
                self.notifier.notify(Notification::error(format!(
                    "Failed to load {} records: {}",
                    E::NAME,
                    err.user_message()
                )));
                None
            }
        }
    }

    async fn get_by_id(&self, id: EntityId) -> Option<E> {
        match self.client.get_by_id::<E>(id).await {
            Ok(resp) if resp.is_success() => resp.data,
            Ok(resp) => {
                let message = resp
                    .message
                    .unwrap_or_else(|| format!("{} {} not found", E::NAME, id));
                self.notifier.notify(Notification::error(message));
                None
            }
            Err(err) => {
                tracing::warn!("{} {} fetch failed: {}", E::NAME, id, err);
                self.notifier.notify(Notification::error(err.user_message()));
                None
            }
        }
    }

    async fn add(&self, input: &E::Input) -> ActionResult<E> {
        match self.client.create::<E>(input).await {
            Ok(resp) => self.settle("created", resp),
            Err(err) => self.fail("create", err),
        }
    }

    async fn update(&self, id: EntityId, input: &E::Input) -> ActionResult<E> {
        match self.client.update::<E>(id, input).await {
            Ok(resp) => self.settle("updated", resp),
            Err(err) => self.fail("update", err),
        }
    }

    async fn delete(&self, id: EntityId) -> bool {
        match self.client.delete::<E>(id).await {
            Ok(resp) => self.settle("deleted", resp).is_success(),
            Err(err) => {
                self.fail::<()>("delete", err);
                false
            }
        }
    }

    async fn bulk_delete(&self, ids: &[EntityId]) -> bool {
        if ids.is_empty() {
            return false;
        }
        match self.client.bulk_delete::<E>(ids).await {
            Ok(resp) => self.settle("records deleted", resp).is_success(),
            Err(err) => {
                self.fail::<()>("bulk delete", err);
                false
            }
        }
    }
}
