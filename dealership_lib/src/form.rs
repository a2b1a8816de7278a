//! Add and edit flows for a single record.
//!
//! Edit loads the record first and prefills the form from it. Submitting
//! validates locally, then calls the entity service; success resets the form
//! and hands back the listing route to navigate to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dealership_api::types::{Entity, EntityId};

use crate::error::{AdminError, FieldError};
use crate::service::RemoteService;
use crate::validation::{parse_id, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(EntityId),
}

impl FormMode {
    /// `None` is the add route; anything else must be a numeric id.
    pub fn from_route(id: Option<&str>) -> Result<Self, AdminError> {
        match id {
            None => Ok(FormMode::Add),
            Some(raw) => parse_id(raw).map(FormMode::Edit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    Saved { message: String, redirect: String },
    Failed(String),
}

/// Shared view of whether the form is saving, for disabling the submit
/// control while a request runs.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn hold(&self) -> Holding {
        self.0.store(true, Ordering::SeqCst);
        Holding(Arc::clone(&self.0))
    }
}

/// Clears the flag when the submit finishes, including on cancellation.
struct Holding(Arc<AtomicBool>);

impl Drop for Holding {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct FormPage<E: Entity> {
    service: Arc<dyn RemoteService<E>>,
    mode: FormMode,
    listing_route: String,
    values: E::Input,
    errors: Vec<FieldError>,
    in_flight: InFlight,
}

impl<E> FormPage<E>
where
    E: Entity,
    E::Input: Validate,
{
    pub fn new(
        service: Arc<dyn RemoteService<E>>,
        mode: FormMode,
        listing_route: impl Into<String>,
    ) -> Self {
        Self {
            service,
            mode,
            listing_route: listing_route.into(),
            values: E::Input::default(),
            errors: Vec::new(),
            in_flight: InFlight::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &E::Input {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut E::Input {
        &mut self.values
    }

    pub fn set_values(&mut self, values: E::Input) {
        self.values = values;
    }

    /// Field errors from the last submit.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_active()
    }

    /// A handle that stays valid while `submit` holds the form.
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    /// Prepares the initial values. Edit mode fetches the record.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.mode {
            FormMode::Add => {
                self.values = E::Input::default();
                LoadOutcome::Ready
            }
            FormMode::Edit(id) => match self.service.get_by_id(id).await {
                Some(record) => {
                    self.values = record.to_input();
                    LoadOutcome::Ready
                }
                None => {
                    tracing::debug!("{} {} not found", E::NAME, id);
                    LoadOutcome::NotFound
                }
            },
        }
    }

    /// Validates and saves the current values.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors = self.values.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let _holding = self.in_flight.hold();
        let result = match self.mode {
            FormMode::Add => self.service.add(&self.values).await,
            FormMode::Edit(id) => self.service.update(id, &self.values).await,
        };

        if result.is_success() {
            let message = result.message.unwrap_or_else(|| format!("{} saved", E::NAME));
            self.values = E::Input::default();
            self.errors.clear();
            SubmitOutcome::Saved {
                message,
                redirect: self.listing_route.clone(),
            }
        } else {
            SubmitOutcome::Failed(
                result
                    .message
                    .unwrap_or_else(|| dealership_api::FALLBACK_MESSAGE.to_string()),
            )
        }
    }

    /// Replaces the values, then submits.
    pub async fn submit_with(&mut self, values: E::Input) -> SubmitOutcome {
        self.values = values;
        self.submit().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;
    use dealership_api::types::{ActionResult, Brand, BrandInput, ListResult};
    use dealership_api::ListQuery;

    use super::*;

    #[derive(Default)]
    struct FakeBrands {
        reject: bool,
        /// When set, `add` waits for a permit before answering.
        gate: Option<Arc<Notify>>,
        adds: Mutex<Vec<BrandInput>>,
        updates: Mutex<Vec<(EntityId, BrandInput)>>,
        lookups: Mutex<Vec<EntityId>>,
    }

    fn audi() -> Brand {
        Brand {
            id: 1,
            name: "Audi".into(),
            slug: "audi".into(),
            logo: None,
            status: "active".into(),
            created_at: None,
        }
    }

    #[async_trait]
    impl RemoteService<Brand> for FakeBrands {
        async fn fetch(&self, _query: &ListQuery) -> Option<ListResult<Brand>> {
            Some(ListResult::empty())
        }

        async fn get_by_id(&self, id: EntityId) -> Option<Brand> {
            self.lookups.lock().unwrap().push(id);
            (id == 1).then(audi)
        }

        async fn add(&self, input: &BrandInput) -> ActionResult<Brand> {
            self.adds.lock().unwrap().push(input.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.reject {
                ActionResult::failure("Slug already exists")
            } else {
                ActionResult::ok(Some("Brand created".into()), Some(audi()))
            }
        }

        async fn update(&self, id: EntityId, input: &BrandInput) -> ActionResult<Brand> {
            self.updates.lock().unwrap().push((id, input.clone()));
            ActionResult::ok(None, None)
        }

        async fn delete(&self, _id: EntityId) -> bool {
            false
        }

        async fn bulk_delete(&self, _ids: &[EntityId]) -> bool {
            false
        }
    }

    fn valid() -> BrandInput {
        BrandInput {
            name: "Audi".into(),
            slug: "audi".into(),
            logo: None,
            status: "active".into(),
        }
    }

    #[test]
    fn route_parsing() {
        assert_eq!(FormMode::from_route(None).unwrap(), FormMode::Add);
        assert_eq!(FormMode::from_route(Some("41")).unwrap(), FormMode::Edit(41));
        let err = FormMode::from_route(Some("abc")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid ID");
    }

    #[tokio::test]
    async fn edit_prefills_from_record() {
        let service = Arc::new(FakeBrands::default());
        let mut form = FormPage::<Brand>::new(service.clone(), FormMode::Edit(1), "/admin/brands");
        assert_eq!(form.load().await, LoadOutcome::Ready);
        assert_eq!(form.values(), &audi().to_input());

        let mut missing =
            FormPage::<Brand>::new(service.clone(), FormMode::Edit(9), "/admin/brands");
        assert_eq!(missing.load().await, LoadOutcome::NotFound);
        assert_eq!(*service.lookups.lock().unwrap(), vec![1, 9]);
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let service = Arc::new(FakeBrands::default());
        let mut form = FormPage::<Brand>::new(service.clone(), FormMode::Add, "/admin/brands");
        form.load().await;

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.len() == 3));
        assert_eq!(form.errors().len(), 3);
        assert!(service.adds.lock().unwrap().is_empty());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn add_success_redirects_and_resets() {
        let service = Arc::new(FakeBrands::default());
        let mut form = FormPage::<Brand>::new(service.clone(), FormMode::Add, "/admin/brands");

        let outcome = form.submit_with(valid()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                message: "Brand created".into(),
                redirect: "/admin/brands".into(),
            }
        );
        assert_eq!(form.values(), &BrandInput::default());
        assert_eq!(service.adds.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_uses_route_id_and_default_message() {
        let service = Arc::new(FakeBrands::default());
        let mut form = FormPage::<Brand>::new(service.clone(), FormMode::Edit(1), "/admin/brands");
        form.load().await;
        form.values_mut().name = "Audi AG".into();

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Saved { ref message, .. } if message == "Brand saved"));
        let updates = service.updates.lock().unwrap();
        assert_eq!(updates[0].0, 1);
        assert_eq!(updates[0].1.name, "Audi AG");
    }

    #[tokio::test]
    async fn failure_keeps_values() {
        let service = Arc::new(FakeBrands {
            reject: true,
            ..FakeBrands::default()
        });
        let mut form = FormPage::<Brand>::new(service, FormMode::Add, "/admin/brands");

        let outcome = form.submit_with(valid()).await;
        assert_eq!(outcome, SubmitOutcome::Failed("Slug already exists".into()));
        assert_eq!(form.values(), &valid());
    }

    #[tokio::test]
    async fn in_flight_is_visible_while_saving() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(FakeBrands {
            gate: Some(Arc::clone(&gate)),
            ..FakeBrands::default()
        });
        let mut form = FormPage::<Brand>::new(service.clone(), FormMode::Add, "/admin/brands");
        let in_flight = form.in_flight();
        assert!(!in_flight.is_active());

        let observer = async {
            while !in_flight.is_active() {
                tokio::task::yield_now().await;
            }
            let seen_during_save = service.adds.lock().unwrap().len();
            gate.notify_one();
            seen_during_save
        };
        let (outcome, seen_during_save) = tokio::join!(form.submit_with(valid()), observer);

        assert_eq!(seen_during_save, 1);
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        assert!(!in_flight.is_active());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn invalid_submit_never_marks_in_flight() {
        let service = Arc::new(FakeBrands::default());
        let mut form = FormPage::<Brand>::new(service, FormMode::Add, "/admin/brands");
        let in_flight = form.in_flight();
        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(!in_flight.is_active());
    }
}
