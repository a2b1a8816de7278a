//! Library layer for the dealership admin: entity services, listing tables,
//! forms and imports.
//!
//! Wraps the `dealership_api` client with never-failing remote data services,
//! a reusable table state machine, import-with-progress over a push channel,
//! form flows with client-side validation, and an entity registry.

pub mod columns;
pub mod config;
pub mod error;
pub mod files;
pub mod form;
pub mod import;
pub mod notify;
pub mod push;
pub mod registry;
pub mod service;
pub mod table;
pub mod validation;

pub use dealership_api;
pub use dealership_api::types;
pub use dealership_api::{Client, FileQuery, ListQuery, Query, SortDirection};

pub use config::AdminConfig;
pub use error::{AdminError, FieldError};
pub use files::{FileManager, FilePicker};
pub use form::{FormMode, FormPage, InFlight, LoadOutcome, SubmitOutcome};
pub use import::{ImportConfig, ImportPhase, ImportSession, ProgressModal};
pub use notify::{Level, MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use push::{LocalChannel, PushChannel, SseChannel, Subscription};
pub use registry::{EntityKind, EntityVisitor};
pub use service::{EntityService, RemoteService};
pub use table::{Confirm, DeleteOutcome, Phase, StateChange, Table, TableState};
pub use validation::Validate;
