//! Bulk import with live progress.
//!
//! `Closed -> FileDialogOpen -> Uploading -> Succeeded | Failed`. The file is
//! uploaded as multipart form data while a push channel subscription reports
//! `{status, message, progress}` events for the running import.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dealership_api::types::{ActionResult, ProgressEvent};
use dealership_api::Client;
use serde_json::Value;

use crate::error::AdminError;
use crate::files::FilePicker;
use crate::notify::{Notification, Notifier};
use crate::push::{PushChannel, Subscription};

pub type OnComplete = Arc<dyn Fn() + Send + Sync>;

/// Per-entity import settings.
#[derive(Clone)]
pub struct ImportConfig {
    /// Upload endpoint under the API base, e.g. `/car/import`.
    pub endpoint: String,
    /// Push event carrying progress for this import.
    pub socket_event: String,
    /// Push host override. `None` uses the configured default.
    pub socket_url: Option<String>,
    pub accepted_file_types: Vec<String>,
    /// Fired once after a completed import, typically to reload the table.
    pub on_complete: Option<OnComplete>,
}

impl fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportConfig")
            .field("endpoint", &self.endpoint)
            .field("socket_event", &self.socket_event)
            .field("socket_url", &self.socket_url)
            .field("accepted_file_types", &self.accepted_file_types)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl ImportConfig {
    /// CSV import at `endpoint`, reporting under `socket_event`.
    pub fn csv(endpoint: &str, socket_event: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            socket_event: socket_event.to_string(),
            socket_url: None,
            accepted_file_types: vec![".csv".to_string()],
            on_complete: None,
        }
    }

    pub fn with_socket_url(mut self, url: impl Into<String>) -> Self {
        self.socket_url = Some(url.into());
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(f));
        self
    }

    pub fn picker(&self) -> FilePicker {
        FilePicker::new(&self.accepted_file_types)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Closed,
    FileDialogOpen,
    Uploading,
    Succeeded,
    Failed,
}

/// What the progress modal currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressModal {
    pub percent: u8,
    pub message: String,
    pub status: String,
}

/// Sends the import file.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        endpoint: &str,
        file: &Path,
    ) -> Result<ActionResult<Value>, dealership_api::Error>;
}

#[async_trait]
impl Uploader for Client {
    async fn upload(
        &self,
        endpoint: &str,
        file: &Path,
    ) -> Result<ActionResult<Value>, dealership_api::Error> {
        Client::upload(self, endpoint, file).await
    }
}

type Listener = Box<dyn FnMut(&ProgressModal) + Send>;

/// One import dialog and its subscription.
pub struct ImportSession {
    config: ImportConfig,
    uploader: Arc<dyn Uploader>,
    channel: Arc<dyn PushChannel>,
    notifier: Arc<dyn Notifier>,
    phase: ImportPhase,
    modal: ProgressModal,
    subscription: Option<Subscription>,
    finished: bool,
    listener: Option<Listener>,
}

impl ImportSession {
    pub fn new(
        config: ImportConfig,
        uploader: Arc<dyn Uploader>,
        channel: Arc<dyn PushChannel>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            uploader,
            channel,
            notifier,
            phase: ImportPhase::Closed,
            modal: ProgressModal::default(),
            subscription: None,
            finished: false,
            listener: None,
        }
    }

    /// Called with the modal after every progress update.
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&ProgressModal) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    pub fn modal(&self) -> &ProgressModal {
        &self.modal
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Opens the file dialog. Refused while an upload is running.
    pub fn open_dialog(&mut self) -> bool {
        if self.phase == ImportPhase::Uploading {
            return false;
        }
        self.phase = ImportPhase::FileDialogOpen;
        self.modal = ProgressModal::default();
        self.finished = false;
        true
    }

    pub fn cancel_dialog(&mut self) {
        if self.phase == ImportPhase::FileDialogOpen {
            self.phase = ImportPhase::Closed;
        }
    }

    /// Uploads `file` and follows its progress until the import settles.
    pub async fn run(&mut self, file: &Path) -> Result<ImportPhase, AdminError> {
        if self.begin(file).await? == ImportPhase::Uploading {
            self.pump().await;
        }
        Ok(self.phase)
    }

    /// Checks the file, subscribes and uploads. Progress is left to [`Self::pump`].
    pub async fn begin(&mut self, file: &Path) -> Result<ImportPhase, AdminError> {
        if self.phase == ImportPhase::Uploading {
            return Ok(self.phase);
        }
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let picker = self.config.picker();
        if !picker.accepts(&name) {
            return Err(AdminError::InvalidInput(format!(
                "{} is not an accepted file type ({})",
                name,
                picker.describe()
            )));
        }

        self.phase = ImportPhase::Uploading;
        self.finished = false;
        self.modal = ProgressModal {
            percent: 0,
            message: format!("Uploading {}", name),
            status: "uploading".to_string(),
        };
        self.emit();

        match self.channel.subscribe(&self.config.socket_event).await {
            Ok(sub) => self.subscription = Some(sub),
            Err(err) => {
                self.fail(format!("Could not follow import progress: {}", err));
                return Ok(self.phase);
            }
        }

        tracing::info!("importing {} via {}", file.display(), self.config.endpoint);
        match self.uploader.upload(&self.config.endpoint, file).await {
            Ok(resp) if resp.is_success() => {
                if let Some(message) = resp.message {
                    self.modal.message = message;
                    self.emit();
                }
            }
            Ok(resp) => {
                let message = resp
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| dealership_api::FALLBACK_MESSAGE.to_string());
                self.fail(message);
            }
            Err(err) => self.fail(err.user_message()),
        }
        Ok(self.phase)
    }

    /// Consumes progress events until the import completes or fails.
    pub async fn pump(&mut self) {
        while !self.finished {
            let next = match self.subscription.as_mut() {
                Some(sub) => sub.next().await,
                None => break,
            };
            match next {
                Some(event) => self.handle_event(event),
                None => {
                    self.fail("Import progress channel closed before completion".to_string());
                }
            }
        }
    }

    /// Applies one progress event. Ignored once the import has settled or
    /// the session was torn down.
    pub fn handle_event(&mut self, event: ProgressEvent) {
        if self.finished || self.phase != ImportPhase::Uploading {
            tracing::debug!("ignoring late import event: {:?}", event);
            return;
        }
        self.modal = ProgressModal {
            percent: event.progress.min(100),
            message: event.message.clone(),
            status: event.status.clone(),
        };
        self.emit();

        if event.is_completed() {
            self.finished = true;
            self.phase = ImportPhase::Succeeded;
            let message = if event.message.trim().is_empty() {
                "Import completed".to_string()
            } else {
                event.message
            };
            self.notifier.notify(Notification::success(message));
            self.release();
            if let Some(on_complete) = &self.config.on_complete {
                on_complete();
            }
        } else if event.is_failed() {
            let message = if event.message.trim().is_empty() {
                "Import failed".to_string()
            } else {
                event.message
            };
            self.fail(message);
        }
    }

    /// Releases the subscription and stops reacting to events.
    pub fn teardown(&mut self) {
        self.release();
        self.finished = true;
        if matches!(
            self.phase,
            ImportPhase::FileDialogOpen | ImportPhase::Uploading
        ) {
            self.phase = ImportPhase::Closed;
        }
    }

    fn fail(&mut self, message: String) {
        tracing::warn!("import via {} failed: {}", self.config.endpoint, message);
        self.finished = true;
        self.phase = ImportPhase::Failed;
        self.modal.status = "failed".to_string();
        self.modal.message = message.clone();
        self.notifier.notify(Notification::error(message));
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut sub) = self.subscription.take() {
            sub.unsubscribe();
        }
    }

    fn emit(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.modal);
        }
    }
}

impl Drop for ImportSession {
    fn drop(&mut self) {
        self.release();
    }
}
