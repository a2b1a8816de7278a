//! Push channel for server-sent progress events.
//!
//! A channel is constructed explicitly and handed to whoever needs it; it is
//! never a process-wide singleton. Every [`Subscription`] is released exactly
//! once, either through [`Subscription::unsubscribe`] or on drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dealership_api::types::ProgressEvent;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use url::Url;

use crate::error::AdminError;

/// Path of the event stream under the push host.
pub const EVENTS_PATH: &str = "/events";

/// Errors from opening or subscribing to a push channel.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("invalid push URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("channel is closed")]
    Closed,
    #[error("failed to connect")]
    Connect(#[from] reqwest::Error),
    #[error("event stream returned status {0}")]
    Status(u16),
    #[error("listener registry poisoned")]
    Poisoned,
}

#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Starts receiving events published under `event`.
    async fn subscribe(&self, event: &str) -> Result<Subscription, AdminError>;
}

type Release = Box<dyn FnOnce() + Send>;

/// A live listener for one named event.
pub struct Subscription {
    event: String,
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
    release: Option<Release>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    pub fn new<F>(event: &str, rx: mpsc::UnboundedReceiver<ProgressEvent>, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            event: event.to_string(),
            rx,
            release: Some(Box::new(release)),
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Next event, or `None` once released or when the channel went away.
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        if !self.is_active() {
            return None;
        }
        self.rx.recv().await
    }

    /// Releases the listener. Returns `true` only on the first call.
    pub fn unsubscribe(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                self.rx.close();
                tracing::debug!("unsubscribed from '{}'", self.event);
                true
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[derive(Default)]
struct Listeners {
    closed: bool,
    next_id: u64,
    tasks: HashMap<u64, AbortHandle>,
}

/// Server-Sent-Events push channel.
///
/// Each subscription holds its own streaming request and forwards events
/// whose SSE event name matches. [`SseChannel::close`] aborts every stream.
pub struct SseChannel {
    url: Url,
    http: reqwest::Client,
    listeners: Arc<Mutex<Listeners>>,
}

impl SseChannel {
    /// Opens a channel against `{push_host}/events`.
    pub fn open(push_host: &str, http: reqwest::Client) -> Result<Self, AdminError> {
        let raw = format!("{}{}", push_host.trim_end_matches('/'), EVENTS_PATH);
        let url = Url::parse(&raw).map_err(|e| ChannelError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!("push channel opened at {}", url);
        Ok(Self {
            url,
            http,
            listeners: Arc::new(Mutex::new(Listeners::default())),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.listeners.lock().map(|l| l.tasks.len()).unwrap_or(0)
    }

    /// Tears down every subscription. Later `subscribe` calls fail.
    pub fn close(&self) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.closed = true;
            for (_, task) in listeners.tasks.drain() {
                task.abort();
            }
        }
        tracing::debug!("push channel {} closed", self.url);
    }

    fn is_closed(&self) -> bool {
        self.listeners.lock().map(|l| l.closed).unwrap_or(true)
    }
}

impl Drop for SseChannel {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl PushChannel for SseChannel {
    async fn subscribe(&self, event: &str) -> Result<Subscription, AdminError> {
        if self.is_closed() {
            return Err(ChannelError::Closed.into());
        }

        let resp = self
            .http
            .get(self.url.clone())
            .header("accept", "text/event-stream")
            .send()
            .await
            .map_err(ChannelError::from)?;
        if !resp.status().is_success() {
            return Err(ChannelError::Status(resp.status().as_u16()).into());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let name = event.to_string();
        let task = tokio::spawn(async move {
            let mut stream = resp.bytes_stream().eventsource();
            while let Some(item) = stream.next().await {
                let message = match item {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::warn!("push stream error on '{}': {}", name, e);
                        break;
                    }
                };
                if message.event != name {
                    continue;
                }
                match serde_json::from_str::<ProgressEvent>(&message.data) {
                    Ok(progress) => {
                        if tx.send(progress).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("skipping malformed '{}' payload: {}", name, e);
                    }
                }
            }
        });

        let id = {
            let mut listeners = self
                .listeners
                .lock()
                .map_err(|_| ChannelError::Poisoned)?;
            if listeners.closed {
                task.abort();
                return Err(ChannelError::Closed.into());
            }
            listeners.next_id += 1;
            let id = listeners.next_id;
            listeners.tasks.insert(id, task.abort_handle());
            id
        };

        let listeners = Arc::clone(&self.listeners);
        Ok(Subscription::new(event, rx, move || {
            if let Ok(mut listeners) = listeners.lock() {
                if let Some(task) = listeners.tasks.remove(&id) {
                    task.abort();
                }
            }
        }))
    }
}

/// In-process channel. Events are delivered by [`LocalChannel::publish`].
#[derive(Default)]
pub struct LocalChannel {
    senders: Mutex<Vec<(String, mpsc::UnboundedSender<ProgressEvent>)>>,
    releases: Arc<AtomicUsize>,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `progress` to every live subscriber of `event`.
    /// Returns how many subscribers received it.
    pub fn publish(&self, event: &str, progress: ProgressEvent) -> usize {
        let Ok(mut senders) = self.senders.lock() else {
            return 0;
        };
        senders.retain(|(_, tx)| !tx.is_closed());
        senders
            .iter()
            .filter(|(name, _)| name == event)
            .filter(|(_, tx)| tx.send(progress.clone()).is_ok())
            .count()
    }

    /// How many subscriptions have been released so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushChannel for LocalChannel {
    async fn subscribe(&self, event: &str) -> Result<Subscription, AdminError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .lock()
            .map_err(|_| ChannelError::Poisoned)?
            .push((event.to_string(), tx));
        let releases = Arc::clone(&self.releases);
        Ok(Subscription::new(event, rx, move || {
            releases.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
