//! Platform notification-center seam and the bundled in-memory center.
//!
//! # Responsibility
//! - Describe what core needs from a local alert facility.
//! - Provide a process-local implementation for the CLI host and tests.
//!
//! # Invariants
//! - Alerts are addressed by an opaque identifier string.
//! - Adding an alert under an existing identifier replaces it.
//! - Removing an unknown identifier is a no-op.

use super::trigger::CalendarTrigger;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    Granted,
    Denied,
}

/// One-shot local alert registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    pub id: String,
    pub title: String,
    pub body: String,
    pub play_sound: bool,
    pub trigger: CalendarTrigger,
}

/// Host facility that registers and removes local alerts.
pub trait NotificationCenter {
    /// Prompts for alert permission.
    ///
    /// May suspend until the user answers; callers cannot abort it.
    fn request_authorization(&self) -> impl Future<Output = AuthorizationStatus>;
    fn add(&self, request: AlertRequest) -> Result<(), String>;
    fn remove_pending(&self, ids: &[String]);
    fn pending_ids(&self) -> Vec<String>;
}

/// Notification center that keeps pending alerts in process memory.
#[derive(Debug)]
pub struct InMemoryNotificationCenter {
    authorization: AuthorizationStatus,
    authorization_requests: AtomicUsize,
    pending: Mutex<BTreeMap<String, AlertRequest>>,
}

impl InMemoryNotificationCenter {
    pub fn new(authorization: AuthorizationStatus) -> Self {
        Self {
            authorization,
            authorization_requests: AtomicUsize::new(0),
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn granted() -> Self {
        Self::new(AuthorizationStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::new(AuthorizationStatus::Denied)
    }

    /// Number of permission prompts shown so far.
    pub fn authorization_requests(&self) -> usize {
        self.authorization_requests.load(Ordering::SeqCst)
    }

    /// Returns the pending alert registered under `id`, if any.
    pub fn pending(&self, id: &str) -> Option<AlertRequest> {
        self.lock().get(id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, AlertRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    async fn request_authorization(&self) -> AuthorizationStatus {
        self.authorization_requests.fetch_add(1, Ordering::SeqCst);
        self.authorization
    }

    fn add(&self, request: AlertRequest) -> Result<(), String> {
        self.lock().insert(request.id.clone(), request);
        Ok(())
    }

    fn remove_pending(&self, ids: &[String]) {
        let mut pending = self.lock();
        for id in ids {
            pending.remove(id);
        }
    }

    fn pending_ids(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}
