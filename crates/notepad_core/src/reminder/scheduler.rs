//! Reminder scheduling on top of a [`NotificationCenter`].
//!
//! # Responsibility
//! - Ask for alert permission at most once per scheduler lifetime.
//! - Register and cancel one alert per note identifier.
//!
//! # Invariants
//! - A denied permission is reported as `ReminderError::PermissionDenied`,
//!   never swallowed.
//! - `cancel` is idempotent.

use super::center::{AlertRequest, AuthorizationStatus, NotificationCenter};
use super::trigger::CalendarTrigger;
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Alert title used when the note title is blank.
pub const FALLBACK_ALERT_TITLE: &str = "Reminder";

pub type ReminderResult<T> = Result<T, ReminderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The user declined alert permission.
    PermissionDenied,
    /// Fire time cannot be expressed as local calendar components.
    InvalidTime(i64),
    /// The platform center rejected the registration.
    Backend(String),
}

impl Display for ReminderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::InvalidTime(at) => write!(f, "reminder time {at} is out of range"),
            Self::Backend(message) => write!(f, "notification center error: {message}"),
        }
    }
}

impl Error for ReminderError {}

/// Schedules and cancels note reminders.
///
/// One scheduler is created per process by [`crate::app::App`]; its cached
/// authorization answer is what makes the permission prompt one-shot.
pub struct ReminderScheduler<C: NotificationCenter> {
    center: C,
    authorization: OnceCell<AuthorizationStatus>,
}

impl<C: NotificationCenter> ReminderScheduler<C> {
    pub fn new(center: C) -> Self {
        Self {
            center,
            authorization: OnceCell::new(),
        }
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    /// Registers a one-shot alert for `id` at the minute containing `at_epoch_ms`.
    ///
    /// Replaces any alert already pending for `id`. Returns the calendar
    /// trigger that was registered.
    pub async fn schedule(
        &self,
        id: &str,
        title: &str,
        body: &str,
        at_epoch_ms: i64,
    ) -> ReminderResult<CalendarTrigger> {
        if self.ensure_authorized().await == AuthorizationStatus::Denied {
            warn!(
                "event=reminder_schedule module=reminder status=error error_code=permission_denied"
            );
            return Err(ReminderError::PermissionDenied);
        }

        let trigger = CalendarTrigger::from_epoch_ms(at_epoch_ms)
            .ok_or(ReminderError::InvalidTime(at_epoch_ms))?;
        let title = if title.trim().is_empty() {
            FALLBACK_ALERT_TITLE
        } else {
            title
        };

        self.center
            .add(AlertRequest {
                id: id.to_string(),
                title: title.to_string(),
                body: body.to_string(),
                play_sound: true,
                trigger,
            })
            .map_err(|message| {
                warn!(
                    "event=reminder_schedule module=reminder status=error error_code=center_rejected"
                );
                ReminderError::Backend(message)
            })?;

        info!(
            "event=reminder_schedule module=reminder status=ok fire_at={:04}-{:02}-{:02}T{:02}:{:02}",
            trigger.year, trigger.month, trigger.day, trigger.hour, trigger.minute
        );
        Ok(trigger)
    }

    /// Removes any pending alert for `id`.
    pub fn cancel(&self, id: &str) {
        self.center.remove_pending(&[id.to_string()]);
        info!("event=reminder_cancel module=reminder status=ok");
    }

    /// Whether an alert is currently pending for `id`.
    pub fn is_pending(&self, id: &str) -> bool {
        self.center.pending_ids().iter().any(|pending| pending == id)
    }

    async fn ensure_authorized(&self) -> AuthorizationStatus {
        if let Some(status) = self.authorization.get() {
            return *status;
        }
        let status = self.center.request_authorization().await;
        info!(
            "event=notification_permission module=reminder status=ok granted={}",
            status == AuthorizationStatus::Granted
        );
        *self.authorization.get_or_init(|| status)
    }
}
