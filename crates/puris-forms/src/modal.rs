//! Modal orchestrator
//!
//! Drives one create/edit/react form through its lifecycle:
//!
//! ```text
//! Closed --open--> Editing(mode) --submit--> Submitting(mode) --settled--> Closed
//!                        |                                        ^
//!                        +-------------------cancel---------------+
//! ```
//!
//! Invalid drafts never reach the gateway. Once the gateway settles the
//! modal always closes; the outcome is reported through the notification
//! queue, which outlives the draft.

use crate::config::FormsConfig;
use crate::draft::{DraftSource, DraftState};
use crate::error::{FormError, GatewayError};
use crate::gateway::{settle_notification, FormRecord, PersistenceGateway};
use crate::grouping::DailyGroupingView;
use crate::notify::NotificationQueue;
use crate::validation::ValidationReport;
use chrono::{Local, TimeZone};
use puris_model::Record;
use std::sync::Arc;

/// What the modal was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalMode {
    /// New record, submitted with create
    Create,
    /// Existing record, submitted with update
    Edit,
    /// Answer to an existing record, submitted with create
    React,
}

/// Lifecycle state of a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    Closed,
    Editing(ModalMode),
    Submitting(ModalMode),
}

impl ModalState {
    /// Mode of an open modal
    #[inline]
    #[must_use]
    pub fn mode(self) -> Option<ModalMode> {
        match self {
            Self::Closed => None,
            Self::Editing(mode) | Self::Submitting(mode) => Some(mode),
        }
    }

    /// Whether the modal is shown
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

const MODES: [ModalMode; 3] = [ModalMode::Create, ModalMode::Edit, ModalMode::React];

/// States reachable in one step from `from`
#[must_use]
pub fn allowed_transitions(from: ModalState) -> Vec<ModalState> {
    use ModalState::{Closed, Editing, Submitting};
    match from {
        Closed => MODES.iter().copied().map(Editing).collect(),
        Editing(mode) => MODES
            .iter()
            .copied()
            .map(Editing)
            .chain([Submitting(mode), Closed])
            .collect(),
        Submitting(_) => vec![Closed],
    }
}

/// Validates a modal state transition
pub fn validate_transition(from: ModalState, to: ModalState) -> Result<(), FormError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(FormError::IllegalTransition { from, to })
    }
}

/// Hooks the owning view registers on a modal
pub trait ModalListener: Send + Sync {
    /// A write succeeded; refresh the collection
    fn on_save(&self) {}

    /// The modal closed
    fn on_close(&self) {}
}

impl ModalListener for () {}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Draft failed validation; nothing was sent and the modal stays open
    Invalid(ValidationReport),
    /// Gateway accepted the record
    Saved,
    /// Gateway rejected the record
    Failed(GatewayError),
}

impl SubmitOutcome {
    /// Whether the record was persisted
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Create/edit/react form for one record kind
pub struct Modal<T, G, Tz = Local>
where
    T: FormRecord,
    G: PersistenceGateway<T>,
    Tz: TimeZone,
{
    gateway: G,
    listener: Arc<dyn ModalListener>,
    state: ModalState,
    draft: DraftState<T>,
    /// Defaults a create draft was seeded with
    seed: Option<T>,
    origin: Option<T>,
    form_error: bool,
    notifications: NotificationQueue,
    grouping: DailyGroupingView<T, Tz>,
    siblings: Arc<[T]>,
}

impl<T, G> Modal<T, G, Local>
where
    T: FormRecord,
    G: PersistenceGateway<T>,
{
    /// Closed modal writing through `gateway`
    #[must_use]
    pub fn new(gateway: G, config: &FormsConfig) -> Self {
        Self {
            gateway,
            listener: Arc::new(()),
            state: ModalState::Closed,
            draft: DraftState::new(),
            seed: None,
            origin: None,
            form_error: false,
            notifications: NotificationQueue::new(
                config.notification_capacity,
                config.auto_close(),
            ),
            grouping: DailyGroupingView::new(),
            siblings: Arc::from(Vec::new()),
        }
    }
}

impl<T, G, Tz> Modal<T, G, Tz>
where
    T: FormRecord,
    G: PersistenceGateway<T>,
    Tz: TimeZone,
{
    /// With save/close hooks
    #[inline]
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn ModalListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Group siblings by calendar day in `tz` instead of the local zone
    #[must_use]
    pub fn in_zone<Z: TimeZone>(self, tz: Z) -> Modal<T, G, Z> {
        Modal {
            gateway: self.gateway,
            listener: self.listener,
            state: self.state,
            draft: self.draft,
            seed: self.seed,
            origin: self.origin,
            form_error: self.form_error,
            notifications: self.notifications,
            grouping: DailyGroupingView::in_zone(tz),
            siblings: self.siblings,
        }
    }

    /// Open (or re-target) the modal
    ///
    /// `target` is the record to edit or react to; in create mode it is an
    /// optional set of pre-filled defaults. While the modal stays open on
    /// the same record identity, in-progress edits are kept; a create
    /// draft counts as the same only when its defaults are unchanged.
    pub fn open(&mut self, mode: ModalMode, target: Option<T>) -> Result<(), FormError> {
        if mode == ModalMode::React && !T::SUPPORTS_REACTION {
            return Err(FormError::UnsupportedMode {
                mode,
                kind: T::KIND,
            });
        }
        let to = ModalState::Editing(mode);
        validate_transition(self.state, to)?;

        let reopened = self.state == to;
        match (mode, target) {
            (ModalMode::Create, defaults) => {
                let defaults = defaults.unwrap_or_default();
                let same = reopened
                    && self.draft.source() == DraftSource::New
                    && self.seed.as_ref() == Some(&defaults);
                if !same {
                    self.draft = DraftState::with_defaults(defaults.clone());
                }
                self.seed = Some(defaults);
                self.origin = None;
            }
            (ModalMode::Edit, Some(record)) => {
                if !reopened {
                    self.draft = DraftState::new();
                }
                self.draft.sync_target(Some(&record));
                self.seed = None;
                self.origin = None;
            }
            (ModalMode::React, Some(origin)) => {
                let same = reopened
                    && origin.id().is_some()
                    && self.origin.as_ref().and_then(|o| o.id()) == origin.id();
                if !same {
                    self.draft = DraftState::with_defaults(T::reaction_draft(&origin));
                }
                self.seed = None;
                self.origin = Some(origin);
            }
            (mode, None) => return Err(FormError::MissingTarget(mode)),
        }

        if !reopened {
            self.form_error = false;
        }
        self.transition(to)?;
        tracing::info!(kind = %T::KIND, ?mode, source = ?self.draft.source(), "modal opened");
        Ok(())
    }

    /// Shallow-merge a patch into the draft
    pub fn update<I>(&mut self, patch: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = T::Field>,
    {
        match self.state {
            ModalState::Editing(_) => {
                self.draft.update(patch);
                Ok(())
            }
            state => Err(FormError::NotEditing(state)),
        }
    }

    /// Close without saving
    pub fn cancel(&mut self) -> Result<(), FormError> {
        tracing::debug!(kind = %T::KIND, state = ?self.state, "modal cancelled");
        self.close()
    }

    /// Validate the draft and, if valid, write it through the gateway
    ///
    /// An invalid draft leaves the modal open with field errors raised.
    /// Otherwise the modal closes once the gateway settles, whatever the
    /// outcome; `on_save` runs before `on_close` on success.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let ModalState::Editing(mode) = self.state else {
            return Err(FormError::NotEditing(self.state));
        };

        self.draft.draft_mut().normalize();
        let report = self.draft.draft().validate();
        if !report.is_valid() {
            self.form_error = true;
            tracing::warn!(
                kind = %T::KIND,
                missing = ?report.missing,
                "draft rejected by validation"
            );
            return Ok(SubmitOutcome::Invalid(report));
        }
        self.form_error = false;
        self.transition(ModalState::Submitting(mode))?;

        let result = match mode {
            ModalMode::Create => self.gateway.create(self.draft.draft()).await,
            ModalMode::Edit => self.gateway.update(self.draft.draft()).await,
            ModalMode::React => {
                let reaction = self.draft.draft().reaction_submission(self.origin.as_ref());
                self.gateway.create(&reaction).await
            }
        };

        let notification = settle_notification::<T>(&result);
        match &result {
            Ok(()) => {
                tracing::info!(kind = %T::KIND, ?mode, "record saved");
                self.listener.on_save();
            }
            Err(e) => {
                tracing::warn!(kind = %T::KIND, ?mode, error = %e, "record not saved");
            }
        }
        self.notifications.push(notification);
        self.close()?;

        Ok(match result {
            Ok(()) => SubmitOutcome::Saved,
            Err(e) => SubmitOutcome::Failed(e),
        })
    }

    /// Delete `record` through the gateway
    ///
    /// Records without an identifier are skipped. Success triggers
    /// `on_save`; no notification is posted either way.
    pub async fn delete(&self, record: &T) -> Result<(), GatewayError> {
        let Some(id) = record.id() else {
            tracing::debug!(kind = %T::KIND, "delete skipped, record has no identifier");
            return Ok(());
        };
        match self.gateway.delete(id).await {
            Ok(()) => {
                tracing::info!(kind = %T::KIND, %id, "record deleted");
                self.listener.on_save();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = %T::KIND, %id, error = %e, "delete failed");
                Err(e)
            }
        }
    }

    /// Whether `field` is highlighted
    ///
    /// Highlights appear only after a failed submit and follow the draft as
    /// it is corrected.
    #[must_use]
    pub fn field_error(&self, field: &str) -> bool {
        self.form_error && self.draft.draft().validate().flags(field)
    }

    /// Whether the last submit attempt failed validation
    #[inline]
    #[must_use]
    pub fn has_form_error(&self) -> bool {
        self.form_error
    }

    /// Replace the collection siblings are drawn from
    pub fn set_siblings(&mut self, records: impl Into<Arc<[T]>>) {
        self.siblings = records.into();
    }

    /// Records on the same calendar day as the draft
    pub fn daily_siblings(&self) -> Arc<[T]> {
        self.grouping
            .siblings(&self.siblings, self.draft.draft().primary_date())
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Current draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &T {
        self.draft.draft()
    }

    /// Record a reaction answers
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Option<&T> {
        self.origin.as_ref()
    }

    /// Queued notifications
    #[inline]
    #[must_use]
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Queued notifications, for dismissal and expiry
    #[inline]
    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Sibling view, for inspection
    #[inline]
    #[must_use]
    pub fn grouping(&self) -> &DailyGroupingView<T, Tz> {
        &self.grouping
    }

    fn close(&mut self) -> Result<(), FormError> {
        self.transition(ModalState::Closed)?;
        self.draft = DraftState::new();
        self.seed = None;
        self.origin = None;
        self.form_error = false;
        self.listener.on_close();
        Ok(())
    }

    fn transition(&mut self, to: ModalState) -> Result<(), FormError> {
        validate_transition(self.state, to)?;
        tracing::debug!(kind = %T::KIND, from = ?self.state, ?to, "modal transition");
        self.state = to;
        Ok(())
    }
}
