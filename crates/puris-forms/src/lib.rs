//! PURIS Forms - conflict-aware CRUD form model
//!
//! The form layer sits between a view and the backend:
//! - [`validation`]: required fields and cross-field consistency per record
//! - [`draft`]: the in-progress copy, re-seeded when the target changes
//! - [`grouping`]: same-day siblings of the draft, memoized
//! - [`gateway`]: the persistence seam and response-to-notification mapping
//! - [`modal`]: the create/edit/react lifecycle tying the above together
//! - [`notify`]: the bounded notification queue
//!
//! # Example
//!
//! ```rust
//! use puris_forms::prelude::*;
//! use puris_model::Delivery;
//!
//! let report = Delivery::default().validate();
//! assert!(!report.is_valid());
//! assert!(report.flags("ownMaterialNumber"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod grouping;
pub mod modal;
pub mod notify;
pub mod options;
pub mod validation;

pub use config::FormsConfig;
pub use draft::{DraftSource, DraftState};
pub use error::{FormError, GatewayError, CONFLICT_STATUS};
pub use gateway::{settle_notification, FormRecord, PersistenceGateway, CONFLICT_TITLE, ERROR_TITLE};
pub use grouping::{calendar_day, same_day, DailyGroupingView};
pub use modal::{
    allowed_transitions, validate_transition, Modal, ModalListener, ModalMode, ModalState,
    SubmitOutcome,
};
pub use notify::{Notification, NotificationQueue, Severity};
pub use validation::{effect_window_ordered, Validate, ValidationReport, ORDER_REFERENCE_FIELDS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
pub mod prelude {
    pub use crate::draft::DraftState;
    pub use crate::error::{FormError, GatewayError};
    pub use crate::gateway::{FormRecord, PersistenceGateway};
    pub use crate::modal::{Modal, ModalListener, ModalMode, ModalState, SubmitOutcome};
    pub use crate::notify::{Notification, Severity};
    pub use crate::validation::{Validate, ValidationReport};
    pub use crate::FormsConfig;
}
