//! Persistence gateway
//!
//! The seam between the form model and the backend. Implementations map
//! create/update/delete onto the backend's endpoints and classify failures
//! into [`GatewayError`]; this module turns every settled call into the
//! notification the user sees.

use crate::error::GatewayError;
use crate::notify::Notification;
use crate::validation::Validate;
use async_trait::async_trait;
use puris_model::{
    DemandCapacityNotification, Delivery, OrderReferenced, Production, Record,
};
use uuid::Uuid;

/// Title of every conflict notification
pub const CONFLICT_TITLE: &str = "Conflict";

/// Title of every non-conflict failure notification
pub const ERROR_TITLE: &str = "Error requesting update";

/// Backend operations for one record kind
#[async_trait]
pub trait PersistenceGateway<T: Record>: Send + Sync {
    /// Store a new record
    async fn create(&self, record: &T) -> Result<(), GatewayError>;

    /// Replace an existing record
    async fn update(&self, record: &T) -> Result<(), GatewayError>;

    /// Remove a record by identifier
    async fn delete(&self, id: Uuid) -> Result<(), GatewayError>;
}

#[async_trait]
impl<T, G> PersistenceGateway<T> for std::sync::Arc<G>
where
    T: Record,
    G: PersistenceGateway<T> + ?Sized,
{
    async fn create(&self, record: &T) -> Result<(), GatewayError> {
        (**self).create(record).await
    }

    async fn update(&self, record: &T) -> Result<(), GatewayError> {
        (**self).update(record).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        (**self).delete(id).await
    }
}

/// Record kinds editable through a modal
pub trait FormRecord: Record + Validate {
    /// Description of a 409 response
    const CONFLICT_MESSAGE: &'static str;
    /// Title of the success notification
    const SUCCESS_TITLE: &'static str;
    /// Description of the success notification
    const SUCCESS_DESCRIPTION: &'static str;
    /// Whether the record can be answered with a reaction
    const SUPPORTS_REACTION: bool = false;

    /// Clean up user input before validation
    fn normalize(&mut self) {}

    /// Draft seeded for reacting to `origin`
    fn reaction_draft(origin: &Self) -> Self {
        origin.clone()
    }

    /// Record to submit when reacting to `origin`
    fn reaction_submission(&self, _origin: Option<&Self>) -> Self {
        self.clone()
    }
}

impl FormRecord for Delivery {
    const CONFLICT_MESSAGE: &'static str = "Delivery conflicting with an existing one";
    const SUCCESS_TITLE: &'static str = "Delivery Added";
    const SUCCESS_DESCRIPTION: &'static str = "The Delivery has been saved";

    fn normalize(&mut self) {
        self.normalize_order_reference();
    }
}

impl FormRecord for Production {
    const CONFLICT_MESSAGE: &'static str = "Date conflicting with another Production";
    const SUCCESS_TITLE: &'static str = "Production Created";
    const SUCCESS_DESCRIPTION: &'static str = "The Production has been saved successfully";

    fn normalize(&mut self) {
        self.normalize_order_reference();
    }
}

impl FormRecord for DemandCapacityNotification {
    const CONFLICT_MESSAGE: &'static str =
        "Demand Capacity Notification conflicting with an existing one";
    const SUCCESS_TITLE: &'static str = "Notification Saved";
    const SUCCESS_DESCRIPTION: &'static str = "Notification has been saved";
    const SUPPORTS_REACTION: bool = true;

    fn reaction_draft(origin: &Self) -> Self {
        DemandCapacityNotification::reaction_to(origin)
    }

    fn reaction_submission(&self, origin: Option<&Self>) -> Self {
        self.as_reaction(origin.and_then(|o| o.id()))
    }
}

/// Notification for a settled gateway call
#[must_use]
pub fn settle_notification<T: FormRecord>(result: &Result<(), GatewayError>) -> Notification {
    match result {
        Ok(()) => Notification::success(T::SUCCESS_TITLE, T::SUCCESS_DESCRIPTION),
        Err(e) if e.is_conflict() => Notification::error(CONFLICT_TITLE, T::CONFLICT_MESSAGE),
        Err(e) => Notification::error(ERROR_TITLE, e.message()),
    }
}
