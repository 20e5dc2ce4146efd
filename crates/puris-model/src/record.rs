//! Uniform view over editable records

use crate::error::ModelError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

/// Kind of editable record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// Shipment between two sites
    Delivery,
    /// Planned production output
    Production,
    /// Demand or capacity change announcement
    DemandCapacityNotification,
}

impl RecordKind {
    /// Name used in titles and messages
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Delivery => "Delivery",
            RecordKind::Production => "Production",
            RecordKind::DemandCapacityNotification => "Demand Capacity Notification",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(RecordKind::Delivery),
            "production" => Ok(RecordKind::Production),
            "demand-capacity-notification" | "notification" => {
                Ok(RecordKind::DemandCapacityNotification)
            }
            other => Err(ModelError::UnknownRecordKind(other.to_string())),
        }
    }
}

/// A record that can be drafted, validated and persisted
///
/// Every attribute of an implementor is optional so the same type serves
/// as both the persisted record and the in-progress draft.
pub trait Record:
    Clone + Default + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// One field assignment; a patch is a sequence of these
    type Field: Clone + Debug + Send + Sync + 'static;

    /// Record kind
    const KIND: RecordKind;

    /// Backend identifier, absent before creation
    fn id(&self) -> Option<Uuid>;

    /// Date used for same-day grouping
    fn primary_date(&self) -> Option<DateTime<Utc>>;

    /// Overwrite one field, clearing it when the value is `None`
    fn assign(&mut self, field: Self::Field);

    /// Apply a sequence of assignments in order
    fn apply<I>(&mut self, patch: I)
    where
        I: IntoIterator<Item = Self::Field>,
    {
        for field in patch {
            self.assign(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn record_kind_labels() {
        assert_eq!(RecordKind::Delivery.to_string(), "Delivery");
        assert_eq!(
            RecordKind::DemandCapacityNotification.label(),
            "Demand Capacity Notification"
        );
    }

    #[test]
    fn record_kind_parses() {
        assert_eq!(RecordKind::from_str("production").unwrap(), RecordKind::Production);
        assert_eq!(
            RecordKind::from_str("notification").unwrap(),
            RecordKind::DemandCapacityNotification
        );
        assert!(RecordKind::from_str("stock").is_err());
    }
}
