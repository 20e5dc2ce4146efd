//! Demand and capacity notifications

use crate::enums::{Effect, LeadingRootCause, NotificationStatus};
use crate::record::{Record, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Announcement of a demand or capacity change towards a partner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemandCapacityNotification {
    pub notification_id: Option<Uuid>,
    /// Notification this one reacts to
    pub related_notification_id: Option<Uuid>,
    pub source_notification_id: Option<Uuid>,
    pub partner_bpnl: Option<String>,
    pub leading_root_cause: Option<LeadingRootCause>,
    pub effect: Option<Effect>,
    pub status: Option<NotificationStatus>,
    pub start_date_of_effect: Option<DateTime<Utc>>,
    pub expected_end_date_of_effect: Option<DateTime<Utc>>,
    pub content_changed_at: Option<DateTime<Utc>>,
    pub affected_material_numbers: Vec<String>,
    pub affected_sites_bpns_sender: Vec<String>,
    pub affected_sites_bpns_recipient: Vec<String>,
    pub text: Option<String>,
    pub reported: Option<bool>,
}

/// Single field assignment on a [`DemandCapacityNotification`]
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationField {
    /// Setting a partner also clears affected materials and recipient sites
    PartnerBpnl(Option<String>),
    LeadingRootCause(Option<LeadingRootCause>),
    Effect(Option<Effect>),
    Status(Option<NotificationStatus>),
    StartDateOfEffect(Option<DateTime<Utc>>),
    ExpectedEndDateOfEffect(Option<DateTime<Utc>>),
    AffectedMaterialNumbers(Vec<String>),
    AffectedSitesBpnsSender(Vec<String>),
    AffectedSitesBpnsRecipient(Vec<String>),
    Text(Option<String>),
}

impl Record for DemandCapacityNotification {
    type Field = NotificationField;

    const KIND: RecordKind = RecordKind::DemandCapacityNotification;

    fn id(&self) -> Option<Uuid> {
        self.notification_id
    }

    fn primary_date(&self) -> Option<DateTime<Utc>> {
        self.start_date_of_effect
    }

    fn assign(&mut self, field: NotificationField) {
        match field {
            NotificationField::PartnerBpnl(v) => {
                // materials and recipient sites belong to the previous partner
                if v.is_some() && v != self.partner_bpnl {
                    self.affected_material_numbers.clear();
                    self.affected_sites_bpns_recipient.clear();
                }
                self.partner_bpnl = v;
            }
            NotificationField::LeadingRootCause(v) => self.leading_root_cause = v,
            NotificationField::Effect(v) => self.effect = v,
            NotificationField::Status(v) => self.status = v,
            NotificationField::StartDateOfEffect(v) => self.start_date_of_effect = v,
            NotificationField::ExpectedEndDateOfEffect(v) => self.expected_end_date_of_effect = v,
            NotificationField::AffectedMaterialNumbers(v) => self.affected_material_numbers = v,
            NotificationField::AffectedSitesBpnsSender(v) => self.affected_sites_bpns_sender = v,
            NotificationField::AffectedSitesBpnsRecipient(v) => {
                self.affected_sites_bpns_recipient = v;
            }
            NotificationField::Text(v) => self.text = v,
        }
    }
}

impl DemandCapacityNotification {
    /// Draft answering `origin`
    ///
    /// Keeps effect, cause, status, dates and text; drops everything tied to
    /// the origin's partner.
    #[must_use]
    pub fn reaction_to(origin: &Self) -> Self {
        Self {
            partner_bpnl: None,
            affected_material_numbers: Vec::new(),
            affected_sites_bpns_recipient: Vec::new(),
            affected_sites_bpns_sender: Vec::new(),
            ..origin.clone()
        }
    }

    /// Copy suitable for the create endpoint when reacting to `origin_id`
    #[must_use]
    pub fn as_reaction(&self, origin_id: Option<Uuid>) -> Self {
        Self {
            notification_id: None,
            related_notification_id: origin_id,
            ..self.clone()
        }
    }

    /// Whether the notification is still open
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.status, Some(NotificationStatus::Open))
    }
}
