//! Field validators
//!
//! A draft is submittable when every field its record kind requires is
//! present and the fields are mutually consistent. Presence follows the
//! dashboard's truthiness rule: a quantity of zero or an empty string is
//! as good as absent.

use chrono::{DateTime, Utc};
use puris_model::{DemandCapacityNotification, Delivery, OrderReferenced, Production};

/// Wire names of the order reference fields, highlighted together
pub const ORDER_REFERENCE_FIELDS: [&str; 3] = [
    "customerOrderNumber",
    "customerOrderPositionNumber",
    "supplierOrderNumber",
];

/// Outcome of validating one draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required fields that are missing, by wire name
    pub missing: Vec<&'static str>,
    /// Order reference is partially filled
    pub order_reference_invalid: bool,
    /// End of effect is not after start of effect
    pub end_before_start: bool,
}

impl ValidationReport {
    /// Whether the draft may be submitted
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty() && !self.order_reference_invalid && !self.end_before_start
    }

    /// Whether the named field should be highlighted
    #[must_use]
    pub fn flags(&self, field: &str) -> bool {
        self.missing.iter().any(|m| *m == field)
            || (self.order_reference_invalid && ORDER_REFERENCE_FIELDS.iter().any(|f| *f == field))
            || (self.end_before_start && field == "expectedEndDateOfEffect")
    }

    fn require(&mut self, field: &'static str, present: bool) -> &mut Self {
        if !present {
            self.missing.push(field);
        }
        self
    }
}

/// Validation contract per record kind
pub trait Validate {
    /// Check required fields and consistency
    fn validate(&self) -> ValidationReport;

    /// Boolean verdict
    fn is_submittable(&self) -> bool {
        self.validate().is_valid()
    }
}

#[inline]
fn text(value: Option<&String>) -> bool {
    value.is_some_and(|s| !s.is_empty())
}

#[inline]
fn quantity(value: Option<f64>) -> bool {
    value.is_some_and(|q| q != 0.0 && !q.is_nan())
}

impl Validate for Delivery {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report
            .require("ownMaterialNumber", text(self.own_material_number.as_ref()))
            .require("originBpns", text(self.origin_bpns.as_ref()))
            .require("partnerBpnl", text(self.partner_bpnl.as_ref()))
            .require("destinationBpns", text(self.destination_bpns.as_ref()))
            .require("quantity", quantity(self.quantity))
            .require("measurementUnit", self.measurement_unit.is_some())
            .require("dateOfDeparture", self.date_of_departure.is_some())
            .require("dateOfArrival", self.date_of_arrival.is_some());
        report.order_reference_invalid = !self.order_reference().is_valid();
        report
    }
}

impl Validate for Production {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report
            .require(
                "estimatedTimeOfCompletion",
                self.estimated_time_of_completion.is_some(),
            )
            .require("quantity", quantity(self.quantity))
            .require("measurementUnit", self.measurement_unit.is_some())
            .require("partner", self.partner.is_some());
        report.order_reference_invalid = !self.order_reference().is_valid();
        report
    }
}

impl Validate for DemandCapacityNotification {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report
            .require("partnerBpnl", text(self.partner_bpnl.as_ref()))
            .require("effect", self.effect.is_some())
            .require("status", self.status.is_some())
            .require("startDateOfEffect", self.start_date_of_effect.is_some());
        report.end_before_start =
            !effect_window_ordered(self.start_date_of_effect, self.expected_end_date_of_effect);
        report
    }
}

/// Start strictly before end, or no end given
///
/// A missing start is reported as a missing field, not as disorder.
#[must_use]
pub fn effect_window_ordered(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start < end,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use puris_model::{Effect, NotificationStatus, Partner, UnitOfMeasurement};

    fn complete_delivery() -> Delivery {
        Delivery {
            own_material_number: Some("MNR-1".to_string()),
            origin_bpns: Some("BPNS-O".to_string()),
            partner_bpnl: Some("BPNL-P".to_string()),
            destination_bpns: Some("BPNS-D".to_string()),
            quantity: Some(10.0),
            measurement_unit: Some(UnitOfMeasurement::Piece),
            date_of_departure: Some(Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()),
            date_of_arrival: Some(Utc.with_ymd_and_hms(2024, 1, 6, 8, 0, 0).unwrap()),
            ..Delivery::default()
        }
    }

    #[test]
    fn complete_delivery_is_submittable() {
        assert!(complete_delivery().is_submittable());
    }

    #[test]
    fn delivery_reports_each_missing_field() {
        let report = Delivery::default().validate();
        assert_eq!(report.missing.len(), 8);
        assert!(report.flags("originBpns"));
        assert!(!report.order_reference_invalid);
    }

    #[test]
    fn zero_quantity_counts_as_missing() {
        let delivery = Delivery {
            quantity: Some(0.0),
            ..complete_delivery()
        };
        assert_eq!(delivery.validate().missing, vec!["quantity"]);
    }

    #[test]
    fn partial_order_reference_flags_all_three() {
        let delivery = Delivery {
            customer_order_number: Some("A".to_string()),
            customer_order_position_number: Some("1".to_string()),
            supplier_order_number: Some(String::new()),
            ..complete_delivery()
        };
        let report = delivery.validate();
        assert!(!report.is_valid());
        for field in ORDER_REFERENCE_FIELDS {
            assert!(report.flags(field));
        }
        assert!(!report.flags("quantity"));
    }

    #[test]
    fn production_requires_partner() {
        let production = Production {
            estimated_time_of_completion: Some(Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()),
            quantity: Some(3.0),
            measurement_unit: Some(UnitOfMeasurement::Kilogram),
            ..Production::default()
        };
        assert_eq!(production.validate().missing, vec!["partner"]);

        let production = Production {
            partner: Some(Partner::new("BPNL1", "P")),
            ..production
        };
        assert!(production.is_submittable());
    }

    #[test]
    fn notification_end_must_follow_start() {
        let notification = DemandCapacityNotification {
            partner_bpnl: Some("BPNL1".to_string()),
            effect: Some(Effect::CapacityReduction),
            status: Some(NotificationStatus::Open),
            start_date_of_effect: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            expected_end_date_of_effect: Some(Utc.with_ymd_and_hms(2024, 1, 30, 0, 0, 0).unwrap()),
            ..DemandCapacityNotification::default()
        };
        let report = notification.validate();
        assert!(report.end_before_start);
        assert!(report.flags("expectedEndDateOfEffect"));

        let open_ended = DemandCapacityNotification {
            expected_end_date_of_effect: None,
            ..notification
        };
        assert!(open_ended.is_submittable());
    }

    #[test]
    fn equal_start_and_end_is_rejected() {
        let instant = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert!(!effect_window_ordered(Some(instant), Some(instant)));
        assert!(effect_window_ordered(None, Some(instant)));
    }
}
