//! Deliveries between an origin and a destination site

use crate::enums::{Incoterm, TransitEventType, UnitOfMeasurement};
use crate::order_reference::{OrderReference, OrderReferenced};
use crate::record::{Record, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shipment of material from an origin site to a destination site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Delivery {
    pub uuid: Option<Uuid>,
    pub partner_bpnl: Option<String>,
    pub own_material_number: Option<String>,
    pub quantity: Option<f64>,
    pub measurement_unit: Option<UnitOfMeasurement>,
    pub tracking_number: Option<String>,
    pub incoterm: Option<Incoterm>,

    pub customer_order_number: Option<String>,
    pub customer_order_position_number: Option<String>,
    pub supplier_order_number: Option<String>,

    pub destination_bpns: Option<String>,
    pub destination_bpna: Option<String>,
    pub origin_bpns: Option<String>,
    pub origin_bpna: Option<String>,

    pub date_of_departure: Option<DateTime<Utc>>,
    pub date_of_arrival: Option<DateTime<Utc>>,
    pub departure_type: Option<TransitEventType>,
    pub arrival_type: Option<TransitEventType>,
    pub has_departed: Option<bool>,
    pub has_arrived: Option<bool>,

    /// Received from a partner rather than entered locally
    pub reported: Option<bool>,
}

/// Single field assignment on a [`Delivery`]
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryField {
    PartnerBpnl(Option<String>),
    OwnMaterialNumber(Option<String>),
    Quantity(Option<f64>),
    MeasurementUnit(Option<UnitOfMeasurement>),
    TrackingNumber(Option<String>),
    Incoterm(Option<Incoterm>),
    CustomerOrderNumber(Option<String>),
    CustomerOrderPositionNumber(Option<String>),
    SupplierOrderNumber(Option<String>),
    DestinationBpns(Option<String>),
    DestinationBpna(Option<String>),
    OriginBpns(Option<String>),
    OriginBpna(Option<String>),
    DateOfDeparture(Option<DateTime<Utc>>),
    DateOfArrival(Option<DateTime<Utc>>),
    DepartureType(Option<TransitEventType>),
    ArrivalType(Option<TransitEventType>),
}

impl Record for Delivery {
    type Field = DeliveryField;

    const KIND: RecordKind = RecordKind::Delivery;

    fn id(&self) -> Option<Uuid> {
        self.uuid
    }

    fn primary_date(&self) -> Option<DateTime<Utc>> {
        self.date_of_departure
    }

    fn assign(&mut self, field: DeliveryField) {
        match field {
            DeliveryField::PartnerBpnl(v) => self.partner_bpnl = v,
            DeliveryField::OwnMaterialNumber(v) => self.own_material_number = v,
            DeliveryField::Quantity(v) => self.quantity = v,
            DeliveryField::MeasurementUnit(v) => self.measurement_unit = v,
            DeliveryField::TrackingNumber(v) => self.tracking_number = v,
            DeliveryField::Incoterm(v) => self.incoterm = v,
            DeliveryField::CustomerOrderNumber(v) => self.customer_order_number = v,
            DeliveryField::CustomerOrderPositionNumber(v) => {
                self.customer_order_position_number = v;
            }
            DeliveryField::SupplierOrderNumber(v) => self.supplier_order_number = v,
            DeliveryField::DestinationBpns(v) => self.destination_bpns = v,
            DeliveryField::DestinationBpna(v) => self.destination_bpna = v,
            DeliveryField::OriginBpns(v) => self.origin_bpns = v,
            DeliveryField::OriginBpna(v) => self.origin_bpna = v,
            DeliveryField::DateOfDeparture(v) => self.date_of_departure = v,
            DeliveryField::DateOfArrival(v) => self.date_of_arrival = v,
            DeliveryField::DepartureType(v) => self.departure_type = v,
            DeliveryField::ArrivalType(v) => self.arrival_type = v,
        }
    }
}

impl OrderReferenced for Delivery {
    fn order_reference(&self) -> OrderReference<'_> {
        OrderReference::new(
            self.customer_order_number.as_deref(),
            self.customer_order_position_number.as_deref(),
            self.supplier_order_number.as_deref(),
        )
    }

    fn order_reference_fields_mut(&mut self) -> [&mut Option<String>; 3] {
        [
            &mut self.customer_order_number,
            &mut self.customer_order_position_number,
            &mut self.supplier_order_number,
        ]
    }
}

impl Delivery {
    /// Draft for a new outgoing delivery of a material from one of our sites
    #[must_use]
    pub fn outgoing(
        own_material_number: impl Into<String>,
        origin_bpns: impl Into<String>,
    ) -> Self {
        Self {
            own_material_number: Some(own_material_number.into()),
            origin_bpns: Some(origin_bpns.into()),
            departure_type: Some(TransitEventType::EstimatedDeparture),
            arrival_type: Some(TransitEventType::EstimatedArrival),
            ..Self::default()
        }
    }

    /// Quantity with unit label, e.g. `"20 kg"`
    #[must_use]
    pub fn quantity_display(&self) -> String {
        match (self.quantity, self.measurement_unit) {
            (Some(q), Some(u)) => format!("{q} {}", u.label()),
            (Some(q), None) => q.to_string(),
            _ => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn assign_overwrites_only_named_field() {
        let mut delivery = Delivery::outgoing("MNR-7307-AU340474.001", "BPNS000000000001");
        delivery.apply([
            DeliveryField::Quantity(Some(5.0)),
            DeliveryField::PartnerBpnl(Some("BPNL0000000000PP".to_string())),
        ]);

        assert_eq!(delivery.quantity, Some(5.0));
        assert_eq!(delivery.partner_bpnl.as_deref(), Some("BPNL0000000000PP"));
        assert_eq!(delivery.origin_bpns.as_deref(), Some("BPNS000000000001"));

        delivery.assign(DeliveryField::Quantity(None));
        assert_eq!(delivery.quantity, None);
    }

    #[test]
    fn primary_date_is_departure() {
        let departure = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let delivery = Delivery {
            date_of_departure: Some(departure),
            ..Delivery::default()
        };
        assert_eq!(delivery.primary_date(), Some(departure));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = r#"{
            "uuid": "1f0b8c7e-2d3a-4b5c-8d9e-0f1a2b3c4d5e",
            "partnerBpnl": "BPNL1",
            "ownMaterialNumber": "MNR-1",
            "quantity": 20,
            "measurementUnit": "unit:piece",
            "incoterm": "DAP",
            "dateOfDeparture": "2024-01-05T08:00:00Z",
            "departureType": "estimated-departure"
        }"#;
        let delivery: Delivery = serde_json::from_str(json).unwrap();
        assert_eq!(delivery.quantity, Some(20.0));
        assert_eq!(delivery.measurement_unit, Some(UnitOfMeasurement::Piece));
        assert_eq!(delivery.incoterm, Some(Incoterm::Dap));
        assert_eq!(delivery.departure_type, Some(TransitEventType::EstimatedDeparture));

        let back = serde_json::to_value(&delivery).unwrap();
        assert_eq!(back["ownMaterialNumber"], "MNR-1");
    }

    #[test]
    fn normalize_maps_empty_strings_to_absent() {
        let mut delivery = Delivery {
            customer_order_number: Some(String::new()),
            customer_order_position_number: Some(String::new()),
            supplier_order_number: Some("S-1".to_string()),
            ..Delivery::default()
        };
        delivery.normalize_order_reference();
        assert_eq!(delivery.customer_order_number, None);
        assert_eq!(delivery.customer_order_position_number, None);
        assert_eq!(delivery.supplier_order_number.as_deref(), Some("S-1"));
    }

    #[test]
    fn quantity_display_uses_unit_label() {
        let delivery = Delivery {
            quantity: Some(20.0),
            measurement_unit: Some(UnitOfMeasurement::Kilogram),
            ..Delivery::default()
        };
        assert_eq!(delivery.quantity_display(), "20 kg");
        assert_eq!(Delivery::default().quantity_display(), "-");
    }
}
