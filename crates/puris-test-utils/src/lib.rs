//! Testing utilities for the PURIS workspace
//!
//! Shared fixtures: complete records, reference data and timestamps.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use puris_model::{
    DemandCapacityNotification, Delivery, Effect, Incoterm, LeadingRootCause, Material,
    NotificationStatus, Partner, Production, Site, UnitOfMeasurement,
};
use uuid::Uuid;

pub const OWN_BPNS: &str = "BPNS000004711DMY";
pub const CUSTOMER_BPNL: &str = "BPNL4444444444XX";
pub const CUSTOMER_BPNS: &str = "BPNS4444444444XX";
pub const SUPPLIER_BPNL: &str = "BPNL1234567890ZZ";
pub const MATERIAL_NUMBER: &str = "MNR-7307-AU340474.001";

/// UTC timestamp shorthand
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn customer() -> Partner {
    Partner::new(CUSTOMER_BPNL, "Control Unit Creator Inc.")
        .with_site(Site::new(CUSTOMER_BPNS, "Control Unit Creator Production Site"))
}

pub fn supplier() -> Partner {
    Partner::new(SUPPLIER_BPNL, "Semiconductor Supplier Inc.")
}

pub fn partners() -> Vec<Partner> {
    vec![customer(), supplier()]
}

pub fn material() -> Material {
    Material {
        material_number_supplier: Some(MATERIAL_NUMBER.to_string()),
        material_number_customer: Some("MNR-4177-S".to_string()),
        name: Some("Semiconductor".to_string()),
        product_flag: true,
        ..Material::default()
    }
}

/// Delivery draft passing validation
pub fn valid_delivery() -> Delivery {
    let mut delivery = Delivery::outgoing(MATERIAL_NUMBER, OWN_BPNS);
    delivery.partner_bpnl = Some(CUSTOMER_BPNL.to_string());
    delivery.destination_bpns = Some(CUSTOMER_BPNS.to_string());
    delivery.quantity = Some(20.0);
    delivery.measurement_unit = Some(UnitOfMeasurement::Piece);
    delivery.incoterm = Some(Incoterm::Dap);
    delivery.tracking_number = Some("TRK-001".to_string());
    delivery.date_of_departure = Some(at(2024, 1, 5, 8, 0));
    delivery.date_of_arrival = Some(at(2024, 1, 7, 12, 0));
    delivery
}

/// Persisted delivery departing at the given time
pub fn delivery_departing(departure: DateTime<Utc>) -> Delivery {
    Delivery {
        uuid: Some(Uuid::new_v4()),
        date_of_departure: Some(departure),
        ..valid_delivery()
    }
}

/// Production draft passing validation
pub fn valid_production() -> Production {
    let mut production = Production::planned(material(), OWN_BPNS);
    production.partner = Some(customer());
    production.quantity = Some(100.0);
    production.measurement_unit = Some(UnitOfMeasurement::Piece);
    production.estimated_time_of_completion = Some(at(2024, 1, 5, 14, 0));
    production
}

/// Persisted production completing at the given time
pub fn production_completing(completion: DateTime<Utc>) -> Production {
    Production {
        uuid: Some(Uuid::new_v4()),
        estimated_time_of_completion: Some(completion),
        ..valid_production()
    }
}

/// Notification draft passing validation
pub fn valid_notification() -> DemandCapacityNotification {
    DemandCapacityNotification {
        partner_bpnl: Some(SUPPLIER_BPNL.to_string()),
        effect: Some(Effect::DemandReduction),
        status: Some(NotificationStatus::Open),
        leading_root_cause: Some(LeadingRootCause::ProductionIncident),
        start_date_of_effect: Some(at(2024, 2, 1, 0, 0)),
        affected_material_numbers: vec![MATERIAL_NUMBER.to_string()],
        text: Some("Line stop at main plant".to_string()),
        ..DemandCapacityNotification::default()
    }
}

/// Notification already stored by the backend
pub fn stored_notification() -> DemandCapacityNotification {
    DemandCapacityNotification {
        notification_id: Some(Uuid::new_v4()),
        affected_sites_bpns_sender: vec![OWN_BPNS.to_string()],
        ..valid_notification()
    }
}
