//! Planned production at one of our sites

use crate::enums::UnitOfMeasurement;
use crate::order_reference::{OrderReference, OrderReferenced};
use crate::partner::{Material, Partner};
use crate::record::{Record, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Planned output of a material for a partner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Production {
    pub uuid: Option<Uuid>,
    pub partner: Option<Partner>,
    pub material: Option<Material>,
    pub production_site_bpns: Option<String>,
    pub estimated_time_of_completion: Option<DateTime<Utc>>,
    pub quantity: Option<f64>,
    pub measurement_unit: Option<UnitOfMeasurement>,

    pub customer_order_number: Option<String>,
    pub customer_order_position_number: Option<String>,
    pub supplier_order_number: Option<String>,

    pub reported: Option<bool>,
}

/// Single field assignment on a [`Production`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProductionField {
    Partner(Option<Partner>),
    Material(Option<Material>),
    ProductionSiteBpns(Option<String>),
    EstimatedTimeOfCompletion(Option<DateTime<Utc>>),
    Quantity(Option<f64>),
    MeasurementUnit(Option<UnitOfMeasurement>),
    CustomerOrderNumber(Option<String>),
    CustomerOrderPositionNumber(Option<String>),
    SupplierOrderNumber(Option<String>),
}

impl Record for Production {
    type Field = ProductionField;

    const KIND: RecordKind = RecordKind::Production;

    fn id(&self) -> Option<Uuid> {
        self.uuid
    }

    fn primary_date(&self) -> Option<DateTime<Utc>> {
        self.estimated_time_of_completion
    }

    fn assign(&mut self, field: ProductionField) {
        match field {
            ProductionField::Partner(v) => self.partner = v,
            ProductionField::Material(v) => self.material = v,
            ProductionField::ProductionSiteBpns(v) => self.production_site_bpns = v,
            ProductionField::EstimatedTimeOfCompletion(v) => self.estimated_time_of_completion = v,
            ProductionField::Quantity(v) => self.quantity = v,
            ProductionField::MeasurementUnit(v) => self.measurement_unit = v,
            ProductionField::CustomerOrderNumber(v) => self.customer_order_number = v,
            ProductionField::CustomerOrderPositionNumber(v) => {
                self.customer_order_position_number = v;
            }
            ProductionField::SupplierOrderNumber(v) => self.supplier_order_number = v,
        }
    }
}

impl OrderReferenced for Production {
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

impl Production {
    /// Draft for a planned production of a material at one of our sites
    #[must_use]
    pub fn planned(material: Material, production_site_bpns: impl Into<String>) -> Self {
        Self {
            material: Some(material),
            production_site_bpns: Some(production_site_bpns.into()),
            ..Self::default()
        }
    }

    /// Supplier-side material number, used to look up partners
    #[must_use]
    pub fn material_number(&self) -> Option<&str> {
        self.material
            .as_ref()
            .and_then(|m| m.material_number_supplier.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn primary_date_is_completion() {
        let completion = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let production = Production {
            estimated_time_of_completion: Some(completion),
            ..Production::default()
        };
        assert_eq!(production.primary_date(), Some(completion));
    }

    #[test]
    fn planned_production_keeps_material() {
        let material = Material {
            material_number_supplier: Some("MNR-8101-ID146955.001".to_string()),
            ..Material::default()
        };
        let mut production = Production::planned(material, "BPNS1");
        production.assign(ProductionField::Quantity(Some(100.0)));

        assert_eq!(production.material_number(), Some("MNR-8101-ID146955.001"));
        assert_eq!(production.production_site_bpns.as_deref(), Some("BPNS1"));
        assert_eq!(production.quantity, Some(100.0));
    }

    #[test]
    fn partner_is_nested_object_on_wire() {
        let production = Production {
            partner: Some(Partner::new("BPNL1", "Customer")),
            ..Production::default()
        };
        let json = serde_json::to_value(&production).unwrap();
        assert_eq!(json["partner"]["bpnl"], "BPNL1");
        assert!(json["estimatedTimeOfCompletion"].is_null());
    }
}
