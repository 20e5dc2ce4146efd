//! Stock snapshots

use crate::enums::UnitOfMeasurement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the relationship a stock belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockKind {
    /// Goods we sell
    Product,
    /// Goods we buy
    Material,
}

impl std::str::FromStr for StockKind {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(StockKind::Product),
            "material" => Ok(StockKind::Material),
            other => Err(crate::ModelError::unknown_key("stock kind", other)),
        }
    }
}

/// Stock of a product held for a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductStock {
    pub uuid: Option<Uuid>,
    pub material_number: String,
    pub partner_bpnl: String,
    pub stock_location_bpns: String,
    pub stock_location_bpna: Option<String>,
    pub quantity: f64,
    pub measurement_unit: Option<UnitOfMeasurement>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub customer_order_number: Option<String>,
    pub customer_order_position_number: Option<String>,
    pub supplier_order_number: Option<String>,
}

/// Stock of a material received from a supplier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialStock {
    pub uuid: Option<Uuid>,
    pub material_number: String,
    pub partner_bpnl: String,
    pub stock_location_bpns: String,
    pub stock_location_bpna: Option<String>,
    pub quantity: f64,
    pub measurement_unit: Option<UnitOfMeasurement>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub customer_order_number: Option<String>,
    pub customer_order_position_number: Option<String>,
    pub supplier_order_number: Option<String>,
}
