//! PURIS Model - supply-chain exchange records
//!
//! The records exchanged with the PURIS backend:
//! - Deliveries, planned productions and demand/capacity notifications
//! - Partner, site and material reference data
//! - Stock snapshots
//! - Read-only EDC catalog, negotiation and transfer records
//!
//! Every editable record implements [`Record`], which gives the form layer a
//! uniform view of its identity, its primary date and its typed field patch.
//!
//! # Example
//!
//! ```rust
//! use puris_model::{Delivery, DeliveryField, Record};
//!
//! let mut delivery = Delivery::default();
//! delivery.assign(DeliveryField::Quantity(Some(20.0)));
//! assert_eq!(delivery.quantity, Some(20.0));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod delivery;
pub mod edc;
pub mod enums;
pub mod error;
pub mod notification;
pub mod order_reference;
pub mod partner;
pub mod production;
pub mod record;
pub mod stock;

pub use delivery::{Delivery, DeliveryField};
pub use edc::{CatalogOffer, ContractNegotiation, TransferProcess};
pub use enums::{
    Effect, Incoterm, LeadingRootCause, NotificationStatus, TransitEventType, UnitOfMeasurement,
};
pub use error::ModelError;
pub use notification::{DemandCapacityNotification, NotificationField};
pub use order_reference::{is_valid_order_reference, OrderReference, OrderReferenced};
pub use partner::{Address, Material, Partner, Site};
pub use production::{Production, ProductionField};
pub use record::{Record, RecordKind};
pub use stock::{MaterialStock, ProductStock, StockKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
