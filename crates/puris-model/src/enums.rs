//! Keyed enumerations shared with the backend
//!
//! Each variant has a stable wire key (used by serde) and a human label for
//! display. Keys round-trip through [`std::str::FromStr`].

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

macro_rules! keyed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire key
            #[inline]
            #[must_use]
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Human-readable label
            #[inline]
            #[must_use]
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err(ModelError::unknown_key($kind, other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

keyed_enum! {
    /// Unit of measurement for quantities
    UnitOfMeasurement, "unit of measurement" {
        Piece => "unit:piece", "pieces";
        Kilogram => "unit:kilogram", "kg";
        Gram => "unit:gram", "g";
        KilowattHour => "unit:kilowattHour", "kWh";
        Litre => "unit:litre", "l";
        Metre => "unit:metre", "m";
        CubicMetre => "unit:cubicMetre", "m\u{b3}";
        SquareMetre => "unit:squareMetre", "m\u{b2}";
        Centimetre => "unit:centimetre", "cm";
        Millimetre => "unit:millimetre", "mm";
        MegawattHour => "unit:megawattHour", "MWh";
        Ton => "unit:ton", "t";
        Second => "unit:secondUnitOfTime", "s";
    }
}

keyed_enum! {
    /// ICC incoterms used on deliveries
    Incoterm, "incoterm" {
        Exw => "EXW", "Ex Works";
        Fca => "FCA", "Free Carrier";
        Fas => "FAS", "Free Alongside Ship";
        Fob => "FOB", "Free On Board";
        Cfr => "CFR", "Cost and Freight";
        Cif => "CIF", "Cost, Insurance and Freight";
        Cpt => "CPT", "Carriage Paid To";
        Cip => "CIP", "Carriage and Insurance Paid To";
        Dap => "DAP", "Delivered At Place";
        Dpu => "DPU", "Delivered At Place Unloaded";
        Ddp => "DDP", "Delivered Duty Paid";
    }
}

keyed_enum! {
    /// Effect announced by a demand/capacity notification
    Effect, "effect" {
        DemandReduction => "demand-reduction", "Demand Reduction";
        DemandIncrease => "demand-increase", "Demand Increase";
        CapacityReduction => "capacity-reduction", "Capacity Reduction";
        CapacityIncrease => "capacity-increase", "Capacity Increase";
    }
}

keyed_enum! {
    /// Resolution status of a demand/capacity notification
    NotificationStatus, "status" {
        Open => "open", "Open";
        Resolved => "resolved", "Resolved";
    }
}

keyed_enum! {
    /// Leading root cause of a demand/capacity notification
    LeadingRootCause, "leading root cause" {
        Strike => "strike", "Strike";
        NaturalDisaster => "natural-disaster", "Natural Disaster";
        ProductionIncident => "production-incident", "Production Incident";
        PandemicOrEpidemic => "pandemic-or-epidemic", "Pandemic or Epidemic";
        LogisticsDisruption => "logistics-disruption", "Logistics Disruption";
        War => "war", "War";
        Other => "other", "Other";
    }
}

keyed_enum! {
    /// Kind of a delivery transit event
    TransitEventType, "transit event type" {
        EstimatedDeparture => "estimated-departure", "Estimated Departure";
        ActualDeparture => "actual-departure", "Actual Departure";
        EstimatedArrival => "estimated-arrival", "Estimated Arrival";
        ActualArrival => "actual-arrival", "Actual Arrival";
    }
}

impl TransitEventType {
    /// Whether the event has actually happened (as opposed to planned)
    #[inline]
    #[must_use]
    pub fn is_actual(&self) -> bool {
        matches!(self, Self::ActualDeparture | Self::ActualArrival)
    }
}
