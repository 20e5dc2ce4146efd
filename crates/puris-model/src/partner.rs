//! Partner, site and material reference data
//!
//! Reference data is fetched read-only and joined client-side by BPNL for
//! partners and BPNS for sites.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address identified by BPNA
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub bpna: String,
    pub street_and_number: Option<String>,
    pub zip_code_and_city: Option<String>,
    pub country: Option<String>,
}

/// Physical site identified by BPNS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Site {
    pub bpns: String,
    pub name: String,
    pub addresses: Vec<Address>,
}

/// Business partner identified by BPNL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Partner {
    pub uuid: Option<Uuid>,
    pub bpnl: String,
    pub name: String,
    pub edc_url: Option<String>,
    pub sites: Vec<Site>,
    pub addresses: Vec<Address>,
}

impl Partner {
    /// Create partner with no sites
    #[inline]
    #[must_use]
    pub fn new(bpnl: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bpnl: bpnl.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// With site
    #[inline]
    #[must_use]
    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    /// Site by BPNS
    #[must_use]
    pub fn site(&self, bpns: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.bpns == bpns)
    }

    /// Partner by BPNL
    #[must_use]
    pub fn find<'a>(partners: &'a [Partner], bpnl: &str) -> Option<&'a Partner> {
        partners.iter().find(|p| p.bpnl == bpnl)
    }

    /// Display name for a BPNL, falling back to the BPNL itself
    #[must_use]
    pub fn display_name<'a>(partners: &'a [Partner], bpnl: &'a str) -> &'a str {
        Self::find(partners, bpnl).map_or(bpnl, |p| p.name.as_str())
    }
}

impl Site {
    /// Create site with no addresses
    #[inline]
    #[must_use]
    pub fn new(bpns: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bpns: bpns.into(),
            name: name.into(),
            addresses: Vec::new(),
        }
    }
}

/// Material as seen by both trading parties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub material_number_supplier: Option<String>,
    pub material_number_customer: Option<String>,
    pub material_number_cx: Option<String>,
    pub name: Option<String>,
    pub material_flag: bool,
    pub product_flag: bool,
}
