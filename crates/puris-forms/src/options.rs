//! Selection options for partner, site and unit pickers
//!
//! Options are matched by identifier (BPNL for partners, BPNS for sites),
//! never by display label.

use puris_model::{Partner, Site, UnitOfMeasurement};

/// Partner currently selected by BPNL
#[must_use]
pub fn selected_partner<'a>(partners: &'a [Partner], bpnl: Option<&str>) -> Option<&'a Partner> {
    bpnl.and_then(|bpnl| Partner::find(partners, bpnl))
}

/// Sites offered as destinations once a partner is chosen
///
/// Empty while no partner is selected.
#[must_use]
pub fn destination_sites<'a>(partners: &'a [Partner], partner_bpnl: Option<&str>) -> &'a [Site] {
    selected_partner(partners, partner_bpnl).map_or(&[], |p| p.sites.as_slice())
}

/// Site currently selected by BPNS under the selected partner
#[must_use]
pub fn selected_site<'a>(
    partners: &'a [Partner],
    partner_bpnl: Option<&str>,
    bpns: Option<&str>,
) -> Option<&'a Site> {
    let bpns = bpns?;
    destination_sites(partners, partner_bpnl)
        .iter()
        .find(|s| s.bpns == bpns)
}

/// Partners a reaction may address: everyone except the origin's partner
#[must_use]
pub fn reaction_partners<'a>(
    partners: &'a [Partner],
    origin_bpnl: Option<&str>,
) -> Vec<&'a Partner> {
    partners
        .iter()
        .filter(|p| Some(p.bpnl.as_str()) != origin_bpnl)
        .collect()
}

/// Unit options as `(key, label)` pairs
#[must_use]
pub fn unit_options() -> Vec<(&'static str, &'static str)> {
    UnitOfMeasurement::ALL
        .iter()
        .map(|u| (u.key(), u.label()))
        .collect()
}
