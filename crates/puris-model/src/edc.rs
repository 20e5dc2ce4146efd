//! EDC records shown for monitoring
//!
//! These are fetched from the connector through the backend and displayed
//! as-is. Fields the backend passes through verbatim from the connector
//! keep their JSON-LD names.

use serde::{Deserialize, Serialize};

/// One dataset offer from a partner's catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOffer {
    #[serde(rename = "@id")]
    pub asset_id: String,
    #[serde(rename = "https://w3id.org/catenax/ontology/common#version")]
    pub version: Option<String>,
    #[serde(rename = "http://purl.org/dc/terms/type")]
    pub asset_type: Option<serde_json::Value>,
    #[serde(rename = "odrl:hasPolicy")]
    pub policy: Option<serde_json::Value>,
}

/// Contract negotiation between our connector and a partner's
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractNegotiation {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "type")]
    pub negotiation_type: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "counterPartyAddress")]
    pub counter_party_address: Option<String>,
    #[serde(rename = "counterPartyId")]
    pub counter_party_id: Option<String>,
    #[serde(rename = "contractAgreementId")]
    pub contract_agreement_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<i64>,
}

impl ContractNegotiation {
    /// Negotiation reached a final agreement
    #[inline]
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.state.as_deref() == Some("FINALIZED")
    }
}

/// Data transfer process executed under an agreement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferProcess {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "correlationId")]
    pub correlation_id: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "stateTimestamp")]
    pub state_timestamp: Option<i64>,
    #[serde(rename = "type")]
    pub transfer_type: Option<String>,
    #[serde(rename = "assetId")]
    pub asset_id: Option<String>,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "connectorId")]
    pub connector_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiation_reads_connector_json() {
        let json = r#"{
            "@id": "neg-1",
            "type": "CONSUMER",
            "state": "FINALIZED",
            "counterPartyAddress": "http://supplier-edc/api/v1/dsp",
            "contractAgreementId": "agr-1",
            "createdAt": 1706000000000
        }"#;
        let negotiation: ContractNegotiation = serde_json::from_str(json).unwrap();
        assert!(negotiation.is_finalized());
        assert_eq!(negotiation.contract_agreement_id.as_deref(), Some("agr-1"));
    }

    #[test]
    fn transfer_tolerates_missing_fields() {
        let transfer: TransferProcess =
            serde_json::from_str(r#"{"@id":"tp-1","state":"STARTED"}"#).unwrap();
        assert_eq!(transfer.id, "tp-1");
        assert_eq!(transfer.asset_id, None);
    }

    #[test]
    fn catalog_offer_keeps_policy_verbatim() {
        let json = r#"{"@id":"asset-1","odrl:hasPolicy":{"@id":"offer-1"}}"#;
        let offer: CatalogOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.asset_id, "asset-1");
        assert_eq!(offer.policy.unwrap()["@id"], "offer-1");
    }
}
