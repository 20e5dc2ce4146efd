//! HTTP client for the PURIS backend
//!
//! Every request carries the `X-API-KEY` header. Non-success responses are
//! turned into [`ClientError::Status`] with the server's message, taken
//! from the JSON `error` or `message` field when present and the raw body
//! otherwise.

use crate::config::ClientConfig;
use crate::error::ClientError;
use puris_model::{
    CatalogOffer, ContractNegotiation, DemandCapacityNotification, Delivery, Material,
    MaterialStock, Partner, Production, ProductStock, StockKind, TransferProcess,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Header carrying the backend API key
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Message text of an error response body
#[must_use]
pub fn error_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = fields.get(key).and_then(serde_json::Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    body.trim().to_string()
}

/// Backend client, cheap to clone
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl BackendClient {
    /// Client for the backend described by `config`
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key).map_err(|_| ClientError::InvalidApiKey)?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;
        tracing::debug!(base_url = %config.base_url, "backend client ready");
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Settings in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::debug!(%url, status = status.as_u16(), %message, "backend rejected request");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<R>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let request = self.http.get(self.config.url(endpoint)).query(query);
        Ok(self.send(request).await?.json().await?)
    }

    async fn post<B>(&self, endpoint: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.http.post(self.config.url(endpoint)).json(body))
            .await
            .map(drop)
    }

    async fn put<B>(&self, endpoint: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.http.put(self.config.url(endpoint)).json(body))
            .await
            .map(drop)
    }

    async fn delete(&self, endpoint: &str, id: Uuid) -> Result<(), ClientError> {
        let url = self.config.url(&format!("{}/{id}", endpoint.trim_end_matches('/')));
        self.send(self.http.delete(url)).await.map(drop)
    }

    // Deliveries

    /// Own deliveries of a material, optionally for one partner
    pub async fn deliveries(
        &self,
        material_number: &str,
        partner_bpnl: Option<&str>,
    ) -> Result<Vec<Delivery>, ClientError> {
        let query = material_query(material_number, partner_bpnl);
        self.get(&self.config.endpoints.delivery, &query).await
    }

    /// Deliveries reported by partners for a material
    pub async fn reported_deliveries(
        &self,
        material_number: &str,
        partner_bpnl: Option<&str>,
    ) -> Result<Vec<Delivery>, ClientError> {
        let endpoint = format!("{}/partner", self.config.endpoints.delivery);
        self.get(&endpoint, &material_query(material_number, partner_bpnl))
            .await
    }

    pub async fn create_delivery(&self, delivery: &Delivery) -> Result<(), ClientError> {
        self.post(&self.config.endpoints.delivery, delivery).await
    }

    pub async fn update_delivery(&self, delivery: &Delivery) -> Result<(), ClientError> {
        self.put(&self.config.endpoints.delivery, delivery).await
    }

    pub async fn delete_delivery(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&self.config.endpoints.delivery, id).await
    }

    // Productions

    /// Own planned productions of a material, optionally at one site
    pub async fn productions(
        &self,
        material_number: &str,
        site_bpns: Option<&str>,
    ) -> Result<Vec<Production>, ClientError> {
        let mut query = vec![("materialNumber", material_number)];
        if let Some(site) = site_bpns {
            query.push(("site", site));
        }
        self.get(&self.config.endpoints.production, &query).await
    }

    /// Create one production through the range endpoint
    pub async fn create_production(&self, production: &Production) -> Result<(), ClientError> {
        self.post(
            &self.config.endpoints.production_range,
            std::slice::from_ref(production),
        )
        .await
    }

    /// Create several productions in one request
    pub async fn create_productions(&self, productions: &[Production]) -> Result<(), ClientError> {
        self.post(&self.config.endpoints.production_range, productions)
            .await
    }

    pub async fn update_production(&self, production: &Production) -> Result<(), ClientError> {
        self.put(&self.config.endpoints.production, production).await
    }

    pub async fn delete_production(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&self.config.endpoints.production, id).await
    }

    // Demand and capacity notifications

    pub async fn notifications(&self) -> Result<Vec<DemandCapacityNotification>, ClientError> {
        self.get(&self.config.endpoints.demand_capacity_notification, &[])
            .await
    }

    pub async fn create_notification(
        &self,
        notification: &DemandCapacityNotification,
    ) -> Result<(), ClientError> {
        self.post(&self.config.endpoints.demand_capacity_notification, notification)
            .await
    }

    pub async fn update_notification(
        &self,
        notification: &DemandCapacityNotification,
    ) -> Result<(), ClientError> {
        self.put(&self.config.endpoints.demand_capacity_notification, notification)
            .await
    }

    pub async fn delete_notification(&self, id: Uuid) -> Result<(), ClientError> {
        self.delete(&self.config.endpoints.demand_capacity_notification, id)
            .await
    }

    // Reference data

    pub async fn partners(&self) -> Result<Vec<Partner>, ClientError> {
        self.get(&self.config.endpoints.partners, &[]).await
    }

    pub async fn materials(&self) -> Result<Vec<Material>, ClientError> {
        self.get(&self.config.endpoints.materials, &[]).await
    }

    /// Partners buying `material_number` from us
    pub async fn customers_of(&self, material_number: &str) -> Result<Vec<Partner>, ClientError> {
        self.get(
            &self.config.endpoints.customers,
            &[("ownMaterialNumber", material_number)],
        )
        .await
    }

    /// Partners supplying `material_number` to us
    pub async fn suppliers_of(&self, material_number: &str) -> Result<Vec<Partner>, ClientError> {
        self.get(
            &self.config.endpoints.suppliers,
            &[("ownMaterialNumber", material_number)],
        )
        .await
    }

    // Stocks

    pub async fn product_stocks(&self) -> Result<Vec<ProductStock>, ClientError> {
        self.get(&self.config.endpoints.product_stocks, &[]).await
    }

    pub async fn material_stocks(&self) -> Result<Vec<MaterialStock>, ClientError> {
        self.get(&self.config.endpoints.material_stocks, &[]).await
    }

    pub async fn create_product_stock(&self, stock: &ProductStock) -> Result<(), ClientError> {
        self.post(&self.config.endpoints.product_stocks, stock).await
    }

    pub async fn update_product_stock(&self, stock: &ProductStock) -> Result<(), ClientError> {
        self.put(&self.config.endpoints.product_stocks, stock).await
    }

    pub async fn create_material_stock(&self, stock: &MaterialStock) -> Result<(), ClientError> {
        self.post(&self.config.endpoints.material_stocks, stock).await
    }

    pub async fn update_material_stock(&self, stock: &MaterialStock) -> Result<(), ClientError> {
        self.put(&self.config.endpoints.material_stocks, stock).await
    }

    /// Ask partners to re-report their stocks of `material_number`
    ///
    /// Returns the backend's answer verbatim.
    pub async fn refresh_reported_stocks(
        &self,
        kind: StockKind,
        material_number: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let endpoint = match kind {
            StockKind::Product => &self.config.endpoints.update_reported_product_stocks,
            StockKind::Material => &self.config.endpoints.update_reported_material_stocks,
        };
        tracing::info!(?kind, material_number, "requesting reported stock refresh");
        self.get(endpoint, &[("ownMaterialNumber", material_number)])
            .await
    }

    // EDC monitoring

    /// Dataset offers in a partner's catalog
    pub async fn catalog(
        &self,
        partner_bpnl: &str,
        dsp_url: &str,
    ) -> Result<Vec<CatalogOffer>, ClientError> {
        self.get(
            &self.config.endpoints.edc_catalog,
            &[("partnerBpnl", partner_bpnl), ("dspUrl", dsp_url)],
        )
        .await
    }

    pub async fn negotiations(&self) -> Result<Vec<ContractNegotiation>, ClientError> {
        self.get(&self.config.endpoints.edc_negotiations, &[]).await
    }

    pub async fn transfers(&self) -> Result<Vec<TransferProcess>, ClientError> {
        self.get(&self.config.endpoints.edc_transfers, &[]).await
    }
}

fn material_query<'a>(
    material_number: &'a str,
    partner_bpnl: Option<&'a str>,
) -> Vec<(&'a str, &'a str)> {
    let mut query = vec![("materialNumber", material_number)];
    if let Some(bpnl) = partner_bpnl {
        query.push(("bpnl", bpnl));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_preferred() {
        let body = r#"{"status":409,"error":"Conflict","message":"Delivery already exists."}"#;
        assert_eq!(error_message(body), "Conflict");
    }

    #[test]
    fn message_field_when_no_error() {
        let body = r#"{"message":"Delivery is invalid."}"#;
        assert_eq!(error_message(body), "Delivery is invalid.");
    }

    #[test]
    fn raw_body_otherwise() {
        assert_eq!(error_message("  upstream timeout\n"), "upstream timeout");
        assert_eq!(error_message(r#"["not","an","object"]"#), r#"["not","an","object"]"#);
    }

    #[test]
    fn api_key_must_be_header_safe() {
        let config = ClientConfig::new("http://localhost", "bad\nkey");
        assert!(matches!(BackendClient::new(config), Err(ClientError::InvalidApiKey)));
    }

    #[test]
    fn partner_filter_is_optional() {
        assert_eq!(material_query("M", None), vec![("materialNumber", "M")]);
        assert_eq!(
            material_query("M", Some("BPNL")),
            vec![("materialNumber", "M"), ("bpnl", "BPNL")]
        );
    }
}
