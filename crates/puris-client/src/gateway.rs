//! HTTP persistence gateways
//!
//! Bind each editable record kind to its backend endpoints.

use crate::client::BackendClient;
use async_trait::async_trait;
use puris_forms::{GatewayError, PersistenceGateway};
use puris_model::{DemandCapacityNotification, Delivery, Production};
use uuid::Uuid;

/// Gateway writing records through a [`BackendClient`]
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: BackendClient,
}

impl HttpGateway {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    #[inline]
    #[must_use]
    pub fn client(&self) -> &BackendClient {
        &self.client
    }
}

#[async_trait]
impl PersistenceGateway<Delivery> for HttpGateway {
    async fn create(&self, record: &Delivery) -> Result<(), GatewayError> {
        Ok(self.client.create_delivery(record).await?)
    }

    async fn update(&self, record: &Delivery) -> Result<(), GatewayError> {
        Ok(self.client.update_delivery(record).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        Ok(self.client.delete_delivery(id).await?)
    }
}

#[async_trait]
impl PersistenceGateway<Production> for HttpGateway {
    async fn create(&self, record: &Production) -> Result<(), GatewayError> {
        Ok(self.client.create_production(record).await?)
    }

    async fn update(&self, record: &Production) -> Result<(), GatewayError> {
        Ok(self.client.update_production(record).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        Ok(self.client.delete_production(id).await?)
    }
}

#[async_trait]
impl PersistenceGateway<DemandCapacityNotification> for HttpGateway {
    async fn create(&self, record: &DemandCapacityNotification) -> Result<(), GatewayError> {
        Ok(self.client.create_notification(record).await?)
    }

    async fn update(&self, record: &DemandCapacityNotification) -> Result<(), GatewayError> {
        Ok(self.client.update_notification(record).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        Ok(self.client.delete_notification(id).await?)
    }
}
