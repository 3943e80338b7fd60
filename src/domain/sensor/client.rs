//! Sensor-logging sub-client.

use alloy_primitives::{B256, U256};

use crate::client::EvvmClient;
use crate::domain::sensor::abi::ISensorService;
use crate::domain::sensor::{SensorEvent, SensorReading};
use crate::envelope::TransactionEnvelope;
use crate::error::SdkResult;
use crate::provider::ConnectionProvider;

/// Sub-client for the sensor-logging service.
pub struct Sensors<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> Sensors<'a, P> {
    pub async fn build_log_event(&self, event: &SensorEvent) -> SdkResult<TransactionEnvelope> {
        let service = self.client.sensor_service_address()?;
        tracing::debug!(
            sensor = %event.sensor_username,
            event_type = %event.event_type,
            cost = event.cost(),
            "Logging sensor event"
        );
        self.client.plain_envelope(service, &event.to_call()).await
    }

    pub async fn log_event(&self, event: &SensorEvent) -> SdkResult<B256> {
        let mut envelope = self.build_log_event(event).await?;
        self.client.submit(&mut envelope).await
    }

    /// Classify, scale and log a raw reading.
    pub async fn log_reading(&self, reading: &SensorReading) -> SdkResult<B256> {
        self.log_event(&reading.to_event()?).await
    }

    /// Credits left for a sensor client.
    pub async fn client_credits(&self, client_username: &str) -> SdkResult<U256> {
        let service = self.client.sensor_service_address()?;
        let call = ISensorService::getClientCreditsCall {
            clientUsername: client_username.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }
}
