//! Registry sub-client.

use alloy_primitives::U256;

use crate::client::EvvmClient;
use crate::domain::registry::{RegisterEvvm, Registration};
use crate::error::SdkResult;
use crate::provider::ConnectionProvider;

/// Sub-client for the EVVM registry.
pub struct Registry<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> Registry<'a, P> {
    /// The id `registerEvvm` would assign, without sending anything.
    pub async fn simulate_register(&self, input: &RegisterEvvm) -> SdkResult<U256> {
        let call = input.to_call()?;
        let ret = self
            .client
            .simulate(self.client.config().contracts.registry, &call)
            .await?;
        Ok(ret._0)
    }

    /// Simulate to learn the assigned id, then send the registration.
    pub async fn register(&self, input: &RegisterEvvm) -> SdkResult<Registration> {
        let registry = self.client.config().contracts.registry;
        let evvm_id = self.simulate_register(input).await?;
        tracing::info!(
            evvm_id = %evvm_id,
            chain_id = input.chain_id,
            evvm = %input.evvm_address,
            "Registering EVVM"
        );

        let call = input.to_call()?;
        let mut envelope = self.client.plain_envelope(registry, &call).await?;
        let tx_hash = self.client.submit(&mut envelope).await?;
        Ok(Registration { evvm_id, tx_hash })
    }
}
