//! P2P swap sub-client.

use alloy_primitives::{B256, U256};

use crate::client::{EvvmClient, ServicePayment};
use crate::domain::p2p_swap::{
    cancel_order_call, dispatch_fixed_call, dispatch_proportional_call, make_order_call,
    CancelOrder, DispatchFee, DispatchOrder, MakeOrder, DISPATCH_GAS_LIMIT,
};
use crate::envelope::TransactionEnvelope;
use crate::error::SdkResult;
use crate::payment::PaymentTerms;
use crate::provider::ConnectionProvider;
use crate::shared::PRINCIPAL_TOKEN;

/// Sub-client for the P2P swap contract.
pub struct P2PSwap<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> P2PSwap<'a, P> {
    /// The payment locks `amountA` of `tokenA` with the swap contract.
    pub async fn build_make_order(
        &self,
        input: MakeOrder,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let swap = self.client.p2p_swap_address()?;
        let payment = ServicePayment::new(input.token_a, input.amount_a, terms);
        self.client
            .action_envelope(swap, input, payment, make_order_call)
            .await
    }

    pub async fn make_order(&self, input: MakeOrder, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_make_order(input, terms).await?;
        self.client.submit(&mut envelope).await
    }

    pub async fn build_cancel_order(
        &self,
        input: CancelOrder,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let swap = self.client.p2p_swap_address()?;
        let payment = ServicePayment::new(PRINCIPAL_TOKEN, U256::ZERO, terms);
        Ok(self
            .client
            .action_envelope(swap, input, payment, cancel_order_call)
            .await?
            .with_gas(DISPATCH_GAS_LIMIT))
    }

    pub async fn cancel_order(&self, input: CancelOrder, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_cancel_order(input, terms).await?;
        self.client.submit(&mut envelope).await
    }

    /// Fill an order, paying `amountB + fee` in `tokenB`.
    pub async fn build_dispatch_order(
        &self,
        input: DispatchOrder,
        fee: DispatchFee,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let swap = self.client.p2p_swap_address()?;
        let fill = input.fill_amount(&fee)?;
        tracing::debug!(
            order_id = %input.order_id,
            amount_b = %input.amount_b,
            fill = %fill,
            "Dispatching P2P order"
        );
        let payment = ServicePayment::new(input.token_b, fill, terms);

        let envelope = match fee {
            DispatchFee::Proportional => {
                self.client
                    .action_envelope(swap, input, payment, dispatch_proportional_call)
                    .await?
            }
            DispatchFee::Fixed { fee_cap } => {
                self.client
                    .action_envelope(swap, input, payment, |action, payment| {
                        dispatch_fixed_call(action, payment, fee_cap)
                    })
                    .await?
            }
        };
        Ok(envelope.with_gas(DISPATCH_GAS_LIMIT))
    }

    pub async fn dispatch_order(
        &self,
        input: DispatchOrder,
        fee: DispatchFee,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        let mut envelope = self.build_dispatch_order(input, fee, terms).await?;
        self.client.submit(&mut envelope).await
    }
}
