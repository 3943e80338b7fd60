//! # EVVM Signature SDK
//!
//! Build, sign and submit EVVM transaction envelopes: a domain action and the
//! payment that pays for it, each signed over its own canonical message and
//! submitted together as one contract call.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Canonical messages, action and payment payloads, domain slices, envelopes (pure, no I/O)
//! 2. **Signing**: EIP-191 hashing, recovery, local secp256k1 keys
//! 3. **Transport**: `ConnectionProvider` capability and the JSON-RPC implementation
//! 4. **High-Level Client**: `EvvmClient` with nested sub-clients and a discovery cache
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evvm_signature_sdk::prelude::*;
//!
//! let signer = LocalSigner::from_hex(&std::env::var("PRIVATE_KEY")?)?;
//! let client = EvvmClient::from_config_with_signer(EvvmConfig::default(), signer)?;
//!
//! let tx = client
//!     .payments()
//!     .pay(Transfer::new(Recipient::Identity("alice".into()), amount), &PaymentTerms::asynchronous())
//!     .await?;
//!
//! let terms = PaymentTerms::sync();
//! let renew = RenewUsername { username: "alice".into(), nonce: random_async_nonce() };
//! let mut envelope = client.name_service().build_renew(renew, &terms).await?;
//! client.submit(&mut envelope).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, sentinels and canonical field rendering.
pub mod shared;

/// Action payloads and the canonical message rule.
pub mod action;

/// Payment payloads: pay, dispersePay, payment terms.
pub mod payment;

/// Domain modules (vertical slices): inputs, schemas, pricing, ABI, sub-clients.
pub mod domain;

/// Envelope assembly, submission and lifecycle.
pub mod envelope;

/// Unified SDK error types.
pub mod error;

/// Deployment constants.
pub mod network;

/// Serde configuration.
pub mod config;

// ── Layer 2: Signing ─────────────────────────────────────────────────────────

/// EIP-191 personal-sign hashing, recovery and local keys.
pub mod signer;

// ── Layer 3: Transport ───────────────────────────────────────────────────────

/// Connection capability: account, message signing, transactions, calls.
pub mod provider;

/// JSON-RPC wire types, retry policies and the HTTP client.
pub mod rpc;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `EvvmClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{
        random_async_nonce, random_clow_number, EvmSignature, Priority, Recipient,
        PRINCIPAL_TOKEN, ZERO_ADDRESS,
    };

    // Payloads
    pub use crate::action::{ActionPayload, SignableAction};
    pub use crate::payment::{
        DispersePayment, DisperseRecipient, PaymentParams, PaymentTerms, SignablePayment,
    };

    // Domain inputs: EVVM core
    pub use crate::domain::evvm::{BatchOutcome, FaucetRequest, Transfer};

    // Domain inputs: name service
    pub use crate::domain::name_service::{
        AddCustomMetadata, CustomMetadata, FlushCustomMetadata, FlushUsername, MakeOffer,
        PreRegistrationUsername, RegistrationUsername, RemoveCustomMetadata, RenewUsername,
        ResolveOffer,
    };

    // Domain inputs: staking, swaps, sensors, registry
    pub use crate::domain::p2p_swap::{CancelOrder, DispatchFee, DispatchOrder, MakeOrder};
    pub use crate::domain::registry::{RegisterEvvm, Registration};
    pub use crate::domain::sensor::{SensorEvent, SensorEventType, SensorReading};
    pub use crate::domain::staking::{
        GoldenStaking, PresaleStaking, PublicServiceStaking, PublicStaking,
    };

    // Envelopes
    pub use crate::envelope::{EnvelopeState, TransactionEnvelope};

    // Errors
    pub use crate::error::{SdkError, SdkResult};

    // Configuration + network
    pub use crate::config::{ContractAddresses, EvvmConfig};
    pub use crate::network::{DEFAULT_RPC_URL, EVVM_ADDRESS, SEPOLIA_CHAIN_ID};

    // Signing + transport
    pub use crate::provider::{AccountRetry, ConnectionProvider, TransactionRequest};
    pub use crate::rpc::{RetryConfig, RetryPolicy};
    #[cfg(feature = "http")]
    pub use crate::rpc::JsonRpcClient;
    pub use crate::signer::LocalSigner;

    // Client + sub-clients
    pub use crate::client::{
        EvvmClient, EvvmClientBuilder, NameServiceClient, P2PSwapClient, PaymentsClient,
        RegistryClient, SensorsClient, StakingClient,
    };
}
