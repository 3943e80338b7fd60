//! Deployment constants for the public Sepolia test-net instance.

use alloy_primitives::{address, Address};

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://0xrpc.io/sep";

pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// EVVM instance id of the default deployment.
pub const DEFAULT_EVVM_ID: u64 = 1074;

pub const EVVM_ADDRESS: Address = address!("7A2D55Cd7946A2565afB5f9bF14E2E0749bF10E5");

pub const NAME_SERVICE_ADDRESS: Address = address!("3Eb1A06faff55B618eA90b20169f37B73B0dDea3");

/// Sensor-logging service.
pub const SENSOR_SERVICE_ADDRESS: Address = address!("927e11039EbDE25095b3C413Ef35981119e3f257");

/// EVVM registry. Lives on Sepolia regardless of the chain an EVVM runs on.
pub const REGISTRY_ADDRESS: Address = address!("389dC8fb09211bbDA841D59f4a51160dA2377832");
