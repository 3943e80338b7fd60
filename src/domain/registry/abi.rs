//! EVVM registry ABI.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    interface IRegistryEvvm {
        function registerEvvm(uint256 chainId, address evvmAddress) external returns (uint256);
    }
}
