//! Staking contract ABI.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    interface IStaking {
        function goldenStaking(bool isStaking, uint256 amountOfStaking, bytes signature_EVVM) external;

        function presaleStaking(
            address user,
            bool isStaking,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function publicStaking(
            address user,
            bool isStaking,
            uint256 amountOfStaking,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function publicServiceStaking(
            address user,
            address service,
            bool isStaking,
            uint256 amountOfStaking,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;
    }
}
