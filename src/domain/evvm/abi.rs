//! EVVM core contract ABI.

use alloy_sol_types::sol;

sol! {
    /// One entry of a `dispersePay` recipient list.
    #[sol(all_derives)]
    struct DispersePayMetadata {
        uint256 amount;
        address to_address;
        string to_identity;
    }

    /// One independently signed payment inside `payMultiple`.
    #[sol(all_derives)]
    struct PayData {
        address from;
        address to_address;
        string to_identity;
        address token;
        uint256 amount;
        uint256 priorityFee;
        uint256 nonce;
        bool priority;
        address executor;
        bytes signature;
    }

    #[sol(all_derives)]
    interface IEvvm {
        function pay(
            address from,
            address to_address,
            string to_identity,
            address token,
            uint256 amount,
            uint256 priorityFee,
            uint256 nonce,
            bool priority,
            address executor,
            bytes signature
        ) external;

        function dispersePay(
            address from,
            DispersePayMetadata[] toData,
            address token,
            uint256 amount,
            uint256 priorityFee,
            uint256 nonce,
            bool priority,
            address executor,
            bytes signature
        ) external;

        function payMultiple(PayData[] payData)
            external
            returns (uint256 successfulTransactions, uint256 failedTransactions, bool[] results);

        function addBalance(address user, address token, uint256 quantity) external;
        function getBalance(address user, address token) external view returns (uint256);

        function setEvvmID(uint256 newEvvmID) external;
        function getEvvmID() external view returns (uint256);

        function getNameServiceAddress() external view returns (address);
        function getStakingContractAddress() external view returns (address);
        function getRewardAmount() external view returns (uint256);

        function getNextCurrentSyncNonce(address user) external view returns (uint256);
        function getIfUsedAsyncNonce(address user, uint256 nonce) external view returns (bool);
    }
}
