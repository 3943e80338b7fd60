//! Name service contract ABI.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    interface INameService {
        function preRegistrationUsername(
            address user,
            bytes32 hashPreRegisteredUsername,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function registrationUsername(
            address user,
            string username,
            uint256 clowNumber,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function makeOffer(
            address user,
            string username,
            uint256 expireDate,
            uint256 amount,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function withdrawOffer(
            address user,
            string username,
            uint256 offerID,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function acceptOffer(
            address user,
            string username,
            uint256 offerID,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function renewUsername(
            address user,
            string username,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function addCustomMetadata(
            address user,
            string identity,
            string value,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function removeCustomMetadata(
            address user,
            string identity,
            uint256 key,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function flushCustomMetadata(
            address user,
            string identity,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function flushUsername(
            address user,
            string username,
            uint256 nonce,
            bytes signature,
            uint256 priorityFee_EVVM,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function isUsernameAvailable(string username) external view returns (bool);
        function getPriceOfRegistration(string username) external view returns (uint256);
        function seePriceToRenew(string username) external view returns (uint256);
        function getPriceToAddCustomMetadata() external view returns (uint256);
        function getPriceToRemoveCustomMetadata() external view returns (uint256);
        function getPriceToFlushCustomMetadata(string identity) external view returns (uint256);
        function getPriceToFlushUsername(string identity) external view returns (uint256);
        function getOwnerOfIdentity(string username) external view returns (address);
        function getEvvmAddress() external view returns (address);
    }
}
