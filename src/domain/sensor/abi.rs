//! IoT sensor-logging service ABI.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    interface ISensorService {
        function logSensorEvent(
            string sensorUsername,
            int256 value,
            uint64 timestamp,
            uint8 eventType,
            bytes32 batchHash
        ) external;

        function getClientCredits(string clientUsername) external view returns (uint256);
    }
}
