//! P2P swap contract ABI.

use alloy_sol_types::sol;

sol! {
    #[sol(all_derives)]
    struct MetadataMakeOrder {
        uint256 nonce;
        address tokenA;
        address tokenB;
        uint256 amountA;
        uint256 amountB;
    }

    #[sol(all_derives)]
    struct MetadataCancelOrder {
        uint256 nonce;
        address tokenA;
        address tokenB;
        uint256 orderId;
        bytes signature;
    }

    #[sol(all_derives)]
    struct MetadataDispatchOrder {
        uint256 nonce;
        address tokenA;
        address tokenB;
        uint256 orderId;
        uint256 amountOfTokenBToFill;
        bytes signature;
    }

    #[sol(all_derives)]
    interface IP2PSwap {
        function makeOrder(
            address user,
            MetadataMakeOrder metadata,
            bytes signature,
            uint256 priorityFee,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function cancelOrder(
            address user,
            MetadataCancelOrder metadata,
            uint256 priorityFee,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function dispatchOrder_fillPropotionalFee(
            address user,
            MetadataDispatchOrder metadata,
            uint256 priorityFee,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM
        ) external;

        function dispatchOrder_fillFixedFee(
            address user,
            MetadataDispatchOrder metadata,
            uint256 priorityFee,
            uint256 nonce_EVVM,
            bool priorityFlag_EVVM,
            bytes signature_EVVM,
            uint256 amountOut
        ) external;
    }
}
