//! Assembly of the material every transaction build needs.
//!
//! Runtime material and the head block are always fetched together,
//! immediately before building a call, to keep the staleness window as
//! small as possible.

use crate::error::SidecarResult;
use crate::gateway::SidecarApi;
use crate::nonce::NonceTracker;
use crate::tx::codec::ChainCodec;

/// Mortality window applied to every transaction, in blocks.
pub const DEFAULT_ERA_PERIOD: u64 = 64;

/// Base transaction info handed to the codec for every build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTxInfo {
    pub address: String,
    pub block_hash: String,
    pub block_number: u64,
    pub genesis_hash: String,
    /// SCALE-encoded runtime metadata, opaque hex.
    pub metadata_rpc: String,
    pub nonce: u64,
    pub spec_version: u32,
    pub transaction_version: u32,
}

/// Per-transaction options. Fixed for this client: a 64-block mortality
/// window and no tip (fee prioritization is not supported).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    pub era_period: u64,
    pub tip: u128,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            era_period: DEFAULT_ERA_PERIOD,
            tip: 0,
        }
    }
}

/// Everything a single transaction build needs, assembled in one shot.
pub struct TxArgs<R> {
    pub base: BaseTxInfo,
    pub options: TxOptions,
    /// Codec-owned type registry decoded from the fetched metadata.
    pub registry: R,
}

/// Gather transaction material, the head block, and the next nonce into a
/// [`TxArgs`] bundle.
///
/// Fetch order: runtime material, registry from its metadata, head block,
/// then the account nonce reconciled through the tracker. Failures from
/// the gateway or codec propagate unchanged.
pub async fn assemble_tx_args<C: ChainCodec>(
    api: &SidecarApi,
    tracker: &NonceTracker,
    codec: &C,
    address: &str,
) -> SidecarResult<TxArgs<C::Registry>> {
    let material = api.get_transaction_material().await?;
    let registry = codec.build_registry(&material)?;
    let block = api.get_latest_block().await?;

    let chain_nonce = api.get_account_balance(address).await?.nonce;
    let nonce = tracker.next(chain_nonce).await;
    tracing::debug!(
        address,
        chain_nonce,
        nonce,
        block_number = block.height,
        spec_version = material.spec_version,
        "assembled transaction material"
    );

    Ok(TxArgs {
        base: BaseTxInfo {
            address: address.to_string(),
            block_hash: block.hash,
            block_number: block.height,
            genesis_hash: material.genesis_hash,
            metadata_rpc: material.metadata_rpc,
            nonce,
            spec_version: material.spec_version,
            transaction_version: material.tx_version,
        },
        options: TxOptions::default(),
        registry,
    })
}
