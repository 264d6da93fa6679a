//! The sidecar client and its build → sign → submit pipeline.

use primitive_types::U256;

use crate::config::SidecarConfig;
use crate::error::SidecarResult;
use crate::gateway::{
    AccountBalance, BlockReference, SidecarApi, TransactionMaterial, TxHash, UserCredit,
};
use crate::nonce::NonceTracker;
use crate::tx::call::Call;
use crate::tx::codec::{ChainCodec, Keypair};
use crate::tx::material::assemble_tx_args;

/// Client for one submitting account's view of the sidecar.
///
/// All methods are async and safe to call from multiple tasks, but
/// transaction-building calls should be awaited sequentially per instance:
/// the nonce decision itself is serialized internally, yet two interleaved
/// builds can still submit out of order and be rejected by the pool. One
/// instance, one logical submitter.
pub struct SidecarClient<C: ChainCodec> {
    api: SidecarApi,
    codec: C,
    nonce: NonceTracker,
}

impl<C: ChainCodec> SidecarClient<C> {
    /// Create a client from a validated configuration and a codec
    /// capability.
    pub fn new(config: &SidecarConfig, codec: C) -> SidecarResult<Self> {
        let api = SidecarApi::new(config)?;
        tracing::info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "sidecar client initialized"
        );
        Ok(Self {
            api,
            codec,
            nonce: NonceTracker::new(),
        })
    }

    /// The underlying typed API, for callers that only need reads.
    pub fn api(&self) -> &SidecarApi {
        &self.api
    }

    /// The client's nonce tracker. Exposed for diagnostics and for
    /// [`NonceTracker::reset`] after a rejected submission.
    pub fn nonce_tracker(&self) -> &NonceTracker {
        &self.nonce
    }

    /// Fetch the credit record of an address.
    pub async fn get_user_credit(&self, address: &str) -> SidecarResult<UserCredit> {
        self.api.get_user_credit(address).await
    }

    /// Fetch the total micropayment channel balance of an address.
    pub async fn get_total_channel_balance(&self, address: &str) -> SidecarResult<U256> {
        self.api.get_total_channel_balance(address).await
    }

    /// Fetch an account's balance info.
    pub async fn get_account_balance(&self, address: &str) -> SidecarResult<AccountBalance> {
        self.api.get_account_balance(address).await
    }

    /// Fetch the chain's current transaction material.
    pub async fn get_transaction_material(&self) -> SidecarResult<TransactionMaterial> {
        self.api.get_transaction_material().await
    }

    /// Fetch the latest block header.
    pub async fn get_latest_block(&self) -> SidecarResult<BlockReference> {
        self.api.get_latest_block().await
    }

    /// Submit a liveness ping for the device behind `keypair`.
    pub async fn im_online<K: Keypair>(&self, keypair: &K) -> SidecarResult<TxHash> {
        self.sign_and_submit(keypair, Call::im_online()).await
    }

    /// Register the device behind `keypair` as a server for
    /// `duration_eras` eras.
    pub async fn register_server<K: Keypair>(
        &self,
        keypair: &K,
        duration_eras: u32,
    ) -> SidecarResult<TxHash> {
        self.sign_and_submit(keypair, Call::register_server(duration_eras))
            .await
    }

    /// Transfer `amount` (a decimal string, arbitrary precision) to
    /// `dest`.
    pub async fn transfer<K: Keypair>(
        &self,
        keypair: &K,
        dest: &str,
        amount: &str,
    ) -> SidecarResult<TxHash> {
        self.sign_and_submit(keypair, Call::transfer(dest, amount)?)
            .await
    }

    /// Pair a secondary account with the device behind `device_keypair`.
    ///
    /// `paired_account` must be exactly 20 bytes and `proof` exactly 65;
    /// anything else fails with a build error before any request is made.
    pub async fn device_pair_multi_accounts<K: Keypair>(
        &self,
        device_keypair: &K,
        paired_account: &[u8],
        proof: &[u8],
    ) -> SidecarResult<TxHash> {
        let call = Call::device_pair_multi_accounts(paired_account, proof)?;
        self.sign_and_submit(device_keypair, call).await
    }

    /// The shared pipeline: assemble material, build the unsigned call,
    /// derive its signing payload, sign, re-attach, submit.
    async fn sign_and_submit<K: Keypair>(&self, keypair: &K, call: Call) -> SidecarResult<TxHash> {
        let address = keypair.address();
        let args = assemble_tx_args(&self.api, &self.nonce, &self.codec, address).await?;

        let unsigned = self
            .codec
            .build_unsigned_call(&args.registry, &call, &args.base, &args.options)?;
        let payload = self.codec.signing_payload(&args.registry, &unsigned)?;
        let signature = keypair.sign(payload.as_bytes()).await?;
        let signed = self
            .codec
            .attach_signature(&args.registry, &unsigned, &signature)?;

        let hash = self.api.submit_transaction(signed.as_hex()).await?;
        tracing::debug!(
            method = call.method(),
            nonce = args.base.nonce,
            hash = %hash,
            "transaction submitted"
        );
        Ok(hash)
    }
}
