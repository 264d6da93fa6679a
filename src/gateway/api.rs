//! HTTP access to the sidecar's read and submit endpoints.
//!
//! # Responsibilities
//! - One request per operation, bounded by the configured timeout
//! - Map non-success statuses into the error taxonomy
//! - Decode wire bodies into native types
//!
//! Submission is a single POST; "submitted" means the node accepted the
//! transaction into its pool, not that it was included in a block.

use std::time::Duration;

use primitive_types::U256;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::SidecarConfig;
use crate::error::{SidecarError, SidecarResult};
use crate::gateway::types::{
    AccountBalance, AccountBalanceRaw, BlockHeadRaw, BlockReference, StorageResponse,
    SubmitResponseRaw, TransactionMaterial, TransactionMaterialRaw, TxHash, UserCredit,
    UserCreditRaw,
};

/// Header carrying the optional device identifier.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Typed client for the sidecar HTTP API.
#[derive(Debug, Clone)]
pub struct SidecarApi {
    client: reqwest::Client,
    base_url: String,
}

impl SidecarApi {
    /// Build an API client from the given configuration.
    ///
    /// The underlying HTTP client is created once; the timeout and the
    /// optional device-id header apply to every request it makes.
    pub fn new(config: &SidecarConfig) -> SidecarResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(device_id) = &config.device_id {
            let value = HeaderValue::from_str(device_id).map_err(|e| {
                SidecarError::Config(format!("device_id is not a valid header value: {e}"))
            })?;
            headers.insert(DEVICE_ID_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the credit record of an address from the credit pallet.
    ///
    /// Fails with [`SidecarError::NotFound`] when the chain has no credit
    /// record for the address; absence is distinguishable from zero credit.
    pub async fn get_user_credit(&self, address: &str) -> SidecarResult<UserCredit> {
        let response: StorageResponse<UserCreditRaw> = self
            .get_json(
                "/pallets/credit/storage/UserCredit",
                &[("key1", address)],
            )
            .await?;
        match response.value {
            Some(raw) => raw.try_into(),
            None => Err(SidecarError::NotFound(format!(
                "no credit record for {address}"
            ))),
        }
    }

    /// Fetch the total micropayment channel balance locked by an address.
    ///
    /// A missing storage value means nothing has accumulated yet and maps
    /// to zero.
    pub async fn get_total_channel_balance(&self, address: &str) -> SidecarResult<U256> {
        let response: StorageResponse<String> = self
            .get_json(
                "/pallets/micropayment/storage/TotalMicropaymentChannelBalance",
                &[("key1", address)],
            )
            .await?;
        match response.value {
            Some(s) => super::types::parse_u256("value", &s),
            None => Ok(U256::zero()),
        }
    }

    /// Fetch an account's balance info, including its current on-chain
    /// nonce.
    pub async fn get_account_balance(&self, address: &str) -> SidecarResult<AccountBalance> {
        let raw: AccountBalanceRaw = self
            .get_json(&format!("/accounts/{address}/balance-info"), &[])
            .await?;
        raw.try_into()
    }

    /// Fetch the material needed to build a transaction, with the runtime
    /// metadata in SCALE-encoded form.
    pub async fn get_transaction_material(&self) -> SidecarResult<TransactionMaterial> {
        let raw: TransactionMaterialRaw = self
            .get_json("/transaction/material", &[("metadata", "scale")])
            .await?;
        raw.try_into()
    }

    /// Fetch the latest block header.
    pub async fn get_latest_block(&self) -> SidecarResult<BlockReference> {
        let raw: BlockHeadRaw = self.get_json("/blocks/head", &[]).await?;
        raw.try_into()
    }

    /// Submit a signed transaction to the node's pool.
    ///
    /// Posts exactly once and does not wait for inclusion or finality.
    /// A rejection surfaces as [`SidecarError::Submission`] with the
    /// sidecar's status and body.
    pub async fn submit_transaction(&self, signed_tx_hex: &str) -> SidecarResult<TxHash> {
        let url = format!("{}/transaction", self.base_url);
        tracing::debug!(url = %url, "submitting signed transaction");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "tx": signed_tx_hex }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SidecarError::Submission {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SubmitResponseRaw = serde_json::from_str(&body)
            .map_err(|e| SidecarError::Decode(format!("bad submission response: {e}")))?;
        let hash = TxHash::parse(&parsed.hash)?;
        tracing::debug!(hash = %hash, "transaction accepted into pool");
        Ok(hash)
    }

    /// GET a path relative to the base URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> SidecarResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "sidecar request");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SidecarError::Server {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| SidecarError::Decode(format!("bad response from {path}: {e}")))
    }
}
