//! Shared utilities for integration testing: a mock sidecar and
//! deterministic codec/keypair doubles.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

use sidecar_client::gateway::types::TransactionMaterial;
use sidecar_client::tx::{
    BaseTxInfo, Call, ChainCodec, Keypair, Signature, SignedTransaction, SigningPayload,
    TxOptions, UnsignedCall,
};
use sidecar_client::{SidecarError, SidecarResult};

/// Install a log subscriber for test debugging. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

pub const GENESIS_HASH: &str =
    "0x2f1801d4d1471d1c8efd4893139c68b374268a586febc404427bbb5a86b3f2ae";
pub const HEAD_HASH: &str =
    "0xc5cd6b2d433722c0a788bea85f53d73846597d93120d79a6ef8ac4efb9505f08";
pub const SUBMIT_HASH: &str =
    "0x9b2c14ef42bb1a1c1b4a34b2a49a5f1f3e4b05b4f0a2de67a92dd1f6bd6b3a71";

/// Deterministic stand-in for the chain codec capability. Encodes the
/// call and base info as canonical JSON so identical inputs always give
/// identical bytes.
pub struct JsonCodec;

/// What the double "decodes" out of the runtime metadata.
pub struct JsonRegistry {
    pub spec_name: String,
    pub spec_version: u32,
}

impl ChainCodec for JsonCodec {
    type Registry = JsonRegistry;

    fn build_registry(&self, material: &TransactionMaterial) -> SidecarResult<Self::Registry> {
        if !material.metadata_rpc.starts_with("0x") {
            return Err(SidecarError::Build(
                "metadata is not hex encoded".to_string(),
            ));
        }
        Ok(JsonRegistry {
            spec_name: material.spec_name.clone(),
            spec_version: material.spec_version,
        })
    }

    fn build_unsigned_call(
        &self,
        registry: &Self::Registry,
        call: &Call,
        base: &BaseTxInfo,
        options: &TxOptions,
    ) -> SidecarResult<UnsignedCall> {
        let args = match call {
            Call::ImOnline => json!({}),
            Call::RegisterServer { duration_eras } => json!({ "durationEras": duration_eras }),
            Call::Transfer { dest, amount } => {
                json!({ "dest": dest, "amount": amount.to_string() })
            }
            Call::DevicePairMultiAccounts {
                paired_account,
                proof,
            } => json!({
                "pairedAccount": hex::encode(paired_account),
                "proof": hex::encode(proof.as_slice()),
            }),
        };
        // serde_json's default map is ordered, so this is byte-stable.
        let encoded = serde_json::to_vec(&json!({
            "method": call.method(),
            "args": args,
            "address": base.address,
            "blockHash": base.block_hash,
            "blockNumber": base.block_number,
            "genesisHash": base.genesis_hash,
            "nonce": base.nonce,
            "specName": registry.spec_name,
            "specVersion": base.spec_version,
            "transactionVersion": base.transaction_version,
            "eraPeriod": options.era_period,
            "tip": options.tip.to_string(),
        }))
        .map_err(|e| SidecarError::Build(e.to_string()))?;
        Ok(UnsignedCall::new(encoded))
    }

    fn signing_payload(
        &self,
        registry: &Self::Registry,
        unsigned: &UnsignedCall,
    ) -> SidecarResult<SigningPayload> {
        let mut bytes = registry.spec_version.to_le_bytes().to_vec();
        bytes.extend_from_slice(unsigned.as_bytes());
        Ok(SigningPayload::new(bytes))
    }

    fn attach_signature(
        &self,
        _registry: &Self::Registry,
        unsigned: &UnsignedCall,
        signature: &Signature,
    ) -> SidecarResult<SignedTransaction> {
        Ok(SignedTransaction::new(format!(
            "0x{}{}",
            hex::encode(unsigned.as_bytes()),
            hex::encode(signature.as_bytes())
        )))
    }
}

/// Keypair double producing a fixed-size deterministic signature.
pub struct FakeKeypair {
    address: String,
    refuse: bool,
}

impl FakeKeypair {
    pub fn alice() -> Self {
        Self {
            address: ALICE.to_string(),
            refuse: false,
        }
    }

    /// A keypair that refuses every signing request.
    pub fn refusing() -> Self {
        Self {
            address: ALICE.to_string(),
            refuse: true,
        }
    }
}

#[async_trait]
impl Keypair for FakeKeypair {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign(&self, payload: &[u8]) -> SidecarResult<Signature> {
        if self.refuse {
            return Err(SidecarError::Signing("key locked".to_string()));
        }
        // 64 bytes, derived from the payload so different payloads get
        // different signatures.
        let mut sig = vec![payload.len() as u8; 32];
        sig.extend_from_slice(&[0x5a; 32]);
        Ok(Signature::new(sig))
    }
}

pub fn material_body() -> serde_json::Value {
    json!({
        "at": { "hash": HEAD_HASH, "height": "216" },
        "genesisHash": GENESIS_HASH,
        "chainName": "Deeper",
        "specName": "deeper-chain",
        "specVersion": "34",
        "txVersion": "2",
        "metadata": "0x6d657461"
    })
}

pub fn head_body() -> serde_json::Value {
    json!({ "number": "216", "hash": HEAD_HASH })
}

pub fn balance_body(nonce: &str, free: &str) -> serde_json::Value {
    json!({
        "at": { "hash": HEAD_HASH, "height": "216" },
        "nonce": nonce,
        "tokenSymbol": "DPR",
        "free": free,
        "reserved": "0",
        "miscFrozen": "0",
        "feeFrozen": "0",
        "locks": []
    })
}

/// Mount the endpoints a transaction build touches: material, head block,
/// and balance-info for `address` reporting `chain_nonce`.
pub fn mount_build_endpoints<'a>(
    server: &'a MockServer,
    address: &str,
    chain_nonce: &str,
) -> (Mock<'a>, Mock<'a>, Mock<'a>) {
    let material = server.mock(|when, then| {
        when.method(GET)
            .path("/transaction/material")
            .query_param("metadata", "scale");
        then.status(200).json_body(material_body());
    });
    let head = server.mock(|when, then| {
        when.method(GET).path("/blocks/head");
        then.status(200).json_body(head_body());
    });
    let balance = server.mock(|when, then| {
        when.method(GET).path(format!("/accounts/{address}/balance-info"));
        then.status(200)
            .json_body(balance_body(chain_nonce, "10000000000000000000000000"));
    });
    (material, head, balance)
}

/// Mount a submission endpoint that accepts anything and returns the
/// canned pool hash.
pub fn mount_submit(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/transaction");
        then.status(200).json_body(json!({ "hash": SUBMIT_HASH }));
    })
}
