//! Seams to the external codec and key capabilities.
//!
//! The chain-specific SCALE encoding and the signature algorithm are not
//! implemented here. [`ChainCodec`] and [`Keypair`] model them as opaque
//! capabilities; the pipeline only moves their artifacts through the
//! build → payload → sign → attach sequence.

use async_trait::async_trait;

use crate::error::SidecarResult;
use crate::gateway::types::TransactionMaterial;
use crate::tx::call::Call;
use crate::tx::material::{BaseTxInfo, TxOptions};

/// An encoded but unsigned extrinsic. Opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedCall(Vec<u8>);

impl UnsignedCall {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The exact bytes a key must sign for a given unsigned call.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningPayload(Vec<u8>);

impl SigningPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Payload bytes stay out of logs; Debug shows only the length.
impl std::fmt::Debug for SigningPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningPayload").field("len", &self.0.len()).finish()
    }
}

/// Signature bytes produced by a [`Keypair`].
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature").field("len", &self.0.len()).finish()
    }
}

/// A fully signed transaction, hex-encoded and ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction(String);

impl SignedTransaction {
    pub fn new(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

/// The chain type-registry / encoding capability.
///
/// Implementations must be deterministic: building from an identical
/// [`BaseTxInfo`] and call yields byte-identical output. Argument
/// rejections surface as [`crate::SidecarError::Build`].
pub trait ChainCodec: Send + Sync {
    /// Chain type registry decoded from runtime metadata. Opaque to the
    /// pipeline; only ever handed back to this codec.
    type Registry: Send + Sync;

    /// Decode the runtime metadata in `material` into a type registry.
    fn build_registry(&self, material: &TransactionMaterial) -> SidecarResult<Self::Registry>;

    /// Encode a call plus its base transaction info into an unsigned
    /// extrinsic.
    fn build_unsigned_call(
        &self,
        registry: &Self::Registry,
        call: &Call,
        base: &BaseTxInfo,
        options: &TxOptions,
    ) -> SidecarResult<UnsignedCall>;

    /// Derive the byte sequence a key must sign for `unsigned`.
    fn signing_payload(
        &self,
        registry: &Self::Registry,
        unsigned: &UnsignedCall,
    ) -> SidecarResult<SigningPayload>;

    /// Combine the unsigned call and a signature into a submittable
    /// transaction.
    fn attach_signature(
        &self,
        registry: &Self::Registry,
        unsigned: &UnsignedCall,
        signature: &Signature,
    ) -> SidecarResult<SignedTransaction>;
}

/// The key holder capability.
///
/// Failures surface as [`crate::SidecarError::Signing`]. The pipeline
/// never persists or logs anything an implementation produces besides the
/// final signed transaction.
#[async_trait]
pub trait Keypair: Send + Sync {
    /// The chain address this key signs for.
    fn address(&self) -> &str;

    /// Sign arbitrary payload bytes.
    async fn sign(&self, payload: &[u8]) -> SidecarResult<Signature>;
}
