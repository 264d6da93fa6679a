//! Wire types for the sidecar API and their native conversions.
//!
//! The sidecar renders every on-chain integer as a JSON string. Conversion
//! goes straight from the string into `u64` or `U256`; a float intermediate
//! would silently lose precision on large balances.

use primitive_types::U256;
use serde::Deserialize;

use crate::error::{SidecarError, SidecarResult};

/// Block anchor attached to storage responses.
#[derive(Debug, Clone, Deserialize)]
pub struct AtRaw {
    pub hash: String,
    pub height: String,
}

/// Generic wrapper the sidecar puts around pallet storage reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageResponse<T> {
    pub at: AtRaw,
    pub pallet: String,
    pub pallet_index: String,
    pub storage_item: String,
    #[serde(default)]
    pub key1: Option<String>,
    pub value: Option<T>,
}

/// Raw credit record, all fields stringly typed on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreditRaw {
    pub campaign_id: String,
    pub credit: String,
    pub initial_credit_level: String,
    pub rank_in_initial_credit_level: String,
    pub number_of_referees: String,
    pub current_credit_level: String,
    pub reward_eras: String,
}

/// A user's credit record from the credit pallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredit {
    pub campaign_id: u64,
    pub credit: u64,
    pub initial_credit_level: String,
    pub rank_in_initial_credit_level: u64,
    pub number_of_referees: u64,
    pub current_credit_level: String,
    pub reward_eras: u64,
}

impl TryFrom<UserCreditRaw> for UserCredit {
    type Error = SidecarError;

    fn try_from(raw: UserCreditRaw) -> SidecarResult<Self> {
        Ok(Self {
            campaign_id: parse_u64("campaignId", &raw.campaign_id)?,
            credit: parse_u64("credit", &raw.credit)?,
            initial_credit_level: raw.initial_credit_level,
            rank_in_initial_credit_level: parse_u64(
                "rankInInitialCreditLevel",
                &raw.rank_in_initial_credit_level,
            )?,
            number_of_referees: parse_u64("numberOfReferees", &raw.number_of_referees)?,
            current_credit_level: raw.current_credit_level,
            reward_eras: parse_u64("rewardEras", &raw.reward_eras)?,
        })
    }
}

/// Raw balance-info response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceRaw {
    pub at: AtRaw,
    pub nonce: String,
    pub token_symbol: String,
    pub free: String,
    pub reserved: String,
    pub misc_frozen: String,
    pub fee_frozen: String,
}

/// Account balance with the nonce the chain currently reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub nonce: u64,
    pub token_symbol: String,
    pub free: U256,
    pub reserved: U256,
    pub misc_frozen: U256,
    pub fee_frozen: U256,
}

impl TryFrom<AccountBalanceRaw> for AccountBalance {
    type Error = SidecarError;

    fn try_from(raw: AccountBalanceRaw) -> SidecarResult<Self> {
        Ok(Self {
            nonce: parse_u64("nonce", &raw.nonce)?,
            token_symbol: raw.token_symbol,
            free: parse_u256("free", &raw.free)?,
            reserved: parse_u256("reserved", &raw.reserved)?,
            misc_frozen: parse_u256("miscFrozen", &raw.misc_frozen)?,
            fee_frozen: parse_u256("feeFrozen", &raw.fee_frozen)?,
        })
    }
}

/// Raw transaction-material response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMaterialRaw {
    pub at: AtRaw,
    pub genesis_hash: String,
    pub chain_name: String,
    pub spec_name: String,
    pub spec_version: String,
    pub tx_version: String,
    pub metadata: String,
}

/// Everything describing the chain's current runtime shape that a
/// transaction build needs. Refetched per build; spec version and metadata
/// can change between submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMaterial {
    pub genesis_hash: String,
    pub chain_name: String,
    pub spec_name: String,
    pub spec_version: u32,
    pub tx_version: u32,
    /// SCALE-encoded runtime metadata, hex on the wire, kept opaque.
    pub metadata_rpc: String,
}

impl TryFrom<TransactionMaterialRaw> for TransactionMaterial {
    type Error = SidecarError;

    fn try_from(raw: TransactionMaterialRaw) -> SidecarResult<Self> {
        Ok(Self {
            genesis_hash: raw.genesis_hash,
            chain_name: raw.chain_name,
            spec_name: raw.spec_name,
            spec_version: parse_u32("specVersion", &raw.spec_version)?,
            tx_version: parse_u32("txVersion", &raw.tx_version)?,
            metadata_rpc: raw.metadata,
        })
    }
}

/// Raw block header from `/blocks/head`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeadRaw {
    pub number: String,
    pub hash: String,
}

/// Anchor for a transaction's mortality window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReference {
    pub height: u64,
    pub hash: String,
}

impl TryFrom<BlockHeadRaw> for BlockReference {
    type Error = SidecarError;

    fn try_from(raw: BlockHeadRaw) -> SidecarResult<Self> {
        Ok(Self {
            height: parse_u64("number", &raw.number)?,
            hash: raw.hash,
        })
    }
}

/// Response body of a transaction submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRaw {
    pub hash: String,
}

/// Content hash of a submitted transaction: `0x` followed by 64 hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(String);

impl TxHash {
    /// Parse and validate a hash string reported by the sidecar.
    pub fn parse(s: &str) -> SidecarResult<Self> {
        let hex_part = s
            .strip_prefix("0x")
            .ok_or_else(|| SidecarError::Decode(format!("transaction hash missing 0x prefix: {s}")))?;
        let decoded = hex::decode(hex_part)
            .map_err(|e| SidecarError::Decode(format!("transaction hash is not hex ('{s}'): {e}")))?;
        if decoded.len() != 32 {
            return Err(SidecarError::Decode(format!(
                "transaction hash must be 32 bytes, got {}",
                decoded.len()
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn parse_u64(field: &str, s: &str) -> SidecarResult<u64> {
    s.parse::<u64>()
        .map_err(|e| SidecarError::Decode(format!("field '{field}' is not a u64 ('{s}'): {e}")))
}

pub(crate) fn parse_u32(field: &str, s: &str) -> SidecarResult<u32> {
    s.parse::<u32>()
        .map_err(|e| SidecarError::Decode(format!("field '{field}' is not a u32 ('{s}'): {e}")))
}

pub(crate) fn parse_u256(field: &str, s: &str) -> SidecarResult<U256> {
    U256::from_dec_str(s)
        .map_err(|e| SidecarError::Decode(format!("field '{field}' is not an integer ('{s}'): {e:?}")))
}
