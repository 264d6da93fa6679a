//! Supported call kinds and their argument validation.
//!
//! Validation happens at construction, before any network traffic: a call
//! value that exists is a call the codec can be asked to encode.

use primitive_types::U256;

use crate::error::{SidecarError, SidecarResult};

/// Length of a device-pairing account identifier.
pub const DEVICE_ID_LEN: usize = 20;
/// Length of a device-pairing ownership proof.
pub const PAIR_PROOF_LEN: usize = 65;

/// A chain call the pipeline knows how to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Liveness ping for a registered device. No arguments.
    ImOnline,
    /// Register the device as a server for the given number of eras.
    RegisterServer { duration_eras: u32 },
    /// Balance transfer. The amount travels as an arbitrary-precision
    /// integer end to end.
    Transfer { dest: String, amount: U256 },
    /// Pair a secondary account with this device: a 20-byte account
    /// identifier plus a 65-byte ownership proof.
    DevicePairMultiAccounts {
        paired_account: [u8; DEVICE_ID_LEN],
        proof: [u8; PAIR_PROOF_LEN],
    },
}

impl Call {
    pub fn im_online() -> Self {
        Call::ImOnline
    }

    pub fn register_server(duration_eras: u32) -> Self {
        Call::RegisterServer { duration_eras }
    }

    /// Build a transfer call from a decimal-string amount.
    ///
    /// The string form avoids precision loss for amounts beyond the
    /// 53-bit/64-bit range; anything that is not a plain decimal integer
    /// is rejected here.
    pub fn transfer(dest: impl Into<String>, amount: &str) -> SidecarResult<Self> {
        let amount = U256::from_dec_str(amount.trim())
            .map_err(|e| SidecarError::Build(format!("bad transfer amount '{amount}': {e:?}")))?;
        Ok(Call::Transfer {
            dest: dest.into(),
            amount,
        })
    }

    /// Build a device-pairing call, enforcing the fixed byte lengths.
    pub fn device_pair_multi_accounts(paired_account: &[u8], proof: &[u8]) -> SidecarResult<Self> {
        let paired_account: [u8; DEVICE_ID_LEN] = paired_account.try_into().map_err(|_| {
            SidecarError::Build(format!(
                "paired account must be {DEVICE_ID_LEN} bytes, got {}",
                paired_account.len()
            ))
        })?;
        let proof: [u8; PAIR_PROOF_LEN] = proof.try_into().map_err(|_| {
            SidecarError::Build(format!(
                "pairing proof must be {PAIR_PROOF_LEN} bytes, got {}",
                proof.len()
            ))
        })?;
        Ok(Call::DevicePairMultiAccounts {
            paired_account,
            proof,
        })
    }

    /// The `pallet.method` name the codec encodes this call as.
    pub fn method(&self) -> &'static str {
        match self {
            Call::ImOnline => "deeperNode.imOnline",
            Call::RegisterServer { .. } => "deeperNode.registerServer",
            Call::Transfer { .. } => "balances.transfer",
            Call::DevicePairMultiAccounts { .. } => "deeperNode.devicePairMultiAccounts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_accepts_amount_beyond_u64() {
        let call = Call::transfer("5FHne...Bob", "1000000000000000000000000").unwrap();
        match call {
            Call::Transfer { amount, .. } => {
                assert!(amount > U256::from(u64::MAX));
                assert_eq!(
                    amount,
                    U256::from_dec_str("1000000000000000000000000").unwrap()
                );
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn test_transfer_rejects_non_decimal_amount() {
        assert!(matches!(
            Call::transfer("addr", "1.5"),
            Err(SidecarError::Build(_))
        ));
        assert!(matches!(
            Call::transfer("addr", "1e24"),
            Err(SidecarError::Build(_))
        ));
        assert!(matches!(
            Call::transfer("addr", "-3"),
            Err(SidecarError::Build(_))
        ));
    }

    #[test]
    fn test_device_pair_enforces_lengths() {
        let ok = Call::device_pair_multi_accounts(&[0u8; 20], &[0u8; 65]);
        assert!(ok.is_ok());

        let err = Call::device_pair_multi_accounts(&[0u8; 19], &[0u8; 65]).unwrap_err();
        assert!(matches!(err, SidecarError::Build(_)));
        assert!(err.to_string().contains("20 bytes"));

        let err = Call::device_pair_multi_accounts(&[0u8; 20], &[0u8; 64]).unwrap_err();
        assert!(matches!(err, SidecarError::Build(_)));
        assert!(err.to_string().contains("65 bytes"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Call::im_online().method(), "deeperNode.imOnline");
        assert_eq!(
            Call::register_server(10).method(),
            "deeperNode.registerServer"
        );
    }
}
