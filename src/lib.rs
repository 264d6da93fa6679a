//! Client library for a Substrate-chain sidecar HTTP API.
//!
//! Reads chain state (balances, credit records) and builds, signs, and
//! submits offline transactions. Encoding and signing are delegated to the
//! [`tx::ChainCodec`] and [`tx::Keypair`] capabilities supplied by the
//! caller.

pub mod config;
pub mod error;
pub mod gateway;
pub mod nonce;
pub mod tx;

pub use config::SidecarConfig;
pub use error::{SidecarError, SidecarResult};
pub use gateway::{
    AccountBalance, BlockReference, SidecarApi, TransactionMaterial, TxHash, UserCredit,
};
pub use nonce::NonceTracker;
pub use tx::{Call, ChainCodec, Keypair, SidecarClient};
