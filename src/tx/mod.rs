//! Offline transaction construction and submission.
//!
//! # Data Flow
//! ```text
//! gateway (material, head block, account nonce)
//!     → material.rs (BaseTxInfo + TxOptions + codec registry)
//!     → call.rs (validated call kind + arguments)
//!     → pipeline.rs (build → payload → sign → attach → submit)
//! ```
//!
//! # Security Constraints
//! - Key material lives behind the [`codec::Keypair`] trait; this module
//!   only ever sees signature bytes
//! - Signing payloads and signatures are never logged
//!
//! The build → payload → sign → attach → submit sequence is strict; no
//! step may be skipped or reordered.

pub mod call;
pub mod codec;
pub mod material;
pub mod pipeline;

pub use call::Call;
pub use codec::{ChainCodec, Keypair, Signature, SignedTransaction, SigningPayload, UnsignedCall};
pub use material::{assemble_tx_args, BaseTxInfo, TxArgs, TxOptions};
pub use pipeline::SidecarClient;
