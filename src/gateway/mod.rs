//! Chain data gateway: typed access to the sidecar's HTTP endpoints.
//!
//! # Data Flow
//! ```text
//! Sidecar HTTP API (JSON, numbers as strings)
//!     → types.rs (wire structs, string → u64/U256 conversion)
//!     → api.rs (one request per operation, status triage, timeouts)
//! ```
//!
//! No retries happen here; a failed request surfaces immediately to the
//! caller. Balances are parsed into `U256`, never through floating point,
//! because on-chain amounts routinely exceed the 53-bit safe range.

pub mod api;
pub mod types;

pub use api::SidecarApi;
pub use types::{
    AccountBalance, BlockReference, TransactionMaterial, TxHash, UserCredit,
};
