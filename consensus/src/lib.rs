//! The consensus core: difficulty retarget, PoW/auxPoW
//! verification, the block subsidy schedule, and the minimum-relay-fee
//! helper. Everything here is a pure function of its explicit arguments plus
//! an immutable `&network::ConsensusEpoch`/`&network::NetworkParams` — no
//! process-wide mutable state, no I/O, safe to call from any thread.

pub mod chain_index;
pub mod difficulty;
pub mod fee;
pub mod pow;
pub mod subsidy;

pub use chain_index::ChainIndexNode;
pub use difficulty::next_required_bits;
pub use fee::{dust_fee, is_dust, min_relay_fee, FeeRate, MempoolDeltas, NoDeltas, MAX_MONEY, MIN_RELAY_TX_FEE};
pub use pow::{check_auxpow_pow, check_pow};
pub use subsidy::subsidy;
