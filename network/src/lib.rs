extern crate chain;
extern crate primitives;
extern crate script;

pub mod consensus;
mod deployments;
mod genesis;
mod network;
mod params;

pub use primitives::{compact, hash};

pub use consensus::{ConsensusEpoch, ConsensusRegistry};
pub use deployments::Deployment;
pub use genesis::GenesisParams;
pub use network::{Magic, NetworkId};
pub use params::{main_params, regtest_params, test_params, Base58Prefixes, ChainTxData, NetworkParams};

/// Selects the network by name: the only user-visible
/// startup error the consensus core emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
	UnknownChain(String),
}

impl std::fmt::Display for NetworkError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			NetworkError::UnknownChain(name) => write!(f, "unknown chain: {}", name),
		}
	}
}

impl std::error::Error for NetworkError {}

/// Builds the `NetworkParams` for the named network (`"main"`, `"test"`,
/// `"regtest"`). Callers that want the process-wide active instance should
/// use `select_active`/`active_params` instead (selection happens once at
/// process start).
pub fn select(name: &str) -> Result<NetworkParams, NetworkError> {
	match NetworkId::parse(name) {
		Some(NetworkId::Main) => Ok(main_params()),
		Some(NetworkId::Test) => Ok(test_params()),
		Some(NetworkId::Regtest) => Ok(regtest_params()),
		None => Err(NetworkError::UnknownChain(name.to_string())),
	}
}

static ACTIVE: once_cell::sync::OnceCell<NetworkParams> = once_cell::sync::OnceCell::new();

/// Selects the process-wide active network by name, exactly once. A second
/// call (with any name) is a caller bug, not a network condition: it returns
/// `Err` without disturbing the already-selected network.
pub fn select_active(name: &str) -> Result<(), NetworkError> {
	let params = select(name)?;
	ACTIVE
		.set(params)
		.map_err(|_| NetworkError::UnknownChain(format!("active network already selected, cannot reselect {}", name)))
}

/// The process-wide active network, set once via `select_active`.
///
/// # Panics
/// Panics if no network has been selected yet; this is a caller-ordering
/// bug (consensus validation must never run before network selection),
/// not a condition validation code should recover from.
pub fn active_params() -> &'static NetworkParams {
	ACTIVE.get().expect("active_params() called before select_active()")
}
