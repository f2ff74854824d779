//! Consensus parameter epochs and the height-indexed registry that selects
//! among them (`ConsensusEpoch`/`ConsensusRegistry`).
//!
//! The original source (`chainparams.cpp`) stitches these into a hand-built
//! binary search tree keyed by `nHeightEffective`. Here that's replaced by
//! a plain, ascending `Vec<ConsensusEpoch>` and a `partition_point` lookup:
//! identical semantics, no internal pointers.

use crate::deployments::Deployment;
use bitcrypto::SHA256D;
use primitives::bigint::U256;

pub type H256 = SHA256D;

/// One immutable bundle of rule constants, effective from `height_effective`
/// onward until the next epoch's `height_effective`.
#[derive(Debug, Clone)]
pub struct ConsensusEpoch {
	pub pow_limit: U256,
	pub pow_target_timespan: i64,
	pub pow_target_spacing: i64,
	pub coinbase_maturity: u32,
	pub subsidy_halving_interval: u32,
	pub allow_min_difficulty: bool,
	pub allow_digishield_min_difficulty: bool,
	pub no_retargeting: bool,
	pub digishield: bool,
	pub simplified_rewards: bool,
	pub auxpow_chain_id: u32,
	pub strict_chain_id: bool,
	pub allow_legacy_blocks: bool,
	pub height_effective: i32,
	pub rule_change_activation_threshold: u32,
	pub miner_confirmation_window: u32,
	pub bip34_height: i32,
	pub bip65_height: i32,
	pub bip66_height: i32,
	pub deployments: Vec<Deployment>,
	pub min_chain_work: U256,
	pub default_assume_valid: H256,
	pub hash_genesis_block: H256,
}

impl ConsensusEpoch {
	pub fn deployment(&self, name: &str) -> Option<&Deployment> {
		self.deployments.iter().find(|d| d.name == name)
	}
}

/// An ordered, non-overlapping collection of epochs for one network
/// (invariant: strictly increasing `height_effective`, smallest one
/// `≤ 0`).
#[derive(Debug, Clone)]
pub struct ConsensusRegistry {
	epochs: Vec<ConsensusEpoch>,
}

impl ConsensusRegistry {
	/// `epochs` must already be sorted ascending by `height_effective`; this
	/// is a constructor invariant, not something re-derived at lookup time.
	pub fn new(epochs: Vec<ConsensusEpoch>) -> Self {
		debug_assert!(!epochs.is_empty(), "a registry must contain at least the genesis epoch");
		debug_assert!(epochs[0].height_effective <= 0, "the earliest epoch must cover height 0");
		debug_assert!(
			epochs.windows(2).all(|w| w[0].height_effective < w[1].height_effective),
			"epoch height_effective values must be strictly increasing"
		);
		ConsensusRegistry { epochs }
	}

	/// Returns the epoch with the greatest `height_effective ≤ height`.
	/// If `height` precedes every epoch, returns the earliest one (which,
	/// by construction, covers height 0).
	pub fn get_consensus(&self, height: i32) -> &ConsensusEpoch {
		// partition_point finds the first index whose height_effective > height;
		// the epoch one before that is the one whose height_effective <= height.
		let idx = self.epochs.partition_point(|epoch| epoch.height_effective <= height);
		let idx = idx.saturating_sub(1);
		&self.epochs[idx]
	}

	pub fn epochs(&self) -> &[ConsensusEpoch] {
		&self.epochs
	}

	#[cfg(any(test, feature = "test-helpers"))]
	pub fn epochs_mut(&mut self) -> &mut [ConsensusEpoch] {
		&mut self.epochs
	}
}
