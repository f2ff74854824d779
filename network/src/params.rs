//! `NetworkParams`: a consensus registry plus the non-consensus network
//! identity — magic bytes, default port, seeds,
//! base58 prefixes, checkpoints, a chain-tx-data snapshot, and the boolean
//! flags/reorg bounds the rest of a full node (out of scope here) consults.

use crate::consensus::{ConsensusEpoch, ConsensusRegistry, H256};
use crate::deployments::Deployment;
use crate::genesis::{create_genesis_block, GenesisParams};
use crate::network::{Magic, NetworkId};
use chain::Block;

/// Single-byte (or, for extended keys, 4-byte) base58 address prefixes.
#[derive(Debug, Clone, Copy)]
pub struct Base58Prefixes {
	pub pubkey: u8,
	pub script: u8,
	pub secret: u8,
	pub ext_pub: [u8; 4],
	pub ext_sec: [u8; 4],
}

/// A point-in-time snapshot of cumulative transaction counts, used only to
/// estimate sync progress — never consulted by consensus decisions
/// themselves.
#[derive(Debug, Clone, Copy)]
pub struct ChainTxData {
	pub time: i64,
	pub tx_count: i64,
	pub tx_rate: f64,
}

#[derive(Debug, Clone)]
pub struct NetworkParams {
	pub network: NetworkId,
	pub registry: ConsensusRegistry,
	pub magic: Magic,
	pub default_port: u16,
	pub dns_seeds: &'static [&'static str],
	pub base58_prefixes: Base58Prefixes,
	pub checkpoints: &'static [(i32, &'static str)],
	pub chain_tx_data: ChainTxData,
	pub mining_requires_peers: bool,
	pub default_consistency_checks: bool,
	pub require_standard: bool,
	pub mine_blocks_on_demand: bool,
	pub max_reorg_depth: u32,
	pub min_reorg_peers: u32,
	pub genesis: GenesisParams,
}

impl NetworkParams {
	pub fn magic(&self) -> Magic {
		self.magic
	}

	/// Looks up the consensus epoch active at `height`.
	pub fn consensus_at(&self, height: i32) -> &ConsensusEpoch {
		self.registry.get_consensus(height)
	}

	/// Deterministically (re-)builds this network's genesis block.
	pub fn genesis_block(&self) -> Block {
		create_genesis_block(&self.genesis)
	}

	/// Test-only override of a regtest deployment's activation window
	/// (`update_bip9`). MUST NOT be used concurrently with
	/// validation.
	#[cfg(any(test, feature = "test-helpers"))]
	pub fn update_regtest_deployment(&mut self, name: &str, start_time: u32, timeout: u32) {
		debug_assert!(matches!(self.network, NetworkId::Regtest), "deployment override is regtest-only");
		for epoch in self.registry.epochs_mut() {
			for deployment in epoch.deployments.iter_mut() {
				if deployment.name == name {
					deployment.start_time = start_time;
					deployment.timeout = timeout;
				}
			}
		}
	}
}

fn main_deployments() -> Vec<Deployment> {
	Vec::new()
}
fn test_deployments() -> Vec<Deployment> {
	Vec::new()
}
fn regtest_deployments() -> Vec<Deployment> {
	vec![Deployment::new("testdummy", 28, 0, 0xffff_ffff)]
}

fn main_registry() -> ConsensusRegistry {
	use primitives::bigint::U256;
	// ~0 >> 20.
	let pow_limit = !U256::zero() >> 20;

	let base = ConsensusEpoch {
		pow_limit,
		pow_target_timespan: 6 * 60,
		pow_target_spacing: 3,
		coinbase_maturity: 259,
		subsidy_halving_interval: 5_959_595,
		allow_min_difficulty: false,
		allow_digishield_min_difficulty: false,
		no_retargeting: false,
		digishield: false,
		simplified_rewards: false,
		auxpow_chain_id: 0x03BF,
		strict_chain_id: true,
		allow_legacy_blocks: true,
		height_effective: 0,
		rule_change_activation_threshold: 9576,
		miner_confirmation_window: 10080,
		// far-future sentinel: never enforced on mainnet.
		bip34_height: 99_324_612,
		bip65_height: 99_324_612,
		bip66_height: 99_324_612,
		deployments: main_deployments(),
		min_chain_work: U256::zero(),
		default_assume_valid: H256::default(),
		hash_genesis_block: H256::default(),
	};

	let digishield = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		height_effective: 15_615_200,
		..base.clone()
	};

	let auxpow = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		allow_legacy_blocks: false,
		height_effective: 15_615_201,
		..base.clone()
	};

	ConsensusRegistry::new(vec![base, digishield, auxpow])
}

fn test_registry() -> ConsensusRegistry {
	use primitives::bigint::U256;
	let pow_limit = !U256::zero() >> 20;

	let base = ConsensusEpoch {
		pow_limit,
		pow_target_timespan: 6 * 60,
		pow_target_spacing: 3,
		coinbase_maturity: 30,
		subsidy_halving_interval: 100_000,
		allow_min_difficulty: false,
		allow_digishield_min_difficulty: false,
		no_retargeting: false,
		digishield: false,
		simplified_rewards: false,
		auxpow_chain_id: 0x0062,
		strict_chain_id: false,
		allow_legacy_blocks: true,
		height_effective: 0,
		rule_change_activation_threshold: 7_650,
		miner_confirmation_window: 10_080,
		bip34_height: 99_324_612,
		bip65_height: 99_324_612,
		bip66_height: 99_324_612,
		deployments: test_deployments(),
		min_chain_work: U256::zero(),
		default_assume_valid: H256::default(),
		hash_genesis_block: H256::default(),
	};

	let digishield = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		height_effective: 145_000,
		..base.clone()
	};

	let min_difficulty = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		allow_min_difficulty: true,
		height_effective: 157_500,
		..base.clone()
	};

	let auxpow = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		allow_min_difficulty: true,
		allow_legacy_blocks: false,
		height_effective: 158_100,
		..base.clone()
	};

	ConsensusRegistry::new(vec![base, digishield, min_difficulty, auxpow])
}

fn regtest_registry() -> ConsensusRegistry {
	use primitives::bigint::U256;
	// Regtest's limit is the widest possible (bits=0x207fffff): `~0 >> 1`.
	let pow_limit = !U256::zero() >> 1;

	let base = ConsensusEpoch {
		pow_limit,
		pow_target_timespan: 6 * 60,
		pow_target_spacing: 3,
		coinbase_maturity: 60,
		subsidy_halving_interval: 150,
		allow_min_difficulty: true,
		allow_digishield_min_difficulty: true,
		no_retargeting: true,
		digishield: false,
		simplified_rewards: false,
		auxpow_chain_id: 0x0062,
		strict_chain_id: true,
		allow_legacy_blocks: true,
		height_effective: 0,
		rule_change_activation_threshold: 108,
		miner_confirmation_window: 144,
		bip34_height: 100_000_000,
		bip65_height: 1_351,
		bip66_height: 1_251,
		deployments: regtest_deployments(),
		min_chain_work: U256::zero(),
		default_assume_valid: H256::default(),
		hash_genesis_block: H256::default(),
	};

	let digishield = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		height_effective: 10,
		..base.clone()
	};

	let auxpow = ConsensusEpoch {
		digishield: true,
		simplified_rewards: true,
		height_effective: 20,
		..base.clone()
	};

	ConsensusRegistry::new(vec![base, digishield, auxpow])
}

const MAIN_TIMESTAMP: &str = "The coin was developed in Switzerland by a capitalist, who wants to move the world on 07/27/14";
/// `PUSH("0x0") OP_CHECKSIG`, as given literally in chainparams.cpp.
const MAIN_OUTPUT_SCRIPT: &[u8] = &[0x03, b'0', b'x', b'0', 0xac];

pub fn main_params() -> NetworkParams {
	NetworkParams {
		network: NetworkId::Main,
		registry: main_registry(),
		magic: NetworkId::Main.magic(),
		default_port: NetworkId::Main.port(),
		dns_seeds: &[],
		base58_prefixes: Base58Prefixes {
			pubkey: 55,
			script: 117,
			secret: 183,
			ext_pub: [0x04, 0x88, 0xb2, 0x1e],
			ext_sec: [0x04, 0x88, 0xad, 0xe4],
		},
		checkpoints: &[(0, "32dca787cfb73d50595a599b6fd72afce9a7c52ead22b8f15dfd8aabc5eaac32")],
		chain_tx_data: ChainTxData {
			time: 1_406_496_258,
			tx_count: 0,
			tx_rate: 0.01,
		},
		mining_requires_peers: true,
		default_consistency_checks: false,
		require_standard: true,
		mine_blocks_on_demand: false,
		max_reorg_depth: 8,
		min_reorg_peers: 3,
		genesis: GenesisParams {
			timestamp: MAIN_TIMESTAMP,
			output_script: MAIN_OUTPUT_SCRIPT,
			time: 1_406_496_258,
			nonce: 2_984_499,
			bits: 0x1e0f_fff0,
			version: 1,
			reward: 0,
		},
	}
}

pub fn test_params() -> NetworkParams {
	NetworkParams {
		network: NetworkId::Test,
		registry: test_registry(),
		magic: NetworkId::Test.magic(),
		default_port: NetworkId::Test.port(),
		dns_seeds: &[],
		base58_prefixes: Base58Prefixes {
			pubkey: 113,
			script: 196,
			secret: 241,
			ext_pub: [0x04, 0x35, 0x87, 0xcf],
			ext_sec: [0x04, 0x35, 0x83, 0x94],
		},
		checkpoints: &[],
		chain_tx_data: ChainTxData {
			time: 1_391_503_289,
			tx_count: 0,
			tx_rate: 0.01,
		},
		mining_requires_peers: true,
		default_consistency_checks: false,
		require_standard: false,
		mine_blocks_on_demand: false,
		max_reorg_depth: 8,
		min_reorg_peers: 3,
		genesis: GenesisParams {
			timestamp: MAIN_TIMESTAMP,
			output_script: MAIN_OUTPUT_SCRIPT,
			time: 1_391_503_289,
			nonce: 997_879,
			bits: 0x1e0f_fff0,
			version: 1,
			reward: 88 * chain::constants::COIN,
		},
	}
}

pub fn regtest_params() -> NetworkParams {
	NetworkParams {
		network: NetworkId::Regtest,
		registry: regtest_registry(),
		magic: NetworkId::Regtest.magic(),
		default_port: NetworkId::Regtest.port(),
		dns_seeds: &[],
		base58_prefixes: Base58Prefixes {
			pubkey: 111,
			script: 196,
			secret: 239,
			ext_pub: [0x04, 0x35, 0x87, 0xcf],
			ext_sec: [0x04, 0x35, 0x83, 0x94],
		},
		checkpoints: &[],
		chain_tx_data: ChainTxData {
			time: 1_296_688_602,
			tx_count: 0,
			tx_rate: 0.0,
		},
		mining_requires_peers: false,
		default_consistency_checks: true,
		require_standard: false,
		mine_blocks_on_demand: true,
		max_reorg_depth: 8,
		min_reorg_peers: 1,
		genesis: GenesisParams {
			timestamp: MAIN_TIMESTAMP,
			output_script: MAIN_OUTPUT_SCRIPT,
			time: 1_296_688_602,
			nonce: 2,
			bits: 0x207f_ffff,
			version: 1,
			reward: 88 * chain::constants::COIN,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bitcrypto::FromStr;

	#[test]
	fn main_genesis_block_hash_matches_checkpoint_zero() {
		let params = main_params();
		let block = params.genesis_block();
		let hash = chain::block_header_hash(&block.block_header);
		let expected = bitcrypto::SHA256D::from_str(params.checkpoints[0].1).unwrap();
		assert_eq!(hash, expected);
	}

	#[test]
	fn registry_lookup_covers_auxpow_activation_boundary() {
		let params = main_params();
		assert!(params.consensus_at(15_615_200).allow_legacy_blocks);
		assert!(params.consensus_at(15_615_200).digishield);
		assert!(!params.consensus_at(15_615_201).allow_legacy_blocks);
	}

	#[test]
	fn three_networks_have_distinct_magic() {
		assert_ne!(main_params().magic.0, test_params().magic.0);
		assert_ne!(test_params().magic.0, regtest_params().magic.0);
	}

	#[test]
	fn regtest_deployment_override_updates_window() {
		let mut params = regtest_params();
		params.update_regtest_deployment("testdummy", 1_000, 2_000);
		let updated = params.registry.epochs()[0]
			.deployment("testdummy")
			.expect("testdummy deployment exists on regtest");
		assert_eq!(updated.start_time, 1_000);
		assert_eq!(updated.timeout, 2_000);
	}
}
