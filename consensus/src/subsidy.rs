//! Block subsidy schedule.
//!
//! Grounded on `GetPruxBlockSubsidy` (`prux.cpp`): `nSubsidy = 0.009595 *
//! COIN; nSubsidy >>= (nHeight / 5959595);`. To keep floating point out of
//! consensus code, the multiply is precomputed by hand into a single
//! integer constant rather than evaluated at runtime — 959_500 is
//! canonical, not merely "a" valid rounding of 0.009595 * COIN.

use bitcrypto::SHA256D;
use network::ConsensusEpoch;

/// Base units; matches `chain::constants::COIN`.
pub type Amount = u64;

/// `round(0.009595 * COIN)` with `COIN = 100_000_000`, computed once by hand.
const BASE_SUBSIDY: Amount = 959_500;

/// Beyond this many halvings the subsidy is definitionally zero; the source
/// never reaches it (`>>` on a 64-bit `nSubsidy` would already be zero well
/// before 64 shifts), but the original states the cutoff explicitly and we
/// honor it rather than rely on shift-amount UB.
const MAX_HALVINGS: u32 = 64;

/// `subsidy(height, params, prev_hash)`. `prev_hash` is
/// accepted for interface parity with subsidy variants elsewhere in the
/// Dogecoin/Digibyte family that randomize the reward on it; this variant
/// ignores it, as the original `GetPruxBlockSubsidy`'s unused `prevHash`
/// parameter does.
pub fn subsidy(height: i32, _params: &ConsensusEpoch, _prev_hash: SHA256D) -> Amount {
	let halvings = (height as i64 / 5_959_595) as u32;
	if halvings >= MAX_HALVINGS {
		return 0;
	}
	BASE_SUBSIDY >> halvings
}

#[cfg(test)]
mod tests {
	use super::*;
	use primitives::bigint::U256;

	fn params() -> ConsensusEpoch {
		ConsensusEpoch {
			pow_limit: U256::zero(),
			pow_target_timespan: 360,
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
			bip34_height: 99_324_612,
			bip65_height: 99_324_612,
			bip66_height: 99_324_612,
			deployments: Vec::new(),
			min_chain_work: U256::zero(),
			default_assume_valid: SHA256D::default(),
			hash_genesis_block: SHA256D::default(),
		}
	}

	// Halving boundary check.
	#[test]
	fn halving_boundary_matches_scenario_f() {
		let p = params();
		let zero = SHA256D::default();
		assert_eq!(subsidy(5_959_594, &p, zero), 959_500);
		assert_eq!(subsidy(5_959_595, &p, zero), 479_750);
		assert_eq!(subsidy(5_959_595 * 64, &p, zero), 0);
	}

	#[test]
	fn zero_height_pays_full_base_subsidy() {
		let p = params();
		assert_eq!(subsidy(0, &p, SHA256D::default()), BASE_SUBSIDY);
	}

	#[test]
	fn subsidy_never_negative_and_decays_monotonically() {
		let p = params();
		let mut previous = subsidy(0, &p, SHA256D::default());
		for halving in 1..70 {
			let height = 5_959_595 * halving;
			let current = subsidy(height, &p, SHA256D::default());
			assert!(current <= previous);
			previous = current;
		}
	}

	// subsidy(height) = subsidy(height mod interval) >> (height / interval).
	#[test]
	fn property_subsidy_determinism_and_decay() {
		let p = params();
		for height in [0i32, 1, 5_959_594, 5_959_595, 5_959_595 + 1, 5_959_595 * 3 + 42] {
			let halvings = height / 5_959_595;
			let expected = if halvings as u32 >= MAX_HALVINGS {
				0
			} else {
				subsidy(height % 5_959_595, &p, SHA256D::default()) >> halvings
			};
			assert_eq!(subsidy(height, &p, SHA256D::default()), expected);
		}
	}
}
