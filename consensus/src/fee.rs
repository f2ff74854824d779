//! Minimum relay fee helper.
//!
//! Grounded on `GetPruxMinRelayFee`/`GetPruxDustFee` (`prux.cpp`), which in
//! turn lean on Bitcoin Core's `CFeeRate::GetFee`/`CTxOut::IsDust`. The
//! mempool itself is out of scope here — referenced only as an opaque
//! priority/fee delta source; callers supply a `MempoolDeltas`
//! implementation instead of a concrete `CTxMemPool` lock.

use bitcrypto::SHA256D;
use chain::{Transaction, TransactionOutput};

pub type Amount = u64;

/// Bitcoin Core's `DEFAULT_BLOCK_PRIORITY_SIZE`: the portion of a block
/// miners conventionally reserve for high-priority, fee-free transactions.
pub const DEFAULT_BLOCK_PRIORITY_SIZE: usize = 50_000;

/// Placeholder upper bound on any single amount, used by `MoneyRange`'s
/// clamp; the exact supply cap isn't pinned down by the available sources,
/// so the conventional Bitcoin-family value is used (documented in DESIGN.md).
pub const MAX_MONEY: Amount = 21_000_000 * chain::constants::COIN;

/// The minimum-relay fee rate the dust/relay-fee computation is pinned to;
/// 1000 base units per kilobyte matches Bitcoin Core's historical
/// `DEFAULT_MIN_RELAY_TX_FEE`.
pub const MIN_RELAY_TX_FEE: FeeRate = FeeRate { fee_per_k: 1_000 };

/// A linear fee-per-kilobyte rate, mirroring `CFeeRate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRate {
	pub fee_per_k: Amount,
}

impl FeeRate {
	/// `CFeeRate::GetFee`: linear in size, but never zero for a non-empty,
	/// non-free rate — a transaction one byte long still owes at least one
	/// base unit if the rate is positive.
	pub fn fee(&self, n_bytes: usize) -> Amount {
		let fee = (self.fee_per_k as u128 * n_bytes as u128 / 1000) as Amount;
		if fee == 0 && n_bytes != 0 && self.fee_per_k > 0 {
			1
		} else {
			fee
		}
	}
}

/// The serialized size of a `TransactionOutput` plus the overhead of the
/// input that would eventually spend it, approximating
/// `CTxOut::IsDust`'s `nSize` (32-byte prevout hash + 4-byte index + 1-byte
/// script-length varint + legacy scriptSig/witness budget + 4-byte sequence).
fn spendable_size(output: &TransactionOutput) -> usize {
	const SPEND_OVERHEAD: usize = 32 + 4 + 1 + 107 + 4;
	8 + compact_size_len(output.script_pubkey.len()) + output.script_pubkey.len() + SPEND_OVERHEAD
}

fn compact_size_len(len: usize) -> usize {
	if len < 0xfd {
		1
	} else if len <= 0xffff {
		3
	} else {
		5
	}
}

/// `CTxOut::IsDust(minRelayTxFee)`: an output is dust when its value falls
/// below three times the fee it would cost to spend it at the minimum relay
/// rate.
pub fn is_dust(output: &TransactionOutput, rate: FeeRate) -> bool {
	output.value < 3 * rate.fee(spendable_size(output))
}

/// `GetPruxDustFee`: a flat `rate.fee_per_k` surcharge per
/// dust output, not a per-byte fee.
pub fn dust_fee(outputs: &[TransactionOutput], rate: FeeRate) -> Amount {
	outputs.iter().filter(|output| is_dust(output, rate)).map(|_| rate.fee_per_k).sum()
}

/// Stands in for the out-of-scope mempool's `ApplyDeltas`:
/// a capability that reads a transaction's priority/fee deltas under
/// whatever lock the real mempool holds, releasing it before returning.
pub trait MempoolDeltas {
	/// `mempool.ApplyDeltas`'s priority component.
	fn priority_delta(&self, hash: &SHA256D) -> f64;
	/// `mempool.ApplyDeltas`'s fee component.
	fn fee_delta(&self, hash: &SHA256D) -> Amount;
}

/// A `MempoolDeltas` that always reports "no deltas applied", for callers
/// (and tests) with no mempool at hand.
pub struct NoDeltas;

impl MempoolDeltas for NoDeltas {
	fn priority_delta(&self, _hash: &SHA256D) -> f64 {
		0.0
	}
	fn fee_delta(&self, _hash: &SHA256D) -> Amount {
		0
	}
}

/// `GetPruxMinRelayFee`: zero if the mempool has applied a
/// positive priority or fee delta to this transaction, the rate-derived fee
/// (relay fee plus per-dust-output surcharge) otherwise, waived under
/// `allow_free` for small transactions, and clamped to `MAX_MONEY` if the
/// computed fee ever falls outside `[0, MAX_MONEY]`.
pub fn min_relay_fee(tx: &Transaction, tx_hash: &SHA256D, n_bytes: usize, allow_free: bool, mempool: &dyn MempoolDeltas) -> Amount {
	let priority_delta = mempool.priority_delta(tx_hash);
	let fee_delta = mempool.fee_delta(tx_hash);
	if priority_delta > 0.0 || fee_delta > 0 {
		return 0;
	}

	let mut fee = MIN_RELAY_TX_FEE.fee(n_bytes) + dust_fee(&tx.outputs, MIN_RELAY_TX_FEE);

	if allow_free && n_bytes < DEFAULT_BLOCK_PRIORITY_SIZE - 1000 {
		fee = 0;
	}

	if fee > MAX_MONEY {
		fee = MAX_MONEY;
	}

	fee
}

#[cfg(test)]
mod tests {
	use super::*;
	use chain::constants::{COINBASE_OUTPOINT_INDEX, COIN, SEQUENCE_FINAL};
	use chain::{OutPoint, TransactionInput};
	use primitives::bytes::Bytes;

	fn tx(outputs: Vec<TransactionOutput>) -> Transaction {
		Transaction {
			version: 1,
			inputs: vec![TransactionInput {
				previous_output: OutPoint {
					hash: SHA256D::default(),
					index: COINBASE_OUTPOINT_INDEX,
				},
				script_sig: Bytes::new(),
				sequence: SEQUENCE_FINAL,
			}],
			outputs,
			lock_time: 0,
		}
	}

	fn output(value: Amount) -> TransactionOutput {
		TransactionOutput {
			value,
			script_pubkey: vec![0xac].into(),
		}
	}

	#[test]
	fn fee_rate_rounds_down_but_never_to_zero_for_nonzero_size() {
		let rate = FeeRate { fee_per_k: 1 };
		assert_eq!(rate.fee(1), 1);
		assert_eq!(rate.fee(0), 0);
	}

	#[test]
	fn tiny_output_is_dust_at_min_relay_rate() {
		assert!(is_dust(&output(1), MIN_RELAY_TX_FEE));
		assert!(!is_dust(&output(100_000_000), MIN_RELAY_TX_FEE));
	}

	#[test]
	fn positive_mempool_delta_waives_the_fee() {
		struct Positive;
		impl MempoolDeltas for Positive {
			fn priority_delta(&self, _: &SHA256D) -> f64 {
				1.0
			}
			fn fee_delta(&self, _: &SHA256D) -> Amount {
				0
			}
		}
		let t = tx(vec![output(COIN)]);
		let hash = chain::transaction_hash(&t);
		assert_eq!(min_relay_fee(&t, &hash, 300, false, &Positive), 0);
	}

	#[test]
	fn allow_free_waives_small_transactions() {
		let t = tx(vec![output(COIN)]);
		let hash = chain::transaction_hash(&t);
		assert_eq!(min_relay_fee(&t, &hash, 300, true, &NoDeltas), 0);
	}

	#[test]
	fn dust_outputs_add_a_flat_surcharge_per_output() {
		let t = tx(vec![output(1), output(1)]);
		let hash = chain::transaction_hash(&t);
		let fee = min_relay_fee(&t, &hash, 300, false, &NoDeltas);
		let base = MIN_RELAY_TX_FEE.fee(300);
		assert_eq!(fee, base + 2 * MIN_RELAY_TX_FEE.fee_per_k);
	}
}
