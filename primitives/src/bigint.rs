//! 256-bit unsigned integer used for proof-of-work targets and chain work.

construct_uint! {
	pub struct U256(4);
}

impl U256 {
	/// Interprets `bytes` as a big-endian 256-bit integer (the convention used
	/// for `powLimit`/`hashGenesisBlock` literals throughout the consensus
	/// core). Named distinctly from the `uint` crate's own (slice-based,
	/// auto-padding) `from_big_endian`/`to_big_endian` to keep this crate's
	/// fixed-width 32-byte convention unambiguous at call sites.
	pub fn from_be_bytes32(bytes: &[u8; 32]) -> Self {
		let mut words = [0u64; 4];
		for (i, word) in words.iter_mut().enumerate() {
			let start = 24 - i * 8;
			*word = u64::from_be_bytes(bytes[start..start + 8].try_into().expect("8 byte chunk"));
		}
		U256(words)
	}

	/// Interprets `bytes` as a little-endian 256-bit integer, the convention
	/// `arith_uint256` uses internally for a raw 32-byte hash (the PoW target
	/// `uint256(hash) ≤ decoded_target`).
	pub fn from_le_bytes32(bytes: &[u8; 32]) -> Self {
		let mut reversed = *bytes;
		reversed.reverse();
		U256::from_be_bytes32(&reversed)
	}

	/// Big-endian byte representation, matching the network-order display of
	/// block hashes and targets.
	pub fn to_be_bytes32(&self) -> [u8; 32] {
		let mut out = [0u8; 32];
		for (i, word) in self.0.iter().enumerate() {
			out[24 - i * 8..32 - i * 8].copy_from_slice(&word.to_be_bytes());
		}
		out
	}
}

use std::convert::TryInto;
