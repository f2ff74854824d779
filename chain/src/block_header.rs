use crate::transaction::Transaction;
use bitcrypto::{dhash256, scrypt_pow_hash, SHA256D, SCRYPT256};
use primitives::compact::Compact;
use ser::{serialize, Bytes};
use std::convert::TryInto;

/// Version bit marking a header as merge-mined (auxpow present or expected).
pub const VERSION_AUXPOW: i32 = 1 << 8;
/// The chain ID occupies the high 16 bits of `version`.
pub const VERSION_CHAIN_ID_SHIFT: u32 = 16;

/// `version == 1` is a "legacy", pre-merge-mining block: no chain ID, no
/// auxpow flag, and never carries an `AuxPow`.
pub fn is_legacy_version(version: i32) -> bool {
	version == 1
}

pub fn is_auxpow_version(version: i32) -> bool {
	version & VERSION_AUXPOW != 0
}

pub fn chain_id(version: i32) -> i32 {
	version >> VERSION_CHAIN_ID_SHIFT
}

/// The fixed 80-byte header shape shared by Prux's own chain and any
/// parent-chain header an `AuxPow` commits to.
#[derive(Debug, Clone, PartialEq, Serializable, Deserializable)]
pub struct BlockHeader {
	pub version: i32,
	pub previous_header_hash: SHA256D,
	pub merkle_root_hash: SHA256D,
	pub time: u32,
	pub bits: Compact,
	pub nonce: u32,
}

pub type ParentBlockHeader = BlockHeader;

/// Double-SHA256 of the 80-byte header, independent of any auxpow the full
/// block may carry alongside it.
pub fn block_header_hash(header: &BlockHeader) -> SHA256D {
	dhash256(&serialize(header))
}

/// The scrypt(1024,1,1) hash used as the input to `check_pow`. Distinct from
/// `block_header_hash`, which is always double-SHA256 and is what auxpow
/// parent chains commit to.
pub fn block_pow_hash(header: &BlockHeader) -> SCRYPT256 {
	scrypt_pow_hash(&serialize(header))
}

/// Merge-mining magic, prefixed immediately before the chain merkle root in
/// the parent coinbase `scriptSig`, as in Namecoin/Dogecoin-style auxpow.
pub const MERGED_MINING_HEADER: [u8; 4] = [0xfa, 0xbe, b'm', b'm'];

/// A proof linking a block's hash to a parent-chain coinbase transaction via
/// two Merkle branches: one placing the coinbase in the parent block, one
/// placing this chain's hash in the "chain merkle tree" of chains merge-mined
/// together under that coinbase. See the DESIGN NOTES: the exact rules this
/// implements are the well-known Namecoin/Dogecoin-family auxpow scheme;
/// finer points of the coinbase-script grammar are simplified here.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxPow {
	pub coinbase_tx: Transaction,
	pub parent_hash: SHA256D,
	pub coinbase_branch: Vec<SHA256D>,
	pub coinbase_index: u32,
	pub blockchain_branch: Vec<SHA256D>,
	pub blockchain_index: u32,
	pub parent_block_header: ParentBlockHeader,
}

/// Applies a Merkle branch to `hash`, using `index`'s low bits to choose
/// left/right concatenation order at each level (Bitcoin's `CheckMerkleBranch`).
fn apply_merkle_branch(mut hash: SHA256D, branch: &[SHA256D], mut index: u32) -> SHA256D {
	for sibling in branch {
		let mut buf = [0u8; 64];
		if index & 1 == 1 {
			buf[0..32].copy_from_slice(sibling as &[u8]);
			buf[32..64].copy_from_slice(&hash as &[u8]);
		} else {
			buf[0..32].copy_from_slice(&hash as &[u8]);
			buf[32..64].copy_from_slice(sibling as &[u8]);
		}
		hash = dhash256(&buf);
		index >>= 1;
	}
	hash
}

/// The deterministic "which chain-merkle leaf does this chain occupy" index,
/// derived from a merge-mining nonce and the chain ID (Namecoin's
/// `getExpectedIndex`).
fn expected_index(nonce: u32, chain_id: i32, merkle_height: u32) -> u32 {
	let mut rand = nonce;
	rand = rand.wrapping_mul(1_103_515_245).wrapping_add(12_345);
	rand = rand.wrapping_add(chain_id as u32);
	rand = rand.wrapping_mul(1_103_515_245).wrapping_add(12_345);
	rand % (1u32 << merkle_height)
}

impl AuxPow {
	/// The parent chain's own PoW hash, checked against this block's `bits`.
	pub fn parent_pow_hash(&self) -> SCRYPT256 {
		block_pow_hash(&self.parent_block_header)
	}

	/// Verifies that `coinbase_tx` (inside `parent_block_header`) commits to
	/// `block_hash` for the claimed `chain_id`, per the merge-mining scheme.
	pub fn check(&self, block_hash: SHA256D, claimed_chain_id: i32) -> bool {
		if self.coinbase_branch.len() > 30 {
			return false;
		}

		let coinbase_hash = crate::transaction::transaction_hash(&self.coinbase_tx);
		if apply_merkle_branch(coinbase_hash, &self.coinbase_branch, self.coinbase_index) != self.parent_block_header.merkle_root_hash {
			return false;
		}

		let merkle_height = self.blockchain_branch.len() as u32;
		let root_hash = apply_merkle_branch(block_hash, &self.blockchain_branch, self.blockchain_index);
		let mut root_hash_le: Vec<u8> = (&root_hash as &[u8]).to_vec();
		root_hash_le.reverse();

		let script_sig: &[u8] = self
			.coinbase_tx
			.inputs
			.first()
			.map(|input| &*input.script_sig as &[u8])
			.unwrap_or(&[]);

		let commitment = find_subslice(script_sig, &root_hash_le);
		let commitment = match commitment {
			Some(offset) => offset,
			None => return false,
		};

		let after_root = commitment + root_hash_le.len();
		if script_sig.len() < after_root + 8 {
			return false;
		}
		let size = u32::from_le_bytes(script_sig[after_root..after_root + 4].try_into().unwrap());
		if size != 1u32 << merkle_height {
			return false;
		}
		let nonce = u32::from_le_bytes(script_sig[after_root + 4..after_root + 8].try_into().unwrap());
		if self.blockchain_index != expected_index(nonce, claimed_chain_id, merkle_height) {
			return false;
		}

		true
	}
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	if needle.is_empty() || haystack.len() < needle.len() {
		return None;
	}
	(0..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}
