//! Deterministic construction of a network's genesis block.
//!
//! Grounded on `chainparams.cpp::CreateGenesisBlock`: a single coinbase
//! transaction whose `scriptSig` is `PUSH(486604799) PUSH(CScriptNum(4))
//! PUSH(timestamp)`, and a header whose `prev_hash` is zero and whose
//! `merkle_root` is that transaction's own txid.

use bitcrypto::SHA256D;
use chain::constants::{COINBASE_OUTPOINT_INDEX, SEQUENCE_FINAL};
use chain::{transaction_hash, Block, BlockHeader, OutPoint, Transaction, TransactionInput, TransactionOutput};
use primitives::bytes::Bytes;
use primitives::compact::Compact;
use script::Builder;

/// Literal inputs to genesis construction, one struct per network.
#[derive(Debug, Clone)]
pub struct GenesisParams {
	pub timestamp: &'static str,
	pub output_script: &'static [u8],
	pub time: u32,
	pub nonce: u32,
	pub bits: u32,
	pub version: i32,
	pub reward: u64,
}

/// `CScriptNum(486604799)` push, followed by `CScriptNum(4)`, followed by
/// the raw timestamp bytes — the exact three-push `scriptSig` shape
/// `CreateGenesisBlock` builds.
fn coinbase_script_sig(timestamp: &str) -> Bytes {
	Builder::new()
		.push_int(486_604_799)
		.push_num(4)
		.push_bytes(timestamp.as_bytes())
		.into_script()
}

/// Builds the genesis block for one network from its literal parameters.
/// The resulting `block_hash`/`merkle_root` MUST equal the compiled-in
/// reference values for the network.
pub fn create_genesis_block(params: &GenesisParams) -> Block {
	let coinbase_tx = Transaction {
		version: 1,
		inputs: vec![TransactionInput {
			previous_output: OutPoint {
				hash: SHA256D::default(),
				index: COINBASE_OUTPOINT_INDEX,
			},
			script_sig: coinbase_script_sig(params.timestamp),
			sequence: SEQUENCE_FINAL,
		}],
		outputs: vec![TransactionOutput {
			value: params.reward,
			script_pubkey: params.output_script.to_vec().into(),
		}],
		lock_time: 0,
	};

	let merkle_root_hash = transaction_hash(&coinbase_tx);

	let block_header = BlockHeader {
		version: params.version,
		previous_header_hash: SHA256D::default(),
		merkle_root_hash,
		time: params.time,
		bits: Compact::new(params.bits),
		nonce: params.nonce,
	};

	Block::new(block_header, vec![coinbase_tx])
}
