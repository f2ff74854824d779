use bitcrypto::{dhash256, SHA256D};
use ser::{serialize, Bytes};

/// A reference to a previous transaction output. The genesis coinbase input
/// points at the null `OutPoint` (zero hash, max index), as in Bitcoin.
#[derive(Debug, Clone, PartialEq, Default, Serializable, Deserializable)]
pub struct OutPoint {
	pub hash: SHA256D,
	pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serializable, Deserializable)]
pub struct TransactionInput {
	pub previous_output: OutPoint,
	pub script_sig: Bytes,
	pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Serializable, Deserializable)]
pub struct TransactionOutput {
	pub value: u64,
	pub script_pubkey: Bytes,
}

/// A single-input/single-output transaction, enough to carry the genesis
/// coinbase. Full script interpretation and segwit/witness fields are out of
/// scope; this is wire-compatible with a legacy (pre-segwit) transaction.
#[derive(Debug, Clone, PartialEq, Serializable, Deserializable)]
pub struct Transaction {
	pub version: i32,
	pub inputs: Vec<TransactionInput>,
	pub outputs: Vec<TransactionOutput>,
	pub lock_time: u32,
}

impl Transaction {
	pub fn is_coinbase(&self) -> bool {
		self.inputs.len() == 1 && self.inputs[0].previous_output.hash == SHA256D::default()
	}
}

/// `txid`: double-SHA256 of the serialized transaction.
pub fn transaction_hash(transaction: &Transaction) -> SHA256D {
	dhash256(&serialize(transaction))
}
