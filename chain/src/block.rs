use crate::block_header::{AuxPow, BlockHeader};
use crate::transaction::Transaction;

/// A block: a header, an optional auxpow proof, and its transactions. For
/// this crate's scope that's always exactly one (the coinbase) transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	pub block_header: BlockHeader,
	pub auxpow: Option<Box<AuxPow>>,
	pub transactions: Vec<Transaction>,
}

impl Block {
	pub fn new(block_header: BlockHeader, transactions: Vec<Transaction>) -> Self {
		Block {
			block_header,
			auxpow: None,
			transactions,
		}
	}

	pub fn with_auxpow(mut self, auxpow: AuxPow) -> Self {
		self.auxpow = Some(Box::new(auxpow));
		self
	}

	pub fn coinbase(&self) -> Option<&Transaction> {
		self.transactions.first()
	}
}
