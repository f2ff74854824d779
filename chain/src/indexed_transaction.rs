use crate::read_and_hash::ReadAndHash;
use crate::transaction::{transaction_hash, Transaction};
use bitcrypto::SHA256D;
use ser::{Deserializable, Error as ReaderError, Reader};
use std::{cmp, io};

#[derive(Debug, Clone)]
pub struct IndexedTransaction {
	pub hash: SHA256D,
	pub raw: Transaction,
}

impl cmp::PartialEq for IndexedTransaction {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
	}
}

impl IndexedTransaction {
	pub fn new(hash: SHA256D, transaction: Transaction) -> Self {
		IndexedTransaction { hash, raw: transaction }
	}

	/// Explicit conversion of the raw Transaction into IndexedTransaction.
	pub fn from_raw(transaction: Transaction) -> Self {
		IndexedTransaction::new(transaction_hash(&transaction), transaction)
	}
}

impl Deserializable for IndexedTransaction {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		let data = reader.read_and_hash::<Transaction>()?;
		Ok(IndexedTransaction {
			raw: data.data,
			hash: data.hash,
		})
	}
}
