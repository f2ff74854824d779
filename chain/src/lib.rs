extern crate bitcrypto;
extern crate heapsize;
extern crate primitives;
extern crate rayon;
extern crate rustc_hex as hex;
extern crate serialization as ser;
#[macro_use]
extern crate serialization_derive;

pub mod constants;

mod block;
mod block_header;
mod indexed_header;
mod indexed_transaction;
mod merkle_root;
/// `IndexedBlockHeader`/`IndexedTransaction` extension
mod read_and_hash;
mod transaction;

pub use primitives::{bigint, bytes, compact, hash};

pub use block::Block;
pub use block_header::{
	block_header_hash, block_pow_hash, chain_id, is_auxpow_version, is_legacy_version, AuxPow, BlockHeader, ParentBlockHeader,
	VERSION_AUXPOW, VERSION_CHAIN_ID_SHIFT,
};
pub use merkle_root::{merkle_node_hash, merkle_root};
pub use transaction::{transaction_hash, OutPoint, Transaction, TransactionInput, TransactionOutput};

pub use indexed_header::IndexedBlockHeader;
pub use indexed_transaction::IndexedTransaction;
pub use read_and_hash::{HashedData, ReadAndHash};
