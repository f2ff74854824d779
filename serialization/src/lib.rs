extern crate byteorder;
extern crate primitives;

mod compact_integer;
mod impls;
mod reader;
mod serialize_array_wrapper_macro;
mod stream;

pub use primitives::{bytes, compact};
pub use primitives::bytes::Bytes;

pub use compact_integer::CompactInteger;
pub use reader::{deserialize, deserialize_iterator, Deserializable, Error, ReadIterator, Reader};
pub use stream::{serialize, serialized_list_size, Serializable, Stream};
