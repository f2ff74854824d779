use crate::compact_integer::CompactInteger;
use primitives::bytes::Bytes;
use std::io;

pub trait Serializable {
	/// Appends `self`'s wire representation to `stream`.
	fn serialize(&self, stream: &mut Stream);

	/// Exact length of `self`'s wire representation, without materializing it.
	fn serialized_size(&self) -> usize;
}

/// An in-memory, infallible byte sink used to build up the wire encoding of
/// consensus structures (headers, the genesis coinbase transaction).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stream {
	buffer: Vec<u8>,
}

impl Stream {
	pub fn append<T>(&mut self, t: &T) -> &mut Self
	where
		T: Serializable,
	{
		t.serialize(self);
		self
	}

	pub fn append_slice(&mut self, bytes: &[u8]) -> &mut Self {
		self.buffer.extend_from_slice(bytes);
		self
	}

	pub fn append_list<T>(&mut self, items: &[T]) -> &mut Self
	where
		T: Serializable,
	{
		self.append(&CompactInteger::from(items.len()));
		for item in items {
			self.append(item);
		}
		self
	}

	pub fn out(self) -> Bytes {
		Bytes::from(self.buffer)
	}
}

impl io::Write for Stream {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.buffer.extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

pub fn serialize<T>(t: &T) -> Bytes
where
	T: Serializable,
{
	let mut stream = Stream::default();
	stream.append(t);
	stream.out()
}

pub fn serialized_list_size<T>(items: &[T]) -> usize
where
	T: Serializable,
{
	CompactInteger::from(items.len()).serialized_size() + items.iter().map(Serializable::serialized_size).sum::<usize>()
}
