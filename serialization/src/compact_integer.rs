use crate::{Deserializable, Error, Reader, Serializable, Stream};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;

/// Bitcoin's variable-length integer ("CompactSize"): values below 0xfd are
/// a single byte, larger ones are prefixed with 0xfd/0xfe/0xff and a fixed
/// 2/4/8 byte little-endian payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactInteger(u64);

impl From<usize> for CompactInteger {
	fn from(value: usize) -> Self {
		CompactInteger(value as u64)
	}
}

impl From<CompactInteger> for usize {
	fn from(value: CompactInteger) -> Self {
		value.0 as usize
	}
}

impl Serializable for CompactInteger {
	fn serialize(&self, stream: &mut Stream) {
		match self.0 {
			0..=0xfc => {
				stream.write_u8(self.0 as u8).expect("in-memory stream never fails");
			}
			0xfd..=0xffff => {
				stream.write_u8(0xfd).expect("in-memory stream never fails");
				stream.write_u16::<LittleEndian>(self.0 as u16).expect("in-memory stream never fails");
			}
			0x10000..=0xffff_ffff => {
				stream.write_u8(0xfe).expect("in-memory stream never fails");
				stream.write_u32::<LittleEndian>(self.0 as u32).expect("in-memory stream never fails");
			}
			_ => {
				stream.write_u8(0xff).expect("in-memory stream never fails");
				stream.write_u64::<LittleEndian>(self.0).expect("in-memory stream never fails");
			}
		}
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		match self.0 {
			0..=0xfc => 1,
			0xfd..=0xffff => 3,
			0x10000..=0xffff_ffff => 5,
			_ => 9,
		}
	}
}

impl Deserializable for CompactInteger {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let first = reader.read_u8()?;
		let value = match first {
			0xff => reader.read_u64::<LittleEndian>()?,
			0xfe => reader.read_u32::<LittleEndian>()? as u64,
			0xfd => reader.read_u16::<LittleEndian>()? as u64,
			_ => first as u64,
		};
		Ok(CompactInteger(value))
	}
}

#[cfg(test)]
mod tests {
	use super::CompactInteger;
	use crate::{deserialize, serialize};

	#[test]
	fn small_values_are_one_byte() {
		let encoded = serialize(&CompactInteger::from(5usize));
		assert_eq!(&*encoded, &[5]);
		let decoded: CompactInteger = deserialize(encoded.as_ref()).unwrap();
		assert_eq!(usize::from(decoded), 5);
	}

	#[test]
	fn large_values_round_trip() {
		for value in [0xfcusize, 0xfd, 0xffff, 0x10000, 0xffff_ffff, 0x1_0000_0000] {
			let encoded = serialize(&CompactInteger::from(value));
			let decoded: CompactInteger = deserialize(encoded.as_ref()).unwrap();
			assert_eq!(usize::from(decoded), value);
		}
	}
}
