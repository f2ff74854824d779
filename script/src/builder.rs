use crate::opcode::Opcode;
use primitives::bytes::Bytes;

const OP_1: u8 = 0x51;

/// Minimal-encoding byte serialization of a script number (Bitcoin's
/// `CScriptNum::serialize`): little-endian magnitude with a trailing sign
/// byte only when the top bit of the magnitude would otherwise be mistaken
/// for the sign.
fn script_num_bytes(value: i64) -> Vec<u8> {
	if value == 0 {
		return Vec::new();
	}

	let neg = value < 0;
	let mut abs_value = value.unsigned_abs();

	let mut result = Vec::new();
	while abs_value != 0 {
		result.push((abs_value & 0xff) as u8);
		abs_value >>= 8;
	}

	if result.last().copied().unwrap_or(0) & 0x80 != 0 {
		result.push(if neg { 0x80 } else { 0x00 });
	} else if neg {
		*result.last_mut().expect("value != 0, loop pushed at least one byte") |= 0x80;
	}

	result
}

/// Builds a script byte string by appending opcodes and push-data, following
/// `CScript`'s `operator<<` family. This is a builder only: there is no
/// corresponding interpreter in this crate, since evaluating scripts is out
/// of scope here.
#[derive(Debug, Clone, Default)]
pub struct Builder {
	data: Vec<u8>,
}

impl Builder {
	pub fn new() -> Self {
		Builder { data: Vec::new() }
	}

	/// `CScript::operator<<(int64_t)`: small integers collapse onto a single
	/// `OP_1NEGATE`/`OP_0`/`OP_1..OP_16` opcode, everything else is pushed as
	/// a minimally encoded number.
	pub fn push_int(mut self, value: i64) -> Self {
		if value == -1 {
			self.data.push(Opcode::OP_1NEGATE.into());
			self
		} else if (1..=16).contains(&value) {
			self.data.push(OP_1 + (value as u8) - 1);
			self
		} else if value == 0 {
			self.data.push(Opcode::OP_0.into());
			self
		} else {
			self.push_bytes(&script_num_bytes(value))
		}
	}

	/// `CScript::operator<<(CScriptNum)`: unlike `push_int`, this always
	/// pushes the minimally encoded bytes, even for values in `-1..=16`.
	pub fn push_num(self, value: i64) -> Self {
		self.push_bytes(&script_num_bytes(value))
	}

	/// `CScript::operator<<(vector<uchar>)`: a length-prefixed data push,
	/// using `OP_PUSHDATA1/2/4` once the direct single-byte length prefix
	/// (0..=75) no longer fits.
	pub fn push_bytes(mut self, bytes: &[u8]) -> Self {
		let len = bytes.len();
		if len < Opcode::OP_PUSHDATA1 as usize {
			self.data.push(len as u8);
		} else if len <= 0xff {
			self.data.push(Opcode::OP_PUSHDATA1.into());
			self.data.push(len as u8);
		} else if len <= 0xffff {
			self.data.push(Opcode::OP_PUSHDATA2.into());
			self.data.extend_from_slice(&(len as u16).to_le_bytes());
		} else {
			self.data.push(Opcode::OP_PUSHDATA4.into());
			self.data.extend_from_slice(&(len as u32).to_le_bytes());
		}
		self.data.extend_from_slice(bytes);
		self
	}

	pub fn push_opcode(mut self, opcode: Opcode) -> Self {
		self.data.push(opcode.into());
		self
	}

	pub fn into_script(self) -> Bytes {
		self.data.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn push_int_uses_cscriptnum_encoding_for_large_values() {
		// 486604799 == 0x1d00ffff, little-endian minimal bytes ff ff 00 1d,
		// none of which sets the sign bit, so no extra byte is needed.
		let script = Builder::new().push_int(486_604_799).into_script();
		assert_eq!(&*script, &[0x04, 0xff, 0xff, 0x00, 0x1d][..]);
	}

	#[test]
	fn push_num_always_pushes_bytes_even_for_small_values() {
		// CScriptNum(4), unlike push_int(4), is never collapsed to OP_4.
		let script = Builder::new().push_num(4).into_script();
		assert_eq!(&*script, &[0x01, 0x04][..]);
	}

	#[test]
	fn push_int_collapses_small_values_to_single_opcode() {
		let script = Builder::new().push_int(4).into_script();
		assert_eq!(&*script, &[OP_1 + 3][..]);
	}

	#[test]
	fn push_bytes_of_empty_vector_is_single_zero_byte() {
		let script = Builder::new().push_bytes(&[]).push_opcode(Opcode::OP_CHECKSIG).into_script();
		assert_eq!(&*script, &[0x00, 0xac][..]);
	}

	#[test]
	fn push_bytes_long_push_uses_pushdata1() {
		let data = vec![0xabu8; 100];
		let script = Builder::new().push_bytes(&data).into_script();
		assert_eq!(script[0], Opcode::OP_PUSHDATA1 as u8);
		assert_eq!(script[1], 100);
		assert_eq!(&script[2..], &data[..]);
	}
}
