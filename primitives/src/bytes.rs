//! A thin, `Deref`-to-`[u8]` wrapper around `Vec<u8>`, used for raw script
//! bytes and other opaque byte strings that flow through serialization.

use rustc_hex::{FromHex, ToHex};
use std::fmt;
use std::ops;

#[derive(Default, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct Bytes(Vec<u8>);

impl Bytes {
	pub fn new() -> Self {
		Bytes(Vec::new())
	}

	pub fn new_with_len(len: usize) -> Self {
		Bytes(vec![0u8; len])
	}

	pub fn take(self) -> Vec<u8> {
		self.0
	}
}

impl fmt::Debug for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0.to_hex::<String>())
	}
}

impl fmt::Display for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0.to_hex::<String>())
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(v: Vec<u8>) -> Self {
		Bytes(v)
	}
}

impl From<Bytes> for Vec<u8> {
	fn from(bytes: Bytes) -> Self {
		bytes.0
	}
}

impl<'a> From<&'a [u8]> for Bytes {
	fn from(v: &'a [u8]) -> Self {
		Bytes(v.to_vec())
	}
}

impl<'a> From<&'a str> for Bytes {
	fn from(s: &'a str) -> Self {
		let v: Vec<u8> = s.from_hex().expect("hex literal expected");
		Bytes(v)
	}
}

impl ops::Deref for Bytes {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl ops::DerefMut for Bytes {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}
