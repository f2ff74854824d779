extern crate byteorder;
extern crate heapsize;
extern crate rustc_hex as hex;
#[macro_use]
extern crate uint;
extern crate bitcrypto;

pub mod bigint;
pub mod bytes;
pub mod checksum;
pub mod compact;
pub mod hash;
