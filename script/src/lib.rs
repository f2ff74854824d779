//! A minimal script builder.
//!
//! Full script evaluation (`CHECKSIG`, `CLTV`, P2SH, ...) is out of scope for
//! this crate: the only thing callers need is the ability to construct the
//! exact handful of bytes genesis blocks commit to in their coinbase
//! `scriptSig`/`scriptPubKey`.

extern crate primitives;

mod builder;
mod opcode;

pub use builder::Builder;
pub use opcode::Opcode;
