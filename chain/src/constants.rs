/// One whole coin, expressed in base units.
pub const COIN: u64 = 100_000_000;

/// Sequence number marking an input as final (no relative-locktime semantics).
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Previous-output index used by a coinbase input's (null) `OutPoint`.
pub const COINBASE_OUTPOINT_INDEX: u32 = 0xffff_ffff;
