//! BIP9-style version-bit deployment windows.
//!
//! Prux inherits the shape of Bitcoin Core's `VersionBitsDeployment` even
//! though the consensus core treats deployments as opaque data (a
//! `ConsensusEpoch.deployments` is a map, consulted by signalling code that
//! lives outside this crate). `update_regtest_deployment` is the one
//! sanctioned mutation path: a test-only override of a
//! regtest deployment's start/timeout window.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
	pub name: &'static str,
	pub bit: u8,
	pub start_time: u32,
	pub timeout: u32,
}

impl Deployment {
	pub const fn new(name: &'static str, bit: u8, start_time: u32, timeout: u32) -> Self {
		Deployment {
			name,
			bit,
			start_time,
			timeout,
		}
	}
}
