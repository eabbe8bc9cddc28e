//! Architecture abstraction layer.
//!
//! This module provides the processor binding traits and re-exports the
//! selected processor's implementation as [`current`]. Code outside this
//! module should use the traits and the [`ArchProfile`] table rather than
//! reaching into a specific variant.
//!
//! # Supported Architectures
//!
//! - `arc2`: ARCv2, 32-bit native integers (default, feature `cpu-arc2`)
//! - `arc`: ARC, 64-bit native integers (feature `cpu-arc`)

use core::fmt;
use core::str::FromStr;

pub mod arc;
pub mod arc2;
pub mod profile;
pub mod scalars;
pub mod traits;

pub use profile::{AllocationKind, ArchProfile, JumpBufferLayout};
pub use traits::*;

#[cfg(all(feature = "cpu-arc", feature = "cpu-arc2"))]
compile_error!(
    "features `cpu-arc` and `cpu-arc2` are mutually exclusive; select exactly one processor"
);

#[cfg(not(any(feature = "cpu-arc", feature = "cpu-arc2")))]
compile_error!("no processor selected; enable the `cpu-arc` or `cpu-arc2` feature");

#[cfg(all(feature = "cpu-arc2", not(feature = "cpu-arc")))]
pub use arc2 as current;

#[cfg(all(feature = "cpu-arc", not(feature = "cpu-arc2")))]
pub use arc as current;

/// The processor selected at build time.
pub type Current = current::Processor;

/// Unsigned native integer of the selected processor.
pub type UintN = Unsigned<Current>;

/// Signed native integer of the selected processor.
pub type IntN = Signed<Current>;

/// Supported processor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchVariant {
    /// ARC with 64-bit native integers.
    Arc,
    /// ARCv2 with 32-bit native integers.
    Arc2,
}

impl ArchVariant {
    /// Every supported variant.
    pub const ALL: [ArchVariant; 2] = [ArchVariant::Arc, ArchVariant::Arc2];

    /// The variant selected at build time.
    pub const SELECTED: ArchVariant = <Current as ProcessorBind>::VARIANT;

    /// Returns the binding table for this variant.
    pub const fn profile(self) -> &'static ArchProfile {
        match self {
            ArchVariant::Arc => &arc::PROFILE,
            ArchVariant::Arc2 => &arc2::PROFILE,
        }
    }

    /// Selector name, as used by the build configuration.
    pub const fn name(self) -> &'static str {
        match self {
            ArchVariant::Arc => "ARC",
            ArchVariant::Arc2 => "ARC2",
        }
    }
}

impl fmt::Display for ArchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selector name that names no supported processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownArchitecture;

impl fmt::Display for UnknownArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown processor selector")
    }
}

impl FromStr for ArchVariant {
    type Err = UnknownArchitecture;

    /// Accepts `ARC`/`ARC2` and the `MDE_CPU_ARC`/`MDE_CPU_ARC2` forms,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = match s.get(..8) {
            Some(prefix) if prefix.eq_ignore_ascii_case("MDE_CPU_") => &s[8..],
            _ => s,
        };
        ArchVariant::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
            .ok_or(UnknownArchitecture)
    }
}
