//! ARCv2 processor binding constants.
//!
//! ARCv2 cores (HS3x/HS4x) have 32-bit native integers.

pub use crate::arch_impl::scalars::*;
use crate::arch_impl::traits::{NativeWidth, Narrow};

/// Unsigned value of native width.
pub type UintN = <Narrow as NativeWidth>::Unsigned;

/// Signed value of native width.
pub type IntN = <Narrow as NativeWidth>::Signed;

// ============================================================================
// Bit Masks
// ============================================================================

/// A value of native width with the highest bit set.
pub const MAX_BIT: UintN = 0x8000_0000;

/// A value of native width with the two highest bits set.
pub const MAX_2_BITS: UintN = 0xC000_0000;

// ============================================================================
// Address Space
// ============================================================================

/// Start of the peripheral window. ARC HS4xD may reserve 0xF000_0000 and
/// above for memory-mapped I/O.
pub const PERIPHERAL_BASE: UintN = 0xF000_0000;

/// Maximum legal ARC address.
pub const MAX_ADDRESS: UintN = 0xEFFF_FFFF;

/// Maximum usable address at boot time.
pub const MAX_ALLOC_ADDRESS: UintN = MAX_ADDRESS;

// ============================================================================
// Native Integer Limits
// ============================================================================

pub const MAX_INTN: IntN = 0x7FFF_FFFF;
pub const MAX_UINTN: UintN = 0xFFFF_FFFF;

// ============================================================================
// Memory Allocation
// ============================================================================

pub const DEFAULT_PAGE_ALLOCATION_GRANULARITY: usize = 0x2000;
pub const RUNTIME_PAGE_ALLOCATION_GRANULARITY: usize = 0x2000;

/// Stack alignment required for ARCv2.
pub const CPU_STACK_ALIGNMENT: usize = core::mem::size_of::<UintN>();

// ============================================================================
// Long Jump
// ============================================================================

/// Alignment of [`JumpBuffer`](super::JumpBuffer).
pub const JUMP_BUFFER_ALIGNMENT: usize = 4;
