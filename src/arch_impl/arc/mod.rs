//! ARC processor binding.
//!
//! This variant has no long-jump facility.

pub mod constants;

pub use constants::*;

use super::profile::ArchProfile;
use super::traits::{NativeWidth, NoJumpBuffer, ProcessorBind, Wide};
use super::ArchVariant;

/// ARC processor binding.
#[derive(Debug, Clone, Copy)]
pub struct Arc;

/// The processor type this module describes.
pub use self::Arc as Processor;

/// Spin-wait hint for busy loops.
///
/// On ARC hardware this is `nop_s; sleep`. Hosts use the core spin-loop
/// hint.
#[inline]
pub fn cpu_pause() {
    core::hint::spin_loop();
}

impl ProcessorBind for Arc {
    type Width = Wide;
    type JumpBuffer = NoJumpBuffer;

    const VARIANT: ArchVariant = ArchVariant::Arc;
    const MAX_BIT: UintN = MAX_BIT;
    const MAX_2_BITS: UintN = MAX_2_BITS;
    const MAX_ADDRESS: UintN = MAX_ADDRESS;
    const MAX_ALLOC_ADDRESS: UintN = MAX_ALLOC_ADDRESS;
    const PERIPHERAL_BASE: UintN = PERIPHERAL_BASE;
    const MAX_INTN: IntN = MAX_INTN;
    const MAX_UINTN: UintN = MAX_UINTN;
    const DEFAULT_PAGE_ALLOCATION_GRANULARITY: usize = DEFAULT_PAGE_ALLOCATION_GRANULARITY;
    const RUNTIME_PAGE_ALLOCATION_GRANULARITY: usize = RUNTIME_PAGE_ALLOCATION_GRANULARITY;
    const CPU_STACK_ALIGNMENT: usize = CPU_STACK_ALIGNMENT;
    const HAS_JUMP_BUFFER: bool = false;
}

/// Runtime binding table for ARC.
pub const PROFILE: ArchProfile = ArchProfile {
    variant: ArchVariant::Arc,
    width: <Wide as NativeWidth>::KIND,
    uintn_bytes: core::mem::size_of::<UintN>(),
    intn_bytes: core::mem::size_of::<IntN>(),
    max_bit: MAX_BIT,
    max_2_bits: MAX_2_BITS,
    max_address: MAX_ADDRESS,
    max_alloc_address: MAX_ALLOC_ADDRESS,
    peripheral_base: PERIPHERAL_BASE,
    max_intn: MAX_INTN,
    max_uintn: MAX_UINTN,
    default_page_granularity: DEFAULT_PAGE_ALLOCATION_GRANULARITY,
    runtime_page_granularity: RUNTIME_PAGE_ALLOCATION_GRANULARITY,
    stack_alignment: CPU_STACK_ALIGNMENT,
    jump_buffer: None,
};

const _: () = PROFILE.assert_invariants();
const _: () =
    assert!(<Arc as ProcessorBind>::CPU_STACK_ALIGNMENT == <Wide as NativeWidth>::BYTES);
