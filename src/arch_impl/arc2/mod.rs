//! ARCv2 processor binding.
//!
//! 32-bit native integers, a 4 GiB address space with the top 256 MiB left to
//! peripherals, and a long-jump facility saving r13-r25, fp and sp.

pub mod constants;
pub mod jump_buffer;

pub use constants::*;
pub use jump_buffer::JumpBuffer;

use super::profile::{ArchProfile, JumpBufferLayout};
use super::traits::{Narrow, NativeWidth, ProcessorBind, SavedContext};
use super::ArchVariant;

/// ARCv2 processor binding.
#[derive(Debug, Clone, Copy)]
pub struct Arc2;

/// The processor type this module describes.
pub use self::Arc2 as Processor;

/// Spin-wait hint for busy loops.
///
/// On ARCv2 hardware this is `nop_s; sleep`. Hosts use the core spin-loop
/// hint.
#[inline]
pub fn cpu_pause() {
    core::hint::spin_loop();
}

impl ProcessorBind for Arc2 {
    type Width = Narrow;
    type JumpBuffer = JumpBuffer;

    const VARIANT: ArchVariant = ArchVariant::Arc2;
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
    const HAS_JUMP_BUFFER: bool = true;
}

/// Runtime binding table for ARCv2.
pub const PROFILE: ArchProfile = ArchProfile {
    variant: ArchVariant::Arc2,
    width: <Narrow as NativeWidth>::KIND,
    uintn_bytes: core::mem::size_of::<UintN>(),
    intn_bytes: core::mem::size_of::<IntN>(),
    max_bit: MAX_BIT as u64,
    max_2_bits: MAX_2_BITS as u64,
    max_address: MAX_ADDRESS as u64,
    max_alloc_address: MAX_ALLOC_ADDRESS as u64,
    peripheral_base: PERIPHERAL_BASE as u64,
    max_intn: MAX_INTN as i64,
    max_uintn: MAX_UINTN as u64,
    default_page_granularity: DEFAULT_PAGE_ALLOCATION_GRANULARITY,
    runtime_page_granularity: RUNTIME_PAGE_ALLOCATION_GRANULARITY,
    stack_alignment: CPU_STACK_ALIGNMENT,
    jump_buffer: Some(JumpBufferLayout {
        size: core::mem::size_of::<JumpBuffer>(),
        alignment: <JumpBuffer as SavedContext>::ALIGNMENT,
        registers: <JumpBuffer as SavedContext>::REGISTERS,
    }),
};

const _: () = PROFILE.assert_invariants();
const _: () = assert!(CPU_STACK_ALIGNMENT == <Arc2 as ProcessorBind>::CPU_STACK_ALIGNMENT);
const _: () =
    assert!(<Arc2 as ProcessorBind>::CPU_STACK_ALIGNMENT == <Narrow as NativeWidth>::BYTES);
