//! Runtime view of a processor binding table.
//!
//! [`ArchProfile`] carries the same facts as a [`ProcessorBind`](super::ProcessorBind)
//! implementation, widened to `u64`/`i64`, so code that selects a processor
//! through [`ArchVariant`] can be handed the table explicitly.

use super::{ArchVariant, WidthKind};

/// Layout of a long-jump resume buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpBufferLayout {
    /// Size of the record in bytes.
    pub size: usize,
    /// Required alignment of the record.
    pub alignment: usize,
    /// Saved registers in field order.
    pub registers: &'static [&'static str],
}

impl JumpBufferLayout {
    /// Byte offset of `register` in the record, if it is saved.
    pub fn offset_of(&self, register: &str) -> Option<usize> {
        let slot = self.size / self.registers.len().max(1);
        self.registers
            .iter()
            .position(|name| name.eq_ignore_ascii_case(register))
            .map(|index| index * slot)
    }
}

/// Which allocator a page count is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    /// Boot-time allocations.
    Boot,
    /// Allocations that survive into the runtime phase.
    Runtime,
}

/// Processor binding table of one architecture variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    pub variant: ArchVariant,
    pub width: WidthKind,
    /// Size of `UINTN` in bytes.
    pub uintn_bytes: usize,
    /// Size of `INTN` in bytes.
    pub intn_bytes: usize,
    pub max_bit: u64,
    pub max_2_bits: u64,
    pub max_address: u64,
    pub max_alloc_address: u64,
    /// Addresses at or above this are reserved for peripherals.
    pub peripheral_base: u64,
    pub max_intn: i64,
    pub max_uintn: u64,
    pub default_page_granularity: usize,
    pub runtime_page_granularity: usize,
    pub stack_alignment: usize,
    /// `None` when the processor has no long-jump facility.
    pub jump_buffer: Option<JumpBufferLayout>,
}

impl ArchProfile {
    /// Panics (at compile time, when used in a `const` item) if the table is
    /// internally inconsistent.
    pub const fn assert_invariants(&self) {
        assert!(
            self.uintn_bytes == self.width.bytes(),
            "UINTN width must match the width family"
        );
        assert!(
            self.intn_bytes == self.uintn_bytes,
            "INTN and UINTN must have the same width"
        );
        assert!(
            self.stack_alignment == self.uintn_bytes,
            "stack alignment must equal the native width"
        );
        assert!(
            self.max_alloc_address <= self.max_address,
            "MAX_ALLOC_ADDRESS must not exceed MAX_ADDRESS"
        );
        assert!(
            self.max_address < self.peripheral_base,
            "MAX_ADDRESS must lie below the peripheral window"
        );
        assert!(
            self.default_page_granularity.is_power_of_two(),
            "default page granularity must be a non-zero power of two"
        );
        assert!(
            self.runtime_page_granularity.is_power_of_two(),
            "runtime page granularity must be a non-zero power of two"
        );
        assert!(self.max_2_bits & self.max_bit == self.max_bit, "MAX_2_BITS must include MAX_BIT");
        if let Some(layout) = self.jump_buffer {
            assert!(
                layout.alignment.is_power_of_two(),
                "jump buffer alignment must be a power of two"
            );
            assert!(
                layout.size % layout.alignment == 0,
                "jump buffer size must be a multiple of its alignment"
            );
            assert!(
                layout.size == layout.registers.len() * self.uintn_bytes,
                "jump buffer must hold one native word per register"
            );
        }
    }

    /// Returns true if `address` satisfies the stack alignment.
    #[inline]
    pub const fn is_stack_aligned(&self, address: usize) -> bool {
        address & (self.stack_alignment - 1) == 0
    }

    /// Returns true if `address` may be handed out by the boot-time allocator.
    #[inline]
    pub const fn is_allocatable(&self, address: u64) -> bool {
        address <= self.max_alloc_address
    }

    /// Returns true if `address` is in the peripheral window.
    #[inline]
    pub const fn is_peripheral(&self, address: u64) -> bool {
        address >= self.peripheral_base
    }

    /// Returns true if the long-jump facility is available.
    #[inline]
    pub const fn has_jump_buffer(&self) -> bool {
        self.jump_buffer.is_some()
    }

    /// Allocation unit for `kind`.
    #[inline]
    pub const fn granularity(&self, kind: AllocationKind) -> usize {
        match kind {
            AllocationKind::Boot => self.default_page_granularity,
            AllocationKind::Runtime => self.runtime_page_granularity,
        }
    }

    /// Number of allocation units needed to hold `bytes`.
    pub const fn pages(&self, bytes: usize, kind: AllocationKind) -> usize {
        bytes.div_ceil(self.granularity(kind))
    }

    /// Rounds `bytes` up to a whole number of allocation units.
    ///
    /// Returns `None` on overflow.
    pub const fn align_up(&self, bytes: usize, kind: AllocationKind) -> Option<usize> {
        let mask = self.granularity(kind) - 1;
        match bytes.checked_add(mask) {
            Some(sum) => Some(sum & !mask),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch_impl::{arc, arc2};

    #[test]
    fn test_page_rounding() {
        let profile = &arc2::PROFILE;
        assert_eq!(profile.pages(0, AllocationKind::Boot), 0);
        assert_eq!(profile.pages(1, AllocationKind::Boot), 1);
        assert_eq!(profile.pages(0x2000, AllocationKind::Runtime), 1);
        assert_eq!(profile.pages(0x2001, AllocationKind::Runtime), 2);
        assert_eq!(profile.align_up(0x2001, AllocationKind::Boot), Some(0x4000));
        assert_eq!(profile.align_up(usize::MAX, AllocationKind::Boot), None);
    }

    #[test]
    fn test_stack_alignment_follows_width() {
        assert!(arc2::PROFILE.is_stack_aligned(0x1004));
        assert!(!arc2::PROFILE.is_stack_aligned(0x1002));
        assert!(arc::PROFILE.is_stack_aligned(0x1008));
        assert!(!arc::PROFILE.is_stack_aligned(0x1004));
    }

    #[test]
    fn test_peripheral_window() {
        for profile in [&arc::PROFILE, &arc2::PROFILE] {
            assert!(profile.is_allocatable(profile.max_address));
            assert!(!profile.is_peripheral(profile.max_address));
            assert!(profile.is_peripheral(profile.peripheral_base));
            assert!(!profile.is_allocatable(profile.peripheral_base));
        }
    }

    #[test]
    fn test_jump_buffer_offsets() {
        let layout = arc2::PROFILE.jump_buffer.unwrap();
        assert_eq!(layout.offset_of("r13"), Some(0));
        assert_eq!(layout.offset_of("FP"), Some(52));
        assert_eq!(layout.offset_of("sp"), Some(56));
        assert_eq!(layout.offset_of("blink"), None);
        assert!(arc::PROFILE.jump_buffer.is_none());
    }
}
