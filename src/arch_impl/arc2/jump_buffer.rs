//! ARCv2 long-jump resume buffer.
//!
//! Layout (all fields are u32, 4 bytes each):
//!   Offset   Field
//!   0        r13
//!   4        r14
//!   ...      r15 - r24
//!   48       r25
//!   52       fp (r27)
//!   56       sp (r28)
//!
//! The assembly that saves into and restores from this record indexes it by
//! these offsets, so the field order must not change.

use core::mem::{align_of, offset_of, size_of};

use super::constants::{UintN, JUMP_BUFFER_ALIGNMENT};
use crate::arch_impl::traits::SavedContext;

/// Callee-saved registers plus frame and stack pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct JumpBuffer {
    pub r13: UintN,
    pub r14: UintN,
    pub r15: UintN,
    pub r16: UintN,
    pub r17: UintN,
    pub r18: UintN,
    pub r19: UintN,
    pub r20: UintN,
    pub r21: UintN,
    pub r22: UintN,
    pub r23: UintN,
    pub r24: UintN,
    pub r25: UintN,
    /// Frame pointer
    pub fp: UintN,
    /// Stack pointer
    pub sp: UintN,
}

/// Number of callee-saved general purpose registers (r13-r25).
pub const CALLEE_SAVED_COUNT: usize = 13;

pub const FP_OFFSET: usize = 52;
pub const SP_OFFSET: usize = 56;

const _: () = assert!(size_of::<JumpBuffer>() == 60, "JumpBuffer must be 15 words");
const _: () = assert!(
    align_of::<JumpBuffer>() == JUMP_BUFFER_ALIGNMENT,
    "JumpBuffer alignment mismatch"
);
const _: () = assert!(offset_of!(JumpBuffer, r13) == 0, "r13 offset mismatch");
const _: () = assert!(offset_of!(JumpBuffer, r25) == 48, "r25 offset mismatch");
const _: () = assert!(offset_of!(JumpBuffer, fp) == FP_OFFSET, "fp offset mismatch");
const _: () = assert!(offset_of!(JumpBuffer, sp) == SP_OFFSET, "sp offset mismatch");

impl JumpBuffer {
    /// An all-zero buffer.
    pub const fn new() -> Self {
        Self {
            r13: 0,
            r14: 0,
            r15: 0,
            r16: 0,
            r17: 0,
            r18: 0,
            r19: 0,
            r20: 0,
            r21: 0,
            r22: 0,
            r23: 0,
            r24: 0,
            r25: 0,
            fp: 0,
            sp: 0,
        }
    }

    /// Returns r13-r25 in field order.
    pub fn callee_saved(&self) -> [UintN; CALLEE_SAVED_COUNT] {
        [
            self.r13, self.r14, self.r15, self.r16, self.r17, self.r18, self.r19, self.r20,
            self.r21, self.r22, self.r23, self.r24, self.r25,
        ]
    }

    /// Raw words in field order, as the assembly sees them.
    pub fn as_words(&self) -> &[UintN; 15] {
        // SAFETY: repr(C) record of 15 UintN with no padding (asserted above).
        unsafe { &*(self as *const Self as *const [UintN; 15]) }
    }
}

impl SavedContext for JumpBuffer {
    const ALIGNMENT: usize = JUMP_BUFFER_ALIGNMENT;
    const REGISTERS: &'static [&'static str] = &[
        "r13", "r14", "r15", "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23", "r24",
        "r25", "fp", "sp",
    ];

    #[inline]
    fn stack_pointer(&self) -> usize {
        self.sp as usize
    }

    #[inline]
    fn frame_pointer(&self) -> usize {
        self.fp as usize
    }
}

const _: () = assert!(
    <JumpBuffer as SavedContext>::REGISTERS.len() * size_of::<UintN>() == size_of::<JumpBuffer>()
);
