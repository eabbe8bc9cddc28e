//! RISC-V stack switch (RV32 and RV64).

use core::arch::asm;

use super::{enter_pending, Context, PendingEntry};

/// Loads `new_stack` into sp and calls the glue with both contexts and the
/// slot in a0-a2.
///
/// The psABI wants sp 16-byte aligned at calls on both RV32 and RV64. s0 (the
/// frame pointer) is cleared so unwinders stop at the glue.
#[inline(always)]
pub(super) unsafe fn switch_stack_asm(
    context1: Context,
    context2: Context,
    new_stack: *mut u8,
    slot: &'static PendingEntry,
) -> ! {
    let slot = slot as *const PendingEntry;
    asm!(
        "andi sp, a3, -16",
        "mv s0, zero",
        "call {enter}",
        // enter_pending diverges
        "unimp",
        enter = sym enter_pending,
        in("a0") context1,
        in("a1") context2,
        in("a2") slot,
        in("a3") new_stack,
        options(noreturn),
    )
}
