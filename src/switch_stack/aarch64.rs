//! AArch64 stack switch.

use core::arch::asm;

use super::{enter_pending, Context, PendingEntry};

/// Loads `new_stack` into SP and branches to the glue with both contexts and
/// the slot in x0-x2.
///
/// SP must be 16-byte aligned whenever it is used, so the new stack is
/// rounded down first. The frame pointer and link register are zeroed so
/// unwinders stop at the glue.
#[inline(always)]
pub(super) unsafe fn switch_stack_asm(
    context1: Context,
    context2: Context,
    new_stack: *mut u8,
    slot: &'static PendingEntry,
) -> ! {
    let slot = slot as *const PendingEntry;
    asm!(
        "and x3, x3, #0xfffffffffffffff0",
        "mov sp, x3",
        "mov x29, xzr",
        "mov x30, xzr",
        "bl {enter}",
        // enter_pending diverges
        "brk #0x1",
        enter = sym enter_pending,
        in("x0") context1,
        in("x1") context2,
        in("x2") slot,
        in("x3") new_stack,
        options(noreturn),
    )
}
