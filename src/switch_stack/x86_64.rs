//! x86_64 stack switch.

use core::arch::asm;

use super::{enter_pending, Context, PendingEntry};

/// Loads `new_stack` into RSP and calls the glue with both contexts and the
/// slot (RDI, RSI, RDX per SysV).
///
/// RSP is rounded down to 16 bytes so the glue starts with the call alignment
/// the ABI expects. RBP is cleared so frame walkers stop at the glue.
#[inline(always)]
pub(super) unsafe fn switch_stack_asm(
    context1: Context,
    context2: Context,
    new_stack: *mut u8,
    slot: &'static PendingEntry,
) -> ! {
    let slot = slot as *const PendingEntry;
    asm!(
        "mov rsp, {stack}",
        "and rsp, -16",
        "xor ebp, ebp",
        "call {enter}",
        // enter_pending diverges
        "ud2",
        stack = in(reg) new_stack,
        enter = sym enter_pending,
        in("rdi") context1,
        in("rsi") context2,
        in("rdx") slot,
        options(noreturn),
    )
}
