//! One-way stack switching.
//!
//! [`switch_stack`] transfers control to an entry point running on a
//! caller-supplied stack, passing two opaque context values. The caller's
//! stack and return path are abandoned: nothing on the old stack is reachable
//! afterwards except through the two contexts.
//!
//! The transfer has two halves:
//!
//! - the outer routine ([`TransferRequest::execute`]) checks the request,
//!   publishes the entry point into a [`PendingEntry`] slot and calls
//! - the inner routine (one per ISA, in assembly) which loads the new stack
//!   pointer and calls the glue that takes the entry point out of the slot and
//!   invokes it with the two contexts.
//!
//! # Entry point contract
//!
//! The entry point must never return. If it does, behavior is undefined:
//! there is no return address to go back to. Nothing here guards against it.

use core::ffi::c_void;
use core::ptr;

use crate::arch_impl::{ArchProfile, ArchVariant};
use crate::contract::{self, ContractViolation};

mod marker;
mod slot;

pub use marker::{project_contexts, switch_stack_va, MAX_CONTEXTS};
pub use slot::PendingEntry;

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
use self::x86_64 as backend;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
use self::aarch64 as backend;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
mod riscv;
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
use self::riscv as backend;

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64"
)))]
compile_error!("no stack switch routine for this target architecture");

/// Opaque pointer-sized value handed through a transfer unexamined. May be null.
pub type Context = *mut c_void;

/// Function entered on the new stack. Must never return.
pub type EntryPoint = extern "C" fn(Context, Context) -> !;

/// Process-wide slot used by [`switch_stack`] and [`switch_stack_va`].
///
/// Only one transfer may be in flight through it at a time.
pub static PENDING_ENTRY: PendingEntry = PendingEntry::new();

/// One stack switch: where to go, what to pass, which stack to use.
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest {
    /// `None` is the null entry point and is rejected.
    pub entry: Option<EntryPoint>,
    pub context1: Context,
    pub context2: Context,
    /// Initial stack pointer. The stack grows down from here; the memory
    /// below it is owned by the entered function for as long as it runs.
    pub new_stack: *mut u8,
}

impl TransferRequest {
    /// A request with both contexts null.
    pub const fn new(entry: Option<EntryPoint>, new_stack: *mut u8) -> Self {
        Self {
            entry,
            context1: ptr::null_mut(),
            context2: ptr::null_mut(),
            new_stack,
        }
    }

    pub const fn with_contexts(mut self, context1: Context, context2: Context) -> Self {
        self.context1 = context1;
        self.context2 = context2;
        self
    }

    /// Checks the preconditions against `profile`.
    ///
    /// Returns the entry point to publish.
    pub fn validate(&self, profile: &ArchProfile) -> Result<EntryPoint, ContractViolation> {
        let entry = self.entry.ok_or(ContractViolation::NullEntryPoint)?;
        if self.new_stack.is_null() {
            return Err(ContractViolation::NullStack);
        }
        let address = self.new_stack as usize;
        if !profile.is_stack_aligned(address) {
            return Err(ContractViolation::MisalignedStack {
                address,
                alignment: profile.stack_alignment,
            });
        }
        Ok(entry)
    }

    /// Performs the transfer through `slot`.
    ///
    /// A broken precondition, or a slot that already holds an entry point, is
    /// reported through [`contract::report`] before the slot is written or the
    /// stack pointer touched.
    ///
    /// # Safety
    ///
    /// - `new_stack` must point just past the end of writable memory large
    ///   enough for everything the entry point runs, and that memory must stay
    ///   valid for as long as the entry point runs.
    /// - The entry point must never return.
    /// - Nothing the caller holds on its current stack may be relied on after
    ///   the call; destructors of values on that stack never run.
    pub unsafe fn execute(self, profile: &ArchProfile, slot: &'static PendingEntry) -> ! {
        let entry = match self.validate(profile) {
            Ok(entry) => entry,
            Err(violation) => contract::report(violation),
        };

        log::debug!(
            "switch_stack: entry={:#x} stack={:p} context1={:p} context2={:p}",
            entry as usize,
            self.new_stack,
            self.context1,
            self.context2
        );

        if let Err(violation) = slot.publish(entry) {
            contract::report(violation);
        }

        backend::switch_stack_asm(self.context1, self.context2, self.new_stack, slot)
    }
}

/// Transfers control to `entry` on `new_stack`, passing `context1` and
/// `context2`. Never returns.
///
/// Uses the processor profile selected at build time and the process-wide
/// [`PENDING_ENTRY`] slot. `entry == None`, a null `new_stack` or one not
/// aligned to the profile's stack alignment halt through the assertion path.
///
/// # Safety
///
/// See [`TransferRequest::execute`]. In addition, no other transfer may be in
/// flight through [`PENDING_ENTRY`] at the same time.
pub unsafe fn switch_stack(
    entry: Option<EntryPoint>,
    context1: Context,
    context2: Context,
    new_stack: *mut u8,
) -> ! {
    TransferRequest::new(entry, new_stack)
        .with_contexts(context1, context2)
        .execute(ArchVariant::SELECTED.profile(), &PENDING_ENTRY)
}

/// Glue called by the inner routine, already on the new stack.
extern "C" fn enter_pending(context1: Context, context2: Context, slot: *const PendingEntry) -> ! {
    // SAFETY: the inner routine is only ever handed a `&'static PendingEntry`.
    let slot = unsafe { &*slot };
    match slot.take() {
        Some(entry) => entry(context1, context2),
        None => contract::report(ContractViolation::NullEntryPoint),
    }
}
