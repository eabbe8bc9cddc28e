//! Processor binding and stack switching for ARC firmware.
//!
//! This crate is the boundary between architecture-independent firmware code
//! and the processor it runs on. It provides:
//!
//! - [`arch_impl`]: the processor binding tables (native integer widths,
//!   address limits, page granularity, stack alignment, long-jump buffer
//!   layout) for every supported ARC variant, both as types and as a runtime
//!   [`ArchProfile`] table.
//! - [`switch_stack`]: a one-way control transfer onto a caller-supplied
//!   stack, passing two opaque context values to an entry point that never
//!   returns.
//! - [`contract`]: the contract violations the transfer detects and the hook
//!   into the firmware's assertion facility.
//!
//! # Selecting a processor
//!
//! Exactly one of the `cpu-arc` and `cpu-arc2` cargo features must be enabled
//! (`cpu-arc2` is the default). The selection is visible at runtime as
//! [`ArchVariant::SELECTED`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use procbind::{switch_stack, Context};
//!
//! extern "C" fn secondary_main(_ctx1: Context, _ctx2: Context) -> ! {
//!     loop {}
//! }
//!
//! let top = unsafe { STACK.as_mut_ptr().add(STACK.len()) };
//! unsafe { switch_stack(Some(secondary_main), core::ptr::null_mut(), core::ptr::null_mut(), top) }
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod arch_impl;
pub mod contract;
pub mod switch_stack;

pub use arch_impl::{
    ArchProfile, ArchVariant, Current, IntN, JumpBufferLayout, NativeWidth, ProcessorBind,
    UintN, UnknownArchitecture, WidthKind,
};
pub use contract::ContractViolation;
pub use switch_stack::{
    project_contexts, switch_stack, switch_stack_va, Context, EntryPoint, PendingEntry,
    TransferRequest, MAX_CONTEXTS, PENDING_ENTRY,
};
