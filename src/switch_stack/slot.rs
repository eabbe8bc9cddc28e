//! Pending entry slot.
//!
//! Carries the entry point from the outer half of a stack switch, which runs
//! on the old stack, to the glue that runs on the new one. One writer
//! publishes, one reader takes, and the slot is empty again.

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use super::EntryPoint;
use crate::contract::ContractViolation;

/// Single-writer/single-reader cell for one in-flight entry point.
///
/// At most one transfer may be in flight per slot. Code that switches stacks
/// from several execution contexts at once gives each context its own slot;
/// publishing into a slot that still holds an entry point is reported as
/// [`ContractViolation::TransferInFlight`].
#[derive(Debug)]
pub struct PendingEntry {
    entry: AtomicPtr<()>,
}

impl PendingEntry {
    /// An empty slot.
    pub const fn new() -> Self {
        Self {
            entry: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Stores `entry` for the next [`take`](Self::take).
    pub fn publish(&self, entry: EntryPoint) -> Result<(), ContractViolation> {
        self.entry
            .compare_exchange(
                ptr::null_mut(),
                entry as *mut (),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|_| ContractViolation::TransferInFlight)
    }

    /// Removes and returns the published entry point.
    pub fn take(&self) -> Option<EntryPoint> {
        let raw = self.entry.swap(ptr::null_mut(), Ordering::AcqRel);
        if raw.is_null() {
            None
        } else {
            // SAFETY: only `publish` stores non-null values, and it stores
            // an `EntryPoint`.
            Some(unsafe { core::mem::transmute::<*mut (), EntryPoint>(raw) })
        }
    }

    /// Returns true if an entry point has been published and not yet taken.
    pub fn is_pending(&self) -> bool {
        !self.entry.load(Ordering::Acquire).is_null()
    }
}

impl Default for PendingEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch_stack::Context;

    extern "C" fn first(_: Context, _: Context) -> ! {
        unreachable!()
    }

    extern "C" fn second(_: Context, _: Context) -> ! {
        unreachable!()
    }

    #[test]
    fn test_publish_then_take_empties_slot() {
        let slot = PendingEntry::new();
        assert!(!slot.is_pending());
        slot.publish(first).unwrap();
        assert!(slot.is_pending());
        assert_eq!(slot.take().map(|f| f as usize), Some(first as usize));
        assert!(!slot.is_pending());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_second_publish_is_rejected() {
        let slot = PendingEntry::new();
        slot.publish(first).unwrap();
        assert_eq!(slot.publish(second), Err(ContractViolation::TransferInFlight));
        // The first entry point is still the one handed out.
        assert_eq!(slot.take().map(|f| f as usize), Some(first as usize));
    }

    #[test]
    fn test_slot_is_reusable_in_order() {
        let slot = PendingEntry::default();
        slot.publish(first).unwrap();
        slot.take().unwrap();
        slot.publish(second).unwrap();
        assert_eq!(slot.take().map(|f| f as usize), Some(second as usize));
    }
}
