//! Variable-argument form of the stack switch.
//!
//! A transfer carries exactly two context values. Callers with a variable
//! context list project it onto those two slots here; anything past the
//! second value cannot be represented and is a contract violation.

use core::ptr;

use super::{switch_stack, Context, EntryPoint};
use crate::contract::{self, ContractViolation};

/// Context values that survive a transfer.
pub const MAX_CONTEXTS: usize = 2;

/// Projects `contexts` onto `(context1, context2)`.
///
/// Missing values are null. More than [`MAX_CONTEXTS`] values is
/// [`ContractViolation::TooManyContexts`].
pub fn project_contexts(contexts: &[Context]) -> Result<(Context, Context), ContractViolation> {
    match contexts.split_first() {
        None => Ok((ptr::null_mut(), ptr::null_mut())),
        Some((&context1, rest)) => Ok((context1, project_tail(rest)?)),
    }
}

/// Projects the values after the first context onto `context2`.
fn project_tail(rest: &[Context]) -> Result<Context, ContractViolation> {
    match *rest {
        [] => Ok(ptr::null_mut()),
        [context2] => Ok(context2),
        _ => Err(ContractViolation::TooManyContexts {
            supplied: rest.len() + 1,
            max: MAX_CONTEXTS,
        }),
    }
}

/// [`switch_stack`] with the second context taken from a variable list.
///
/// An empty `rest` passes a null second context; one value is passed as is;
/// more than one is reported through the assertion path before anything else
/// happens.
///
/// # Safety
///
/// Same as [`switch_stack`].
pub unsafe fn switch_stack_va(
    entry: Option<EntryPoint>,
    context1: Context,
    rest: &[Context],
    new_stack: *mut u8,
) -> ! {
    let context2 = match project_tail(rest) {
        Ok(context2) => context2,
        Err(violation) => contract::report(violation),
    };
    switch_stack(entry, context1, context2, new_stack)
}

/// Switches stacks with zero, one or two context values.
///
/// Expands to [`switch_stack`](crate::switch_stack::switch_stack) and must be
/// used inside `unsafe`. Missing contexts are null. A third context is a
/// compile error:
///
/// ```compile_fail
/// # use procbind::Context;
/// # extern "C" fn entry(_: Context, _: Context) -> ! { loop {} }
/// # let stack = core::ptr::null_mut::<u8>();
/// # let c = core::ptr::null_mut();
/// unsafe { procbind::switch_stack!(Some(entry), stack, c, c, c) }
/// ```
#[macro_export]
macro_rules! switch_stack {
    ($entry:expr, $stack:expr $(,)?) => {
        $crate::switch_stack::switch_stack(
            $entry,
            ::core::ptr::null_mut(),
            ::core::ptr::null_mut(),
            $stack,
        )
    };
    ($entry:expr, $stack:expr, $context1:expr $(,)?) => {
        $crate::switch_stack::switch_stack($entry, $context1, ::core::ptr::null_mut(), $stack)
    };
    ($entry:expr, $stack:expr, $context1:expr, $context2:expr $(,)?) => {
        $crate::switch_stack::switch_stack($entry, $context1, $context2, $stack)
    };
    ($entry:expr, $stack:expr, $context1:expr, $context2:expr, $($extra:expr),+ $(,)?) => {
        ::core::compile_error!("switch_stack! carries at most two context values")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(value: usize) -> Context {
        value as Context
    }

    #[test]
    fn test_short_lists_are_padded_with_null() {
        assert_eq!(project_contexts(&[]), Ok((ptr::null_mut(), ptr::null_mut())));
        assert_eq!(project_contexts(&[ctx(7)]), Ok((ctx(7), ptr::null_mut())));
    }

    #[test]
    fn test_two_values_forwarded_unchanged() {
        assert_eq!(project_contexts(&[ctx(1), ctx(2)]), Ok((ctx(1), ctx(2))));
        assert_eq!(
            project_contexts(&[ptr::null_mut(), ctx(2)]),
            Ok((ptr::null_mut(), ctx(2)))
        );
    }

    #[test]
    fn test_third_value_is_rejected() {
        assert_eq!(
            project_contexts(&[ctx(1), ctx(2), ctx(3)]),
            Err(ContractViolation::TooManyContexts {
                supplied: 3,
                max: MAX_CONTEXTS
            })
        );
    }

    #[test]
    fn test_tail_counts_the_leading_context() {
        assert_eq!(project_tail(&[]), Ok(ptr::null_mut()));
        assert_eq!(project_tail(&[ctx(4)]), Ok(ctx(4)));
        assert_eq!(
            project_tail(&[ctx(2), ctx(3), ctx(4)]),
            Err(ContractViolation::TooManyContexts {
                supplied: 4,
                max: MAX_CONTEXTS
            })
        );
    }

    #[test]
    fn test_va_rejects_extra_contexts_before_switching() {
        extern "C" fn never(_: Context, _: Context) -> ! {
            unreachable!()
        }
        let rest = [ctx(2), ctx(3)];
        let result = std::panic::catch_unwind(|| unsafe {
            switch_stack_va(Some(never), ctx(1), &rest, 0x8000 as *mut u8)
        });
        assert!(result.is_err());
    }
}
