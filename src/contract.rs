//! Contract violations and the assertion hook.
//!
//! A stack switch either transfers control or stops on a broken precondition.
//! There is no error return: [`report`] logs the violation, hands it to the
//! firmware's assertion handler if one is installed, and then panics so the
//! faulting path never continues.

use core::fmt;

use conquer_once::spin::OnceCell;

/// A broken precondition of a stack switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// No entry point was supplied.
    NullEntryPoint,
    /// The new stack pointer is null.
    NullStack,
    /// The new stack pointer does not meet the profile's stack alignment.
    MisalignedStack { address: usize, alignment: usize },
    /// Another transfer has published into the same pending entry slot and
    /// not yet consumed it.
    TransferInFlight,
    /// More context values than a transfer can carry.
    TooManyContexts { supplied: usize, max: usize },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::NullEntryPoint => write!(f, "entry point is null"),
            ContractViolation::NullStack => write!(f, "new stack is null"),
            ContractViolation::MisalignedStack { address, alignment } => write!(
                f,
                "new stack {:#x} is not aligned to {} bytes",
                address, alignment
            ),
            ContractViolation::TransferInFlight => {
                write!(f, "pending entry slot already holds an unconsumed entry point")
            }
            ContractViolation::TooManyContexts { supplied, max } => write!(
                f,
                "{} context values supplied, at most {} can be passed",
                supplied, max
            ),
        }
    }
}

/// Firmware assertion handler.
///
/// Called synchronously with the violation before the faulting path is
/// halted. A handler that returns does not resume the transfer.
pub type ViolationHandler = fn(&ContractViolation);

static HANDLER: OnceCell<ViolationHandler> = OnceCell::uninit();

/// An assertion handler has already been installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerAlreadyInstalled;

impl fmt::Display for HandlerAlreadyInstalled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("contract violation handler already installed")
    }
}

/// Installs the firmware's assertion handler. Can be done once.
pub fn install_handler(handler: ViolationHandler) -> Result<(), HandlerAlreadyInstalled> {
    HANDLER
        .try_init_once(|| handler)
        .map_err(|_| HandlerAlreadyInstalled)
}

/// Returns true once an assertion handler is installed.
pub fn handler_installed() -> bool {
    HANDLER.get().is_some()
}

/// Reports `violation` and halts the faulting path.
#[cold]
#[track_caller]
pub fn report(violation: ContractViolation) -> ! {
    log::error!("switch_stack: contract violation: {}", violation);
    if let Some(handler) = HANDLER.get() {
        handler(&violation);
    }
    panic!("contract violation: {}", violation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_messages_name_the_problem() {
        let misaligned = ContractViolation::MisalignedStack {
            address: 0x1002,
            alignment: 4,
        };
        assert_eq!(misaligned.to_string(), "new stack 0x1002 is not aligned to 4 bytes");
        assert_eq!(
            ContractViolation::TooManyContexts { supplied: 3, max: 2 }.to_string(),
            "3 context values supplied, at most 2 can be passed"
        );
        assert_eq!(ContractViolation::NullEntryPoint.to_string(), "entry point is null");
    }

    #[test]
    fn test_report_halts() {
        let result = std::panic::catch_unwind(|| report(ContractViolation::NullStack));
        assert!(result.is_err());
    }
}
