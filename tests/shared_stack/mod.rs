//! Shared infrastructure for the stack switch tests.
//!
//! Entry points cannot return, so a test drives each transfer from its own
//! thread. The entry point posts what it observed to a shared board and then
//! parks forever; the test waits on the board for the report.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Condvar, Mutex, Once, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use procbind::contract::{self, ContractViolation};
use procbind::{ArchProfile, Context, PendingEntry, TransferRequest};

/// Size of every test stack.
pub const STACK_SIZE: usize = 256 * 1024;

/// How long a test waits for an entry point to report.
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(10);

/// What an entry point saw after the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub context1: usize,
    pub context2: usize,
    /// Address of a local in the entry point's frame.
    pub frame_address: usize,
}

struct Board {
    reports: Mutex<HashMap<usize, Report>>,
    posted: Condvar,
}

fn board() -> &'static Board {
    static BOARD: OnceLock<Board> = OnceLock::new();
    BOARD.get_or_init(|| Board {
        reports: Mutex::new(HashMap::new()),
        posted: Condvar::new(),
    })
}

/// Posts the report for transfer `id`.
pub fn post(id: usize, report: Report) {
    let board = board();
    board.reports.lock().unwrap().insert(id, report);
    board.posted.notify_all();
}

/// Waits for the report of transfer `id`.
pub fn wait_for(id: usize) -> Option<Report> {
    let board = board();
    let deadline = Instant::now() + REPORT_TIMEOUT;
    let mut reports = board.reports.lock().unwrap();
    loop {
        if let Some(report) = reports.remove(&id) {
            return Some(report);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        reports = board.posted.wait_timeout(reports, deadline - now).unwrap().0;
    }
}

/// Entry point that reports its contexts under `ID` and never returns.
pub extern "C" fn record<const ID: usize>(context1: Context, context2: Context) -> ! {
    let local = 0u8;
    let frame_address = std::hint::black_box(&local) as *const u8 as usize;
    post(
        ID,
        Report {
            context1: context1 as usize,
            context2: context2 as usize,
            frame_address,
        },
    );
    loop {
        thread::park();
    }
}

/// A heap stack that is never freed, since the entered function keeps running
/// on it for the rest of the process.
#[derive(Debug, Clone, Copy)]
pub struct TestStack {
    base: usize,
    len: usize,
}

impl TestStack {
    pub fn new() -> Self {
        let memory: &'static mut [u128] =
            Box::leak(vec![0u128; STACK_SIZE / 16].into_boxed_slice());
        Self {
            base: memory.as_mut_ptr() as usize,
            len: STACK_SIZE,
        }
    }

    /// Initial stack pointer (one past the highest byte).
    pub fn top(&self) -> *mut u8 {
        (self.base + self.len) as *mut u8
    }

    pub fn contains(&self, address: usize) -> bool {
        address >= self.base && address < self.base + self.len
    }
}

/// Runs `request` on a fresh thread through `slot`.
///
/// Raw pointers are not `Send`, so the request crosses the thread boundary as
/// plain addresses.
pub fn spawn_transfer(
    request: TransferRequest,
    profile: &'static ArchProfile,
    slot: &'static PendingEntry,
) {
    let entry = request.entry;
    let context1 = request.context1 as usize;
    let context2 = request.context2 as usize;
    let stack = request.new_stack as usize;
    thread::spawn(move || {
        let request = TransferRequest::new(entry, stack as *mut u8)
            .with_contexts(context1 as Context, context2 as Context);
        unsafe { request.execute(profile, slot) }
    });
}

/// Serializes tests that go through the process-wide slot.
pub fn global_slot_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

thread_local! {
    static VIOLATIONS: Cell<usize> = const { Cell::new(0) };
    static LAST_VIOLATION: Cell<Option<ContractViolation>> = const { Cell::new(None) };
}

fn count_violation(violation: &ContractViolation) {
    VIOLATIONS.with(|count| count.set(count.get() + 1));
    LAST_VIOLATION.with(|last| last.set(Some(*violation)));
}

/// Installs the counting assertion handler (once per process) and resets
/// this thread's counters.
pub fn reset_violations() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        contract::install_handler(count_violation).expect("handler installed twice");
    });
    debug_assert!(contract::handler_installed());
    VIOLATIONS.with(|count| count.set(0));
    LAST_VIOLATION.with(|last| last.set(None));
}

/// Violations reported on this thread since the last reset.
pub fn violations() -> usize {
    VIOLATIONS.with(|count| count.get())
}

pub fn last_violation() -> Option<ContractViolation> {
    LAST_VIOLATION.with(|last| last.get())
}
