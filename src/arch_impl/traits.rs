//! Architecture-agnostic traits for the processor binding tables.
//!
//! These traits define the compile-time interface every supported processor
//! variant provides. Firmware code that needs the native integer types or
//! limits as *types* goes through [`ProcessorBind`]; code that only needs the
//! values can use the runtime [`ArchProfile`](super::ArchProfile) table instead.

use core::fmt::Debug;

use super::ArchVariant;

/// Width family of a processor's natural integer registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthKind {
    /// 32-bit native integers.
    Narrow,
    /// 64-bit native integers.
    Wide,
}

impl WidthKind {
    /// Size of a native integer in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            WidthKind::Narrow => 4,
            WidthKind::Wide => 8,
        }
    }
}

/// A native-width family.
///
/// The unsigned type, the signed type and the byte width switch together:
/// a processor picks one family and every width-dependent binding follows
/// from it.
pub trait NativeWidth {
    /// Unsigned value of native width (`UINTN`).
    type Unsigned: Copy + Eq + Ord + Debug + Into<u64>;

    /// Signed value of native width (`INTN`).
    type Signed: Copy + Eq + Ord + Debug + Into<i64>;

    /// Which family this is.
    const KIND: WidthKind;

    /// Width of a native integer in bytes.
    const BYTES: usize = core::mem::size_of::<Self::Unsigned>();
}

/// 32-bit native integers.
#[derive(Debug, Clone, Copy)]
pub struct Narrow;

impl NativeWidth for Narrow {
    type Unsigned = u32;
    type Signed = i32;
    const KIND: WidthKind = WidthKind::Narrow;
}

/// 64-bit native integers.
#[derive(Debug, Clone, Copy)]
pub struct Wide;

impl NativeWidth for Wide {
    type Unsigned = u64;
    type Signed = i64;
    const KIND: WidthKind = WidthKind::Wide;
}

const _: () = assert!(<Narrow as NativeWidth>::BYTES == WidthKind::Narrow.bytes());
const _: () = assert!(<Wide as NativeWidth>::BYTES == WidthKind::Wide.bytes());
const _: () = assert!(
    core::mem::size_of::<<Narrow as NativeWidth>::Signed>() == <Narrow as NativeWidth>::BYTES
);
const _: () = assert!(
    core::mem::size_of::<<Wide as NativeWidth>::Signed>() == <Wide as NativeWidth>::BYTES
);

/// Saved execution context of a long-jump facility.
///
/// Implementors are `repr(C)` records whose field order is a binary contract
/// with the assembly that fills and restores them.
pub trait SavedContext: Copy {
    /// Required alignment of the record in memory.
    const ALIGNMENT: usize;

    /// Saved registers, in field order.
    const REGISTERS: &'static [&'static str];

    /// Returns the saved stack pointer.
    fn stack_pointer(&self) -> usize;

    /// Returns the saved frame pointer.
    fn frame_pointer(&self) -> usize;
}

/// Saved context type of processors without a long-jump facility.
///
/// Uninhabited, so no value of it can ever be created.
#[derive(Debug, Clone, Copy)]
pub enum NoJumpBuffer {}

impl SavedContext for NoJumpBuffer {
    const ALIGNMENT: usize = 1;
    const REGISTERS: &'static [&'static str] = &[];

    fn stack_pointer(&self) -> usize {
        match *self {}
    }

    fn frame_pointer(&self) -> usize {
        match *self {}
    }
}

/// Unsigned native integer of a processor.
pub type Unsigned<P> = <<P as ProcessorBind>::Width as NativeWidth>::Unsigned;

/// Signed native integer of a processor.
pub type Signed<P> = <<P as ProcessorBind>::Width as NativeWidth>::Signed;

/// Compile-time processor binding.
///
/// Every limit is typed as the processor's own native integer so a value
/// that does not fit the selected width fails to compile.
pub trait ProcessorBind: Sized {
    /// Native integer width family.
    type Width: NativeWidth;

    /// Long-jump buffer layout, [`NoJumpBuffer`] if there is none.
    type JumpBuffer: SavedContext;

    /// Runtime selector for this processor.
    const VARIANT: ArchVariant;

    /// A value of native width with the highest bit set.
    const MAX_BIT: Unsigned<Self>;

    /// A value of native width with the two highest bits set.
    const MAX_2_BITS: Unsigned<Self>;

    /// Highest legal address.
    const MAX_ADDRESS: Unsigned<Self>;

    /// Highest address usable for boot-time allocation.
    const MAX_ALLOC_ADDRESS: Unsigned<Self>;

    /// First address of the window reserved for memory-mapped peripherals.
    const PERIPHERAL_BASE: Unsigned<Self>;

    /// Maximum `INTN` value.
    const MAX_INTN: Signed<Self>;

    /// Maximum `UINTN` value.
    const MAX_UINTN: Unsigned<Self>;

    /// Page allocation granularity for boot-time allocations.
    const DEFAULT_PAGE_ALLOCATION_GRANULARITY: usize;

    /// Page allocation granularity for runtime allocations.
    const RUNTIME_PAGE_ALLOCATION_GRANULARITY: usize;

    /// Required alignment of any stack pointer handed to a stack switch.
    const CPU_STACK_ALIGNMENT: usize = <Self::Width as NativeWidth>::BYTES;

    /// Whether the processor has a long-jump facility.
    const HAS_JUMP_BUFFER: bool;

    /// Returns the address of the first instruction of `f`.
    ///
    /// On ARC a function pointer already is that address.
    #[inline]
    fn function_entry_point<F: FunctionPointer>(f: F) -> *const () {
        f.address()
    }
}

/// A Rust or C ABI function pointer with up to four arguments.
///
/// Pointers whose arguments borrow with a higher-ranked lifetime
/// (`fn(&T)`) are not covered; cast those to `*const ()` directly.
pub trait FunctionPointer: Copy {
    /// Address the pointer refers to.
    fn address(self) -> *const ();
}

macro_rules! impl_function_pointer {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> FunctionPointer for fn($($arg),*) -> R {
            #[inline]
            fn address(self) -> *const () {
                self as *const ()
            }
        }

        impl<R, $($arg),*> FunctionPointer for unsafe fn($($arg),*) -> R {
            #[inline]
            fn address(self) -> *const () {
                self as *const ()
            }
        }

        impl<R, $($arg),*> FunctionPointer for extern "C" fn($($arg),*) -> R {
            #[inline]
            fn address(self) -> *const () {
                self as *const ()
            }
        }

        impl<R, $($arg),*> FunctionPointer for unsafe extern "C" fn($($arg),*) -> R {
            #[inline]
            fn address(self) -> *const () {
                self as *const ()
            }
        }
    };
}

impl_function_pointer!();
impl_function_pointer!(A);
impl_function_pointer!(A, B);
impl_function_pointer!(A, B, C);
impl_function_pointer!(A, B, C, D);
