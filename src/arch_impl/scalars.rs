//! Fixed-width scalar types shared by every ARC variant.
//!
//! The 64-bit integers are 8-byte aligned on every variant, even where the
//! native ABI would align a `u64` to 4 bytes. Structures shared with other
//! firmware components rely on that layout, so the 64-bit types are wrapped
//! in [`Aligned8`] instead of being plain aliases.

use core::mem::{align_of, size_of};

/// A value forced to 8-byte alignment.
#[repr(C, align(8))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Aligned8<T>(pub T);

impl<T: Copy> Aligned8<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub const fn get(self) -> T {
        self.0
    }
}

pub type Uint64 = Aligned8<u64>;
pub type Int64 = Aligned8<i64>;

pub type Uint32 = u32;
pub type Int32 = i32;

pub type Uint16 = u16;
pub type Int16 = i16;
/// UCS-2 code unit.
pub type Char16 = u16;

/// One byte, zero is false.
pub type Boolean = u8;
pub type Uint8 = u8;
/// Narrow character; `char` is unsigned on ARC.
pub type Char8 = u8;
pub type Int8 = i8;

pub const TRUE: Boolean = 1;
pub const FALSE: Boolean = 0;

impl From<u64> for Uint64 {
    fn from(value: u64) -> Self {
        Aligned8(value)
    }
}

impl From<Uint64> for u64 {
    fn from(value: Uint64) -> Self {
        value.0
    }
}

impl From<i64> for Int64 {
    fn from(value: i64) -> Self {
        Aligned8(value)
    }
}

impl From<Int64> for i64 {
    fn from(value: Int64) -> Self {
        value.0
    }
}

const _: () = assert!(size_of::<Uint64>() == 8 && align_of::<Uint64>() == 8);
const _: () = assert!(size_of::<Int64>() == 8 && align_of::<Int64>() == 8);
const _: () = assert!(size_of::<Char16>() == 2);
const _: () = assert!(size_of::<Boolean>() == 1 && size_of::<Char8>() == 1);

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[repr(C)]
    struct Record {
        flag: Boolean,
        length: Uint32,
        value: Uint64,
    }

    #[test]
    fn test_64_bit_fields_start_on_8_byte_boundary() {
        assert_eq!(offset_of!(Record, length), 4);
        assert_eq!(offset_of!(Record, value), 8);
        assert_eq!(size_of::<Record>(), 16);
    }

    #[test]
    fn test_wrapper_is_transparent_for_values() {
        let value = Uint64::from(u64::MAX);
        assert_eq!(u64::from(value), u64::MAX);
        assert_eq!(Int64::new(-1).get(), -1);
        assert!(Uint64::new(1) < Uint64::new(2));
    }
}
