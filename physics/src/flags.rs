use num_traits::{One, PrimInt};

/// A single named bit inside a [`Flags`] set.
///
/// The enum discriminant (via `#[repr(u8)]`) is the bit index; the associated `Storage`
/// picks the integer that holds the whole set.
pub trait FlagBit {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < the bit width of `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// Plain bit set over a primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Flags<T: PrimInt> {
    bits: T,
}

impl<T: PrimInt> Flags<T> {
    pub fn from_bits(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    /// Build a set with every listed flag raised.
    pub fn of<U: FlagBit<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut set = Self::empty();
        for &flag in flags {
            set.insert(flag);
        }
        set
    }

    #[inline]
    pub fn bits(&self) -> T {
        self.bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    pub fn insert<U: FlagBit<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBit<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn set<U: FlagBit<Storage = T>>(&mut self, flag: U, on: bool) {
        if on {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }

    #[inline]
    pub fn contains<U: FlagBit<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    pub fn contains_all<U: FlagBit<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        let combined = Self::of(flags).bits;
        (self.bits & combined) == combined
    }

    pub fn contains_any<U: FlagBit<Storage = T> + Copy>(&self, flags: &[U]) -> bool {
        let combined = Self::of(flags).bits;
        (self.bits & combined) != T::zero()
    }

    pub fn clear(&mut self) {
        self.bits = T::zero();
    }
}

/// Declare a `#[repr(u8)]` flag enum and implement [`FlagBit`] for it.
///
/// ```text
/// define_flag_bits!(ContactFlag, u8, {
///     Touching,
///     Sliding,
/// });
/// ```
#[macro_export]
macro_rules! define_flag_bits {
    ($(#[$meta:meta])* $name:ident, $storage:ty, { $($(#[$vmeta:meta])* $variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $crate::flags::FlagBit for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

define_flag_bits!(
    /// Per-object physics behaviour bits.
    PhysicsFlag, u32, {
        /// Gravity is not added to this object's force accumulator.
        DisableGravity,
        /// The object takes part in collision response as a mover.
        EnableResponse,
        /// Set by the resolver when the object was pushed up onto a surface this tick.
        Grounded,
        /// The object is never integrated (forces and velocities are ignored).
        Static,
        /// Linear drag proportional to velocity is applied every tick.
        Drag,
    }
);

pub type PhysicsFlags = Flags<u32>;
