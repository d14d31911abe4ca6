use std::hash::Hasher;

use crate::digest::Digest;
use crate::hash::Hashable;

// Integers are fed little endian so that commitments do not depend on the
// producer's platform. Slices and vectors of integers are fed as the plain
// concatenation of their elements, with no length prefix.
macro_rules! impl_write {
    ($($ty:ident,)*) => {$(
        impl<H: Hasher> Hashable<H> for $ty {
            fn hash(&self, state: &mut H) {
                state.write(&self.to_le_bytes())
            }
        }

        impl<H: Hasher> Hashable<H> for [$ty] {
            fn hash(&self, state: &mut H) {
                <$ty as Hashable<H>>::hash_slice(self, state)
            }
        }

        impl<H: Hasher> Hashable<H> for Vec<$ty> {
            fn hash(&self, state: &mut H) {
                <$ty as Hashable<H>>::hash_slice(self, state)
            }
        }

        impl<H: Hasher, const N: usize> Hashable<H> for [$ty; N] {
            fn hash(&self, state: &mut H) {
                <$ty as Hashable<H>>::hash_slice(self, state)
            }
        }
    )*}
}

impl_write! {
    u16,
    u32,
    u64,
    u128,
    i8,
    i16,
    i32,
    i64,
    i128,
}

impl<H: Hasher> Hashable<H> for u8 {
    fn hash(&self, state: &mut H) {
        state.write_u8(*self)
    }

    fn hash_slice(data: &[u8], state: &mut H) {
        state.write(data)
    }
}

impl<H: Hasher> Hashable<H> for [u8] {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher> Hashable<H> for Vec<u8> {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher, const N: usize> Hashable<H> for [u8; N] {
    fn hash(&self, state: &mut H) {
        state.write(self)
    }
}

impl<H: Hasher> Hashable<H> for bool {
    fn hash(&self, state: &mut H) {
        state.write_u8(u8::from(*self))
    }
}

impl<H: Hasher> Hashable<H> for str {
    fn hash(&self, state: &mut H) {
        state.write(self.as_bytes());
    }
}

impl<H: Hasher> Hashable<H> for String {
    fn hash(&self, state: &mut H) {
        state.write(self.as_bytes());
    }
}

impl<H: Hasher> Hashable<H> for Digest {
    fn hash(&self, state: &mut H) {
        state.write(self.as_ref());
    }
}

impl<H: Hasher, T: Hashable<H>> Hashable<H> for Option<T> {
    /// `None` contributes nothing, so an absent field hashes like a missing one.
    fn hash(&self, state: &mut H) {
        if let Some(v) = self {
            v.hash(state);
        }
    }
}

macro_rules! impl_hash_tuple {
    ( $($name:ident)+) => (
        impl<Z: Hasher, $($name: Hashable<Z>),*> Hashable<Z> for ($($name,)*) where last_type!($($name,)+): ?Sized {
            #[allow(non_snake_case)]
            fn hash(&self, state: &mut Z) {
                let ($(ref $name,)*) = *self;
                $($name.hash(state);)*
            }
        }
    );
}

macro_rules! last_type {
    ($a:ident,) => { $a };
    ($a:ident, $($rest_a:ident,)+) => { last_type!($($rest_a,)+) };
}

impl_hash_tuple! { A }
impl_hash_tuple! { A B }
impl_hash_tuple! { A B C }
impl_hash_tuple! { A B C D }
impl_hash_tuple! { A B C D E }
impl_hash_tuple! { A B C D E F }

impl<H: Hasher, T: ?Sized + Hashable<H>> Hashable<H> for &T {
    fn hash(&self, state: &mut H) {
        (**self).hash(state);
    }
}
