//! Derivation of complex blocking parameters from real ones.
//!
//! Complex matrix products are computed by splitting each complex multiply
//! into three real multiplies and reusing the real micro-kernels. A complex
//! datatype therefore inherits the register blocking of the real datatype of
//! matching precision unchanged, while its KC cache dimension is halved: the
//! shared dimension is traversed three times instead of once, so half the
//! panel depth keeps the packed working set resident.
//!
//! Derivation is applied once, at configuration assembly, producing a fully
//! materialized table entry. Derived values are always expressed in terms of
//! an explicitly defined real entry; a derived entry is never itself the
//! source of another derivation.

use crate::blocking::{CacheBlocking, DatatypeBlocking, RegisterBlocking};

/// Scale factor applied to the real KC when deriving a complex datatype.
pub const KC_DIVISOR_3M: usize = 2;

/// Derive a complex datatype's blocking from its real counterpart.
///
/// Register blocksizes carry over exactly; MC and NC are unscaled and KC is
/// divided by [`KC_DIVISOR_3M`]. Extensions are not inherited: padding is
/// specific to a datatype's packing format, so a derived entry starts with
/// zero extensions and only an explicit override can introduce padding.
pub const fn derive_3m(real: &DatatypeBlocking) -> DatatypeBlocking {
    DatatypeBlocking {
        register: real.register,
        register_ext: RegisterBlocking::ZERO,
        cache: CacheBlocking::new(
            real.cache.mc,
            real.cache.nc,
            real.cache.kc / KC_DIVISOR_3M,
        ),
        cache_ext: CacheBlocking::ZERO,
    }
}
