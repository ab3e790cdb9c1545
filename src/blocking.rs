//! Register- and cache-level blocksize triples.
//!
//! A micro-kernel processes one `MR x NR` tile at a time, accumulating over
//! `KR` units of the shared dimension; the macro-kernel loops around it in
//! `MC x NC x KC` cache blocks. Extensions are padding deltas added on top
//! of the defaults:
//!
//! - maximum blocksize = default + extension, the largest block a kernel
//!   invocation may ever be handed (sizes scratch/packing buffers);
//! - packing dimension = register default + register extension, the leading
//!   dimension used when packing an operand panel.

/// Register-level tile dimensions (and their extensions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBlocking {
    pub mr: usize,
    pub nr: usize,
    pub kr: usize,
}

/// Cache-level tile dimensions (and their extensions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBlocking {
    pub mc: usize,
    pub nc: usize,
    pub kc: usize,
}

impl RegisterBlocking {
    /// Zero extension: no padding on any register dimension.
    pub const ZERO: RegisterBlocking = RegisterBlocking::new(0, 0, 0);

    pub const fn new(mr: usize, nr: usize, kr: usize) -> Self {
        Self { mr, nr, kr }
    }
}

impl CacheBlocking {
    /// Zero extension: no padding on any cache dimension.
    pub const ZERO: CacheBlocking = CacheBlocking::new(0, 0, 0);

    pub const fn new(mc: usize, nc: usize, kc: usize) -> Self {
        Self { mc, nc, kc }
    }
}

/// The complete blocking description for one datatype: register and cache
/// defaults plus their extensions.
///
/// Values are immutable once the enclosing configuration has been validated;
/// all accessors are pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatatypeBlocking {
    pub register: RegisterBlocking,
    pub register_ext: RegisterBlocking,
    pub cache: CacheBlocking,
    pub cache_ext: CacheBlocking,
}

impl DatatypeBlocking {
    /// Blocking with no padding on any dimension.
    pub const fn new(register: RegisterBlocking, cache: CacheBlocking) -> Self {
        Self {
            register,
            register_ext: RegisterBlocking::ZERO,
            cache,
            cache_ext: CacheBlocking::ZERO,
        }
    }

    pub const fn max_mc(&self) -> usize {
        self.cache.mc + self.cache_ext.mc
    }

    pub const fn max_nc(&self) -> usize {
        self.cache.nc + self.cache_ext.nc
    }

    pub const fn max_kc(&self) -> usize {
        self.cache.kc + self.cache_ext.kc
    }

    pub const fn pack_mr(&self) -> usize {
        self.register.mr + self.register_ext.mr
    }

    pub const fn pack_nr(&self) -> usize {
        self.register.nr + self.register_ext.nr
    }

    pub const fn pack_kr(&self) -> usize {
        self.register.kr + self.register_ext.kr
    }

    /// Maximum cache blocksizes as a triple.
    pub const fn maximum(&self) -> CacheBlocking {
        CacheBlocking::new(self.max_mc(), self.max_nc(), self.max_kc())
    }

    /// Packing leading dimensions as a triple.
    pub const fn packdim(&self) -> RegisterBlocking {
        RegisterBlocking::new(self.pack_mr(), self.pack_nr(), self.pack_kr())
    }
}
