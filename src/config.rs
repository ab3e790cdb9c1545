//! Configuration assembly: default tables, platform overrides, validation.
//!
//! The built-in tables below are validated by compile-time assertions; a
//! misaligned default is a build error, not a runtime condition. Platform
//! overrides go through [`BlockingConfigBuilder`], whose `build` applies the
//! complex derivation, validates every datatype, and either returns the
//! complete configuration or the first violation. There is no partial
//! acceptance: the builder is consumed either way.

use crate::blocking::{CacheBlocking, DatatypeBlocking, RegisterBlocking};
use crate::datatype::{Datatype, Domain};
use crate::derive::derive_3m;
use crate::kernels::{KernelMap, KernelRole};
use crate::validate::{assert_aligned, check_alignment};
use crate::{ConfigError, Result};

/// Default blocking for real single precision.
pub const BLOCKING_S: DatatypeBlocking = DatatypeBlocking::new(
    RegisterBlocking::new(8, 8, 1),
    CacheBlocking::new(128, 4096, 256),
);

/// Default blocking for real double precision.
pub const BLOCKING_D: DatatypeBlocking = DatatypeBlocking::new(
    RegisterBlocking::new(8, 4, 1),
    CacheBlocking::new(96, 4096, 256),
);

/// Default blocking for complex single precision, derived from [`BLOCKING_S`].
pub const BLOCKING_C: DatatypeBlocking = derive_3m(&BLOCKING_S);

/// Default blocking for complex double precision, derived from [`BLOCKING_D`].
pub const BLOCKING_Z: DatatypeBlocking = derive_3m(&BLOCKING_D);

// Build-time gate: a misaligned default table refuses to compile.
const _: () = {
    assert_aligned(&BLOCKING_S);
    assert_aligned(&BLOCKING_D);
    assert_aligned(&BLOCKING_C);
    assert_aligned(&BLOCKING_Z);
};

const DEFAULT_TABLE: [DatatypeBlocking; 4] = [BLOCKING_S, BLOCKING_D, BLOCKING_C, BLOCKING_Z];

/// The validated, immutable blocking configuration for all datatypes, plus
/// the kernel symbols resolved for the complex datatypes.
///
/// Once constructed it is read-only and may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct BlockingConfig {
    table: [DatatypeBlocking; 4],
    // Resolved symbols for (role, complex datatype); real datatypes have no
    // decomposition kernels.
    symbols: [[String; 5]; 2],
}

impl BlockingConfig {
    /// The configuration built from the compile-time default tables.
    pub fn default_config() -> Self {
        BlockingConfigBuilder::new()
            .build()
            .expect("default tables are validated at compile time")
    }

    pub fn builder() -> BlockingConfigBuilder {
        BlockingConfigBuilder::new()
    }

    /// The full blocking entry for a datatype.
    pub fn blocking(&self, dt: Datatype) -> &DatatypeBlocking {
        &self.table[dt.index()]
    }

    /// Register blocksizes (MR, NR, KR).
    pub fn register(&self, dt: Datatype) -> RegisterBlocking {
        self.blocking(dt).register
    }

    /// Cache blocksizes (MC, NC, KC).
    pub fn cache(&self, dt: Datatype) -> CacheBlocking {
        self.blocking(dt).cache
    }

    /// Maximum cache blocksizes (default + extension).
    pub fn maximum(&self, dt: Datatype) -> CacheBlocking {
        self.blocking(dt).maximum()
    }

    /// Packing leading dimensions (register default + extension).
    pub fn packdim(&self, dt: Datatype) -> RegisterBlocking {
        self.blocking(dt).packdim()
    }

    /// The resolved kernel symbol for a role and a complex datatype, or
    /// `None` for real datatypes.
    pub fn kernel_symbol(&self, role: KernelRole, dt: Datatype) -> Option<&str> {
        let slot = match dt {
            Datatype::ComplexSingle => 0,
            Datatype::ComplexDouble => 1,
            _ => return None,
        };
        Some(&self.symbols[slot][role.index()])
    }
}

/// Collects per-datatype overrides and kernel registrations, then assembles
/// and validates the configuration in one step.
#[derive(Debug, Default)]
pub struct BlockingConfigBuilder {
    register: [Option<RegisterBlocking>; 4],
    register_ext: [Option<RegisterBlocking>; 4],
    cache: [Option<CacheBlocking>; 4],
    cache_ext: [Option<CacheBlocking>; 4],
    kernels: KernelMap,
}

impl BlockingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the register blocksizes for a datatype.
    pub fn register(mut self, dt: Datatype, reg: RegisterBlocking) -> Self {
        self.register[dt.index()] = Some(reg);
        self
    }

    /// Override the register blocksize extensions for a datatype.
    pub fn register_extension(mut self, dt: Datatype, ext: RegisterBlocking) -> Self {
        self.register_ext[dt.index()] = Some(ext);
        self
    }

    /// Override the cache blocksizes for a datatype.
    pub fn cache(mut self, dt: Datatype, cache: CacheBlocking) -> Self {
        self.cache[dt.index()] = Some(cache);
        self
    }

    /// Override the cache blocksize extensions for a datatype.
    pub fn cache_extension(mut self, dt: Datatype, ext: CacheBlocking) -> Self {
        self.cache_ext[dt.index()] = Some(ext);
        self
    }

    /// Register a specialized kernel base name for a role.
    pub fn kernel_base(mut self, role: KernelRole, base: impl Into<String>) -> Self {
        self.kernels.register(role, base);
        self
    }

    /// Assemble and validate the configuration.
    ///
    /// Real datatypes take their overrides directly; complex datatypes are
    /// derived from the (possibly overridden) real entry of matching
    /// precision, with explicit complex overrides taking precedence field by
    /// field. Validation then runs over the full cross product of datatypes
    /// and alignment relations; the first violation is returned and no
    /// configuration is produced.
    pub fn build(self) -> Result<BlockingConfig> {
        let mut table = DEFAULT_TABLE;

        // Materialize the real entries first: derivation sources must be
        // fully defined before any derived entry is computed.
        for dt in Datatype::ALL {
            if dt.domain() == Domain::Real {
                table[dt.index()] = self.entry(dt, DEFAULT_TABLE[dt.index()]);
            }
        }
        for dt in Datatype::ALL {
            if dt.domain() == Domain::Complex {
                let derived = derive_3m(&table[dt.real_counterpart().index()]);
                table[dt.index()] = self.entry(dt, derived);
            }
        }

        for dt in Datatype::ALL {
            if let Some(rule) = check_alignment(&table[dt.index()]) {
                return Err(ConfigError::Misaligned { datatype: dt, rule });
            }
        }

        let symbols = [Datatype::ComplexSingle, Datatype::ComplexDouble].map(|dt| {
            KernelRole::ALL.map(|role| self.kernels.resolve(role, dt.tag()))
        });

        Ok(BlockingConfig { table, symbols })
    }

    /// One datatype's entry: the baseline (default or derived) with this
    /// builder's explicit overrides applied field by field.
    fn entry(&self, dt: Datatype, baseline: DatatypeBlocking) -> DatatypeBlocking {
        let i = dt.index();
        DatatypeBlocking {
            register: self.register[i].unwrap_or(baseline.register),
            register_ext: self.register_ext[i].unwrap_or(baseline.register_ext),
            cache: self.cache[i].unwrap_or(baseline.cache),
            cache_ext: self.cache_ext[i].unwrap_or(baseline.cache_ext),
        }
    }
}
