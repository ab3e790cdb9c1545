//! Blocking configuration and portable threading primitives for dense
//! linear-algebra kernels.
//!
//! This crate is the configuration core of a BLAS-like kernel library: it
//! owns the multi-level tile sizes every matrix-multiplication-style kernel
//! must respect, and the minimal concurrency surface the parallel execution
//! paths are written against. The vectorized micro-kernels themselves, the
//! matrix descriptor API, and operation dispatch live elsewhere and consume
//! what is defined here.
//!
//! # Blocking configuration
//!
//! - [`Datatype`]: the four supported numeric datatypes (s, d, c, z)
//! - [`RegisterBlocking`] / [`CacheBlocking`]: MR/NR/KR and MC/NC/KC triples
//! - [`DatatypeBlocking`]: one datatype's defaults and extensions, with
//!   maximum and packing-dimension accessors
//! - [`BlockingConfig`]: the validated table for all datatypes plus resolved
//!   kernel symbols; built from compile-time defaults or via
//!   [`BlockingConfig::builder`] with platform overrides
//! - [`derive_3m`]: complex blocking derived from the real datatype of
//!   matching precision (KC halved for the three-multiply decomposition)
//! - [`packbuf`]: packed-panel buffer sizing from maximum blocksizes
//!
//! Cache blocksizes must split into whole register tiles (seven divisibility
//! relations, see [`AlignmentRule`]). Built-in defaults are checked at
//! compile time; overridden configurations are checked during
//! [`BlockingConfigBuilder::build`], which accepts all of the configuration
//! or none of it.
//!
//! ```rust
//! use gemm_frame::{BlockingConfig, Datatype};
//!
//! let cfg = BlockingConfig::default_config();
//! let d = cfg.blocking(Datatype::Double);
//! assert_eq!(d.cache.mc % d.register.mr, 0);
//! assert_eq!(cfg.cache(Datatype::ComplexDouble).kc, cfg.cache(Datatype::Double).kc / 2);
//! ```
//!
//! # Threading primitives
//!
//! [`thread`] provides spawn/join, mutex, barrier, and once-initialization
//! behind the [`thread::ThreadBackend`] trait, with a native backend and a
//! self-contained spin fallback selected at build time (`spin-sync`
//! feature). Statuses are the facility's own integer codes, forwarded
//! verbatim.

mod blocking;
mod config;
mod datatype;
mod derive;
mod kernels;
pub mod packbuf;
pub mod thread;
mod validate;

pub use blocking::{CacheBlocking, DatatypeBlocking, RegisterBlocking};
pub use config::{
    BlockingConfig, BlockingConfigBuilder, BLOCKING_C, BLOCKING_D, BLOCKING_S, BLOCKING_Z,
};
pub use datatype::{Datatype, Domain, Precision};
pub use derive::{derive_3m, KC_DIVISOR_3M};
pub use kernels::{KernelMap, KernelRole};
pub use validate::{check_alignment, AlignmentRule};

/// Errors produced while assembling a blocking configuration.
///
/// Configuration errors are fatal to the configuration attempt: a builder
/// that reports one yields no configuration at all. There is no runtime
/// re-validation; a constructed [`BlockingConfig`] is immutable and always
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A cache blocksize is not a whole multiple of a register blocksize.
    #[error("{rule} for datatype {datatype}")]
    Misaligned {
        datatype: Datatype,
        rule: AlignmentRule,
    },
}

/// Result type for configuration assembly.
pub type Result<T> = std::result::Result<T, ConfigError>;
