//! Numeric datatypes supported by the kernel configuration.
//!
//! Every blocking table and kernel symbol is indexed by one of these four
//! datatypes. Complex datatypes do not carry their own tuned parameters;
//! they derive them from the real datatype of matching precision (see
//! [`crate::derive`]).

use std::fmt;
use std::mem::size_of;

use num_complex::Complex;

/// One of the four numeric datatypes the kernel set is instantiated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// Real single precision (`f32`), tag `s`.
    Single,
    /// Real double precision (`f64`), tag `d`.
    Double,
    /// Complex single precision (`Complex<f32>`), tag `c`.
    ComplexSingle,
    /// Complex double precision (`Complex<f64>`), tag `z`.
    ComplexDouble,
}

/// Floating-point precision of a datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
}

/// Real or complex element domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Real,
    Complex,
}

impl Datatype {
    /// All supported datatypes, in table order.
    pub const ALL: [Datatype; 4] = [
        Datatype::Single,
        Datatype::Double,
        Datatype::ComplexSingle,
        Datatype::ComplexDouble,
    ];

    /// Index into per-datatype tables.
    pub(crate) const fn index(self) -> usize {
        match self {
            Datatype::Single => 0,
            Datatype::Double => 1,
            Datatype::ComplexSingle => 2,
            Datatype::ComplexDouble => 3,
        }
    }

    /// Single-character tag used to qualify kernel symbol names.
    pub const fn tag(self) -> char {
        match self {
            Datatype::Single => 's',
            Datatype::Double => 'd',
            Datatype::ComplexSingle => 'c',
            Datatype::ComplexDouble => 'z',
        }
    }

    pub const fn precision(self) -> Precision {
        match self {
            Datatype::Single | Datatype::ComplexSingle => Precision::Single,
            Datatype::Double | Datatype::ComplexDouble => Precision::Double,
        }
    }

    pub const fn domain(self) -> Domain {
        match self {
            Datatype::Single | Datatype::Double => Domain::Real,
            Datatype::ComplexSingle | Datatype::ComplexDouble => Domain::Complex,
        }
    }

    /// The real datatype of matching precision.
    ///
    /// Real datatypes return themselves; complex datatypes return the source
    /// of their blocking derivation.
    pub const fn real_counterpart(self) -> Datatype {
        match self {
            Datatype::Single | Datatype::ComplexSingle => Datatype::Single,
            Datatype::Double | Datatype::ComplexDouble => Datatype::Double,
        }
    }

    /// Element size in bytes, used to convert blocksizes into buffer sizes.
    pub const fn elem_size(self) -> usize {
        match self {
            Datatype::Single => size_of::<f32>(),
            Datatype::Double => size_of::<f64>(),
            Datatype::ComplexSingle => size_of::<Complex<f32>>(),
            Datatype::ComplexDouble => size_of::<Complex<f64>>(),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Datatype::Single => "single",
            Datatype::Double => "double",
            Datatype::ComplexSingle => "scomplex",
            Datatype::ComplexDouble => "dcomplex",
        };
        f.write_str(name)
    }
}
