//! Kernel symbol-name resolution.
//!
//! Each logical kernel role resolves to a datatype-qualified function name:
//! the datatype tag prepended to a base name. Roles without a specialized
//! base name registered fall back to the reference implementation's base
//! name. Resolution is pure name construction and happens once, during
//! configuration assembly; it is not a runtime dispatch.

/// The logical kernel roles the complex decomposition instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelRole {
    /// General matrix multiply.
    Gemm,
    /// Triangular solve, lower-triangular case.
    TrsmLower,
    /// Triangular solve, upper-triangular case.
    TrsmUpper,
    /// Fused multiply-solve, lower-triangular case.
    GemmTrsmLower,
    /// Fused multiply-solve, upper-triangular case.
    GemmTrsmUpper,
}

impl KernelRole {
    /// All roles, in table order.
    pub const ALL: [KernelRole; 5] = [
        KernelRole::Gemm,
        KernelRole::TrsmLower,
        KernelRole::TrsmUpper,
        KernelRole::GemmTrsmLower,
        KernelRole::GemmTrsmUpper,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            KernelRole::Gemm => 0,
            KernelRole::TrsmLower => 1,
            KernelRole::TrsmUpper => 2,
            KernelRole::GemmTrsmLower => 3,
            KernelRole::GemmTrsmUpper => 4,
        }
    }

    /// Base name of the reference implementation for this role.
    pub const fn reference_base(self) -> &'static str {
        match self {
            KernelRole::Gemm => "gemm3m_ref",
            KernelRole::TrsmLower => "trsm3m_l_ref",
            KernelRole::TrsmUpper => "trsm3m_u_ref",
            KernelRole::GemmTrsmLower => "gemmtrsm3m_l_ref",
            KernelRole::GemmTrsmUpper => "gemmtrsm3m_u_ref",
        }
    }
}

/// Per-role base names: registered specializations with reference fallback.
#[derive(Debug, Clone, Default)]
pub struct KernelMap {
    specialized: [Option<String>; 5],
}

impl KernelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a specialized base name for a role, replacing any previous
    /// registration.
    pub fn register(&mut self, role: KernelRole, base: impl Into<String>) {
        self.specialized[role.index()] = Some(base.into());
    }

    /// The base name a role resolves to: the registered specialization, or
    /// the reference base name if none was registered.
    pub fn base(&self, role: KernelRole) -> &str {
        self.specialized[role.index()]
            .as_deref()
            .unwrap_or(role.reference_base())
    }

    /// Construct the full, datatype-qualified symbol name for a role.
    pub fn resolve(&self, role: KernelRole, tag: char) -> String {
        format!("{}{}", tag, self.base(role))
    }
}
