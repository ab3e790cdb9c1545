//! Divisibility validation of cache blocksizes against register blocksizes.
//!
//! Macro-kernels that tile up to a diagonal boundary assume every cache
//! block splits into whole register tiles; a violation produces silently
//! wrong results at block edges, not a fault. The check is therefore
//! unconditional and runs before any kernel can: built-in defaults are
//! checked by compile-time assertions, overrides by the configuration
//! builder before a config is handed out.

use std::fmt;

use crate::blocking::DatatypeBlocking;

/// One of the seven divisibility relations every datatype must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentRule {
    McMr,
    McNr,
    NcNr,
    NcMr,
    KcKr,
    KcMr,
    KcNr,
}

impl AlignmentRule {
    /// All relations, in the order they are checked.
    pub const ALL: [AlignmentRule; 7] = [
        AlignmentRule::McMr,
        AlignmentRule::McNr,
        AlignmentRule::NcNr,
        AlignmentRule::NcMr,
        AlignmentRule::KcKr,
        AlignmentRule::KcMr,
        AlignmentRule::KcNr,
    ];

    /// The (cache, register) dimension pair this rule relates.
    pub fn dimensions(self) -> (&'static str, &'static str) {
        match self {
            AlignmentRule::McMr => ("MC", "MR"),
            AlignmentRule::McNr => ("MC", "NR"),
            AlignmentRule::NcNr => ("NC", "NR"),
            AlignmentRule::NcMr => ("NC", "MR"),
            AlignmentRule::KcKr => ("KC", "KR"),
            AlignmentRule::KcMr => ("KC", "MR"),
            AlignmentRule::KcNr => ("KC", "NR"),
        }
    }
}

impl fmt::Display for AlignmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cache, register) = self.dimensions();
        write!(f, "{cache} must be a whole multiple of {register}")
    }
}

/// Check all seven relations, returning the first violated one.
///
/// `const` so the built-in default tables can be rejected at build time.
pub const fn check_alignment(b: &DatatypeBlocking) -> Option<AlignmentRule> {
    let (mr, nr, kr) = (b.register.mr, b.register.nr, b.register.kr);
    let (mc, nc, kc) = (b.cache.mc, b.cache.nc, b.cache.kc);

    if mc % mr != 0 {
        return Some(AlignmentRule::McMr);
    }
    if mc % nr != 0 {
        return Some(AlignmentRule::McNr);
    }
    if nc % nr != 0 {
        return Some(AlignmentRule::NcNr);
    }
    if nc % mr != 0 {
        return Some(AlignmentRule::NcMr);
    }
    if kc % kr != 0 {
        return Some(AlignmentRule::KcKr);
    }
    if kc % mr != 0 {
        return Some(AlignmentRule::KcMr);
    }
    if kc % nr != 0 {
        return Some(AlignmentRule::KcNr);
    }
    None
}

/// Compile-time rendition of [`check_alignment`]: a violated relation in a
/// `const` blocking table becomes a build error naming the relation.
pub(crate) const fn assert_aligned(b: &DatatypeBlocking) {
    match check_alignment(b) {
        None => {}
        Some(AlignmentRule::McMr) => panic!("MC must be a whole multiple of MR"),
        Some(AlignmentRule::McNr) => panic!("MC must be a whole multiple of NR"),
        Some(AlignmentRule::NcNr) => panic!("NC must be a whole multiple of NR"),
        Some(AlignmentRule::NcMr) => panic!("NC must be a whole multiple of MR"),
        Some(AlignmentRule::KcKr) => panic!("KC must be a whole multiple of KR"),
        Some(AlignmentRule::KcMr) => panic!("KC must be a whole multiple of MR"),
        Some(AlignmentRule::KcNr) => panic!("KC must be a whole multiple of NR"),
    }
}
