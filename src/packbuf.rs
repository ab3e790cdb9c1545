//! Scratch-buffer sizing for packed operand panels.
//!
//! Packing copies an operand block into a contiguous panel before the
//! micro-kernel consumes it. Buffers are sized from the MAXIMUM blocksizes
//! (default + extension), so a single allocation can hold any block the
//! configuration permits, padded rows included.

use crate::config::BlockingConfig;
use crate::datatype::Datatype;

/// Bytes needed for a packed A panel (an MC x KC block).
pub fn panel_a_bytes(cfg: &BlockingConfig, dt: Datatype) -> usize {
    let b = cfg.blocking(dt);
    b.max_mc() * b.max_kc() * dt.elem_size()
}

/// Bytes needed for a packed B panel (a KC x NC block).
pub fn panel_b_bytes(cfg: &BlockingConfig, dt: Datatype) -> usize {
    let b = cfg.blocking(dt);
    b.max_kc() * b.max_nc() * dt.elem_size()
}

/// Bytes needed for a packed C block (an MC x NC block).
pub fn panel_c_bytes(cfg: &BlockingConfig, dt: Datatype) -> usize {
    let b = cfg.blocking(dt);
    b.max_mc() * b.max_nc() * dt.elem_size()
}

/// Leading dimension (in elements) of a packed A panel's row micro-panels.
pub fn panel_a_ld(cfg: &BlockingConfig, dt: Datatype) -> usize {
    cfg.blocking(dt).pack_mr()
}

/// Leading dimension (in elements) of a packed B panel's column micro-panels.
pub fn panel_b_ld(cfg: &BlockingConfig, dt: Datatype) -> usize {
    cfg.blocking(dt).pack_nr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::CacheBlocking;

    #[test]
    fn test_panel_sizes_use_maximum_blocksizes() {
        let cfg = BlockingConfig::default_config();
        let b = cfg.blocking(Datatype::Double);
        assert_eq!(
            panel_a_bytes(&cfg, Datatype::Double),
            b.max_mc() * b.max_kc() * 8
        );
        assert_eq!(
            panel_b_bytes(&cfg, Datatype::Double),
            b.max_kc() * b.max_nc() * 8
        );
    }

    #[test]
    fn test_complex_panels_use_complex_element_size() {
        let cfg = BlockingConfig::default_config();
        let b = cfg.blocking(Datatype::ComplexDouble);
        assert_eq!(
            panel_c_bytes(&cfg, Datatype::ComplexDouble),
            b.max_mc() * b.max_nc() * 16
        );
    }

    #[test]
    fn test_extension_grows_the_buffer() {
        let plain = BlockingConfig::default_config();
        let padded = BlockingConfig::builder()
            .cache_extension(Datatype::Double, CacheBlocking::new(8, 0, 0))
            .build()
            .unwrap();
        assert!(
            panel_a_bytes(&padded, Datatype::Double) > panel_a_bytes(&plain, Datatype::Double)
        );
    }

    #[test]
    fn test_packing_leading_dims_match_packdim() {
        let cfg = BlockingConfig::default_config();
        assert_eq!(panel_a_ld(&cfg, Datatype::Double), cfg.packdim(Datatype::Double).mr);
        assert_eq!(panel_b_ld(&cfg, Datatype::Double), cfg.packdim(Datatype::Double).nr);
    }
}
