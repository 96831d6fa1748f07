//! Developer tooling: read-only queries over rendered frames.

pub mod inspector;

pub use inspector::{FrameInspector, FrameSummary};

pub fn crate_info() -> &'static str {
    "voxelspace-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
