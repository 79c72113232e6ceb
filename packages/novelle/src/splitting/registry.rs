//! Ordered registry of marker levels.

use super::types::MarkerSpec;

/// Marker levels in priority order, coarsest first.
#[derive(Debug, Clone)]
pub struct MarkerCascade {
    specs: Vec<MarkerSpec>,
}

impl MarkerCascade {
    /// Create a new empty cascade.
    #[must_use]
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Register the next, finer level.
    pub fn register(&mut self, spec: MarkerSpec) {
        self.specs.push(spec);
    }

    /// Get the specification of a level by name.
    #[must_use]
    pub fn get_spec(&self, kind: &str) -> Option<&MarkerSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }

    /// Iterate the levels in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.specs.iter()
    }

    /// Byte offset of the earliest marker of any level.
    #[must_use]
    pub fn first_marker_start(&self, text: &str) -> Option<usize> {
        self.specs
            .iter()
            .filter_map(|spec| spec.pattern.find(text).map(|m| m.start()))
            .min()
    }
}

impl Default for MarkerCascade {
    fn default() -> Self {
        Self::new()
    }
}
