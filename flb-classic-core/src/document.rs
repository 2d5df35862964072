use serde::Serialize;

use crate::block::{BlockKind, DirectiveBlock};
use crate::singleton::Singleton;

/// Everything collected from one classic source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub service: Singleton,
    pub includes: Singleton,
    pub inputs: Vec<DirectiveBlock>,
    pub filters: Vec<DirectiveBlock>,
    pub outputs: Vec<DirectiveBlock>,
}

/// Block counts for a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockCounts {
    pub inputs: usize,
    pub filters: usize,
    pub outputs: usize,
    pub service_attributes: usize,
    pub includes: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline blocks of one kind, in source order.
    ///
    /// Singleton kinds have no sequence and yield an empty slice.
    pub fn pipeline(&self, kind: BlockKind) -> &[DirectiveBlock] {
        match kind {
            BlockKind::Input => &self.inputs,
            BlockKind::Filter => &self.filters,
            BlockKind::Output => &self.outputs,
            BlockKind::Service | BlockKind::Includes => &[],
        }
    }

    pub fn counts(&self) -> BlockCounts {
        BlockCounts {
            inputs: self.inputs.len(),
            filters: self.filters.len(),
            outputs: self.outputs.len(),
            service_attributes: self
                .service
                .block()
                .map_or(0, |block| block.attributes.count()),
            includes: self
                .includes
                .block()
                .map_or(0, |block| block.attributes.iter().map(|(_, v)| v.len()).sum()),
        }
    }
}
