use crate::block::DirectiveBlock;

/// Slot for a block kind that may only exist once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Singleton {
    #[default]
    Unset,
    Present(DirectiveBlock),
}

/// What [`Singleton::absorb`] did with the incoming block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorbed {
    Stored,
    Merged,
}

impl Singleton {
    /// Store `block` if the slot is empty, otherwise merge it into the
    /// block already held.
    pub fn absorb(&mut self, block: DirectiveBlock) -> Absorbed {
        match std::mem::take(self) {
            Singleton::Unset => {
                *self = Singleton::Present(block);
                Absorbed::Stored
            }
            Singleton::Present(existing) => {
                *self = Singleton::Present(merge(existing, block));
                Absorbed::Merged
            }
        }
    }

    pub fn block(&self) -> Option<&DirectiveBlock> {
        match self {
            Singleton::Unset => None,
            Singleton::Present(block) => Some(block),
        }
    }

    /// True when a block is held and it carries at least one attribute.
    pub fn has_attributes(&self) -> bool {
        self.populated().is_some()
    }

    /// The held block, if it is worth emitting.
    pub fn populated(&self) -> Option<&DirectiveBlock> {
        self.block().filter(|block| block.attributes.count() > 0)
    }
}

/// Merge `other` into `base`.
///
/// Only keys `base` already declares receive `other`'s values; keys that
/// appear solely in `other` are dropped.
pub fn merge(mut base: DirectiveBlock, other: DirectiveBlock) -> DirectiveBlock {
    base.attributes.merge_known(&other.attributes);
    base
}
