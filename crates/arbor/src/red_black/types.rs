use crate::types::{Links, TreeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Red-black node: binary links, a key and a color.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub links: Links<2>,
    pub key: K,
    pub color: Color,
}

impl<K> RbNode<K> {
    pub fn new(key: K, color: Color) -> Self {
        Self {
            links: Links::new(),
            key,
            color,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

impl<K> TreeNode<2> for RbNode<K> {
    fn links(&self) -> &Links<2> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<2> {
        &mut self.links
    }
}

/// What one rebalancing step did. Handles stay valid until the next
/// mutation of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixupEvent {
    /// Red uncle: parent and uncle turned black, `grandparent` turned red.
    Recolored { grandparent: u32 },
    /// Zig-zig or zig-zag rotation finished an insertion; `top` is the new
    /// black subtree root.
    Rotated { top: u32 },
    /// Red sister was rotated above the double-black node's parent.
    SisterLifted { sister: u32 },
    /// Red parent absorbed the missing black.
    Absorbed { parent: u32 },
    /// Sister turned red and the double-black moved up to `node`.
    Propagated { node: u32 },
    /// Nephew rotation restored the black-height under `top`.
    Restructured { top: u32 },
}

/// Outcome of one fixup step: the event and the node still needing work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub event: FixupEvent,
    pub next: Option<u32>,
}

impl Progress {
    pub(crate) fn done(event: FixupEvent) -> Self {
        Self { event, next: None }
    }

    pub(crate) fn then(event: FixupEvent, next: u32) -> Self {
        Self {
            event,
            next: Some(next),
        }
    }
}
