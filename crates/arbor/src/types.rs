//! Node link definitions.
//!
//! A node's links are an array of `N` child slots plus a parent index. The
//! binary containers use [`Node`], a `p` / `l` / `r` view over `TreeNode<2>`.

/// Slot index of the left child in a binary node.
pub const LEFT: usize = 0;
/// Slot index of the right child in a binary node.
pub const RIGHT: usize = 1;

/// Parent back-reference and `N` child slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Links<const N: usize> {
    pub parent: Option<u32>,
    pub children: [Option<u32>; N],
}

impl<const N: usize> Links<N> {
    pub const fn new() -> Self {
        Self {
            parent: None,
            children: [None; N],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<const N: usize> Default for Links<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A node with `N` ordered child slots.
pub trait TreeNode<const N: usize> {
    fn links(&self) -> &Links<N>;
    fn links_mut(&mut self) -> &mut Links<N>;

    fn parent(&self) -> Option<u32> {
        self.links().parent
    }

    fn child(&self, slot: usize) -> Option<u32> {
        self.links().children[slot]
    }
}

/// Binary view (`p`, `l`, `r`) over any two-slot node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

impl<T: TreeNode<2>> Node for T {
    fn p(&self) -> Option<u32> {
        self.links().parent
    }

    fn l(&self) -> Option<u32> {
        self.links().children[LEFT]
    }

    fn r(&self) -> Option<u32> {
        self.links().children[RIGHT]
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.links_mut().parent = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.links_mut().children[LEFT] = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.links_mut().children[RIGHT] = v;
    }
}

/// Which child slot of a binary node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn slot(self) -> usize {
        match self {
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }
}
