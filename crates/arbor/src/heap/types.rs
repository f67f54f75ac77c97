use crate::types::{Links, TreeNode};

/// Heap node: binary links plus a key/value payload.
#[derive(Clone, Debug)]
pub struct HeapNode<K, V> {
    pub links: Links<2>,
    pub key: K,
    pub value: V,
}

impl<K, V> HeapNode<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            links: Links::new(),
            key,
            value,
        }
    }

    /// Exchanges payload with `other`; links stay where they are.
    pub fn swap_payload(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.key, &mut other.key);
        std::mem::swap(&mut self.value, &mut other.value);
    }

    pub fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> TreeNode<2> for HeapNode<K, V> {
    fn links(&self) -> &Links<2> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<2> {
        &mut self.links
    }
}
