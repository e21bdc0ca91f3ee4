//! Ordered Entry Store
//!
//! Recency ordering for cache eviction: a doubly-linked list threaded through
//! an arena of nodes addressed by stable index.
//!
//! - Front = Most recently used
//! - Back = Least recently used

/// Stable handle to a node in an [`OrderedEntries`] arena.
///
/// A handle stays valid until the node is removed; its slot may then be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    item: T,
    /// Neighbour closer to the front (more recently used)
    prev: Option<NodeId>,
    /// Neighbour closer to the back (less recently used)
    next: Option<NodeId>,
}

// == Ordered Entries ==
/// Arena-backed doubly-linked list with O(1) insert, move-to-front and removal.
#[derive(Debug)]
pub struct OrderedEntries<T> {
    slots: Vec<Option<Node<T>>>,
    /// Indices of vacated slots available for reuse
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> Default for OrderedEntries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedEntries<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Insert Front ==
    /// Adds an item as the most recently used and returns its handle.
    pub fn insert_front(&mut self, item: T) -> NodeId {
        let node = Node {
            item,
            prev: None,
            next: self.head,
        };

        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Repositions an existing node as the most recently used.
    ///
    /// Relative order of every other node is unchanged. Unknown handles are ignored.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) || !self.contains(id) {
            return;
        }

        // Not the head, so there is always a previous node.
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        let Some(prev) = prev else { return };

        if self.tail == Some(id) {
            // Tail: the previous node becomes the new tail.
            self.node_mut(prev).next = None;
            self.tail = Some(prev);
        } else if let Some(next) = next {
            // Interior: splice the neighbours together.
            self.node_mut(prev).next = Some(next);
            self.node_mut(next).prev = Some(prev);
        }

        let old_head = self.head;
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            self.node_mut(old_head).prev = Some(id);
        }
        self.head = Some(id);
    }

    // == Remove ==
    /// Detaches a node and returns its item, or None for an unknown handle.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let node = self.slots.get_mut(id.0)?.take()?;

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(id.0);
        self.len -= 1;
        Some(node.item)
    }

    // == Back ==
    /// Returns the least recently used node.
    pub fn back(&self) -> Option<NodeId> {
        self.tail
    }

    // == Front ==
    /// Returns the most recently used node.
    pub fn front(&self) -> Option<NodeId> {
        self.head
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref().map(|node| &node.item)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut().map(|node| &mut node.item)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates items from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.slots[id.0]
            .as_ref()
            .expect("linked node refers to a vacant slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.0]
            .as_mut()
            .expect("linked node refers to a vacant slot")
    }
}

/// Front-to-back iterator over an [`OrderedEntries`] list.
pub struct Iter<'a, T> {
    list: &'a OrderedEntries<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id);
        self.cursor = node.next;
        Some(&node.item)
    }
}
