//! Node records and the arena that owns them.
//!
//! Every node lives in one `Vec` and is addressed by a `NodeId`. Links are
//! plain indices, so the four-way graph (next/prev/up/down) never holds a
//! reference into itself. Removed slots go on a free list and are reused.
//!
//! ```text
//! Level 2: HEAD ------------------> C ----------------------> TAIL
//!           |                       |                          |
//! Level 1: HEAD -> A -> B -> C -> D -> E -> F -> G -> TAIL
//! ```
//!
//! `span` sits on the left end of each gap: moving from a node to its `next`
//! advances the rank by `span`. At level 1 every data node and the head have
//! `span == 1`, the tail has `span == 0`.

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type NodeId = u32;

/// Null link marker.
pub(crate) const NIL: NodeId = NodeId::MAX;

/// The base level. Levels are numbered from 1.
pub(crate) const BASE_LEVEL: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Head,
    Tail,
    Data,
    /// Slot on the free list.
    Vacant,
}

pub(crate) struct Node<E> {
    /// The stored element. Only base-level data nodes carry one.
    pub elem: Option<E>,
    /// The base-level node of the same key. `NIL` for sentinels.
    pub base: NodeId,
    pub next: NodeId,
    pub prev: NodeId,
    pub up: NodeId,
    pub down: NodeId,
    pub level: u32,
    /// Ranks advanced when stepping to `next`.
    pub span: usize,
    /// Number of nodes one level down between `down` and `next.down`,
    /// counting `down` itself. Always 0 at the base level.
    pub links: usize,
    pub kind: Kind,
}

impl<E> Node<E> {
    fn blank(kind: Kind, level: u32) -> Node<E> {
        Node {
            elem: None,
            base: NIL,
            next: NIL,
            prev: NIL,
            up: NIL,
            down: NIL,
            level,
            span: 0,
            links: 0,
            kind,
        }
    }

    pub fn head(level: u32) -> Node<E> {
        Node::blank(Kind::Head, level)
    }

    pub fn tail(level: u32) -> Node<E> {
        Node::blank(Kind::Tail, level)
    }

    /// An index node one level above `down`, representing `base`.
    pub fn index(level: u32, base: NodeId, down: NodeId) -> Node<E> {
        let mut node = Node::blank(Kind::Data, level);
        node.base = base;
        node.down = down;
        node
    }

    pub fn is_head(&self) -> bool {
        self.kind == Kind::Head
    }

    pub fn is_tail(&self) -> bool {
        self.kind == Kind::Tail
    }

    pub fn is_data(&self) -> bool {
        self.kind == Kind::Data
    }
}

/// Backing store for all nodes of one set.
pub(crate) struct Arena<E> {
    nodes: Vec<Node<E>>,
    free_list: Vec<NodeId>,
}

impl<E> Arena<E> {
    pub fn new() -> Arena<E> {
        Arena {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<E> {
        let node = &self.nodes[id as usize];
        debug_assert!(node.kind != Kind::Vacant, "dangling node id {id}");
        node
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<E> {
        let node = &mut self.nodes[id as usize];
        debug_assert!(node.kind != Kind::Vacant, "dangling node id {id}");
        node
    }

    pub fn alloc(&mut self, node: Node<E>) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id as usize] = node;
            id
        } else {
            let id = self.nodes.len() as NodeId;
            assert!(id != NIL, "node arena exhausted");
            self.nodes.push(node);
            id
        }
    }

    /// A base-level data node holding `elem`. Its `base` points at itself.
    pub fn alloc_base(&mut self, elem: E) -> NodeId {
        let mut node = Node::blank(Kind::Data, BASE_LEVEL);
        node.elem = Some(elem);
        node.span = 1;
        let id = self.alloc(node);
        self.nodes[id as usize].base = id;
        id
    }

    /// Clear every link of `id`, return its slot to the free list and hand
    /// back the element it carried.
    pub fn release(&mut self, id: NodeId) -> Option<E> {
        let node = self.get_mut(id);
        let elem = node.elem.take();
        *node = Node::blank(Kind::Vacant, 0);
        self.free_list.push(id);
        elem
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }

    /// Number of occupied slots, sentinels included.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }
}
