//! Arena owning the nodes of a Huffman tree.
//!
//! Nodes are addressed by `NodeId`, an index into the arena.  A parent refers to its
//! children by id, and every node is the child of at most one parent, so the tree
//! hanging from the root is released by a single post-order walk.

use crate::Error;

/// Handle to a node in the `NodeStore`
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone,Debug,PartialEq)]
pub enum Node {
    Leaf {
        symbol: u8,
        frequency: u64
    },
    /// merge node, frequency is the sum of the children
    Internal {
        frequency: u64,
        left: NodeId,
        right: NodeId
    }
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } => *frequency,
            Node::Internal { frequency, .. } => *frequency
        }
    }
    /// symbol if this is a leaf
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None
        }
    }
    /// (left,right) if this is a merge node
    pub fn children(&self) -> Option<(NodeId,NodeId)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((*left,*right))
        }
    }
}

pub struct NodeStore {
    slots: Vec<Option<Node>>,
    /// nodes created and not yet released
    live: usize,
    /// running count of releases over the life of the store
    released: usize
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            released: 0
        }
    }
    /// Reserve room for a complete tree over `leaves` symbols, i.e. `2*leaves-1` nodes.
    /// Reservation is the only place allocation can fail.
    pub fn with_capacity_for(leaves: usize) -> Result<Self,Error> {
        let mut ans = Self::new();
        ans.slots.try_reserve_exact(2*leaves.max(1) - 1).map_err(|_| Error::Allocation)?;
        Ok(ans)
    }
    fn push(&mut self,node: Node) -> Result<NodeId,Error> {
        self.slots.try_reserve(1).map_err(|_| Error::Allocation)?;
        self.slots.push(Some(node));
        self.live += 1;
        Ok(NodeId(self.slots.len()-1))
    }
    pub fn create_leaf(&mut self,symbol: u8,frequency: u64) -> Result<NodeId,Error> {
        self.push(Node::Leaf { symbol, frequency })
    }
    /// Create a merge node, which takes ownership of `left` and `right`.
    pub fn create_internal(&mut self,frequency: u64,left: NodeId,right: NodeId) -> Result<NodeId,Error> {
        self.push(Node::Internal { frequency, left, right })
    }
    pub fn get(&self,id: NodeId) -> Option<&Node> {
        match self.slots.get(id.0) {
            Some(Some(node)) => Some(node),
            _ => None
        }
    }
    pub fn live(&self) -> usize {
        self.live
    }
    pub fn released(&self) -> usize {
        self.released
    }
    /// Release every node reachable from `root`, children before parents.
    /// Returns the number of nodes released.
    pub fn destroy_tree(&mut self,root: NodeId) -> usize {
        let node = match self.slots.get_mut(root.0).and_then(|slot| slot.take()) {
            Some(node) => node,
            None => {
                log::error!("node {} released twice or never created",root.0);
                return 0;
            }
        };
        let mut count = 0;
        if let Some((left,right)) = node.children() {
            count += self.destroy_tree(left);
            count += self.destroy_tree(right);
        }
        self.live -= 1;
        self.released += 1;
        count + 1
    }
}

#[test]
fn create_and_destroy() {
    let mut store = NodeStore::with_capacity_for(3).expect("reserve failed");
    let a = store.create_leaf(b'a',1).unwrap();
    let b = store.create_leaf(b'b',2).unwrap();
    let c = store.create_leaf(b'c',4).unwrap();
    let ab = store.create_internal(3,a,b).unwrap();
    let root = store.create_internal(7,ab,c).unwrap();
    assert_eq!(store.live(),5);
    assert_eq!(store.get(ab).unwrap().children(),Some((a,b)));
    assert_eq!(store.get(c).unwrap().symbol(),Some(b'c'));
    assert_eq!(store.get(root).unwrap().frequency(),7);
    assert_eq!(store.destroy_tree(root),5);
    assert_eq!(store.live(),0);
    assert_eq!(store.released(),5);
    assert!(store.get(a).is_none());
}

#[test]
fn no_double_release() {
    let mut store = NodeStore::new();
    let a = store.create_leaf(b'a',1).unwrap();
    let b = store.create_leaf(b'b',1).unwrap();
    let root = store.create_internal(2,a,b).unwrap();
    assert_eq!(store.destroy_tree(root),3);
    assert_eq!(store.destroy_tree(root),0);
    assert_eq!(store.released(),3);
}

#[test]
fn leaves_are_not_merge_nodes() {
    let leaf = Node::Leaf { symbol: 0, frequency: 9 };
    assert_eq!(leaf.children(),None);
    assert_eq!(leaf.symbol(),Some(0));
}
