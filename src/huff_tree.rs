//! Huffman tree construction
//!
//! The builder is a small state machine.  Once the leaves are loaded into the frontier,
//! each step merges the two lowest entries at the front of the live range into a parent,
//! finds the parent's slot by binary search, and shifts the entries in between down by
//! one to make room.  After `n-1` steps a single node, the root, remains at the end of
//! the frontier.
//!
//! Ties in frequency are resolved deterministically: leaves with equal counts keep
//! ascending symbol order, and a parent whose frequency exactly matches an entry takes
//! the slot found by the binary search, which need not be the last of the equal run.

use crate::tools::node_store::NodeStore;
use crate::tools::frontier::OrderedFrontier;
use crate::{Error,FrequencyTable};
pub use crate::tools::node_store::{Node,NodeId};

#[derive(Clone,Copy,Debug,PartialEq)]
pub enum BuildState {
    Initialized,
    Merging,
    Done
}

pub struct TreeBuilder {
    store: NodeStore,
    frontier: OrderedFrontier,
    /// first live slot of the frontier, also the number of merges done
    start: usize,
    /// sum of all leaf frequencies, conserved by every merge
    total: u64,
    state: BuildState
}

impl TreeBuilder {
    /// Create the leaves and load the frontier.
    /// Fails before allocating anything if there are fewer than 2 symbols.
    pub fn create(freq: &FrequencyTable) -> Result<Self,Error> {
        let count = freq.len();
        if count < 2 {
            return Err(Error::InsufficientSymbols(count));
        }
        let mut store = NodeStore::with_capacity_for(count)?;
        let mut leaves: Vec<NodeId> = Vec::new();
        leaves.try_reserve_exact(count).map_err(|_| Error::Allocation)?;
        for symbol in freq.symbols() {
            leaves.push(store.create_leaf(symbol,freq.count(symbol))?);
        }
        let frontier = OrderedFrontier::load_sorted(&store,&leaves)?;
        Ok(Self {
            store,
            frontier,
            start: 0,
            total: freq.total(),
            state: BuildState::Initialized
        })
    }
    pub fn state(&self) -> BuildState {
        self.state
    }
    /// number of merges performed so far
    pub fn merges(&self) -> usize {
        self.start
    }
    fn frequency_at(&self,idx: usize) -> Result<u64,Error> {
        let id = self.frontier.get(idx).ok_or(Error::FrontierOrder)?;
        let node = self.store.get(id).ok_or(Error::FrontierOrder)?;
        Ok(node.frequency())
    }
    /// Merge the front pair of the live range and reinsert the parent.
    fn merge(&mut self) -> Result<(),Error> {
        let start = self.start;
        let key = self.frequency_at(start)? + self.frequency_at(start+1)?;
        // the pair itself is still in place, so the search covers it but can never land on `start`
        let target = match self.frontier.find_insertion_point(&self.store,key,start) {
            Some(t) if t > start => t,
            _ => return Err(Error::FrontierOrder)
        };
        let (left,right) = self.frontier.remove_front_pair(start).ok_or(Error::FrontierOrder)?;
        let parent = self.store.create_internal(key,left,right)?;
        self.frontier.shift_and_insert(parent,target,start);
        self.start += 1;
        log::trace!("merge {}: frequency {} inserted at {}",self.start,key,target);
        debug_assert!(self.frontier.is_sorted_from(&self.store,self.start));
        debug_assert_eq!(self.frontier.live_frequency(&self.store,self.start),self.total);
        Ok(())
    }
    /// Advance the state machine by one transition.
    pub fn step(&mut self) -> Result<BuildState,Error> {
        self.state = match self.state {
            BuildState::Initialized => BuildState::Merging,
            BuildState::Merging => {
                self.merge()?;
                match self.start + 1 == self.frontier.len() {
                    true => BuildState::Done,
                    false => BuildState::Merging
                }
            },
            BuildState::Done => BuildState::Done
        };
        Ok(self.state)
    }
    /// Run to completion and hand over the tree.
    pub fn finish(mut self) -> Result<HuffTree,Error> {
        while self.step()? != BuildState::Done {}
        let root = self.frontier.get(self.frontier.len()-1).ok_or(Error::FrontierOrder)?;
        log::debug!("tree complete after {} merges, root frequency {}",self.start,self.total);
        Ok(HuffTree {
            store: self.store,
            root,
            merges: self.start
        })
    }
}

/// A finished Huffman tree, the root owns every node.
pub struct HuffTree {
    store: NodeStore,
    root: NodeId,
    merges: usize
}

impl HuffTree {
    pub fn build(freq: &FrequencyTable) -> Result<Self,Error> {
        TreeBuilder::create(freq)?.finish()
    }
    pub fn root(&self) -> NodeId {
        self.root
    }
    pub fn node(&self,id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }
    pub fn merges(&self) -> usize {
        self.merges
    }
    pub fn root_frequency(&self) -> u64 {
        self.node(self.root).map_or(0,|n| n.frequency())
    }
    pub fn leaf_count(&self) -> usize {
        self.merges + 1
    }
    /// longest root-to-leaf edge count below `id`
    pub fn height_from(&self,id: NodeId) -> usize {
        match self.node(id).and_then(|n| n.children()) {
            Some((left,right)) => 1 + self.height_from(left).max(self.height_from(right)),
            None => 0
        }
    }
    pub fn height(&self) -> usize {
        self.height_from(self.root)
    }
    /// Release the whole tree, returns the number of nodes released.
    pub fn destroy(mut self) -> usize {
        let count = self.store.destroy_tree(self.root);
        log::debug!("released {} of {} nodes, {} remain",count,self.store.released(),self.store.live());
        count
    }
}

#[cfg(test)]
fn shape(tree: &HuffTree,id: NodeId) -> String {
    match tree.node(id).unwrap() {
        Node::Leaf { symbol, .. } => (*symbol as char).to_string(),
        Node::Internal { left, right, .. } => format!("({} {})",shape(tree,*left),shape(tree,*right))
    }
}

#[cfg(test)]
fn classic() -> FrequencyTable {
    FrequencyTable::from_counts([(b'A',5),(b'B',9),(b'C',12),(b'D',13),(b'E',16),(b'F',45)])
}

#[test]
fn too_few_symbols() {
    let empty = FrequencyTable::new();
    assert!(matches!(HuffTree::build(&empty),Err(Error::InsufficientSymbols(0))));
    let one = FrequencyTable::from_counts([(b'x',10)]);
    assert!(matches!(HuffTree::build(&one),Err(Error::InsufficientSymbols(1))));
}

#[test]
fn state_transitions() {
    let mut builder = TreeBuilder::create(&classic()).expect("create failed");
    assert_eq!(builder.state(),BuildState::Initialized);
    assert_eq!(builder.step(),Ok(BuildState::Merging));
    for _i in 0..4 {
        assert_eq!(builder.step(),Ok(BuildState::Merging));
    }
    assert_eq!(builder.step(),Ok(BuildState::Done));
    assert_eq!(builder.merges(),5);
    assert_eq!(builder.step(),Ok(BuildState::Done));
}

#[test]
fn classic_tree() {
    let tree = HuffTree::build(&classic()).expect("build failed");
    assert_eq!(tree.merges(),5);
    assert_eq!(tree.leaf_count(),6);
    assert_eq!(tree.root_frequency(),100);
    assert_eq!(tree.height(),4);
    assert_eq!(shape(&tree,tree.root()),"(F ((C D) ((A B) E)))");
}

#[test]
fn two_symbols() {
    let tree = HuffTree::build(&FrequencyTable::from_counts([(b'b',7),(b'a',7)])).expect("build failed");
    assert_eq!(tree.height(),1);
    assert_eq!(shape(&tree,tree.root()),"(a b)");
    // the lower count goes left regardless of symbol order
    let tree = HuffTree::build(&FrequencyTable::from_counts([(b'a',9),(b'b',2)])).expect("build failed");
    assert_eq!(shape(&tree,tree.root()),"(b a)");
}

#[test]
fn tie_break_is_reproducible() {
    // e+a=3 moves past the run of 2's, so b and c pair next
    let freq = FrequencyTable::from_counts([(b'a',2),(b'b',2),(b'c',2),(b'd',2),(b'e',1)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(shape(&tree,tree.root()),"((b c) (d (e a)))");
    let again = HuffTree::build(&freq).expect("build failed");
    assert_eq!(shape(&again,again.root()),shape(&tree,tree.root()));
    // a+b=2 hits c exactly and lands between c and d
    let exact = FrequencyTable::from_counts([(b'a',1),(b'b',1),(b'c',2),(b'd',2),(b'e',2)]);
    let tree = HuffTree::build(&exact).expect("build failed");
    assert_eq!(shape(&tree,tree.root()),"((c (a b)) (d e))");
    let flat = FrequencyTable::from_counts([(b'a',1),(b'b',1),(b'c',1),(b'd',1)]);
    let tree = HuffTree::build(&flat).expect("build failed");
    assert_eq!(shape(&tree,tree.root()),"((a b) (c d))");
}

#[test]
fn conservation_and_merge_count() {
    let freq = FrequencyTable::from_slice("I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes(),&crate::STD_OPTIONS).unwrap();
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(tree.merges(),freq.len()-1);
    assert_eq!(tree.root_frequency(),freq.total());
    assert_eq!(tree.height(),6);
}

#[test]
fn full_alphabet() {
    let freq = FrequencyTable::from_counts((0..=255u8).map(|s| (s,1 + (s as u64 * 7919) % 1000)));
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(tree.merges(),255);
    assert_eq!(tree.root_frequency(),freq.total());
}

#[test]
fn teardown_releases_everything_once() {
    let tree = HuffTree::build(&classic()).expect("build failed");
    let created = 2*tree.leaf_count() - 1;
    assert_eq!(tree.destroy(),created);
}
