//! Sorted frontier of nodes awaiting a merge.
//!
//! The frontier is an array of node ids sorted by ascending frequency.  The live
//! range is `[start,len)`; slots below `start` have been merged away and are vacant.
//! A merge vacates the two slots at the front of the live range, then the parent
//! is placed by rotating the gap forward to the insertion point, so the array is
//! never re-sorted after the initial load.

use crate::Error;
use super::node_store::{NodeStore,NodeId};

pub struct OrderedFrontier {
    slots: Vec<Option<NodeId>>
}

impl OrderedFrontier {
    /// Stable sort of the leaves by frequency, so equal frequencies keep their creation order.
    pub fn load_sorted(store: &NodeStore,leaves: &[NodeId]) -> Result<Self,Error> {
        let mut keyed: Vec<(u64,NodeId)> = Vec::new();
        keyed.try_reserve_exact(leaves.len()).map_err(|_| Error::Allocation)?;
        for id in leaves {
            let node = store.get(*id).ok_or(Error::FrontierOrder)?;
            keyed.push((node.frequency(),*id));
        }
        keyed.sort_by_key(|(freq,_)| *freq);
        log::debug!("frontier loaded with {} leaves",keyed.len());
        Ok(Self {
            slots: keyed.into_iter().map(|(_,id)| Some(id)).collect()
        })
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn get(&self,idx: usize) -> Option<NodeId> {
        self.slots.get(idx).copied().flatten()
    }
    /// frequency at a slot, vacant slots rank below everything
    fn key_at(&self,store: &NodeStore,idx: usize) -> u64 {
        match self.get(idx).and_then(|id| store.get(id)) {
            Some(node) => node.frequency(),
            None => 0
        }
    }
    /// Binary search of `[search_from,len)` for the slot where a node with frequency `key` goes.
    /// An exact match returns the matching slot (whichever one the search lands on).
    /// Otherwise the result is one before the first larger entry, i.e., the last smaller one.
    /// Returns `None` if `key` is smaller than every entry in the range.
    pub fn find_insertion_point(&self,store: &NodeStore,key: u64,search_from: usize) -> Option<usize> {
        let mut low = search_from as isize;
        let mut high = self.slots.len() as isize - 1;
        while low <= high {
            let mid = (low + high) / 2;
            let mid_key = self.key_at(store,mid as usize);
            if key > mid_key {
                low = mid + 1;
            } else if key < mid_key {
                high = mid - 1;
            } else {
                return Some(mid as usize);
            }
        }
        match low - 1 < search_from as isize {
            true => None,
            false => Some((low - 1) as usize)
        }
    }
    /// Vacate the two slots at `start` and `start+1`, returning what they held.
    pub fn remove_front_pair(&mut self,start: usize) -> Option<(NodeId,NodeId)> {
        if start + 1 >= self.slots.len() {
            return None;
        }
        let left = self.slots[start].take();
        let right = self.slots[start+1].take();
        match (left,right) {
            (Some(l),Some(r)) => Some((l,r)),
            _ => None
        }
    }
    /// Close the gap left by `remove_front_pair`: every slot in `(range_start,target]` moves
    /// down by one, and `parent` lands at `target`.  The live range then starts at `range_start+1`.
    pub fn shift_and_insert(&mut self,parent: NodeId,target: usize,range_start: usize) {
        self.slots[range_start..=target].rotate_left(1);
        self.slots[target] = Some(parent);
    }
    /// true if the live range is sorted and has no vacancies
    pub fn is_sorted_from(&self,store: &NodeStore,start: usize) -> bool {
        let live = &self.slots[start.min(self.slots.len())..];
        live.iter().all(|s| s.is_some()) &&
            live.windows(2).all(|w| {
                let f = |s: &Option<NodeId>| s.and_then(|id| store.get(id)).map(|n| n.frequency());
                f(&w[0]) <= f(&w[1])
            })
    }
    /// sum of frequencies over the live range
    pub fn live_frequency(&self,store: &NodeStore,start: usize) -> u64 {
        (start..self.slots.len()).map(|i| self.key_at(store,i)).sum()
    }
}

#[cfg(test)]
fn frontier_with(freqs: &[u64]) -> (NodeStore,OrderedFrontier) {
    let mut store = NodeStore::new();
    let leaves: Vec<NodeId> = freqs.iter().enumerate()
        .map(|(i,f)| store.create_leaf(i as u8,*f).unwrap())
        .collect();
    let frontier = OrderedFrontier::load_sorted(&store,&leaves).expect("load failed");
    (store,frontier)
}

#[test]
fn load_is_stable() {
    let (store,frontier) = frontier_with(&[3,1,3,2,1]);
    let order: Vec<u8> = (0..frontier.len())
        .map(|i| store.get(frontier.get(i).unwrap()).unwrap().symbol().unwrap())
        .collect();
    assert_eq!(order,vec![1,4,3,0,2]);
    assert!(frontier.is_sorted_from(&store,0));
}

#[test]
fn insertion_point_exact_match() {
    let (store,frontier) = frontier_with(&[1,3,5,5,5,9]);
    assert_eq!(frontier.find_insertion_point(&store,5,0),Some(2));
    let (store,frontier) = frontier_with(&[1,2,2,2,2]);
    assert_eq!(frontier.find_insertion_point(&store,2,0),Some(2));
}

#[test]
fn insertion_point_between() {
    let (store,frontier) = frontier_with(&[1,3,5,5,5,9]);
    // last smaller entry
    assert_eq!(frontier.find_insertion_point(&store,4,0),Some(1));
    assert_eq!(frontier.find_insertion_point(&store,6,0),Some(4));
    assert_eq!(frontier.find_insertion_point(&store,10,0),Some(5));
    let (store,frontier) = frontier_with(&[1,2,2,2,2]);
    assert_eq!(frontier.find_insertion_point(&store,3,0),Some(4));
}

#[test]
fn insertion_point_below_range() {
    let (store,frontier) = frontier_with(&[2,3,5]);
    assert_eq!(frontier.find_insertion_point(&store,1,0),None);
    assert_eq!(frontier.find_insertion_point(&store,2,1),None);
}

#[test]
fn merge_step_by_hand() {
    // 1 1 3 4 -> parent 2 belongs after the pair, lands at slot 1
    let (mut store,mut frontier) = frontier_with(&[1,1,3,4]);
    let target = frontier.find_insertion_point(&store,2,0).unwrap();
    assert_eq!(target,1);
    let (l,r) = frontier.remove_front_pair(0).unwrap();
    let p = store.create_internal(2,l,r).unwrap();
    frontier.shift_and_insert(p,target,0);
    assert_eq!(frontier.get(0),None);
    assert_eq!(frontier.get(1),Some(p));
    assert!(frontier.is_sorted_from(&store,1));
    // 2 3 4 -> parent 5 goes to the end, others shift down
    let target = frontier.find_insertion_point(&store,5,1).unwrap();
    assert_eq!(target,3);
    let (l,r) = frontier.remove_front_pair(1).unwrap();
    let p = store.create_internal(5,l,r).unwrap();
    frontier.shift_and_insert(p,target,1);
    assert_eq!(frontier.get(3),Some(p));
    assert_eq!(store.get(frontier.get(2).unwrap()).unwrap().frequency(),4);
    assert!(frontier.is_sorted_from(&store,2));
    assert_eq!(frontier.live_frequency(&store,2),9);
}
