//! # Huffman Code Tables
//!
//! This crate builds a Huffman tree for the bytes occurring in a stream and derives
//! the prefix-free code for each byte.  Rather than a priority queue, the working set
//! of unmerged nodes is kept in a sorted array.  After each merge the parent is placed
//! with a binary search for its insertion point and a short shift of the array, so the
//! order is never rebuilt from scratch.
//!
//! * `freq` counts the bytes of the input
//! * `huff_tree` runs the merge loop and owns the finished tree
//! * `codes` recovers the bit path of each symbol
//! * `report` and `tree_art` render the results as text

mod tools;
pub mod freq;
pub mod huff_tree;
pub mod codes;
pub mod report;
pub mod tree_art;

pub use freq::FrequencyTable;
pub use huff_tree::{HuffTree,Node,NodeId};

type DYNERR = Box<dyn std::error::Error>;

/// Tree Errors
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("too few symbols to build tree: found {0}, need at least 2")]
    InsufficientSymbols(usize),
    #[error("node allocation failed")]
    Allocation,
    #[error("symbol {0} is not in the tree")]
    EncodingNotFound(u8),
    #[error("insertion point fell outside the frontier")]
    FrontierOrder
}

/// Options controlling how the input is counted
#[derive(Clone)]
pub struct Options {
    /// count only alphabetic bytes, folded to upper case
    pub letters_only: bool,
    /// starting position in the input file
    pub in_offset: u64
}

pub const STD_OPTIONS: Options = Options {
    letters_only: false,
    in_offset: 0
};

/// Counting mode used for drawing trees, where only letters are interesting
pub const LETTER_OPTIONS: Options = Options {
    letters_only: true,
    in_offset: 0
};
