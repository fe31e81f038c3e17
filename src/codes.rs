//! Recover the code of each symbol from a finished tree.
//!
//! A code is the path from the root to the symbol's leaf, `0` for each step to a left
//! child and `1` for each step to a right child.  The path is accumulated in a `BitVec`
//! that is passed down the recursion, bits are pushed on the way down and popped when
//! a branch turns out not to contain the target.

use bit_vec::BitVec;
use std::collections::BTreeMap;
use crate::huff_tree::{HuffTree,Node,NodeId};
use crate::{Error,FrequencyTable};

fn find_path(tree: &HuffTree,id: NodeId,target: u8,path: &mut BitVec) -> bool {
    match tree.node(id) {
        Some(Node::Leaf { symbol, .. }) => *symbol == target,
        Some(Node::Internal { left, right, .. }) => {
            path.push(false);
            if find_path(tree,*left,target,path) {
                return true;
            }
            path.pop();
            path.push(true);
            if find_path(tree,*right,target,path) {
                return true;
            }
            path.pop();
            false
        },
        None => false
    }
}

/// Code for one symbol, length equals the depth of its leaf.
/// A symbol that was counted but cannot be found means the tree is broken.
pub fn encode(tree: &HuffTree,symbol: u8) -> Result<BitVec,Error> {
    let mut path = BitVec::new();
    match find_path(tree,tree.root(),symbol,&mut path) {
        true => Ok(path),
        false => Err(Error::EncodingNotFound(symbol))
    }
}

fn collect(tree: &HuffTree,id: NodeId,path: &mut BitVec,table: &mut BTreeMap<u8,BitVec>) {
    match tree.node(id) {
        Some(Node::Leaf { symbol, .. }) => {
            table.insert(*symbol,path.clone());
        },
        Some(Node::Internal { left, right, .. }) => {
            path.push(false);
            collect(tree,*left,path,table);
            path.pop();
            path.push(true);
            collect(tree,*right,path,table);
            path.pop();
        },
        None => {}
    }
}

/// Codes for every leaf in one pass, keyed by symbol.
pub fn code_table(tree: &HuffTree) -> BTreeMap<u8,BitVec> {
    let mut table = BTreeMap::new();
    let mut path = BitVec::new();
    collect(tree,tree.root(),&mut path,&mut table);
    table
}

/// Total encoded size in bits
pub fn encoded_bits(freq: &FrequencyTable,table: &BTreeMap<u8,BitVec>) -> u64 {
    table.iter().map(|(symbol,code)| code.len() as u64 * freq.count(*symbol)).sum()
}

/// bits rounded up to whole bytes
pub fn encoded_bytes(bits: u64) -> u64 {
    bits / 8 + (bits % 8 != 0) as u64
}

/// Kraft sum of the code lengths, exactly 1 for a complete prefix code
pub fn kraft_sum(table: &BTreeMap<u8,BitVec>) -> f64 {
    table.values().map(|code| (-(code.len() as f64)).exp2()).sum()
}

/// code as a string of `0` and `1`
pub fn bit_string(code: &BitVec) -> String {
    code.iter().map(|b| if b { '1' } else { '0' }).collect()
}

// *************** TESTS *****************

#[cfg(test)]
fn classic() -> FrequencyTable {
    FrequencyTable::from_counts([(b'A',5),(b'B',9),(b'C',12),(b'D',13),(b'E',16),(b'F',45)])
}

#[test]
fn classic_codes() {
    let freq = classic();
    let tree = HuffTree::build(&freq).expect("build failed");
    let expected = [(b'A',"1100"),(b'B',"1101"),(b'C',"100"),(b'D',"101"),(b'E',"111"),(b'F',"0")];
    for (symbol,code) in expected {
        assert_eq!(bit_string(&encode(&tree,symbol).unwrap()),code);
    }
    let table = code_table(&tree);
    assert_eq!(encoded_bits(&freq,&table),224);
    assert_eq!(encoded_bytes(224),28);
    assert_eq!(kraft_sum(&table),1.0);
}

#[test]
fn sentence_codes() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let freq = FrequencyTable::from_slice(test_data,&crate::STD_OPTIONS).expect("count failed");
    let tree = HuffTree::build(&freq).expect("build failed");
    let table = code_table(&tree);
    let expected = [
        (b'\n',"111110"),(b' ',"10"),(b'.',"0011"),(b'I',"1101"),(b'S',"1100"),(b'a',"010"),
        (b'd',"111111"),(b'e',"00000"),(b'h',"00001"),(b'i',"11110"),(b'k',"111000"),(b'l',"111001"),
        (b'm',"011"),(b'n',"111010"),(b'o',"0001"),(b's',"111011"),(b't',"0010")
    ];
    assert_eq!(table.len(),expected.len());
    for (symbol,code) in expected {
        assert_eq!(bit_string(&table[&symbol]),code);
    }
    assert_eq!(encoded_bytes(encoded_bits(&freq,&table)),22);
}

#[test]
fn table_agrees_with_search() {
    let freq = classic();
    let tree = HuffTree::build(&freq).expect("build failed");
    for (symbol,code) in code_table(&tree) {
        let found = encode(&tree,symbol).unwrap();
        assert_eq!(found,code);
        // repeated lookup gives the same answer
        assert_eq!(encode(&tree,symbol).unwrap(),found);
    }
}

#[test]
fn prefix_free() {
    let freq = FrequencyTable::from_counts((0..=255u8).map(|s| (s,1 + (s as u64 * 7919) % 1000)));
    let tree = HuffTree::build(&freq).expect("build failed");
    let table = code_table(&tree);
    let codes: Vec<String> = table.values().map(bit_string).collect();
    for (i,a) in codes.iter().enumerate() {
        for (j,b) in codes.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a.as_str()),"{} is a prefix of {}",a,b);
            }
        }
    }
    assert!((kraft_sum(&table) - 1.0).abs() < 1e-12);
    let max_len = table.values().map(|c| c.len()).max().unwrap();
    assert_eq!(max_len,tree.height());
}

#[test]
fn two_symbol_codes() {
    let tree = HuffTree::build(&FrequencyTable::from_counts([(b'a',1),(b'b',1)])).expect("build failed");
    assert_eq!(bit_string(&encode(&tree,b'a').unwrap()),"0");
    assert_eq!(bit_string(&encode(&tree,b'b').unwrap()),"1");
}

#[test]
fn missing_symbol() {
    let tree = HuffTree::build(&classic()).expect("build failed");
    assert_eq!(encode(&tree,b'Z'),Err(Error::EncodingNotFound(b'Z')));
}
