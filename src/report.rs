//! Text report of the code table
//!
//! One line per symbol in ascending order, giving the code, its length, and the
//! symbol count, followed by the encoded size in bytes.

use std::fmt::Write;
use crate::huff_tree::HuffTree;
use crate::codes;
use crate::{Error,FrequencyTable};

/// printable symbols are quoted, others are shown as 3 decimal digits
fn label(symbol: u8) -> String {
    match symbol {
        0x20..=0x7e => format!("'{}'",symbol as char),
        _ => format!("{:03}",symbol)
    }
}

pub fn text_report(freq: &FrequencyTable,tree: &HuffTree) -> Result<String,Error> {
    let width = tree.height() + 1;
    let mut bits: u64 = 0;
    let mut ans = String::new();
    for symbol in freq.symbols() {
        let code = codes::encode(tree,symbol)?;
        let count = freq.count(symbol);
        // writing to a String cannot fail
        let _ = writeln!(ans,"{} :{:>width$} ({:3} * {:4})",
            label(symbol),codes::bit_string(&code),code.len(),count,width=width);
        bits += code.len() as u64 * count;
    }
    let _ = writeln!(ans,"{} Bytes\n",codes::encoded_bytes(bits));
    Ok(ans)
}

/// Short summary of the tree and encoded size
pub fn stats(freq: &FrequencyTable,tree: &HuffTree) -> String {
    let table = codes::code_table(tree);
    let bits = codes::encoded_bits(freq,&table);
    format!("symbols: {}\nmerges: {}\nheight: {}\ninput bytes: {}\nencoded bytes: {}\n",
        tree.leaf_count(),tree.merges(),tree.height(),freq.total(),codes::encoded_bytes(bits))
}

#[test]
fn classic_report() {
    let freq = FrequencyTable::from_counts([(b'A',5),(b'B',9),(b'C',12),(b'D',13),(b'E',16),(b'F',45)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    let expected = "\
'A' : 1100 (  4 *    5)
'B' : 1101 (  4 *    9)
'C' :  100 (  3 *   12)
'D' :  101 (  3 *   13)
'E' :  111 (  3 *   16)
'F' :    0 (  1 *   45)
28 Bytes

";
    assert_eq!(text_report(&freq,&tree).unwrap(),expected);
}

#[test]
fn unprintable_labels() {
    let freq = FrequencyTable::from_slice("a\nb\n".as_bytes(),&crate::STD_OPTIONS).expect("count failed");
    let tree = HuffTree::build(&freq).expect("build failed");
    let report = text_report(&freq,&tree).unwrap();
    assert!(report.starts_with("010 :"));
    assert!(report.contains("'a' :"));
    assert!(report.ends_with("1 Bytes\n\n"));
}

#[test]
fn stats_summary() {
    let freq = FrequencyTable::from_counts([(b'a',1),(b'b',1),(b'c',1),(b'd',1)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(stats(&freq,&tree),"symbols: 4\nmerges: 3\nheight: 2\ninput bytes: 4\nencoded bytes: 1\n");
}
