//! Byte frequency counting
//!
//! The tree builder consumes a table of strictly positive counts.  Symbols with a
//! zero count are never stored, and `symbols` always yields ascending byte order,
//! which is the order leaves are created in.

use std::io::{Cursor,Read,Seek,SeekFrom,BufReader};
use crate::{DYNERR,Options};

#[derive(Clone,Debug,PartialEq)]
pub struct FrequencyTable {
    counts: [u64;256]
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0;256]
        }
    }
    /// Build from explicit (symbol,count) pairs, repeated symbols accumulate.
    pub fn from_counts<I>(pairs: I) -> Self
    where I: IntoIterator<Item=(u8,u64)> {
        let mut ans = Self::new();
        for (symbol,count) in pairs {
            ans.counts[symbol as usize] += count;
        }
        ans
    }
    /// Count every byte from `opt.in_offset` to the end of the stream.
    pub fn from_reader<R>(reader: &mut R,opt: &Options) -> Result<Self,DYNERR>
    where R: Read + Seek {
        reader.seek(SeekFrom::Start(opt.in_offset))?;
        let mut ans = Self::new();
        let mut skipped: u64 = 0;
        for maybe_byte in BufReader::new(reader).bytes() {
            let mut c = maybe_byte?;
            if opt.letters_only {
                if !c.is_ascii_alphabetic() {
                    skipped += 1;
                    continue;
                }
                c = c.to_ascii_uppercase();
            }
            ans.counts[c as usize] += 1;
        }
        if skipped > 0 {
            log::debug!("{} non-letter bytes were not counted",skipped);
        }
        log::debug!("counted {} bytes, {} distinct",ans.total(),ans.len());
        Ok(ans)
    }
    /// Convenience function, calls `from_reader` with a slice
    pub fn from_slice(slice: &[u8],opt: &Options) -> Result<Self,DYNERR> {
        let mut src = Cursor::new(slice);
        Self::from_reader(&mut src,opt)
    }
    pub fn count(&self,symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }
    /// symbols with nonzero count, ascending
    pub fn symbols(&self) -> impl Iterator<Item=u8> + '_ {
        (0..=255u8).filter(move |s| self.counts[*s as usize] > 0)
    }
    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn counting_works() {
    let tab = FrequencyTable::from_slice("I am Sam.".as_bytes(),&crate::STD_OPTIONS).expect("count failed");
    assert_eq!(tab.count(b'a'),2);
    assert_eq!(tab.count(b' '),2);
    assert_eq!(tab.count(b'z'),0);
    assert_eq!(tab.len(),6);
    assert_eq!(tab.total(),9);
    assert_eq!(tab.symbols().collect::<Vec<u8>>(),b" .ISam".to_vec());
}

#[test]
fn letters_are_folded() {
    let tab = FrequencyTable::from_slice("I am Sam.".as_bytes(),&crate::LETTER_OPTIONS).expect("count failed");
    assert_eq!(tab.count(b'A'),2);
    assert_eq!(tab.count(b'M'),2);
    assert_eq!(tab.count(b'a'),0);
    assert_eq!(tab.count(b' '),0);
    assert_eq!(tab.symbols().collect::<Vec<u8>>(),b"AIMS".to_vec());
}

#[test]
fn offset_is_respected() {
    let mut opt = crate::STD_OPTIONS;
    opt.in_offset = 3;
    let tab = FrequencyTable::from_slice("xyzab".as_bytes(),&opt).expect("count failed");
    assert_eq!(tab.symbols().collect::<Vec<u8>>(),b"ab".to_vec());
}

#[test]
fn zero_counts_are_not_symbols() {
    let tab = FrequencyTable::from_counts([(b'a',0),(b'b',3),(b'b',1)]);
    assert_eq!(tab.len(),1);
    assert_eq!(tab.count(b'b'),4);
}
