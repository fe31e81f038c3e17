//! Draw a tree as ASCII art
//!
//! Left children hang below their parent, right children sit to the right on the
//! same row.  To keep the picture narrow, a right child that has children of its own
//! is pushed right by the width of the left subtree's right branches, but never past
//! the widest column drawn so far.
//!
//! ```text
//! #-#---#-E
//! | |   |
//! F #-D #-B
//!   |   |
//!   C   A
//! ```

use crate::huff_tree::{HuffTree,NodeId};

const XOFFSET: usize = 2;
const YOFFSET: usize = 2;
const PNODE: char = '#';
const HBRANCH: char = '-';
const VBRANCH: char = '|';
const EMPTY: char = ' ';
const UNPRINTABLE: char = '?';

struct Grid {
    cells: Vec<char>,
    xlen: usize,
    ylen: usize,
    /// widest column any node has been drawn in
    xmax: usize
}

impl Grid {
    fn create(xlen: usize,ylen: usize) -> Self {
        Self {
            cells: vec![EMPTY;xlen*ylen],
            xlen,
            ylen,
            xmax: 0
        }
    }
    fn get(&self,x: usize,y: usize) -> Option<char> {
        match x < self.xlen && y < self.ylen {
            true => Some(self.cells[y*self.xlen + x]),
            false => None
        }
    }
    fn set(&mut self,x: usize,y: usize,c: char) {
        if x < self.xlen && y < self.ylen {
            self.cells[y*self.xlen + x] = c;
        } else {
            log::warn!("tree art cell ({},{}) is off the grid",x,y);
        }
    }
}

/// horizontal distance needed between a node and its right child
fn right_branch_offset(tree: &HuffTree,id: NodeId) -> usize {
    match tree.node(id).and_then(|n| n.children()) {
        Some((left,right)) => right_branch_offset(tree,left) + right_branch_offset(tree,right) + XOFFSET,
        None => 0
    }
}

/// deepest row reached, each left branch goes down YOFFSET rows
fn grid_height(tree: &HuffTree,id: NodeId,y: usize) -> usize {
    match tree.node(id).and_then(|n| n.children()) {
        Some((left,right)) => grid_height(tree,left,y + YOFFSET).max(grid_height(tree,right,y)).max(y),
        None => y
    }
}

fn node_char(tree: &HuffTree,id: NodeId) -> char {
    match tree.node(id).and_then(|n| n.symbol()) {
        Some(c) if c.is_ascii_graphic() => c as char,
        Some(_) => UNPRINTABLE,
        None => PNODE
    }
}

fn draw(tree: &HuffTree,grid: &mut Grid,id: NodeId,x: usize,y: usize) {
    grid.xmax = grid.xmax.max(x);
    grid.set(x,y,node_char(tree,id));
    let (left,right) = match tree.node(id).and_then(|n| n.children()) {
        Some(pair) => pair,
        None => return
    };
    let dx = match tree.height_from(right) > 0 {
        true => right_branch_offset(tree,left),
        false => 0
    };
    draw(tree,grid,left,x,y + YOFFSET);
    draw(tree,grid,right,(x + dx).min(grid.xmax) + XOFFSET,y);
    for i in 1..YOFFSET {
        grid.set(x,y + i,VBRANCH);
    }
    let mut i = 1;
    while grid.get(x + i,y) == Some(EMPTY) {
        grid.set(x + i,y,HBRANCH);
        i += 1;
    }
}

/// Render the tree, rows are padded to the full grid width and the picture
/// ends with an empty line.
pub fn render(tree: &HuffTree) -> String {
    let xlen = right_branch_offset(tree,tree.root()) + XOFFSET;
    let ylen = grid_height(tree,tree.root(),0) + YOFFSET;
    log::debug!("tree art grid is {} x {}",xlen,ylen);
    let mut grid = Grid::create(xlen,ylen);
    draw(tree,&mut grid,tree.root(),0,0);
    let mut ans = String::with_capacity((xlen + 1)*ylen + 1);
    for row in grid.cells.chunks(xlen) {
        ans.extend(row.iter());
        ans.push('\n');
    }
    ans.push('\n');
    ans
}

#[test]
fn classic_art() {
    let freq = crate::FrequencyTable::from_counts([(b'A',5),(b'B',9),(b'C',12),(b'D',13),(b'E',16),(b'F',45)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    let expected = "#-#---#-E   \n| |   |     \nF #-D #-B   \n  |   |     \n  C   A     \n            \n\n";
    assert_eq!(render(&tree),expected);
}

#[test]
fn smallest_art() {
    let freq = crate::FrequencyTable::from_counts([(b'A',1),(b'B',1)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(render(&tree),"#-B \n|   \nA   \n    \n\n");
}

#[test]
fn sentence_art() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let freq = crate::FrequencyTable::from_slice(test_data,&crate::LETTER_OPTIONS).expect("count failed");
    let tree = HuffTree::build(&freq).expect("build failed");
    let expected = [
        "#---#-------------#-I   ",
        "|   |             |     ",
        "#-M #-------#-#-E A     ",
        "|   |       | |         ",
        "#-S #---#-N O D         ",
        "|   |   |               ",
        "T   #-K L               ",
        "    |                   ",
        "    H                   ",
        "                        ",
        "",
        ""
    ].join("\n");
    assert_eq!(render(&tree),expected);
}

#[test]
fn unprintable_leaves() {
    let freq = crate::FrequencyTable::from_counts([(b' ',1),(0x7f,1)]);
    let tree = HuffTree::build(&freq).expect("build failed");
    assert_eq!(render(&tree),"#-? \n|   \n?   \n    \n\n");
}
