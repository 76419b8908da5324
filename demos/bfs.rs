//! Breadth-first search over a small grid graph, tracking visited cells in a balanced tree map.
//!
//! Run with `cargo run --example bfs -- [avl|red-black]`.

use balanced_trees::avl_tree::AvlMap;
use balanced_trees::red_black_tree::RedBlackMap;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::collections::VecDeque;
use std::env;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 64;

fn neighbors(cell: u32) -> Vec<u32> {
    let (x, y) = (cell % WIDTH, cell / WIDTH);
    let mut ret = Vec::with_capacity(4);
    if x > 0 {
        ret.push(cell - 1);
    }
    if x + 1 < WIDTH {
        ret.push(cell + 1);
    }
    if y > 0 {
        ret.push(cell - WIDTH);
    }
    if y + 1 < HEIGHT {
        ret.push(cell + WIDTH);
    }
    // every seventh column is a wall with a gap in the top row
    ret.into_iter()
        .filter(|next| next % WIDTH % 7 != 6 || next / WIDTH == 0)
        .collect()
}

macro_rules! bfs {
    ($visited:expr, $start:expr) => {{
        let mut visited = $visited;
        let mut queue = VecDeque::new();
        visited.insert($start, $start)?;
        queue.push_back($start);
        while let Some(cell) = queue.pop_front() {
            for next in neighbors(cell) {
                if !visited.contains_key(&next) {
                    visited.insert(next, next)?;
                    queue.push_back(next);
                }
            }
        }
        info!("visited {} cells, max cell {:?}", visited.len(), visited.max());
        visited.len()
    }};
}

fn main() -> balanced_trees::Result<()> {
    SimpleLogger::init(LevelFilter::Info, Config::default()).ok();

    let visited = match env::args().nth(1).as_ref().map(String::as_str) {
        Some("red-black") => bfs!(RedBlackMap::new(), 0),
        _ => bfs!(AvlMap::new(), 0),
    };
    println!("reachable cells: {}", visited);
    Ok(())
}
