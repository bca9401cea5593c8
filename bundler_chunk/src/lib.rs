//! **`bundler_chunk`** partitions a [`bundler_graph::Graph`] into the main
//! chunk, one lazy chunk per dynamic-import target, and the shared chunks
//! extracted from modules two or more lazy chunks reach.
//!
//! Planning never fails: given a graph already closed and fully resolved by
//! `bundler_graph`, there's no input that `plan_chunks` can't partition.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::dbg_macro)]

mod chunk;
mod planner;

pub use chunk::{derive_chunk_id, Chunk, ChunkKind, ChunkPlan};
pub use planner::plan_chunks;
