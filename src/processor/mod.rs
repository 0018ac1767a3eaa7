//! The functional core: script text in, chunk table out.
pub mod allocator;
pub mod ast;
pub mod lexer;
pub mod naming;
pub mod script_parser;

use crate::error::Result;
use crate::model::ChunkTable;

/// Parse `src` and allocate its chunks. Every writer reads the returned table.
pub fn run(src: &str) -> Result<ChunkTable> {
    let model = script_parser::parse_script(src)?;
    Ok(allocator::allocate(&model))
}
