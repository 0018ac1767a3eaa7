//! Pretty JSON dump of the whole chunk table, for scripts and other tools.

use std::io::{self, Write};
use std::path::Path;

use crate::model::ChunkTable;

pub fn emit(table: &ChunkTable, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, f))
}

pub fn write(table: &ChunkTable, f: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *f, table)?;
    writeln!(f)
}
