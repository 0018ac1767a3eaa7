//! Output formats. Each writer reads the shared `ChunkTable` and never
//! changes it, so every artifact of one run agrees on chunk numbers.
pub mod asm;
pub mod c;
pub mod gfxinfo;
pub mod igrab;
pub mod json;
pub mod modid;
pub mod omnispeak;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create `path` and run `write` against a buffered handle to it.
pub(crate) fn save<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()
}
