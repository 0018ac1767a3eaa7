//! IGRAB-compatible assembly header (`.EQU` file). Same numbers as the C
//! header, written as `NAME = n` equates.

use std::io::{self, Write};
use std::path::Path;

use super::c::{COUNT_DEFINES, NAMED_GRAPHICS, START_DEFINES};
use super::igrab::{IGrabOptions, IGrabVersion};
use crate::model::ChunkTable;

pub fn emit(table: &ChunkTable, options: &IGrabOptions, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, options, f))
}

pub fn write(table: &ChunkTable, options: &IGrabOptions, f: &mut dyn Write) -> io::Result<()> {
    let naming = options.naming();

    writeln!(f, ";=====================================")?;
    writeln!(f, ";")?;
    if let Some(ext) = table.extension() {
        writeln!(f, "; Graphics .H file for .{ext}")?;
    }
    writeln!(f, "; idGrab emulating IGRAB {}", options.version)?;
    writeln!(f, ";")?;
    writeln!(f, ";=====================================\n")?;

    for (i, category) in NAMED_GRAPHICS.into_iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        for chunk in table.entries(category) {
            if let Some(symbol) = chunk.symbol(&naming) {
                options.write_asm_chunk_line(f, &symbol, chunk.number)?;
            }
        }
    }

    if options.version == IGrabVersion::ZeroPointFour {
        for chunk in table.externs() {
            match chunk.demo_index {
                Some(index) => writeln!(f, "DEMO{index}  \t=\t{}", chunk.number)?,
                None => {
                    if let Some(symbol) = chunk.symbol(&naming) {
                        options.write_asm_chunk_line(f, &symbol, chunk.number)?;
                    }
                }
            }
        }
    }

    writeln!(f)?;
    for lump in table.lumps() {
        writeln!(f, "{}_LUMP_START  \t=\t{}", lump.name, lump.first)?;
        writeln!(f, "{}_LUMP_END  \t=\t{}", lump.name, lump.last())?;
    }

    writeln!(f, ";\n; Amount of each data item\n;")?;
    writeln!(f, "NUMCHUNKS\t=\t{}", table.total_chunks())?;
    for (label, category) in COUNT_DEFINES {
        writeln!(f, "{}  \t=\t{}", label.trim_end(), table.item_count(category))?;
    }

    writeln!(f, ";\n; File offsets for data items\n;")?;
    writeln!(f, "STRUCTPIC  \t=\t0")?;
    writeln!(f, "STRUCTPICM  \t=\t1")?;
    writeln!(f, "STRUCTSPRITE  \t=\t2")?;
    writeln!(f)?;
    for (label, category) in START_DEFINES {
        writeln!(f, "{}  \t=\t{}", label.trim_end(), table.start(category))?;
    }
    writeln!(f, "STARTEXTERNS  \t=\t{}", table.externs_start())?;

    writeln!(f)?;
    writeln!(f, ";")?;
    writeln!(f, "; Thank you for using idGrab!")?;
    writeln!(f, ";")?;

    Ok(())
}
