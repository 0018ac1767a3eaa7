//! modId / ugrab `.def` script.

use std::io::{self, Write};
use std::path::Path;

use crate::model::{Category, ChunkTable, HEADER_CHUNKS};

/// (keyword, category, header chunk index for the picture tables)
const SECTIONS: [(&str, Category, Option<u32>); 11] = [
    ("FONT", Category::Font, None),
    ("FONTM", Category::FontMasked, None),
    ("PICS", Category::Bitmap, Some(0)),
    ("PICM", Category::BitmapMasked, Some(1)),
    ("SPRITES", Category::Sprite, Some(2)),
    ("TILE8", Category::Tile8, None),
    ("TILE8M", Category::Tile8Masked, None),
    ("TILE16", Category::Tile16, None),
    ("TILE16M", Category::Tile16Masked, None),
    ("TILE32", Category::Tile32, None),
    ("TILE32M", Category::Tile32Masked, None),
];

pub fn emit(table: &ChunkTable, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, f))
}

pub fn write(table: &ChunkTable, f: &mut dyn Write) -> io::Result<()> {
    writeln!(f, "# ModID Script: Automatically Generated")?;
    writeln!(f, "GALAXY")?;
    if let Some(ext) = table.extension() {
        writeln!(f, "\tGAMEEXT {ext}")?;
    }
    writeln!(f, "\tGRSTARTS {}", HEADER_CHUNKS.len())?;
    writeln!(f, "\tCHUNKS {}", table.total_chunks())?;

    for (keyword, category, header) in SECTIONS {
        let count = table.item_count(category);
        let start = table.start(category);
        match header {
            Some(header) => writeln!(f, "\t\t{keyword}\t\t{count} {start} {header}")?,
            None => writeln!(f, "\t\t{keyword}\t\t{count} {start}")?,
        }
    }

    for chunk in table.externs() {
        let number = chunk.number;
        let name = chunk.name.as_deref().unwrap_or_default();
        match chunk.category {
            Category::Chunk => writeln!(f, "\t\tMISC {number} {name}")?,
            Category::B8000Text => writeln!(f, "\t\tB800TEXT {number} {name}")?,
            Category::Article => writeln!(f, "\t\tTEXT {number} {name}")?,
            Category::Terminator => writeln!(f, "\t\tTERMINATOR {number} {name}")?,
            Category::Demo => {
                writeln!(f, "\t\tDEMO {number} {}", chunk.demo_index.unwrap_or_default())?
            }
            _ => {}
        }
    }
    Ok(())
}
