//! Omnispeak GFXCHUNKS variable file.

use std::io::{self, Write};
use std::path::Path;

use tracing::warn;

use crate::model::{Category, ChunkTable};
use crate::processor::naming::NamingOptions;

const SECTIONS: [(&str, Category); 5] = [
    ("Fonts", Category::Font),
    ("Masked Fonts", Category::FontMasked),
    ("Bitmaps", Category::Bitmap),
    ("Masked Bitmaps", Category::BitmapMasked),
    ("Sprites", Category::Sprite),
];

pub fn emit(table: &ChunkTable, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, f))
}

pub fn write(table: &ChunkTable, f: &mut dyn Write) -> io::Result<()> {
    let naming = NamingOptions::OMNISPEAK;

    writeln!(f, "# GFX Header (Omnispeak)\n")?;

    for (title, category) in SECTIONS {
        writeln!(f, "# {title}")?;
        for chunk in table.entries(category) {
            if let Some(symbol) = chunk.symbol(&naming) {
                writeln!(f, "%int {symbol} {}", chunk.number)?;
            }
        }
    }

    let mut demo_start = None;
    for chunk in table.externs() {
        match chunk.demo_index {
            Some(index) => {
                demo_start.get_or_insert(chunk.number);
                writeln!(f, "# Demo {index} = {}", chunk.number)?;
            }
            None => {
                if let Some(symbol) = chunk.symbol(&naming) {
                    writeln!(f, "%int {symbol} {}", chunk.number)?;
                }
            }
        }
    }
    match demo_start {
        Some(start) => writeln!(f, "%int DEMOSTART {start}")?,
        None => warn!("script has no demos, DEMOSTART left undefined"),
    }

    writeln!(f, "#\n# Lumps\n#")?;
    writeln!(f, "%int NUMLUMPS {}", table.lumps().len())?;
    let starts: Vec<u32> = table.lumps().iter().map(|l| l.first).collect();
    write_chunk_array(f, table, &naming, "lumpStarts", &starts)?;
    let ends: Vec<u32> = table.lumps().iter().map(|l| l.last()).collect();
    write_chunk_array(f, table, &naming, "lumpEnds", &ends)?;

    writeln!(f, "# Lump names")?;
    for (i, lump) in table.lumps().iter().enumerate() {
        writeln!(f, "%int LUMP_{} {i}", lump.name)?;
    }
    Ok(())
}

/// `%intarray` whose elements reference chunk variables where they exist.
fn write_chunk_array(
    f: &mut dyn Write,
    table: &ChunkTable,
    naming: &NamingOptions,
    name: &str,
    chunks: &[u32],
) -> io::Result<()> {
    writeln!(f, "%intarray {name}")?;
    for (i, &chunk) in chunks.iter().enumerate() {
        let comma = if i + 1 == chunks.len() { "" } else { "," };
        match table.symbol(chunk, naming) {
            Some(symbol) => writeln!(f, "\t@{symbol}{comma}")?,
            None => writeln!(f, "\t{chunk}{comma}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor;

    #[test]
    fn test_variable_file() {
        let table = processor::run(
            "Fonts { \"MAIN\" } Bitmaps { \"TITLE\" } BitmapsMasked { Lump \"MENU\" { \"M1\" \"M2\" } } \
             Sprites { Lump \"KEEN\" { \"KEENR\" } } Tiles16 2 B8000Text \"ORDER\" Article \"HELP\" Demo 0 Demo 1",
        )
        .unwrap();
        let mut out = Vec::new();
        write(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "# GFX Header (Omnispeak)\n\n\
            # Fonts\n\
            %int FON_MAIN 3\n\
            # Masked Fonts\n\
            # Bitmaps\n\
            %int PIC_TITLE 4\n\
            # Masked Bitmaps\n\
            %int MPIC_M1 5\n\
            %int MPIC_M2 6\n\
            # Sprites\n\
            %int SPR_KEENR 7\n\
            %int EXTERN_ORDER 10\n\
            %int TEXT_HELP 11\n\
            # Demo 0 = 12\n\
            # Demo 1 = 13\n\
            %int DEMOSTART 12\n\
            #\n# Lumps\n#\n\
            %int NUMLUMPS 2\n\
            %intarray lumpStarts\n\
            \t@MPIC_M1,\n\
            \t@SPR_KEENR\n\
            %intarray lumpEnds\n\
            \t@MPIC_M2,\n\
            \t@SPR_KEENR\n\
            # Lump names\n\
            %int LUMP_MENU 0\n\
            %int LUMP_KEEN 1\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_without_demos_or_lumps() {
        let table = processor::run("Article \"HELP\"").unwrap();
        let mut out = Vec::new();
        write(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("DEMOSTART"));
        assert!(text.contains("%int NUMLUMPS 0\n%intarray lumpStarts\n%intarray lumpEnds\n"));
    }
}
