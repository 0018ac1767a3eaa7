//! IGRAB-compatible C header (GRAPHEXT.H / GFXE_EXT.H).

use std::io::{self, Write};
use std::path::Path;

use super::igrab::{IGrabOptions, IGrabVersion};
use crate::model::{Category, ChunkTable};

/// Categories that get a constant per chunk. Fonts never do.
pub(crate) const NAMED_GRAPHICS: [Category; 3] =
    [Category::Bitmap, Category::BitmapMasked, Category::Sprite];

pub fn emit(table: &ChunkTable, options: &IGrabOptions, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, options, f))
}

pub fn write(table: &ChunkTable, options: &IGrabOptions, f: &mut dyn Write) -> io::Result<()> {
    let naming = options.naming();
    let enumerated = options.version == IGrabVersion::ZeroPointFour;

    writeln!(f, "//////////////////////////////////////")?;
    writeln!(f, "//")?;
    if let Some(ext) = table.extension() {
        writeln!(f, "// Graphics .H file for {ext}")?;
    }
    writeln!(f, "// idGrab emulating IGRAB {}", options.version)?;
    writeln!(f, "//")?;
    writeln!(f, "//////////////////////////////////////\n")?;

    if enumerated {
        writeln!(f, "typedef enum {{")?;
    }

    for (i, category) in NAMED_GRAPHICS.into_iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        let start = table.start(category);
        for chunk in table.entries(category) {
            if let Some(symbol) = chunk.symbol(&naming) {
                options.write_chunk_line(f, &symbol, chunk.number, chunk.number == start)?;
            }
        }
    }

    // 0.24 headers declared misc chunks elsewhere.
    if enumerated {
        for chunk in table.externs() {
            match chunk.demo_index {
                Some(index) => writeln!(f, "\t\tDEMO{index}={},", chunk.number)?,
                None => {
                    if let Some(symbol) = chunk.symbol(&naming) {
                        options.write_chunk_line(f, &symbol, chunk.number, true)?;
                    }
                }
            }
        }
        writeln!(f, "\t\tENUMEND\n\t     }} graphicnums;\n")?;
    }

    writeln!(f, "//\n// Data LUMPs\n//")?;
    for lump in table.lumps() {
        writeln!(f, "#define {}_LUMP_START {}", lump.name, lump.first)?;
        writeln!(f, "#define {}_LUMP_END {}", lump.name, lump.last())?;
    }

    writeln!(f, "//\n// Amount of each data item\n//")?;
    writeln!(f, "#define NUMCHUNKS    {}", table.total_chunks())?;
    for (label, category) in COUNT_DEFINES {
        writeln!(f, "#define {label}{}", table.item_count(category))?;
    }

    writeln!(f, "//\n// File offsets for data items\n//")?;
    writeln!(f, "#define STRUCTPIC    0")?;
    writeln!(f, "#define STRUCTPICM   1")?;
    writeln!(f, "#define STRUCTSPRITE 2")?;
    writeln!(f)?;
    for (label, category) in START_DEFINES {
        writeln!(f, "#define {label}{}", table.start(category))?;
    }
    writeln!(f, "#define STARTEXTERNS {}", table.externs_start())?;

    writeln!(f)?;
    writeln!(f, "//")?;
    writeln!(f, "// Thank you for using idGrab!")?;
    writeln!(f, "//")?;

    Ok(())
}

/// `NUMxxx` names, padded to the column IGRAB used.
pub(crate) const COUNT_DEFINES: [(&str, Category); 11] = [
    ("NUMFONT      ", Category::Font),
    ("NUMFONTM     ", Category::FontMasked),
    ("NUMPICS      ", Category::Bitmap),
    ("NUMPICM      ", Category::BitmapMasked),
    ("NUMSPRITES   ", Category::Sprite),
    ("NUMTILE8     ", Category::Tile8),
    ("NUMTILE8M    ", Category::Tile8Masked),
    ("NUMTILE16    ", Category::Tile16),
    ("NUMTILE16M   ", Category::Tile16Masked),
    ("NUMTILE32    ", Category::Tile32),
    ("NUMTILE32M   ", Category::Tile32Masked),
];

pub(crate) const START_DEFINES: [(&str, Category); 11] = [
    ("STARTFONT    ", Category::Font),
    ("STARTFONTM   ", Category::FontMasked),
    ("STARTPICS    ", Category::Bitmap),
    ("STARTPICM    ", Category::BitmapMasked),
    ("STARTSPRITES ", Category::Sprite),
    ("STARTTILE8   ", Category::Tile8),
    ("STARTTILE8M  ", Category::Tile8Masked),
    ("STARTTILE16  ", Category::Tile16),
    ("STARTTILE16M ", Category::Tile16Masked),
    ("STARTTILE32  ", Category::Tile32),
    ("STARTTILE32M ", Category::Tile32Masked),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor;

    const SCRIPT: &str = r#"
        Extension "CK4"
        Fonts { "MAIN" }
        Bitmaps { "TITLE" Lump "MENU" { "MENU1" "MENU2" } }
        Sprites { "DEMOSIGN" }
        Tiles8 104
        Tiles16 10
        Article "T_HELP"
        Demo 0
    "#;

    fn render(options: IGrabOptions) -> String {
        let table = processor::run(SCRIPT).unwrap();
        let mut out = Vec::new();
        write(&table, &options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_enum_header() {
        let text = render(IGrabOptions::default());
        assert!(text.contains("// Graphics .H file for CK4\n"));
        assert!(text.contains("// idGrab emulating IGRAB 0.4\n"));
        assert!(text.contains("typedef enum {\n\t\tTITLEPIC = 4,\n"));
        assert!(text.contains("\t\tMENU1PIC,"));
        assert!(text.contains("\t\tDEMOSIGNSPR = 7,\n"));
        assert!(text.contains("\t\tT_HELP = 19,\n"));
        assert!(text.contains("\t\tDEMO0=20,\n"));
        assert!(text.contains("\t\tENUMEND\n\t     } graphicnums;\n"));
        assert!(text.contains("#define MENU_LUMP_START 5\n#define MENU_LUMP_END 6\n"));
        assert!(text.contains("#define NUMCHUNKS    21\n"));
        assert!(text.contains("#define NUMTILE8     104\n"));
        assert!(text.contains("#define NUMTILE16    10\n"));
        assert!(text.contains("#define STARTFONT    3\n"));
        assert!(text.contains("#define STARTPICM    7\n"));
        assert!(text.contains("#define STARTTILE16  9\n"));
        assert!(text.contains("#define STARTTILE32  19\n"));
        assert!(text.contains("#define STARTEXTERNS 19\n"));
    }

    #[test]
    fn test_define_header() {
        let text = render(IGrabOptions {
            version: IGrabVersion::ZeroPointTwoFour,
            underscore_separator: true,
        });
        assert!(text.contains("// idGrab emulating IGRAB 0.24\n"));
        assert!(!text.contains("typedef enum"));
        assert!(text.contains("#define TITLE_PIC\t\t\t4\n"));
        assert!(text.contains("#define DEMOSIGN_SPR\t\t7\n"));
        assert!(!text.contains("DEMO0"));
    }
}
