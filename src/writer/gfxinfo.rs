//! GFXINFOE: the little binary table TED5 and Omnispeak read to find each
//! kind of graphic in EGAGRAPH. Every field is a little-endian u16.

use std::io::{self, Write};
use std::path::Path;

use crate::model::{Category, ChunkTable};

const TILE_CATEGORIES: [Category; 6] = [
    Category::Tile8,
    Category::Tile8Masked,
    Category::Tile16,
    Category::Tile16Masked,
    Category::Tile32,
    Category::Tile32Masked,
];

const PICTURE_CATEGORIES: [Category; 3] =
    [Category::Bitmap, Category::BitmapMasked, Category::Sprite];

pub fn emit(table: &ChunkTable, path: &Path) -> io::Result<()> {
    super::save(path, |f| write(table, f))
}

pub fn write(table: &ChunkTable, f: &mut dyn Write) -> io::Result<()> {
    for category in TILE_CATEGORIES {
        put_u16(f, "tile count", table.item_count(category))?;
    }
    for category in TILE_CATEGORIES {
        put_u16(f, "tile start", table.start(category))?;
    }
    for category in PICTURE_CATEGORIES {
        put_u16(f, "picture count", table.item_count(category))?;
    }
    for category in PICTURE_CATEGORIES {
        put_u16(f, "picture start", table.start(category))?;
    }
    for header in table.entries(Category::Header) {
        put_u16(f, "header chunk", header.number)?;
    }
    put_u16(f, "misc count", table.extern_count())?;
    put_u16(f, "misc start", table.externs_start())?;
    Ok(())
}

fn put_u16(f: &mut dyn Write, field: &str, value: u32) -> io::Result<()> {
    let value = u16::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("GFXINFOE {field} {value} does not fit in 16 bits"),
        )
    })?;
    f.write_all(&value.to_le_bytes())
}
