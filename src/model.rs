//! The chunk table: the allocator's output and the single source of truth
//! every writer reads from.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::processor::naming::{self, NamingOptions};

/// Structure chunks every ID-engine graphics file starts with.
pub const HEADER_CHUNKS: [&str; 3] = ["STRUCTPIC", "STRUCTPICM", "STRUCTSPRITE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Header,
    Font,
    FontMasked,
    Bitmap,
    BitmapMasked,
    Sprite,
    Tile8,
    Tile8Masked,
    Tile16,
    Tile16Masked,
    Tile32,
    Tile32Masked,
    Chunk,
    B8000Text,
    Terminator,
    Article,
    Demo,
}

impl Category {
    /// Graphics categories in the order the game expects them. Empty
    /// categories take their start from the next entry in this list.
    pub const CANONICAL: &'static [Category] = &[
        Category::Font,
        Category::FontMasked,
        Category::Bitmap,
        Category::BitmapMasked,
        Category::Sprite,
        Category::Tile8,
        Category::Tile8Masked,
        Category::Tile16,
        Category::Tile16Masked,
        Category::Tile32,
        Category::Tile32Masked,
    ];

    /// Misc chunks that follow the graphics.
    pub fn is_extern(self) -> bool {
        matches!(
            self,
            Category::Chunk
                | Category::B8000Text
                | Category::Terminator
                | Category::Article
                | Category::Demo
        )
    }

    /// Anonymous one-chunk-per-tile categories.
    pub fn is_tile_run(self) -> bool {
        matches!(
            self,
            Category::Tile16 | Category::Tile16Masked | Category::Tile32 | Category::Tile32Masked
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Header => "header",
            Category::Font => "font",
            Category::FontMasked => "masked font",
            Category::Bitmap => "bitmap",
            Category::BitmapMasked => "masked bitmap",
            Category::Sprite => "sprite",
            Category::Tile8 => "8x8 tiles",
            Category::Tile8Masked => "masked 8x8 tiles",
            Category::Tile16 => "16x16 tile",
            Category::Tile16Masked => "masked 16x16 tile",
            Category::Tile32 => "32x32 tile",
            Category::Tile32Masked => "masked 32x32 tile",
            Category::Chunk => "misc chunk",
            Category::B8000Text => "B8000 text",
            Category::Terminator => "terminator",
            Category::Article => "article",
            Category::Demo => "demo",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkEntry {
    pub number: u32,
    pub category: Category,
    /// Undecorated name; `None` for anonymous tiles.
    pub name: Option<String>,
    /// Tiles held by a `Tile8`/`Tile8Masked` chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_count: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_index: Option<u16>,
    /// Index into `ChunkTable::lumps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lump: Option<usize>,
    pub sparse: bool,
}

impl ChunkEntry {
    /// Export symbol under the given naming convention.
    pub fn symbol(&self, options: &NamingOptions) -> Option<String> {
        self.name
            .as_deref()
            .map(|name| naming::decorate(name, self.category, options))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LumpRange {
    pub name: String,
    pub first: u32,
    pub count: u32,
}

impl LumpRange {
    /// Last member chunk (inclusive).
    pub fn last(&self) -> u32 {
        self.first + self.count - 1
    }

    pub fn contains(&self, chunk: u32) -> bool {
        chunk >= self.first && chunk < self.first + self.count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileRun {
    pub category: Category,
    pub first: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryAggregate {
    pub count: u32,
    pub first: Option<u32>,
}

/// Dense table of every chunk, indexed by chunk number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkTable {
    extension: Option<String>,
    chunks: Vec<ChunkEntry>,
    lumps: Vec<LumpRange>,
    tile_runs: Vec<TileRun>,
    aggregates: BTreeMap<Category, CategoryAggregate>,
}

impl ChunkTable {
    /// Only the allocator builds tables; `chunks[i].number == i` must hold.
    pub(crate) fn new(
        extension: Option<String>,
        chunks: Vec<ChunkEntry>,
        lumps: Vec<LumpRange>,
        tile_runs: Vec<TileRun>,
    ) -> Self {
        debug_assert!(chunks.iter().enumerate().all(|(i, c)| c.number as usize == i));

        let mut aggregates = BTreeMap::<Category, CategoryAggregate>::new();
        for chunk in &chunks {
            let agg = aggregates.entry(chunk.category).or_default();
            agg.count += 1;
            agg.first.get_or_insert(chunk.number);
        }

        Self {
            extension,
            chunks,
            lumps,
            tile_runs,
            aggregates,
        }
    }

    /// Flag the given tile chunks as having no backing data. Numbers that are
    /// not 16x16 or 32x32 tiles are ignored.
    pub fn with_sparse_tiles<I: IntoIterator<Item = u32>>(mut self, numbers: I) -> Self {
        for number in numbers {
            match self.chunks.get_mut(number as usize) {
                Some(chunk) if chunk.category.is_tile_run() => chunk.sparse = true,
                Some(chunk) => warn!(number, category = %chunk.category, "not a tile chunk, cannot be sparse"),
                None => warn!(number, "no such chunk, cannot be sparse"),
            }
        }
        self
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn chunks(&self) -> &[ChunkEntry] {
        &self.chunks
    }

    pub fn chunk(&self, number: u32) -> Option<&ChunkEntry> {
        self.chunks.get(number as usize)
    }

    pub fn lumps(&self) -> &[LumpRange] {
        &self.lumps
    }

    pub fn tile_runs(&self) -> &[TileRun] {
        &self.tile_runs
    }

    pub fn total_chunks(&self) -> u32 {
        self.chunks.len() as u32
    }

    pub fn aggregate(&self, category: Category) -> CategoryAggregate {
        self.aggregates.get(&category).copied().unwrap_or_default()
    }

    /// Number of chunks in `category`.
    pub fn chunk_count(&self, category: Category) -> u32 {
        self.aggregate(category).count
    }

    /// Number of items in `category`: tiles for the 8x8 tile chunks, chunks
    /// for everything else.
    pub fn item_count(&self, category: Category) -> u32 {
        match category {
            Category::Tile8 | Category::Tile8Masked => self
                .entries(category)
                .filter_map(|c| c.tile_count)
                .map(u32::from)
                .sum(),
            _ => self.chunk_count(category),
        }
    }

    /// First chunk number of `category`. An empty category starts where the
    /// next non-empty one in canonical order does.
    pub fn start(&self, category: Category) -> u32 {
        if let Some(first) = self.aggregate(category).first {
            return first;
        }
        if category.is_extern() {
            return self.externs_start();
        }
        if category == Category::Header {
            return 0;
        }
        Category::CANONICAL
            .iter()
            .skip_while(|&&c| c != category)
            .find_map(|&c| self.aggregate(c).first)
            .unwrap_or_else(|| self.externs_start())
    }

    pub fn externs_start(&self) -> u32 {
        self.externs()
            .next()
            .map_or(self.total_chunks(), |c| c.number)
    }

    pub fn extern_count(&self) -> u32 {
        self.externs().count() as u32
    }

    pub fn entries(&self, category: Category) -> impl Iterator<Item = &ChunkEntry> + '_ {
        self.chunks.iter().filter(move |c| c.category == category)
    }

    /// Misc chunks in table order.
    pub fn externs(&self) -> impl Iterator<Item = &ChunkEntry> + '_ {
        self.chunks.iter().filter(|c| c.category.is_extern())
    }

    /// Symbol of chunk `number`, if it is named.
    pub fn symbol(&self, number: u32, options: &NamingOptions) -> Option<String> {
        self.chunk(number).and_then(|c| c.symbol(options))
    }
}
