//! Chunk number allocation.
//!
//! One pass over the script in document order with a single running counter.
//! The three header chunks take numbers 0..3, then every statement consumes
//! its slots. The result is a pure function of the script model.

use tracing::debug;

use super::ast::{Entry, ScriptModel, Statement};
use crate::model::{Category, ChunkEntry, ChunkTable, HEADER_CHUNKS, LumpRange, TileRun};

pub fn allocate(model: &ScriptModel) -> ChunkTable {
    let mut alloc = Allocator::default();

    for name in HEADER_CHUNKS {
        alloc.push(Category::Header, Some(name.to_string()));
    }

    for statement in &model.statements {
        let before = alloc.next_number();
        match statement {
            Statement::Extension(_) => {}
            Statement::Fonts(entries) => alloc.block(Category::Font, entries),
            Statement::FontsMasked(entries) => alloc.block(Category::FontMasked, entries),
            Statement::Bitmaps(entries) => alloc.block(Category::Bitmap, entries),
            Statement::BitmapsMasked(entries) => alloc.block(Category::BitmapMasked, entries),
            Statement::Sprites(entries) => alloc.block(Category::Sprite, entries),
            Statement::Tiles8(count) => alloc.tile_block(Category::Tile8, *count),
            Statement::Tiles8Masked(count) => alloc.tile_block(Category::Tile8Masked, *count),
            Statement::Tiles16(count) => alloc.tile_run(Category::Tile16, *count),
            Statement::Tiles16Masked(count) => alloc.tile_run(Category::Tile16Masked, *count),
            Statement::Tiles32(count) => alloc.tile_run(Category::Tile32, *count),
            Statement::Tiles32Masked(count) => alloc.tile_run(Category::Tile32Masked, *count),
            Statement::B8000Text(name) => {
                alloc.push(Category::B8000Text, Some(name.clone()));
            }
            Statement::Terminator(name) => {
                alloc.push(Category::Terminator, Some(name.clone()));
            }
            Statement::Article(name) => {
                alloc.push(Category::Article, Some(name.clone()));
            }
            Statement::Chunk(name) => {
                alloc.push(Category::Chunk, Some(name.clone()));
            }
            Statement::Demo(index) => {
                let chunk = alloc.push(Category::Demo, Some(format!("DEMO{index}")));
                chunk.demo_index = Some(*index);
            }
        }
        debug!(
            statement = statement.keyword(),
            first = before,
            count = alloc.next_number() - before,
            "allocated"
        );
    }

    alloc.finish(model.extension().map(str::to_string))
}

#[derive(Default)]
struct Allocator {
    chunks: Vec<ChunkEntry>,
    lumps: Vec<LumpRange>,
    tile_runs: Vec<TileRun>,
}

impl Allocator {
    fn next_number(&self) -> u32 {
        self.chunks.len() as u32
    }

    fn push(&mut self, category: Category, name: Option<String>) -> &mut ChunkEntry {
        let number = self.next_number();
        self.chunks.push(ChunkEntry {
            number,
            category,
            name,
            tile_count: None,
            demo_index: None,
            lump: None,
            sparse: false,
        });
        let last = self.chunks.len() - 1;
        &mut self.chunks[last]
    }

    fn block(&mut self, category: Category, entries: &[Entry]) {
        self.chunks
            .reserve(entries.iter().map(Entry::chunk_count).sum());
        for entry in entries {
            match entry {
                Entry::Chunk(name) => {
                    self.push(category, Some(name.clone()));
                }
                Entry::Lump { name, members } => {
                    let lump = self.lumps.len();
                    let first = self.next_number();
                    for member in members {
                        self.push(category, Some(member.clone())).lump = Some(lump);
                    }
                    self.lumps.push(LumpRange {
                        name: name.clone(),
                        first,
                        count: members.len() as u32,
                    });
                }
            }
        }
    }

    /// 8x8 tiles: one chunk holding `count` tiles.
    fn tile_block(&mut self, category: Category, count: u16) {
        self.push(category, None).tile_count = Some(count);
    }

    /// 16x16 and 32x32 tiles: one anonymous chunk per tile.
    fn tile_run(&mut self, category: Category, count: u16) {
        let first = self.next_number();
        self.chunks.reserve(count as usize);
        for _ in 0..count {
            self.push(category, None);
        }
        self.tile_runs.push(TileRun {
            category,
            first,
            count: count as u32,
        });
    }

    fn finish(self, extension: Option<String>) -> ChunkTable {
        ChunkTable::new(extension, self.chunks, self.lumps, self.tile_runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::naming::NamingOptions;
    use crate::processor::script_parser::parse_script;

    fn table(src: &str) -> ChunkTable {
        allocate(&parse_script(src).unwrap())
    }

    #[test]
    fn test_header_chunks_come_first() {
        let table = table("Fonts { \"MAIN\" }");
        let names: Vec<_> = table
            .chunks()
            .iter()
            .map(|c| c.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["STRUCTPIC", "STRUCTPICM", "STRUCTSPRITE", "MAIN"]);
        assert_eq!(table.start(Category::Font), 3);
    }

    #[test]
    fn test_numbers_are_dense() {
        let table = table(
            "Fonts { \"F\" } Bitmaps { \"A\" Lump \"L\" { \"B\" \"C\" } } Tiles8 104 \
             Tiles16 20 Article \"ART\" Demo 4",
        );
        for (i, chunk) in table.chunks().iter().enumerate() {
            assert_eq!(chunk.number as usize, i);
        }
        // 3 header + 1 font + 3 bitmaps + 1 tile8 + 20 tile16 + article + demo
        assert_eq!(table.total_chunks(), 30);
    }

    #[test]
    fn test_tile16_run() {
        let table = table("Tiles16 1200");
        let run = &table.tile_runs()[0];
        assert_eq!(run.first, 3);
        assert_eq!(run.count, 1200);
        assert_eq!(table.chunk_count(Category::Tile16), 1200);
        assert!(table.entries(Category::Tile16).all(|c| c.name.is_none() && !c.sparse));
        let numbers: Vec<u32> = table.entries(Category::Tile16).map(|c| c.number).collect();
        assert_eq!(numbers, (3..1203).collect::<Vec<_>>());
    }

    #[test]
    fn test_tile8_is_one_chunk() {
        let table = table("Tiles8 104");
        assert_eq!(table.chunk_count(Category::Tile8), 1);
        assert_eq!(table.item_count(Category::Tile8), 104);
        assert_eq!(table.chunk(3).unwrap().tile_count, Some(104));
        assert_eq!(table.total_chunks(), 4);
    }

    #[test]
    fn test_lump_allocates_members_only() {
        let table = table("Bitmaps { Lump \"MENU\" { \"MENU1\" \"MENU2\" } }");
        assert_eq!(table.chunk_count(Category::Bitmap), 2);
        assert_eq!(
            table.lumps(),
            &[LumpRange {
                name: "MENU".into(),
                first: 3,
                count: 2
            }]
        );
        let opts = NamingOptions::igrab(false);
        assert_eq!(table.symbol(3, &opts).as_deref(), Some("MENU1PIC"));
        assert_eq!(table.symbol(4, &opts).as_deref(), Some("MENU2PIC"));
        assert_eq!(table.chunk(4).unwrap().lump, Some(0));
    }

    #[test]
    fn test_demo_name_uses_index_not_number() {
        let table = table("Article \"A\" Demo 2 Demo 0");
        let demos: Vec<_> = table
            .entries(Category::Demo)
            .map(|c| (c.number, c.name.clone().unwrap(), c.demo_index))
            .collect();
        assert_eq!(
            demos,
            vec![(4, "DEMO2".to_string(), Some(2)), (5, "DEMO0".to_string(), Some(0))]
        );
    }

    #[test]
    fn test_extension_takes_no_number() {
        let table = table("Extension \"CK4\" Chunk \"X\"");
        assert_eq!(table.extension(), Some("CK4"));
        assert_eq!(table.total_chunks(), 4);
        assert_eq!(table.externs_start(), 3);
    }

    #[test]
    fn test_allocation_is_reproducible() {
        let model = parse_script(
            "Fonts { \"F\" } Sprites { Lump \"K\" { \"A\" \"B\" } } Tiles16Masked 7 Demo 1",
        )
        .unwrap();
        assert_eq!(allocate(&model), allocate(&model));
    }

    #[test]
    fn test_categories_and_externs_are_contiguous() {
        let table = table(
            "Bitmaps { \"P\" } Sprites { \"S\" } Tiles16 2 Article \"A\" Demo 0 Chunk \"C\"",
        );
        assert_eq!(table.start(Category::Bitmap), 3);
        assert_eq!(table.start(Category::Sprite), 4);
        assert_eq!(table.start(Category::Tile8), 5);
        assert_eq!(table.start(Category::Tile16), 5);
        assert_eq!(table.start(Category::Tile32), 7);
        assert_eq!(table.externs_start(), 7);
        let externs: Vec<u32> = table.externs().map(|c| c.number).collect();
        assert_eq!(externs, vec![7, 8, 9]);
    }
}
