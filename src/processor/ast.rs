//! Script model: the ordered statements of one idGrab script.

/// One item inside a `Fonts`/`Bitmaps`/... block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `"NAME"`: a single chunk.
    Chunk(String),
    /// `Lump "NAME" { "A" "B" }`: a group of chunks cached together.
    Lump { name: String, members: Vec<String> },
}

impl Entry {
    /// Number of chunks this entry occupies.
    pub fn chunk_count(&self) -> usize {
        match self {
            Entry::Chunk(_) => 1,
            Entry::Lump { members, .. } => members.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `Extension "CK4"` – the game's data file extension.
    Extension(String),

    Fonts(Vec<Entry>),
    FontsMasked(Vec<Entry>),
    Bitmaps(Vec<Entry>),
    BitmapsMasked(Vec<Entry>),
    Sprites(Vec<Entry>),

    /// All 8x8 tiles live in one chunk; the value is the tile count.
    Tiles8(u16),
    Tiles8Masked(u16),
    /// One chunk per tile.
    Tiles16(u16),
    Tiles16Masked(u16),
    Tiles32(u16),
    Tiles32Masked(u16),

    B8000Text(String),
    Terminator(String),
    Article(String),
    /// Generic named misc chunk.
    Chunk(String),
    /// `Demo 2` – named `DEMO2` whatever chunk number it lands on.
    Demo(u16),
}

impl Statement {
    pub const KEYWORDS: &'static [&'static str] = &[
        "Extension",
        "Fonts",
        "FontsMasked",
        "Bitmaps",
        "BitmapsMasked",
        "Sprites",
        "Tiles8",
        "Tiles8Masked",
        "Tiles16",
        "Tiles16Masked",
        "Tiles32",
        "Tiles32Masked",
        "B8000Text",
        "Terminator",
        "Article",
        "Chunk",
        "Demo",
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Extension(_) => "Extension",
            Statement::Fonts(_) => "Fonts",
            Statement::FontsMasked(_) => "FontsMasked",
            Statement::Bitmaps(_) => "Bitmaps",
            Statement::BitmapsMasked(_) => "BitmapsMasked",
            Statement::Sprites(_) => "Sprites",
            Statement::Tiles8(_) => "Tiles8",
            Statement::Tiles8Masked(_) => "Tiles8Masked",
            Statement::Tiles16(_) => "Tiles16",
            Statement::Tiles16Masked(_) => "Tiles16Masked",
            Statement::Tiles32(_) => "Tiles32",
            Statement::Tiles32Masked(_) => "Tiles32Masked",
            Statement::B8000Text(_) => "B8000Text",
            Statement::Terminator(_) => "Terminator",
            Statement::Article(_) => "Article",
            Statement::Chunk(_) => "Chunk",
            Statement::Demo(_) => "Demo",
        }
    }
}

/// Parsed script, in document order. Never modified after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptModel {
    pub statements: Vec<Statement>,
}

impl ScriptModel {
    pub fn extension(&self) -> Option<&str> {
        self.statements.iter().find_map(|s| match s {
            Statement::Extension(ext) => Some(ext.as_str()),
            _ => None,
        })
    }
}
