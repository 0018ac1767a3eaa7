//! Export symbol decoration.
//!
//! IGRAB headers append a category suffix (`TITLEPIC`, `KEEN_SPR`), Omnispeak
//! variable files prepend a prefix (`PIC_TITLE`). Decoration is a pure
//! function of its inputs so each writer can use its own options.

use crate::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    #[default]
    IgrabSuffix,
    OmnispeakPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamingOptions {
    pub convention: Convention,
    /// Put `_` between the base name and a non-empty affix.
    pub underscore_separator: bool,
}

impl NamingOptions {
    pub const OMNISPEAK: NamingOptions = NamingOptions {
        convention: Convention::OmnispeakPrefix,
        underscore_separator: true,
    };

    pub const fn igrab(underscore_separator: bool) -> Self {
        Self {
            convention: Convention::IgrabSuffix,
            underscore_separator,
        }
    }
}

/// Suffix or prefix used for `category` under `convention`; empty when the
/// name is exported as-is.
pub fn affix(category: Category, convention: Convention) -> &'static str {
    match convention {
        Convention::IgrabSuffix => match category {
            Category::Bitmap => "PIC",
            Category::BitmapMasked => "PICM",
            Category::Sprite => "SPR",
            _ => "",
        },
        Convention::OmnispeakPrefix => match category {
            Category::Font => "FON",
            Category::FontMasked => "FONM",
            Category::Bitmap => "PIC",
            Category::BitmapMasked => "MPIC",
            Category::Sprite => "SPR",
            Category::Chunk | Category::B8000Text | Category::Terminator => "EXTERN",
            Category::Article => "TEXT",
            _ => "",
        },
    }
}

pub fn decorate(base: &str, category: Category, options: &NamingOptions) -> String {
    let affix = affix(category, options.convention);
    if affix.is_empty() {
        return base.to_string();
    }
    let sep = if options.underscore_separator { "_" } else { "" };
    match options.convention {
        Convention::IgrabSuffix => format!("{base}{sep}{affix}"),
        Convention::OmnispeakPrefix => format!("{affix}{sep}{base}"),
    }
}
