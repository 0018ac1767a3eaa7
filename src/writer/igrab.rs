//! Options and line layout shared by the IGRAB C and assembly headers.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::processor::naming::NamingOptions;

/// Tab width IGRAB assumed when aligning columns.
const TAB_WIDTH: usize = 8;

/// Column (counting `#define `) where 0.24 defines put their value.
const DEFINE_VALUE_COLUMN: usize = 41;
/// NAMELEN + 5: where 0.4 enum members put their `// n` comment.
const ENUM_COMMENT_COLUMN: usize = 37;
const ASM_VALUE_COLUMN: usize = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IGrabVersion {
    /// Standalone `#define`s.
    ZeroPointTwoFour,
    /// One `typedef enum`.
    #[default]
    ZeroPointFour,
}

impl fmt::Display for IGrabVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IGrabVersion::ZeroPointTwoFour => f.write_str("0.24"),
            IGrabVersion::ZeroPointFour => f.write_str("0.4"),
        }
    }
}

impl FromStr for IGrabVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0.24" => Ok(IGrabVersion::ZeroPointTwoFour),
            "0.4" => Ok(IGrabVersion::ZeroPointFour),
            other => Err(format!(
                "invalid IGRAB version `{other}`, only 0.24 and 0.4 are supported"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IGrabOptions {
    pub version: IGrabVersion,
    pub underscore_separator: bool,
}

impl IGrabOptions {
    pub fn naming(&self) -> NamingOptions {
        NamingOptions::igrab(self.underscore_separator)
    }

    /// One chunk constant in the C header. In 0.4 the first member of each
    /// category carries an explicit value, the rest only a comment.
    pub fn write_chunk_line(
        &self,
        f: &mut dyn Write,
        symbol: &str,
        number: u32,
        first: bool,
    ) -> io::Result<()> {
        match self.version {
            IGrabVersion::ZeroPointTwoFour => {
                let used = "#define ".len() + symbol.len();
                let tabs = (DEFINE_VALUE_COLUMN.saturating_sub(used) / TAB_WIDTH).max(1);
                writeln!(f, "#define {symbol}{}{number}", "\t".repeat(tabs))
            }
            IGrabVersion::ZeroPointFour if first => writeln!(f, "\t\t{symbol} = {number},"),
            IGrabVersion::ZeroPointFour => {
                let used = symbol.len() + 1;
                let spaces = ENUM_COMMENT_COLUMN.saturating_sub(used).max(1);
                writeln!(f, "\t\t{symbol},{}// {number}", " ".repeat(spaces))
            }
        }
    }

    /// One `NAME = n` equate in the assembly header.
    pub fn write_asm_chunk_line(&self, f: &mut dyn Write, symbol: &str, number: u32) -> io::Result<()> {
        let tabs = (ASM_VALUE_COLUMN + TAB_WIDTH - 2).saturating_sub(symbol.len()) / TAB_WIDTH;
        writeln!(f, "{symbol}{}\t=\t{number}", "\t".repeat(tabs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(opts: IGrabOptions, symbol: &str, number: u32, first: bool) -> String {
        let mut out = Vec::new();
        opts.write_chunk_line(&mut out, symbol, number, first).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!("0.24".parse::<IGrabVersion>(), Ok(IGrabVersion::ZeroPointTwoFour));
        assert_eq!("0.4".parse::<IGrabVersion>(), Ok(IGrabVersion::ZeroPointFour));
        assert!("1.0".parse::<IGrabVersion>().is_err());
        assert_eq!(IGrabVersion::default().to_string(), "0.4");
    }

    #[test]
    fn test_define_layout() {
        let opts = IGrabOptions {
            version: IGrabVersion::ZeroPointTwoFour,
            underscore_separator: false,
        };
        assert_eq!(line(opts, "ABCPIC", 7, true), "#define ABCPIC\t\t\t7\n");
        // Overlong names still get one separating tab.
        let long = "A".repeat(40);
        assert_eq!(line(opts, &long, 9, false), format!("#define {long}\t9\n"));
    }

    #[test]
    fn test_enum_layout() {
        let opts = IGrabOptions::default();
        assert_eq!(line(opts, "ABCPIC", 6, true), "\t\tABCPIC = 6,\n");
        assert_eq!(
            line(opts, "ABCPIC", 7, false),
            format!("\t\tABCPIC,{}// 7\n", " ".repeat(30))
        );
    }

    #[test]
    fn test_asm_layout() {
        let opts = IGrabOptions::default();
        let mut out = Vec::new();
        opts.write_asm_chunk_line(&mut out, "ABCPIC", 7).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ABCPIC\t\t\t\t\t=\t7\n");
    }
}
