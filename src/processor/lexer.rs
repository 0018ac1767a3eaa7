//! Small hand-written lexer for idGrab scripts.
//!
//! The lexer only splits the source into `Token`s. Statement keywords such
//! as `Bitmaps` or `Lump` come out as plain `Ident`s; the parser decides what
//! they mean.
//
//  Lexical items:
//
//      Ident    ::= [A-Za-z_][A-Za-z0-9_]*
//      Number   ::= '-'? [0-9]+      (range checked by the parser)
//      Str      ::= '"' [^"]* '"'    (no escapes; may span lines)
//      Braces   ::= '{' | '}'
//      Whitespace and comments (# until end-of-line) are discarded.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{LexError, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Number(i64),
    LBrace,
    RBrace,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(id) => write!(f, "`{id}`"),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lazily yields tokens. Cloning a lexer restarts scanning from the clone's
/// current position.
#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unread character.
    pub fn here(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// `first` followed by every further char matching `pred`. Used for words
    /// and digits only, so no newline is ever taken.
    fn take_word(&mut self, first: char, pred: impl Fn(char) -> bool) -> String {
        let mut word = String::from(first);
        while let Some(c) = self.chars.next_if(|&c| pred(c)) {
            self.column += 1;
            word.push(c);
        }
        word
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '#' {
                while self.next_char().is_some_and(|c| c != '\n') {}
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, first: char, span: Span) -> Result<i64, LexError> {
        let num = self.take_word(first, |c| c.is_ascii_digit());
        if num == "-" {
            return Err(LexError::UnexpectedChar { span, found: '-' });
        }
        num.parse()
            .map_err(|_| LexError::IntegerOverflow { span, text: num })
    }

    fn read_string(&mut self, span: Span) -> Result<String, LexError> {
        let mut txt = String::new();
        while let Some(c) = self.next_char() {
            if c == '"' {
                return Ok(txt);
            }
            txt.push(c);
        }
        Err(LexError::UnterminatedString { span })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_trivia();

        let span = self.here();
        let ch = self.next_char()?;

        let kind = match ch {
            '{' => Ok(TokenKind::LBrace),
            '}' => Ok(TokenKind::RBrace),
            '"' => self.read_string(span).map(TokenKind::Str),
            c if c.is_ascii_digit() || c == '-' => self.read_number(c, span).map(TokenKind::Number),
            c if c.is_ascii_alphabetic() || c == '_' => {
                Ok(TokenKind::Ident(self.take_word(c, |c| c.is_ascii_alphanumeric() || c == '_')))
            }
            found => Err(LexError::UnexpectedChar { span, found }),
        };

        Some(kind.map(|kind| Token { kind, span }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .map(|t| t.map(|t| t.kind))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_tokenisation() {
        let test_cases = vec![
            (
                "Tiles16 1296",
                vec![TokenKind::Ident("Tiles16".into()), TokenKind::Number(1296)],
            ),
            (
                "Bitmaps { \"TITLE\" }",
                vec![
                    TokenKind::Ident("Bitmaps".into()),
                    TokenKind::LBrace,
                    TokenKind::Str("TITLE".into()),
                    TokenKind::RBrace,
                ],
            ),
            (
                "Lump \"MENU\"{\"MENU1\"\"MENU2\"}",
                vec![
                    TokenKind::Ident("Lump".into()),
                    TokenKind::Str("MENU".into()),
                    TokenKind::LBrace,
                    TokenKind::Str("MENU1".into()),
                    TokenKind::Str("MENU2".into()),
                    TokenKind::RBrace,
                ],
            ),
            (
                "Demo -1",
                vec![TokenKind::Ident("Demo".into()), TokenKind::Number(-1)],
            ),
        ];

        for (src, expected) in test_cases {
            assert_eq!(kinds(src), expected, "source: {src}");
        }
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        let src = "# header comment\n  Extension \"CK4\" # trailing\n\n\tTiles8 104\n";
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::Ident("Extension".into()),
                TokenKind::Str("CK4".into()),
                TokenKind::Ident("Tiles8".into()),
                TokenKind::Number(104),
            ]
        );
    }

    #[test]
    fn test_string_keeps_inner_spaces() {
        assert_eq!(
            kinds("\" spaced name \""),
            vec![TokenKind::Str(" spaced name ".into())]
        );
    }

    #[test]
    fn test_spans_are_one_based() {
        let tokens: Vec<Token> = Lexer::new("Fonts {\n  \"MAIN\"\n}")
            .collect::<Result<_, _>>()
            .unwrap();
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(1, 1), Span::new(1, 7), Span::new(2, 3), Span::new(3, 1)]
        );
    }

    #[test]
    fn test_columns_advance_past_words_and_numbers() {
        let mut lexer = Lexer::new("Tiles16Masked 2916 Demo\n_X1");
        let spans: Vec<Span> = lexer.by_ref().map(|t| t.unwrap().span).collect();
        assert_eq!(
            spans,
            vec![Span::new(1, 1), Span::new(1, 15), Span::new(1, 20), Span::new(2, 1)]
        );
        assert_eq!(lexer.here(), Span::new(2, 4));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("Article \"T_HELP").nth(1).unwrap().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { span: Span::new(1, 9) });
    }

    #[test]
    fn test_invalid_character() {
        let err = Lexer::new("Tiles8 = 4").nth(1).unwrap().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                span: Span::new(1, 8),
                found: '='
            }
        );
    }

    #[test]
    fn test_lone_minus_is_rejected() {
        let err = Lexer::new("-").next().unwrap().unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                span: Span::new(1, 1),
                found: '-'
            }
        );
    }

    #[test]
    fn test_restart_from_clone() {
        let mut lexer = Lexer::new("Demo 1 Demo 2");
        lexer.next();
        let restarted: Vec<_> = lexer.clone().map(|t| t.unwrap().kind).collect();
        let rest: Vec<_> = lexer.map(|t| t.unwrap().kind).collect();
        assert_eq!(restarted, rest);
        assert_eq!(rest.len(), 3);
    }
}
