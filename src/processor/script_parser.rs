//! Parser that consumes the lexer and builds the `ScriptModel`.
//
//  script    ::= statement*
//  statement ::= KEYWORD argument      (the keyword fixes the argument shape)
//  block     ::= '{' (Str | lump)* '}'
//  lump      ::= "Lump" Str '{' Str* '}'

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::ast::{Entry, ScriptModel, Statement};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, ScriptError, Span};

const LUMP_NAMESPACE: &str = "lump";
const EXTERN_NAMESPACE: &str = "extern";

/// Graphics statements in the order their chunks must be laid out. Every
/// writer assumes each category, and then the externs, form one ascending run.
const GRAPHICS_ORDER: [&str; 11] = [
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
];

const EXTERN_STATEMENTS: [&str; 5] = ["B8000Text", "Terminator", "Article", "Chunk", "Demo"];

/// Parse a whole script. Stops at the first error.
pub fn parse_script(src: &str) -> Result<ScriptModel> {
    let mut parser = Parser::new(src);
    let model = parser.parse()?;
    debug!(statements = model.statements.len(), "script parsed");
    Ok(model)
}

struct Parser<'a> {
    lex: Lexer<'a>,
    /// Span of the most recently consumed token, used for end-of-input errors.
    last: Span,
    /// Statements that may only appear once, with where they were first seen.
    seen: HashMap<&'static str, Span>,
    /// (namespace, name) pairs already used.
    names: HashSet<(&'static str, String)>,
    /// Latest graphics statement, as (position in `GRAPHICS_ORDER`, keyword, span).
    last_graphics: Option<(usize, &'static str, Span)>,
    first_extern: Option<(&'static str, Span)>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lex: Lexer::new(src),
            last: Span::new(1, 1),
            seen: HashMap::new(),
            names: HashSet::new(),
            last_graphics: None,
            first_extern: None,
        }
    }

    fn parse(&mut self) -> Result<ScriptModel> {
        let mut statements = Vec::new();
        while let Some(token) = self.next_token()? {
            let statement = self.parse_statement(token)?;
            debug!(statement = statement.keyword(), "parsed statement");
            statements.push(statement);
        }
        Ok(ScriptModel { statements })
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        match self.lex.next() {
            None => {
                self.last = self.lex.here();
                Ok(None)
            }
            Some(Err(e)) => Err(e.into()),
            Some(Ok(token)) => {
                self.last = token.span;
                Ok(Some(token))
            }
        }
    }

    /// Next token, treating end of input as a syntax error.
    fn require_token(&mut self, expected: &str) -> Result<Token> {
        match self.next_token()? {
            Some(token) => Ok(token),
            None => Err(self.syntax(self.last, format!("expected {expected}, found end of input"))),
        }
    }

    fn syntax(&self, span: Span, message: String) -> ScriptError {
        ScriptError::Syntax { span, message }
    }

    fn parse_statement(&mut self, token: Token) -> Result<Statement> {
        let span = token.span;
        let keyword = match token.kind {
            TokenKind::Ident(ident) => ident,
            other => {
                return Err(self.syntax(span, format!("expected a statement keyword, found {other}")));
            }
        };

        let rank = GRAPHICS_ORDER.iter().position(|&k| k == keyword);
        if let Some(rank) = rank {
            self.check_layout_order(rank, span)?;
        }

        let statement = match keyword.as_str() {
            "Extension" => {
                self.check_once("Extension", span)?;
                Statement::Extension(self.expect_string("Extension")?)
            }
            "Fonts" => Statement::Fonts(self.parse_block("Fonts", "font", span)?),
            "FontsMasked" => {
                Statement::FontsMasked(self.parse_block("FontsMasked", "masked font", span)?)
            }
            "Bitmaps" => Statement::Bitmaps(self.parse_block("Bitmaps", "bitmap", span)?),
            "BitmapsMasked" => {
                Statement::BitmapsMasked(self.parse_block("BitmapsMasked", "masked bitmap", span)?)
            }
            "Sprites" => Statement::Sprites(self.parse_block("Sprites", "sprite", span)?),
            "Tiles8" => Statement::Tiles8(self.parse_tile_count("Tiles8", span)?),
            "Tiles8Masked" => Statement::Tiles8Masked(self.parse_tile_count("Tiles8Masked", span)?),
            "Tiles16" => Statement::Tiles16(self.parse_tile_count("Tiles16", span)?),
            "Tiles16Masked" => {
                Statement::Tiles16Masked(self.parse_tile_count("Tiles16Masked", span)?)
            }
            "Tiles32" => Statement::Tiles32(self.parse_tile_count("Tiles32", span)?),
            "Tiles32Masked" => {
                Statement::Tiles32Masked(self.parse_tile_count("Tiles32Masked", span)?)
            }
            "B8000Text" => Statement::B8000Text(self.parse_extern_name("B8000Text")?),
            "Terminator" => Statement::Terminator(self.parse_extern_name("Terminator")?),
            "Article" => Statement::Article(self.parse_extern_name("Article")?),
            "Chunk" => Statement::Chunk(self.parse_extern_name("Chunk")?),
            "Demo" => {
                let (index, index_span) = self.expect_u16("Demo")?;
                self.claim_name(EXTERN_NAMESPACE, format!("DEMO{index}"), index_span)?;
                Statement::Demo(index)
            }
            _ => {
                return Err(ScriptError::UnknownStatement { span, keyword });
            }
        };

        if let Some(rank) = rank {
            self.last_graphics = Some((rank, statement.keyword(), span));
        } else if EXTERN_STATEMENTS.contains(&statement.keyword()) {
            self.first_extern.get_or_insert((statement.keyword(), span));
        }

        Ok(statement)
    }

    fn check_once(&mut self, statement: &'static str, span: Span) -> Result<()> {
        if let Some(&first) = self.seen.get(statement) {
            return Err(ScriptError::DuplicateStatement {
                span,
                statement,
                first,
            });
        }
        self.seen.insert(statement, span);
        Ok(())
    }

    // Graphics categories keep the legacy layout: canonical order, all of
    // them before the first extern chunk.
    fn check_layout_order(&self, rank: usize, span: Span) -> Result<()> {
        let statement = GRAPHICS_ORDER[rank];
        if let Some((earlier, at)) = self.first_extern {
            return Err(ScriptError::Order {
                span,
                message: format!(
                    "`{statement}` must come before every misc chunk, but `{earlier}` appears first at {at}"
                ),
            });
        }
        if let Some((last, earlier, at)) = self.last_graphics {
            if last > rank {
                return Err(ScriptError::Order {
                    span,
                    message: format!("`{statement}` must come before `{earlier}` (at {at})"),
                });
            }
        }
        Ok(())
    }

    fn claim_name(&mut self, namespace: &'static str, name: String, span: Span) -> Result<()> {
        if !self.names.insert((namespace, name.clone())) {
            return Err(ScriptError::DuplicateName {
                span,
                namespace,
                name,
            });
        }
        Ok(())
    }

    fn expect_string(&mut self, statement: &str) -> Result<String> {
        let token = self.require_token(&format!("a quoted name after `{statement}`"))?;
        match token.kind {
            TokenKind::Str(s) => Ok(s),
            other => Err(self.syntax(
                token.span,
                format!("expected a quoted name after `{statement}`, found {other}"),
            )),
        }
    }

    fn expect_u16(&mut self, statement: &'static str) -> Result<(u16, Span)> {
        let token = self.require_token(&format!("an integer after `{statement}`"))?;
        let value = match token.kind {
            TokenKind::Number(n) => n,
            other => {
                return Err(self.syntax(
                    token.span,
                    format!("expected an integer after `{statement}`, found {other}"),
                ));
            }
        };
        let value = u16::try_from(value).map_err(|_| ScriptError::Range {
            span: token.span,
            statement,
            value,
            max: u16::MAX as u32,
        })?;
        Ok((value, token.span))
    }

    fn expect_lbrace(&mut self, context: &str) -> Result<()> {
        let token = self.require_token(&format!("'{{' after {context}"))?;
        match token.kind {
            TokenKind::LBrace => Ok(()),
            other => Err(self.syntax(token.span, format!("expected '{{' after {context}, found {other}"))),
        }
    }

    fn parse_tile_count(&mut self, statement: &'static str, span: Span) -> Result<u16> {
        self.check_once(statement, span)?;
        Ok(self.expect_u16(statement)?.0)
    }

    fn parse_extern_name(&mut self, statement: &str) -> Result<String> {
        let name = self.expect_string(statement)?;
        self.claim_name(EXTERN_NAMESPACE, name.clone(), self.last)?;
        Ok(name)
    }

    fn parse_block(
        &mut self,
        statement: &'static str,
        namespace: &'static str,
        span: Span,
    ) -> Result<Vec<Entry>> {
        self.check_once(statement, span)?;
        self.expect_lbrace(&format!("`{statement}`"))?;

        let mut entries = Vec::new();
        loop {
            let token = self.require_token(&format!("'}}' to close `{statement}`"))?;
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Str(name) => {
                    self.claim_name(namespace, name.clone(), token.span)?;
                    entries.push(Entry::Chunk(name));
                }
                TokenKind::Ident(ident) if ident == "Lump" => {
                    entries.push(self.parse_lump(statement, namespace)?);
                }
                other => {
                    return Err(self.syntax(
                        token.span,
                        format!("expected a quoted name, `Lump` or '}}' in `{statement}`, found {other}"),
                    ));
                }
            }
        }
        Ok(entries)
    }

    fn parse_lump(&mut self, statement: &'static str, namespace: &'static str) -> Result<Entry> {
        let name = self.expect_string("Lump")?;
        let name_span = self.last;
        self.claim_name(LUMP_NAMESPACE, name.clone(), name_span)?;
        self.expect_lbrace(&format!("lump \"{name}\""))?;

        let mut members = Vec::new();
        loop {
            let token = self.require_token(&format!("'}}' to close lump \"{name}\""))?;
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Str(member) => {
                    self.claim_name(namespace, member.clone(), token.span)?;
                    members.push(member);
                }
                TokenKind::Ident(ident) if ident == "Lump" => {
                    return Err(self.syntax(
                        token.span,
                        format!("lumps cannot be nested (inside lump \"{name}\" in `{statement}`)"),
                    ));
                }
                other => {
                    return Err(self.syntax(
                        token.span,
                        format!("expected a quoted name or '}}' in lump \"{name}\", found {other}"),
                    ));
                }
            }
        }

        if members.is_empty() {
            return Err(self.syntax(name_span, format!("lump \"{name}\" has no members")));
        }

        Ok(Entry::Lump { name, members })
    }
}
