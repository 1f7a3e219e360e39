//! Grammar parser: tokens in, concrete syntax tree out.
//!
//! Accepts both recognised surface grammars concurrently. There is no mode
//! flag: keywords match case-insensitively token by token, so the legacy
//! uppercase form (`read RELATION r { SOURCE s; BASE_SCHEMA x; }`,
//! `ROOT { NAMES = [...] }`) and the lowercase pipeline form
//! (`read relation r { base_schema x; source s; }`, `pipelines { ... }`)
//! land in the same CST nodes.

use crate::ast::{
    Decl, Edge, NameRef, PipelinesDecl, RelationDecl, RelationKindName, RootDecl, SchemaDecl,
    SourceDecl,
};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};
use pf_core::{
    Expr, Field, FileFormat, FileItem, FileLocation, Literal, Measure, PrimitiveKind,
    SortDirection, SortField, SourceKind, Type,
};

/// Parse plan text into a list of declarations.
pub fn parse(text: &str) -> ParseResult<Vec<Decl>> {
    Parser::new(text).parse_plan()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            peeked: None,
        }
    }

    fn peek(&mut self) -> ParseResult<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.as_ref().expect("just filled"))
    }

    fn advance(&mut self) -> ParseResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => Ok(self.lexer.next_token()?),
        }
    }

    fn unexpected<T>(&mut self, expected: &str) -> ParseResult<T> {
        let token = self.peek()?;
        Err(ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.kind.describe(),
            span: token.span,
        })
    }

    fn expect_punct(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.peek()?.kind == kind {
            self.advance()
        } else {
            self.unexpected(what)
        }
    }

    fn expect_ident(&mut self, what: &str) -> ParseResult<(String, Span)> {
        let token = self.peek()?;
        if let TokenKind::Ident(name) = &token.kind {
            let name = name.clone();
            let span = token.span;
            self.advance()?;
            Ok((name, span))
        } else {
            self.unexpected(what)
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<Token> {
        if self.peek()?.is_keyword(keyword) {
            self.advance()
        } else {
            self.unexpected(&format!("'{}'", keyword))
        }
    }

    /// Consume the next token if it matches `kind`.
    fn eat(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.peek()?.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn at_keyword(&mut self, keyword: &str) -> ParseResult<bool> {
        Ok(self.peek()?.is_keyword(keyword))
    }

    // ── Top level ────────────────────────────────────────────────────

    fn parse_plan(&mut self) -> ParseResult<Vec<Decl>> {
        let mut decls = Vec::new();
        loop {
            while self.eat(TokenKind::Semi)? {}
            if self.peek()?.kind == TokenKind::Eof {
                break;
            }
            decls.push(self.parse_decl()?);
        }
        if decls.is_empty() {
            return Err(ParseError::EmptyPlan);
        }
        log::debug!("parsed {} declarations", decls.len());
        Ok(decls)
    }

    fn parse_decl(&mut self) -> ParseResult<Decl> {
        let token = self.peek()?;
        let TokenKind::Ident(name) = &token.kind else {
            return self.unexpected("a declaration");
        };
        let name = name.clone();
        let span = token.span;

        match name.to_ascii_lowercase().as_str() {
            "schema" => self.parse_schema().map(Decl::Schema),
            "source" => self.parse_source().map(Decl::Source),
            "root" => self.parse_root().map(Decl::Root),
            "pipelines" => self.parse_pipelines().map(Decl::Pipelines),
            _ => match RelationKindName::from_name(&name) {
                Some(kind) => self.parse_relation(kind).map(Decl::Relation),
                None => Err(ParseError::UnknownDeclaration {
                    keyword: name,
                    span,
                }),
            },
        }
    }

    // ── Schemas ──────────────────────────────────────────────────────

    fn parse_schema(&mut self) -> ParseResult<SchemaDecl> {
        self.advance()?; // 'schema'
        let (name, span) = self.expect_ident("a schema name")?;
        self.expect_punct(TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        while self.peek()?.kind != TokenKind::RBrace {
            let (field_name, _) = self.expect_ident("a field name")?;
            let ty = self.parse_type()?;
            self.expect_punct(TokenKind::Semi, "';'")?;
            fields.push(Field {
                name: field_name,
                ty,
            });
        }
        self.expect_punct(TokenKind::RBrace, "'}'")?;

        Ok(SchemaDecl { name, span, fields })
    }

    // ── Sources ──────────────────────────────────────────────────────

    fn parse_source(&mut self) -> ParseResult<SourceDecl> {
        self.advance()?; // 'source'
        let (kind_name, kind_span) = self.expect_ident("a source kind")?;
        let (name, span) = self.expect_ident("a source name")?;
        self.expect_punct(TokenKind::LBrace, "'{'")?;

        let kind = match kind_name.to_ascii_lowercase().as_str() {
            "local_files" => self.parse_local_files_body()?,
            "named_table" => self.parse_named_table_body()?,
            "virtual_table" => self.parse_virtual_table_body()?,
            "extension_table" => SourceKind::Extension,
            _ => {
                return Err(ParseError::UnknownSourceKind {
                    kind: kind_name,
                    span: kind_span,
                })
            }
        };

        self.expect_punct(TokenKind::RBrace, "'}'")?;
        Ok(SourceDecl { name, span, kind })
    }

    fn parse_local_files_body(&mut self) -> ParseResult<SourceKind> {
        let mut items = Vec::new();
        if self.at_keyword("items")? {
            self.advance()?;
            self.expect_punct(TokenKind::Equals, "'='")?;
            self.expect_punct(TokenKind::LBracket, "'['")?;
            while self.peek()?.kind != TokenKind::RBracket {
                items.push(self.parse_file_item()?);
                self.eat(TokenKind::Comma)?;
            }
            self.expect_punct(TokenKind::RBracket, "']'")?;
            self.eat(TokenKind::Semi)?;
        }
        Ok(SourceKind::LocalFiles { items })
    }

    fn parse_file_item(&mut self) -> ParseResult<FileItem> {
        let open = self.expect_punct(TokenKind::LBrace, "'{'")?;
        let item_span = open.span;

        let mut location: Option<FileLocation> = None;
        let mut partition_index = None;
        let mut start = None;
        let mut length = None;
        let mut format = None;

        while self.peek()?.kind != TokenKind::RBrace {
            let (key, key_span) = self.expect_ident("a file detail")?;
            self.expect_punct(TokenKind::Colon, "':'")?;
            match key.to_ascii_lowercase().as_str() {
                "uri_file" => {
                    self.set_location(&mut location, FileLocation::UriFile, key_span)?;
                }
                "uri_path" => {
                    self.set_location(&mut location, FileLocation::UriPath, key_span)?;
                }
                "uri_path_glob" => {
                    self.set_location(&mut location, FileLocation::UriPathGlob, key_span)?;
                }
                "uri_folder" => {
                    self.set_location(&mut location, FileLocation::UriFolder, key_span)?;
                }
                "partition_index" => partition_index = Some(self.parse_unsigned()?),
                "start" => start = Some(self.parse_unsigned()?),
                "length" => length = Some(self.parse_unsigned()?),
                "parquet" => {
                    self.expect_punct(TokenKind::LBrace, "'{'")?;
                    self.expect_punct(TokenKind::RBrace, "'}'")?;
                    format = Some(FileFormat::Parquet);
                }
                "orc" => {
                    self.expect_punct(TokenKind::LBrace, "'{'")?;
                    self.expect_punct(TokenKind::RBrace, "'}'")?;
                    format = Some(FileFormat::Orc);
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "a file detail".to_string(),
                        found: format!("identifier '{}'", key),
                        span: key_span,
                    })
                }
            }
        }
        self.expect_punct(TokenKind::RBrace, "'}'")?;

        let Some(location) = location else {
            return Err(ParseError::MissingFileLocation { span: item_span });
        };
        Ok(FileItem {
            location,
            partition_index,
            start,
            length,
            format,
        })
    }

    fn set_location(
        &mut self,
        slot: &mut Option<FileLocation>,
        make: fn(String) -> FileLocation,
        span: Span,
    ) -> ParseResult<()> {
        let value = self.parse_string()?;
        if slot.is_some() {
            return Err(ParseError::DuplicateDetail {
                detail: "file location".to_string(),
                span,
            });
        }
        *slot = Some(make(value));
        Ok(())
    }

    fn parse_named_table_body(&mut self) -> ParseResult<SourceKind> {
        let mut names = Vec::new();
        if self.at_keyword("names")? {
            self.advance()?;
            self.expect_punct(TokenKind::Equals, "'='")?;
            self.expect_punct(TokenKind::LBracket, "'['")?;
            while self.peek()?.kind != TokenKind::RBracket {
                names.push(self.parse_string()?);
                self.eat(TokenKind::Comma)?;
            }
            self.expect_punct(TokenKind::RBracket, "']'")?;
            self.eat(TokenKind::Semi)?;
        }
        Ok(SourceKind::NamedTable { names })
    }

    fn parse_virtual_table_body(&mut self) -> ParseResult<SourceKind> {
        let mut rows = Vec::new();
        if self.at_keyword("rows")? {
            self.advance()?;
            self.expect_punct(TokenKind::Equals, "'='")?;
            self.expect_punct(TokenKind::LBracket, "'['")?;
            while self.peek()?.kind != TokenKind::RBracket {
                self.expect_punct(TokenKind::LBrace, "'{'")?;
                let mut row = Vec::new();
                while self.peek()?.kind != TokenKind::RBrace {
                    row.push(self.parse_literal()?);
                    self.eat(TokenKind::Comma)?;
                }
                self.expect_punct(TokenKind::RBrace, "'}'")?;
                rows.push(row);
                self.eat(TokenKind::Comma)?;
            }
            self.expect_punct(TokenKind::RBracket, "']'")?;
            self.eat(TokenKind::Semi)?;
        }
        Ok(SourceKind::VirtualTable { rows })
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let token = self.peek()?;
        if let TokenKind::Str { value, .. } = &token.kind {
            let value = value.clone();
            self.advance()?;
            Ok(value)
        } else {
            self.unexpected("a string")
        }
    }

    fn parse_unsigned(&mut self) -> ParseResult<u64> {
        let token = self.peek()?;
        if let TokenKind::Integer { value, .. } = token.kind {
            if let Ok(value) = u64::try_from(value) {
                self.advance()?;
                return Ok(value);
            }
        }
        self.unexpected("a non-negative integer")
    }

    /// Type parameters travel as u32 on the wire; larger values are
    /// rejected here rather than truncated.
    fn parse_type_param(&mut self) -> ParseResult<u32> {
        let token = self.peek()?;
        if let TokenKind::Integer { value, .. } = token.kind {
            if let Ok(value) = u32::try_from(value) {
                self.advance()?;
                return Ok(value);
            }
        }
        self.unexpected("a type parameter in u32 range")
    }

    // ── Relations ────────────────────────────────────────────────────

    fn parse_relation(&mut self, kind: RelationKindName) -> ParseResult<RelationDecl> {
        self.advance()?; // kind keyword
        self.expect_keyword("relation")?;
        let (name, span) = self.expect_ident("a relation name")?;
        let mut decl = RelationDecl::new(kind, name, span);
        self.expect_punct(TokenKind::LBrace, "'{'")?;

        while self.peek()?.kind != TokenKind::RBrace {
            self.parse_relation_detail(&mut decl)?;
        }
        self.expect_punct(TokenKind::RBrace, "'}'")?;
        Ok(decl)
    }

    fn parse_relation_detail(&mut self, decl: &mut RelationDecl) -> ParseResult<()> {
        let (detail, span) = self.expect_ident("a relation detail")?;
        match detail.to_ascii_lowercase().as_str() {
            "source" => {
                let reference = self.parse_name_ref("a source name")?;
                set_once(&mut decl.source, reference, "source", span)?;
            }
            "base_schema" => {
                let reference = self.parse_name_ref("a schema name")?;
                set_once(&mut decl.base_schema, reference, "base_schema", span)?;
            }
            "input" => {
                let reference = self.parse_name_ref("a relation name")?;
                set_once(&mut decl.input, reference, "input", span)?;
            }
            "left" => {
                let reference = self.parse_name_ref("a relation name")?;
                set_once(&mut decl.left, reference, "left", span)?;
            }
            "right" => {
                let reference = self.parse_name_ref("a relation name")?;
                set_once(&mut decl.right, reference, "right", span)?;
            }
            "type" => {
                let reference = self.parse_name_ref("a join type")?;
                set_once(&mut decl.join_type, reference, "type", span)?;
            }
            "filter" => {
                let condition = self.parse_expr()?;
                self.expect_punct(TokenKind::Semi, "';'")?;
                if decl.filter.is_some() {
                    return Err(ParseError::DuplicateDetail {
                        detail: "filter".to_string(),
                        span,
                    });
                }
                decl.filter = Some(condition);
            }
            "expression" => {
                let expr = self.parse_expr()?;
                let name = if self.at_keyword("named")? {
                    self.advance()?;
                    Some(self.expect_ident("an output name")?.0)
                } else {
                    None
                };
                self.expect_punct(TokenKind::Semi, "';'")?;
                decl.expressions.push((expr, name));
            }
            "grouping" => {
                let expr = self.parse_expr()?;
                self.expect_punct(TokenKind::Semi, "';'")?;
                decl.groupings.push(expr);
            }
            "measure" => {
                self.parse_measure_block(decl)?;
            }
            "sort" => {
                let expr = self.parse_expr()?;
                let direction = if self.at_keyword("by")? {
                    self.advance()?;
                    let (dir_name, dir_span) = self.expect_ident("a sort direction")?;
                    Some(SortDirection::from_name(&dir_name).ok_or(
                        ParseError::UnknownSortDirection {
                            name: dir_name,
                            span: dir_span,
                        },
                    )?)
                } else {
                    None
                };
                self.expect_punct(TokenKind::Semi, "';'")?;
                decl.sorts.push(SortField { expr, direction });
            }
            "emit" => {
                let column = self.parse_column_name()?;
                self.expect_punct(TokenKind::Semi, "';'")?;
                decl.emits.push(column);
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    expected: "a relation detail".to_string(),
                    found: format!("identifier '{}'", detail),
                    span,
                })
            }
        }
        Ok(())
    }

    fn parse_measure_block(&mut self, decl: &mut RelationDecl) -> ParseResult<()> {
        self.expect_punct(TokenKind::LBrace, "'{'")?;
        while self.peek()?.kind != TokenKind::RBrace {
            self.expect_keyword("measure")?;
            let expr = self.parse_expr()?;
            let output_type = if self.eat(TokenKind::Arrow)? {
                Some(self.parse_type()?)
            } else {
                None
            };
            let name = if self.at_keyword("named")? {
                self.advance()?;
                Some(self.expect_ident("a measure name")?.0)
            } else {
                None
            };
            self.expect_punct(TokenKind::Semi, "';'")?;
            decl.measures.push(Measure {
                expr,
                output_type,
                name,
            });
        }
        self.expect_punct(TokenKind::RBrace, "'}'")?;
        Ok(())
    }

    fn parse_name_ref(&mut self, what: &str) -> ParseResult<NameRef> {
        let (name, span) = self.expect_ident(what)?;
        self.expect_punct(TokenKind::Semi, "';'")?;
        Ok(NameRef { name, span })
    }

    fn parse_column_name(&mut self) -> ParseResult<String> {
        let (first, _) = self.expect_ident("a column name")?;
        if self.eat(TokenKind::Dot)? {
            let (second, _) = self.expect_ident("a column name")?;
            Ok(format!("{}.{}", first, second))
        } else {
            Ok(first)
        }
    }

    // ── Root and pipelines ───────────────────────────────────────────

    fn parse_root(&mut self) -> ParseResult<RootDecl> {
        let token = self.advance()?; // 'root'
        let span = token.span;
        self.expect_punct(TokenKind::LBrace, "'{'")?;
        self.expect_keyword("names")?;
        self.expect_punct(TokenKind::Equals, "'='")?;
        self.expect_punct(TokenKind::LBracket, "'['")?;

        let mut names = Vec::new();
        while self.peek()?.kind != TokenKind::RBracket {
            let (name, name_span) = self.expect_ident("a relation name")?;
            names.push(NameRef {
                name,
                span: name_span,
            });
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.expect_punct(TokenKind::RBracket, "']'")?;
        self.expect_punct(TokenKind::RBrace, "'}'")?;
        Ok(RootDecl { span, names })
    }

    fn parse_pipelines(&mut self) -> ParseResult<PipelinesDecl> {
        let token = self.advance()?; // 'pipelines'
        let span = token.span;
        self.expect_punct(TokenKind::LBrace, "'{'")?;

        let mut edges = Vec::new();
        while self.peek()?.kind != TokenKind::RBrace {
            let (first, first_span) = self.expect_ident("a relation name")?;
            let mut previous = NameRef {
                name: first,
                span: first_span,
            };
            self.expect_punct(TokenKind::Arrow, "'->'")?;
            loop {
                let (next, next_span) = self.expect_ident("a relation name")?;
                let target = NameRef {
                    name: next,
                    span: next_span,
                };
                edges.push(Edge {
                    from: previous,
                    to: target.clone(),
                });
                previous = target;
                if !self.eat(TokenKind::Arrow)? {
                    break;
                }
            }
            self.expect_punct(TokenKind::Semi, "';'")?;
        }
        self.expect_punct(TokenKind::RBrace, "'}'")?;
        Ok(PipelinesDecl { span, edges })
    }

    // ── Types ────────────────────────────────────────────────────────

    fn parse_type(&mut self) -> ParseResult<Type> {
        let (name, span) = self.expect_ident("a type name")?;
        let nullable = self.eat(TokenKind::Question)?;

        match name.to_ascii_lowercase().as_str() {
            "list" => {
                self.expect_punct(TokenKind::Lt, "'<'")?;
                let element = Box::new(self.parse_type()?);
                self.expect_punct(TokenKind::Gt, "'>'")?;
                Ok(Type::List { nullable, element })
            }
            "map" => {
                self.expect_punct(TokenKind::Lt, "'<'")?;
                let key = Box::new(self.parse_type()?);
                self.expect_punct(TokenKind::Comma, "','")?;
                let value = Box::new(self.parse_type()?);
                self.expect_punct(TokenKind::Gt, "'>'")?;
                Ok(Type::Map {
                    nullable,
                    key,
                    value,
                })
            }
            "struct" => {
                self.expect_punct(TokenKind::Lt, "'<'")?;
                let mut fields = Vec::new();
                while self.peek()?.kind != TokenKind::Gt {
                    fields.push(self.parse_type()?);
                    if !self.eat(TokenKind::Comma)? {
                        break;
                    }
                }
                self.expect_punct(TokenKind::Gt, "'>'")?;
                Ok(Type::Struct { nullable, fields })
            }
            _ => {
                let kind = PrimitiveKind::from_name(&name)
                    .ok_or(ParseError::UnknownType { name, span })?;
                let mut params = Vec::new();
                if self.eat(TokenKind::Lt)? {
                    while self.peek()?.kind != TokenKind::Gt {
                        params.push(self.parse_type_param()?);
                        if !self.eat(TokenKind::Comma)? {
                            break;
                        }
                    }
                    self.expect_punct(TokenKind::Gt, "'>'")?;
                }
                Ok(Type::Simple {
                    kind,
                    nullable,
                    params,
                })
            }
        }
    }

    fn suffix_type(&self, suffix: Option<String>, span: Span) -> ParseResult<Option<Type>> {
        match suffix {
            None => Ok(None),
            Some(name) => {
                let kind = PrimitiveKind::from_name(&name)
                    .ok_or(ParseError::UnknownLiteralSuffix { suffix: name, span })?;
                Ok(Some(Type::simple(kind)))
            }
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        while self.at_keyword("as")? {
            self.advance()?;
            let ty = self.parse_type()?;
            expr = Expr::Cast {
                expr: Box::new(expr),
                ty,
            };
        }
        Ok(expr)
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let token = self.peek()?.clone();
        match token.kind {
            TokenKind::Integer { value, suffix } => {
                self.advance()?;
                let ty = self.suffix_type(suffix, token.span)?;
                Ok(Literal::Integer { value, ty })
            }
            TokenKind::Float { value, suffix } => {
                self.advance()?;
                let ty = self.suffix_type(suffix, token.span)?;
                Ok(Literal::Float { value, ty })
            }
            TokenKind::Str { value, suffix } => {
                self.advance()?;
                let ty = self.suffix_type(suffix, token.span)?;
                Ok(Literal::String { value, ty })
            }
            TokenKind::Ident(ref name) if name.eq_ignore_ascii_case("null") => {
                self.advance()?;
                Ok(Literal::Null(None))
            }
            TokenKind::Ident(ref name) if is_typed_null(name) => {
                let suffix = name["null_".len()..].to_string();
                self.advance()?;
                let ty = self.suffix_type(Some(suffix), token.span)?;
                Ok(Literal::Null(ty))
            }
            TokenKind::Ident(ref name) if name.eq_ignore_ascii_case("true") => {
                self.advance()?;
                Ok(Literal::Bool(true))
            }
            TokenKind::Ident(ref name) if name.eq_ignore_ascii_case("false") => {
                self.advance()?;
                Ok(Literal::Bool(false))
            }
            _ => self.unexpected("a literal"),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek()?.clone();
        match token.kind {
            TokenKind::Integer { .. }
            | TokenKind::Float { .. }
            | TokenKind::Str { .. } => Ok(Expr::Literal(self.parse_literal()?)),
            TokenKind::Ident(ref name)
                if name.eq_ignore_ascii_case("null")
                    || name.eq_ignore_ascii_case("true")
                    || name.eq_ignore_ascii_case("false")
                    || is_typed_null(name) =>
            {
                Ok(Expr::Literal(self.parse_literal()?))
            }
            TokenKind::Ident(name) => {
                self.advance()?;
                if self.eat(TokenKind::LParen)? {
                    let mut args = Vec::new();
                    while self.peek()?.kind != TokenKind::RParen {
                        args.push(self.parse_expr()?);
                        if !self.eat(TokenKind::Comma)? {
                            break;
                        }
                    }
                    self.expect_punct(TokenKind::RParen, "')'")?;
                    let output_type = if self.eat(TokenKind::Arrow)? {
                        Some(self.parse_type()?)
                    } else {
                        None
                    };
                    Ok(Expr::Call {
                        function: name,
                        args,
                        output_type,
                    })
                } else if self.eat(TokenKind::Dot)? {
                    let (field, _) = self.expect_ident("a column name")?;
                    Ok(Expr::Column {
                        qualifier: Some(name),
                        name: field,
                    })
                } else {
                    Ok(Expr::Column {
                        qualifier: None,
                        name,
                    })
                }
            }
            _ => self.unexpected("an expression"),
        }
    }
}

/// `null_i32` style typed nulls; identifiers whose tail is not a primitive
/// name (`null_count`) stay ordinary column references.
fn is_typed_null(name: &str) -> bool {
    name.len() > "null_".len()
        && name[.."null_".len()].eq_ignore_ascii_case("null_")
        && PrimitiveKind::from_name(&name["null_".len()..]).is_some()
}

fn set_once(
    slot: &mut Option<NameRef>,
    value: NameRef,
    detail: &str,
    span: Span,
) -> ParseResult<()> {
    if slot.is_some() {
        return Err(ParseError::DuplicateDetail {
            detail: detail.to_string(),
            span,
        });
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
