use std::ops::Range;

use log::debug;
use logos::Logos;
use thiserror::Error;

/// Lexical tokens of the puzzle text format.
///
/// Spaces and tabs are insignificant and skipped; newlines terminate lines and
/// are significant. Anything else, including `\r`, is a lexing error.
#[derive(Logos, Clone, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub(crate) enum Token {
    /// A non-negative decimal integer with no sign.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<usize>().ok())]
    Number(usize),
    /// The dimension separator in the size line.
    #[token("x")]
    X,
    #[token(",")]
    Comma,
    /// Separates a region line's star cells from its empty cells.
    #[token("|")]
    Pipe,
    #[token("\n")]
    Newline,
    /// A `#` comment running to the end of the line. Permitted only before the size line.
    #[regex(r"#[^\n\r]*")]
    Comment,
}

/// Reasons a puzzle text fails to match the grammar.
///
/// Grammar failures are terminal: no partial parse tree is ever returned.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A byte sequence matched no token, or a number overflowed.
    #[error("unrecognized input at byte {at}")]
    UnrecognizedInput {
        /// Byte offset of the offending input.
        at: usize,
    },
    /// A well-formed token appeared where the grammar requires something else.
    #[error("expected {expected} at byte {at}")]
    Expected {
        /// What the grammar requires at this point.
        expected: &'static str,
        /// Byte offset of the offending token.
        at: usize,
    },
    /// The text ended mid-production, e.g. a line missing its terminating newline.
    #[error("expected {expected} at end of input")]
    UnexpectedEnd {
        /// What the grammar requires at this point.
        expected: &'static str,
    },
}

/// The root of a parse tree: one size node and one node per region line, in source order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseTree {
    /// The parsed size line.
    pub size: SizeNode,
    /// The parsed region lines, in the order they appear in the text.
    pub region_lines: Vec<RegionLineNode>,
}

/// The `{rows}x{columns}` size line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeNode {
    /// Declared row count.
    pub rows: usize,
    /// Declared column count.
    pub columns: usize,
}

/// One region line: the coordinates left of `|` carry stars, those right of it do not.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegionLineNode {
    /// Coordinates of the region's star cells.
    pub stars: Vec<CoordNode>,
    /// Coordinates of the region's remaining cells.
    pub empties: Vec<CoordNode>,
}

/// A `row,column` coordinate exactly as written: one-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoordNode {
    /// One-based row.
    pub row: usize,
    /// One-based column.
    pub column: usize,
}

/// Parse puzzle text against the grammar:
///
/// ```text
/// table      := comment* size region_line*
/// comment    := '#' any-non-newline* '\n'
/// size       := integer 'x' integer '\n'
/// region_line:= coord_list? '|' coord_list? '\n'
/// coord_list := coord (whitespace coord)*
/// coord      := integer ',' integer
/// ```
///
/// Returns the full [`ParseTree`] or the first [`SyntaxError`] encountered.
pub fn parse(text: &str) -> Result<ParseTree, SyntaxError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(text).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(SyntaxError::UnrecognizedInput { at: span.start }),
        }
    }

    let mut stream = TokenStream { tokens, pos: 0 };

    // comments are only admitted here, ahead of the size line
    while matches!(stream.peek(), Some(Token::Comment)) {
        stream.advance();
        stream.expect_newline()?;
    }

    let size = stream.size()?;
    let mut region_lines = Vec::new();
    while !stream.at_end() {
        region_lines.push(stream.region_line()?);
    }

    debug!("parsed {}x{} table with {} region lines", size.rows, size.columns, region_lines.len());
    Ok(ParseTree { size, region_lines })
}

struct TokenStream {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
}

impl TokenStream {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn fail(&self, expected: &'static str) -> SyntaxError {
        match self.tokens.get(self.pos) {
            Some((_, span)) => SyntaxError::Expected { expected, at: span.start },
            None => SyntaxError::UnexpectedEnd { expected },
        }
    }

    fn number(&mut self, expected: &'static str) -> Result<usize, SyntaxError> {
        match self.peek() {
            Some(Token::Number(value)) => {
                let value = *value;
                self.advance();
                Ok(value)
            }
            _ => Err(self.fail(expected)),
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), SyntaxError> {
        if self.peek() == Some(&token) {
            self.advance();
            Ok(())
        } else {
            Err(self.fail(expected))
        }
    }

    fn expect_newline(&mut self) -> Result<(), SyntaxError> {
        self.expect(Token::Newline, "a newline")
    }

    fn size(&mut self) -> Result<SizeNode, SyntaxError> {
        let rows = self.number("the size line's row count")?;
        self.expect(Token::X, "`x` in the size line")?;
        let columns = self.number("the size line's column count")?;
        self.expect_newline()?;
        Ok(SizeNode { rows, columns })
    }

    fn region_line(&mut self) -> Result<RegionLineNode, SyntaxError> {
        let stars = self.coord_list()?;
        self.expect(Token::Pipe, "`|` between star and empty coordinates")?;
        let empties = self.coord_list()?;
        self.expect_newline()?;
        Ok(RegionLineNode { stars, empties })
    }

    fn coord_list(&mut self) -> Result<Vec<CoordNode>, SyntaxError> {
        let mut coords = Vec::new();
        while matches!(self.peek(), Some(Token::Number(_))) {
            coords.push(self.coord()?);
        }
        Ok(coords)
    }

    fn coord(&mut self) -> Result<CoordNode, SyntaxError> {
        let row = self.number("a coordinate's row")?;
        self.expect(Token::Comma, "`,` in a coordinate")?;
        let column = self.number("a coordinate's column")?;
        Ok(CoordNode { row, column })
    }
}
