//! CSS selector engine
//!
//! Supported grammar (a practical subset of Selectors Level 3):
//!
//! ```text
//! list     := complex ( "," complex )*
//! complex  := compound ( ( " " | ">" ) compound )*
//! compound := ( tag | "*" )? ( "#" id | "." class | "[" attr ( "=" value )? "]" )*
//! ```
//!
//! Matching runs right to left: the rightmost compound is tested against the
//! candidate, then combinators walk up the ancestor chain.

use std::str::FromStr;

use crate::arena::Document;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrSelector {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

impl Compound {
    fn matches(&self, node: &DomNode) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !node.node_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, node.attr(&a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// One selector of a comma list; `parts[0]` is the leftmost compound and each
/// later part records how it relates to the part before it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches_at(&self, doc: &Document, node_id: NodeId, idx: usize) -> bool {
        let (combinator, compound) = &self.parts[idx];
        let node = match doc.get(node_id) {
            Ok(node) => node,
            Err(_) => return false,
        };
        if !compound.matches(node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let mut ancestor = node.parent_id;
        while let Some(ancestor_id) = ancestor {
            if self.matches_at(doc, ancestor_id, idx - 1) {
                return true;
            }
            if *combinator == Combinator::Child {
                return false;
            }
            ancestor = doc.get(ancestor_id).ok().and_then(|n| n.parent_id);
        }
        false
    }
}

/// A parsed, comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self> {
        Parser::new(input).parse_list()
    }

    /// True when any selector in the list matches the node
    pub fn matches(&self, doc: &Document, node_id: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|s| s.matches_at(doc, node_id, s.parts.len() - 1))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::selector(self.input, reason)
    }

    fn parse_list(&mut self) -> Result<SelectorList> {
        let mut selectors = vec![self.parse_complex()?];
        while self.peek() == Some(',') {
            self.bump();
            selectors.push(self.parse_complex()?);
        }
        if let Some(c) = self.peek() {
            return Err(self.error(format!("unexpected '{}'", c)));
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<Complex> {
        let mut parts: Vec<(Combinator, Compound)> = Vec::new();
        self.skip_ws();

        loop {
            let combinator = if parts.is_empty() {
                Combinator::Descendant
            } else {
                let had_ws = self.skip_ws();
                match self.peek() {
                    None | Some(',') => break,
                    Some('>') => {
                        self.bump();
                        self.skip_ws();
                        Combinator::Child
                    }
                    Some(_) if had_ws => Combinator::Descendant,
                    Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
                }
            };
            parts.push((combinator, self.parse_compound()?));
        }

        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        let start = self.pos;

        match self.peek() {
            Some('*') => {
                self.bump();
            }
            Some(c) if is_ident_char(c) => compound.tag = Some(self.parse_ident()?),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.parse_attr()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found '{}'", c)),
                None => self.error("expected a selector"),
            });
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(c) = self.peek().filter(|c| is_ident_char(*c)) {
            ident.push(c);
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn parse_attr(&mut self) -> Result<AttrSelector> {
        self.skip_ws();
        let name = self.parse_ident()?;
        self.skip_ws();

        let value = match self.bump() {
            Some(']') => return Ok(AttrSelector { name, value: None }),
            Some('=') => {
                self.skip_ws();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.bump();
                        let mut value = String::new();
                        loop {
                            match self.bump() {
                                Some(c) if c == quote => break,
                                Some(c) => value.push(c),
                                None => return Err(self.error("unterminated string")),
                            }
                        }
                        value
                    }
                    _ => self.parse_ident()?,
                };
                self.skip_ws();
                value
            }
            _ => return Err(self.error("malformed attribute selector")),
        };

        if self.bump() != Some(']') {
            return Err(self.error("expected ']'"));
        }
        Ok(AttrSelector {
            name,
            value: Some(value),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
