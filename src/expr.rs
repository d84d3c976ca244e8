//! Prefix-application expression trees.
//!
//! A Coq term like `typing G (E.App e1 e2) T` becomes a tree with head
//! `typing` and three children. Trees are never mutated: every
//! transformation builds a new tree.

use std::fmt;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub head: String,
    pub tail: Vec<Expression>,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.tail.is_empty() {
            write!(f, "{}", self.head)
        } else {
            write!(f, "({}", self.head)?;
            for arg in &self.tail {
                write!(f, " {}", arg)?;
            }
            write!(f, ")")
        }
    }
}

impl Expression {
    pub fn atom(head: &str) -> Expression {
        Expression {
            head: String::from(head),
            tail: vec![],
        }
    }

    pub fn arity(&self) -> usize {
        self.tail.len()
    }

    /// Parse one expression from `text`: a head symbol followed by
    /// space-separated arguments, parenthesized arguments nesting freely.
    /// A fully parenthesized text is the printed form of an application and
    /// re-enters through its interior, so printing and parsing round-trip.
    pub fn parse(text: &str) -> Result<Expression, Error> {
        if let Some(inner) = strip_outer_group(text) {
            return Expression::parse(inner);
        }
        let mut cursor = Cursor { text, pos: 0 };
        cursor.parse_expression()
    }

    /// A new tree with every head equal to `from` (at any depth) replaced
    /// by `to`.
    pub fn replace(&self, from: &str, to: &str) -> Expression {
        Expression {
            head: if self.head == from {
                String::from(to)
            } else {
                self.head.clone()
            },
            tail: self.tail.iter().map(|arg| arg.replace(from, to)).collect(),
        }
    }

    /// A new tree in which every head keeps only the text after its last
    /// `.`. Idempotent.
    pub fn erase_namespaces(&self) -> Expression {
        Expression {
            head: String::from(self.head.rsplit('.').next().unwrap_or(&self.head)),
            tail: self.tail.iter().map(Expression::erase_namespaces).collect(),
        }
    }
}

// The interior of `text` if it is one balanced group spanning the whole of
// it, None otherwise.
fn strip_outer_group(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('(')?;
    let mut depth = 1;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return if i == rest.len() - 1 {
                        Some(&rest[..i])
                    } else {
                        None
                    };
                }
            }
            _ => (),
        }
    }
    None
}

struct Cursor<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn rest(&self) -> &'s str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    // Maximal run of non-space, non-parenthesis characters. May be empty.
    fn take_atom(&mut self) -> &'s str {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn parse_expression(&mut self) -> Result<Expression, Error> {
        let head = self.take_atom();
        if head.is_empty() {
            return Err(Error::MissingHead(String::from(self.text)));
        }
        let mut tail = vec![];
        loop {
            match self.peek() {
                None | Some(')') => break,
                _ => {
                    self.bump(); // the single delimiter character
                    if self.peek() == Some('(') {
                        self.bump();
                        let sub = self.parse_expression()?;
                        if self.peek() != Some(')') {
                            return Err(Error::Unbalanced(String::from(self.text)));
                        }
                        self.bump();
                        tail.push(sub);
                    } else {
                        let atom = self.take_atom();
                        if atom.is_empty() {
                            return Err(Error::MissingHead(String::from(self.text)));
                        }
                        tail.push(Expression::atom(atom));
                    }
                }
            }
        }
        Ok(Expression {
            head: String::from(head),
            tail,
        })
    }
}
