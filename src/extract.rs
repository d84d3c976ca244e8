//! Locating inductive declarations and pulling their constructors apart.
//!
//! The first pass works on a single-line `Inductive ... : ... Prop := ...`
//! declaration and mechanically separates bound variables, premises and the
//! conclusion. A second pass over the raw source recovers the user's chosen
//! binder names and any `x(*alt*)` rename annotations, since the mechanical
//! pass only sees the quantifier clause.

use std::fmt;

use regex::Regex;

use crate::diag::{DiagnosticSink, Event};
use crate::error::Error;
use crate::expr::Expression;
use crate::mask::{segments, split_masked};

lazy_static! {
    static ref CTOR: Regex = Regex::new(r"^(\S+) : (.*)$").unwrap();
    static ref GROUP: Regex = Regex::new(r"^\((.*?) : (.*)\)$").unwrap();
    static ref COMMENT: Regex = Regex::new(r"\(\*(.*?)\*\)").unwrap();
}

/// One constructor clause of a relation, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub bound: Vec<String>,
    pub premises: Vec<Expression>,
    pub conclusion: Expression,
}

impl Definition {
    /// A new definition with every head equal to `from` replaced by `to`,
    /// in premises and conclusion alike.
    pub fn replace(&self, from: &str, to: &str) -> Definition {
        Definition {
            name: self.name.clone(),
            bound: self.bound.clone(),
            premises: self.premises.iter().map(|p| p.replace(from, to)).collect(),
            conclusion: self.conclusion.replace(from, to),
        }
    }

    pub fn erase_namespaces(&self) -> Definition {
        Definition {
            name: self.name.clone(),
            bound: self.bound.clone(),
            premises: self.premises.iter().map(Expression::erase_namespaces).collect(),
            conclusion: self.conclusion.erase_namespaces(),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} := ({})", self.name, self.bound.join(","))?;
        write!(f, " (")?;
        for (i, premise) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", premise)?;
        }
        write!(f, ") {})", self.conclusion)
    }
}

fn local_name(relation: &str) -> &str {
    relation.rsplit('.').next().unwrap_or(relation)
}

// `forall x y` carries no parenthesized groups; give it one so the group
// walk below sees the same shape either way.
fn normalize_forall(clause: &str) -> String {
    if clause.contains('(') {
        String::from(clause)
    } else {
        match clause.strip_prefix("forall ") {
            Some(rest) => format!("forall ({})", rest),
            None => String::from(clause),
        }
    }
}

pub struct Extractor<'s> {
    source: &'s str,
    parts: Vec<&'s str>,
}

impl<'s> Extractor<'s> {
    /// Pre-split the source on masked `.` once. These sentence parts back
    /// the second pass that recovers user-chosen binder names.
    pub fn new(source: &'s str) -> Result<Extractor<'s>, Error> {
        Ok(Extractor {
            source,
            parts: split_masked(source, ".")?,
        })
    }

    /// All constructor definitions of `relation`, in declaration order.
    pub fn extract(
        &self,
        relation: &str,
        diag: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Definition>, Error> {
        let local = local_name(relation);
        let decl = Regex::new(&format!(
            r"(?m)^Inductive {} : (?:.*?)Prop :=\s*(.*)$",
            regex::escape(local)
        ))
        .unwrap();
        let caps = decl
            .captures(self.source)
            .ok_or_else(|| Error::DeclarationNotFound(String::from(relation)))?;
        diag.emit(Event::DeclarationFound { relation: local });
        // the declaration's closing period is not part of the body
        let body = caps
            .get(1)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_end_matches('.')
            .trim_end();

        let mut defs = vec![];
        for ctor in split_masked(body, " | ")? {
            defs.push(self.constructor(local, ctor, diag)?);
        }
        Ok(defs)
    }

    fn constructor(
        &self,
        relation: &str,
        ctor: &str,
        diag: &mut dyn DiagnosticSink,
    ) -> Result<Definition, Error> {
        let caps = CTOR
            .captures(ctor.trim())
            .ok_or_else(|| Error::MissingHead(String::from(ctor)))?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let mut bound: Vec<String> = vec![];
        let mut premises = vec![];
        let body_parts = split_masked(body, ", ")?;
        if body_parts.len() == 2 && body_parts[0].starts_with("forall ") {
            let clause = normalize_forall(body_parts[0]);
            for token in segments(&clause)?.iter().skip(1) {
                let token = token.trim();
                if let Some(group) = GROUP.captures(token) {
                    let vars = group.get(1).map_or("", |m| m.as_str());
                    let ty = group.get(2).map_or("", |m| m.as_str());
                    if vars == "_" {
                        premises.push(Expression::parse(ty)?);
                    } else {
                        bound.extend(vars.split_whitespace().map(String::from));
                    }
                } else if let Some(inner) = token
                    .strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                {
                    // untyped binder group
                    bound.extend(inner.split_whitespace().map(String::from));
                }
            }
        }

        // implication premises chained before the conclusion
        let tail = body_parts.last().copied().unwrap_or(body);
        let mut arrow_parts = split_masked(tail, " -> ")?;
        let conclusion_text = arrow_parts.pop().unwrap_or(tail);
        for part in arrow_parts {
            premises.push(Expression::parse(part.trim())?);
        }
        let conclusion = Expression::parse(conclusion_text.trim())?;

        let mut def = Definition {
            name: String::from(name),
            bound,
            premises,
            conclusion,
        };

        let recovered = self.original_names(relation, name)?.unwrap_or_default();
        if recovered.len() != def.bound.len() {
            return Err(Error::BinderCountMismatch {
                relation: String::from(relation),
                ctor: String::from(name),
                parsed: def.bound.clone(),
                recovered,
            });
        }
        let pairs: Vec<(String, String)> = def
            .bound
            .iter()
            .cloned()
            .zip(recovered.iter().cloned())
            .collect();
        for (mechanical, original) in &pairs {
            let target = match self.alternative_name(relation, name, original) {
                Some(alt) if alt == "\\" => format!("\\{}", original),
                Some(alt) => alt,
                None => original.clone(),
            };
            if target != *mechanical {
                diag.emit(Event::Rename {
                    relation,
                    ctor: name,
                    from: mechanical,
                    to: &target,
                });
            }
            def = def.replace(mechanical, &target);
        }
        Ok(def.erase_namespaces())
    }

    // Last sentence part mentioning the declaration, as the user wrote it.
    fn declaration_part(&self, relation: &str) -> Option<&'s str> {
        let decl = Regex::new(&format!(
            r"Inductive\s+{}(\s|,|:)",
            regex::escape(relation)
        ))
        .unwrap();
        self.parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| decl.is_match(part))
            .last()
    }

    // The raw clause of one constructor inside the declaration text.
    fn constructor_clause(&self, relation: &str, ctor: &str) -> Result<Option<&'s str>, Error> {
        let part = match self.declaration_part(relation) {
            Some(part) => part,
            None => return Ok(None),
        };
        let body = split_masked(part, ":=")?.last().copied().unwrap_or(part);
        let head = Regex::new(&format!(r"^{}\s*:", regex::escape(ctor))).unwrap();
        for clause in split_masked(body, "|")? {
            let clause = clause.trim();
            if head.is_match(clause) {
                return Ok(Some(clause));
            }
        }
        Ok(None)
    }

    // The binder names as the user listed them in the constructor's own
    // quantifier, left to right, placeholders dropped.
    fn original_names(&self, relation: &str, ctor: &str) -> Result<Option<Vec<String>>, Error> {
        let clause = match self.constructor_clause(relation, ctor)? {
            Some(clause) => clause,
            None => return Ok(None),
        };
        let quant = Regex::new(&format!(
            r"^{}\s*:\s*forall\s*(.*)",
            regex::escape(ctor)
        ))
        .unwrap();
        let caps = match quant.captures(clause) {
            Some(caps) => caps,
            None => return Ok(None),
        };
        let quant_text = caps.get(1).map_or("", |m| m.as_str());
        let quant_text = split_masked(quant_text, ",")?
            .first()
            .copied()
            .unwrap_or(quant_text);
        let stripped = COMMENT.replace_all(quant_text, "");
        let mut names = vec![];
        for token in segments(stripped.as_ref())? {
            let token = token.trim();
            let vars = token.split(':').next().unwrap_or(token);
            let vars = vars.trim().trim_start_matches('(');
            for name in vars.split_whitespace() {
                if name != "_" {
                    names.push(String::from(name));
                }
            }
        }
        Ok(Some(names))
    }

    // A trailing `var(*alt*)` comment annotation on the variable, if any.
    fn alternative_name(&self, relation: &str, ctor: &str, var: &str) -> Option<String> {
        let clause = self.constructor_clause(relation, ctor).ok().flatten()?;
        let annot = Regex::new(&format!(r"\b{}\(\*(.*?)\*\)", regex::escape(var))).unwrap();
        let caps = annot.captures(clause)?;
        Some(String::from(caps.get(1).map_or("", |m| m.as_str())))
    }
}
