//! User-declared rewrite rules.
//!
//! A directive comment `(* coq2latex: (typing #G #e #T) := #G \vdash #e : #T *)`
//! maps a head symbol and argument pattern to a LaTeX template. Wildcard
//! arguments carry a leading `#` and are substituted by name.

use regex::{NoExpand, Regex};

use crate::diag::{DiagnosticSink, Event};
use crate::error::Error;
use crate::expr::Expression;

lazy_static! {
    static ref DIRECTIVE: Regex =
        Regex::new(r"(?m)^\s*\(\*\s*coq2latex:\s*(.*?)\s*:=\s*(.*?)\s*\*\)\s*$").unwrap();
}

/// One position of a rule's argument pattern.
#[derive(Clone, Debug)]
pub enum ArgPattern {
    /// The argument's printed source text must equal this exactly.
    Literal(String),
    /// Matches anything; `word` is the compiled whole-word matcher for the
    /// wildcard's name inside the template.
    Wildcard { name: String, word: Regex },
}

pub struct RewriteRule {
    pub head: String,
    pub pattern: Vec<ArgPattern>,
    pub template: String,
}

impl RewriteRule {
    pub fn arity(&self) -> usize {
        self.pattern.len()
    }

    /// A rule applies when the heads agree, the rule consumes no more
    /// arguments than the expression has, and every literal position equals
    /// the printed text of the argument there.
    pub fn applicable(&self, expr: &Expression) -> bool {
        self.head == expr.head
            && self.arity() <= expr.arity()
            && self
                .pattern
                .iter()
                .zip(&expr.tail)
                .all(|(pat, arg)| match pat {
                    ArgPattern::Literal(text) => *text == arg.to_string(),
                    ArgPattern::Wildcard { .. } => true,
                })
    }

    /// Substitute the already-rendered arguments (one per pattern position)
    /// into the template. Wildcard names are replaced whole-word, each
    /// argument wrapped in braces.
    pub fn rewrite(&self, args: &[String]) -> String {
        let mut out = self.template.clone();
        for (pat, arg) in self.pattern.iter().zip(args) {
            if let ArgPattern::Wildcard { word, .. } = pat {
                let grouped = format!("{{{}}}", arg);
                out = word.replace_all(&out, NoExpand(&grouped)).into_owned();
            }
        }
        out
    }
}

/// Collect every rewrite directive in the source, in declaration order.
pub fn parse_rules(
    input: &str,
    diag: &mut dyn DiagnosticSink,
) -> Result<Vec<RewriteRule>, Error> {
    let mut rules = vec![];
    for caps in DIRECTIVE.captures_iter(input) {
        let lhs = caps.get(1).map_or("", |m| m.as_str());
        let rhs = caps.get(2).map_or("", |m| m.as_str());
        diag.emit(Event::RuleParsed { lhs, rhs });
        let lhs_expr = Expression::parse(lhs)?;
        let pattern = lhs_expr
            .tail
            .iter()
            .map(|arg| {
                let text = arg.to_string();
                if text.starts_with('#') {
                    let word = Regex::new(&format!(r"{}\b", regex::escape(&text))).unwrap();
                    ArgPattern::Wildcard { name: text, word }
                } else {
                    ArgPattern::Literal(text)
                }
            })
            .collect();
        rules.push(RewriteRule {
            head: lhs_expr.head,
            pattern,
            template: String::from(rhs),
        });
    }
    Ok(rules)
}

/// The most specific applicable rule: greatest arity wins, ties go to the
/// first-declared rule.
pub fn best_match<'r>(rules: &'r [RewriteRule], expr: &Expression) -> Option<&'r RewriteRule> {
    let mut best: Option<&RewriteRule> = None;
    for rule in rules.iter().filter(|rule| rule.applicable(expr)) {
        match best {
            Some(b) if rule.arity() <= b.arity() => (),
            _ => best = Some(rule),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullSink;

    fn rules(src: &str) -> Vec<RewriteRule> {
        parse_rules(src, &mut NullSink).unwrap()
    }

    #[test]
    fn parse_directive() {
        let rules = rules("(* coq2latex: (R #a #b) := #a \\to #b *)\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].head, "R");
        assert_eq!(rules[0].arity(), 2);
        assert!(matches!(rules[0].pattern[0], ArgPattern::Wildcard { .. }));
    }

    #[test]
    fn literal_positions_must_match_exactly() {
        let rules = rules("(* coq2latex: (eval #e nil) := #e\\Downarrow\\epsilon *)\n");
        assert!(rules[0].applicable(&Expression::parse("eval x nil").unwrap()));
        assert!(!rules[0].applicable(&Expression::parse("eval x (cons y ys)").unwrap()));
    }

    #[test]
    fn substitution_is_whole_word() {
        let rules = rules("(* coq2latex: (f #a) := \\foo{#a}{#ab} *)\n");
        assert_eq!(rules[0].rewrite(&[String::from("x")]), "\\foo{{x}}{#ab}");
    }

    #[test]
    fn greatest_arity_wins() {
        let rules = rules(
            "(* coq2latex: (R #a) := one #a *)\n\
             (* coq2latex: (R #a #b) := two #a #b *)\n",
        );
        let wide = Expression::parse("R p q").unwrap();
        let narrow = Expression::parse("R p").unwrap();
        assert_eq!(best_match(&rules, &wide).map(RewriteRule::arity), Some(2));
        assert_eq!(best_match(&rules, &narrow).map(RewriteRule::arity), Some(1));
    }

    #[test]
    fn first_declared_rule_breaks_ties() {
        let rules = rules(
            "(* coq2latex: (R #a) := first #a *)\n\
             (* coq2latex: (R #b) := second #b *)\n",
        );
        let expr = Expression::parse("R p").unwrap();
        assert_eq!(best_match(&rules, &expr).map(|r| r.template.as_str()), Some("first #a"));
    }
}
