//! Bottom-up LaTeX rendering, mathpartir flavoured.

use std::fmt::Write;

use crate::diag::{DiagnosticSink, Event};
use crate::expr::Expression;
use crate::extract::Definition;
use crate::rewrite::{best_match, RewriteRule};

const INDENT: &str = "    ";

/// Render one expression. Children render first; the best-matching rewrite
/// rule consumes its arity's worth of them, any remaining arguments are
/// appended. With no matching rule the head applies to its arguments in
/// plain `head(arg, ...)` form.
pub fn render_expression(
    expr: &Expression,
    rules: &[RewriteRule],
    diag: &mut dyn DiagnosticSink,
) -> String {
    let mut args = vec![];
    for arg in &expr.tail {
        args.push(render_expression(arg, rules, diag));
    }

    let parts = match best_match(rules, expr) {
        Some(rule) => {
            let rewritten = rule.rewrite(&args[..rule.arity()]);
            diag.emit(Event::RuleApplied {
                head: &expr.head,
                output: &rewritten,
            });
            let mut parts = vec![rewritten];
            parts.extend(args.drain(rule.arity()..));
            parts
        }
        None => {
            let mut parts = vec![expr.head.clone()];
            parts.append(&mut args);
            parts
        }
    };

    if parts.len() == 1 {
        parts.into_iter().next().unwrap_or_default()
    } else {
        format!("{}({})", parts[0], parts[1..].join(", "))
    }
}

/// Render one constructor as a mathpartir inference-rule block. The
/// constructor name labels the rule; an empty premise list renders as the
/// `~` placeholder.
pub fn render_definition(
    def: &Definition,
    rules: &[RewriteRule],
    diag: &mut dyn DiagnosticSink,
) -> String {
    let premises: Vec<String> = def
        .premises
        .iter()
        .map(|p| render_expression(p, rules, diag))
        .collect();
    let conclusion = render_expression(&def.conclusion, rules, diag);

    let mut out = String::new();
    let _ = writeln!(out, "\\begin{{mathpar}}");
    let _ = writeln!(out, "\\inferrule* [Right={}]", def.name);
    let _ = writeln!(out, "{{");
    if premises.is_empty() {
        let _ = writeln!(out, "{}~", INDENT);
    } else {
        for (i, premise) in premises.iter().enumerate() {
            let sep = if i + 1 < premises.len() { " \\\\" } else { "" };
            let _ = writeln!(out, "{}{}{}", INDENT, premise, sep);
        }
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out, "{{");
    let _ = writeln!(out, "{}{}", INDENT, conclusion);
    let _ = writeln!(out, "}}");
    let _ = writeln!(out, "\\end{{mathpar}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::NullSink;
    use crate::rewrite::parse_rules;

    #[test]
    fn fallback_rendering_is_flat_application() {
        let expr = Expression::parse("typing G (app e1 e2) T").unwrap();
        let out = render_expression(&expr, &[], &mut NullSink);
        assert_eq!(out, "typing(G, app(e1, e2), T)");
    }

    #[test]
    fn matched_rule_substitutes_rendered_children() {
        let rules = parse_rules("(* coq2latex: (R #a #b) := #a \\to #b *)\n", &mut NullSink).unwrap();
        let expr = Expression::parse("R p q").unwrap();
        assert_eq!(render_expression(&expr, &rules, &mut NullSink), "{p} \\to {q}");
    }

    #[test]
    fn surplus_arguments_append_after_the_rewritten_head() {
        let rules = parse_rules("(* coq2latex: (subst #e) := #e' *)\n", &mut NullSink).unwrap();
        let expr = Expression::parse("subst x y").unwrap();
        assert_eq!(render_expression(&expr, &rules, &mut NullSink), "{x}'(y)");
    }

    #[test]
    fn empty_premises_render_as_placeholder() {
        let def = Definition {
            name: String::from("Ax"),
            bound: vec![],
            premises: vec![],
            conclusion: Expression::parse("ok emptyenv").unwrap(),
        };
        let block = render_definition(&def, &[], &mut NullSink);
        assert!(block.contains("\\inferrule* [Right=Ax]"));
        assert!(block.contains("    ~\n"));
        assert!(block.contains("    ok(emptyenv)\n"));
    }
}
