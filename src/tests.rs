#[cfg(test)]
mod tests {
    use crate::diag::NullSink;
    use crate::error::Error;
    use crate::extract::Extractor;
    use crate::render::render_definition;
    use crate::rewrite::parse_rules;

    fn translate(source: &str, relation: &str) -> Result<Vec<String>, Error> {
        let rules = parse_rules(source, &mut NullSink)?;
        let extractor = Extractor::new(source)?;
        let defs = extractor.extract(relation, &mut NullSink)?;
        Ok(defs
            .iter()
            .map(|def| render_definition(def, &rules, &mut NullSink))
            .collect())
    }

    /// A single constructor with one implication premise, rendered with no
    /// rewrite rules at all.
    #[test]
    fn simple_relation() {
        let src = "Inductive T : Prop := C1 : forall (x : nat), P x -> Q x.\n";
        let blocks = translate(src, "T").unwrap();
        assert_eq!(blocks.len(), 1);
        let expected = concat!(
            "\\begin{mathpar}\n",
            "\\inferrule* [Right=C1]\n",
            "{\n",
            "    P(x)\n",
            "}\n",
            "{\n",
            "    Q(x)\n",
            "}\n",
            "\\end{mathpar}\n",
        );
        assert_eq!(blocks[0], expected);
    }

    #[test]
    fn rewrite_rule_shapes_the_conclusion() {
        let src = "(* coq2latex: (R #a #b) := #a \\to #b *)\n\
                   Inductive T : Prop := C : forall (p : X) (q : X), R p q.\n";
        let blocks = translate(src, "T").unwrap();
        assert!(blocks[0].contains("    {p} \\to {q}\n"));
    }

    #[test]
    fn multiple_constructors_in_declaration_order() {
        let src = "Inductive le : Prop := \
                   le_n : forall (n : nat), le n n \
                   | le_S : forall (n : nat) (m : nat), le n m -> le n (S m).\n";
        let blocks = translate(src, "le").unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("[Right=le_n]"));
        assert!(blocks[0].contains("    ~\n"));
        assert!(blocks[1].contains("[Right=le_S]"));
        assert!(blocks[1].contains("    le(n, m) \\\\\n") || blocks[1].contains("    le(n, m)\n"));
    }

    /// A missing relation is reported per relation and leaves the others
    /// untouched.
    #[test]
    fn missing_relation_does_not_poison_the_run() {
        let src = "Inductive T : Prop := C : forall (x : nat), Q x.\n";
        assert!(translate(src, "T").is_ok());
        assert_eq!(
            translate(src, "U"),
            Err(Error::DeclarationNotFound(String::from("U")))
        );
        // and the present relation still extracts afterwards
        assert!(translate(src, "T").is_ok());
    }

    /// The elaborated declaration is parsed, the user's later declaration
    /// supplies the display names, and a rewrite rule then sees them.
    #[test]
    fn renames_feed_into_rewrite_rules() {
        let src = "(* coq2latex: (ok #G) := #G \\vdash \\diamond *)\n\
                   Inductive T : Prop := C : forall (x : env), ok x.\n\
                   Inductive T : Prop := C : forall (G(*\\Gamma*) : env), ok G.\n";
        let blocks = translate(src, "T").unwrap();
        assert!(blocks[0].contains("    {\\Gamma} \\vdash \\diamond\n"));
    }

    #[test]
    fn qualified_heads_lose_their_namespace() {
        let src = "Inductive T : Prop := C : forall (e : expr), value (E.Lam e).\n";
        let blocks = translate(src, "T").unwrap();
        assert!(blocks[0].contains("    value(Lam(e))\n"));
    }
}
