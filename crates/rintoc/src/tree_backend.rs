//! A backend that renders the lowered tree as s-expressions

use itertools::Itertools as _;
use rinto_ast::{Backend, LoweredScope, NamedObject};
use rinto_common::Location;
use rinto_tokens::{FloatValue, OperatorTag};
use tracing::trace;

/// Lowers every node into its s-expression rendering, e.g. `(assign x (+ x 1))`.
///
/// Scopes render as `(scope ...)` and missing for loop clauses as `_`.
#[derive(Debug, Default)]
pub struct TreeBackend {
    depth: usize,
}

impl TreeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many nested scopes are currently being lowered
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn scope(body: LoweredScope<String>) -> String {
        if body.statements.is_empty() {
            "(scope)".to_string()
        } else {
            format!("(scope {})", body.statements.iter().join(" "))
        }
    }
}

impl Backend for TreeBackend {
    type Variable = String;
    type Expression = String;
    type Statement = String;

    fn variable(&mut self, object: &NamedObject) -> String {
        trace!("variable {object}");
        object.identifier().to_string()
    }

    fn invalid_expression(&mut self) -> String {
        trace!("invalid expression");
        "<invalid>".to_string()
    }

    fn unary_expression(&mut self, op: OperatorTag, operand: String, location: &Location) -> String {
        trace!("unary {op} at {location}");
        format!("({op} {operand})")
    }

    fn binary_expression(
        &mut self,
        op: OperatorTag,
        left: String,
        right: String,
        location: &Location,
    ) -> String {
        trace!("binary {op} at {location}");
        format!("({op} {left} {right})")
    }

    fn var_reference(&mut self, variable: String, location: &Location) -> String {
        trace!("reference to {variable} at {location}");
        variable
    }

    fn float_expression(&mut self, value: &FloatValue, location: &Location) -> String {
        trace!("float {value} at {location}");
        value.to_string()
    }

    fn conditional_expression(&mut self, condition: String, location: &Location) -> String {
        trace!("condition at {location}");
        format!("(cond {condition})")
    }

    fn invalid_statement(&mut self) -> String {
        trace!("invalid statement");
        "<invalid>".to_string()
    }

    fn var_dec_statement(&mut self, variable: String) -> String {
        trace!("declaration of {variable}");
        format!("(var-dec {variable})")
    }

    fn assignment_statement(&mut self, lhs: String, rhs: String, location: &Location) -> String {
        trace!("assignment to {lhs} at {location}");
        format!("(assign {lhs} {rhs})")
    }

    fn inc_statement(&mut self, operand: String, location: &Location) -> String {
        trace!("increment at {location}");
        format!("(inc {operand})")
    }

    fn dec_statement(&mut self, operand: String, location: &Location) -> String {
        trace!("decrement at {location}");
        format!("(dec {operand})")
    }

    fn if_statement(
        &mut self,
        condition: String,
        body: LoweredScope<String>,
        location: &Location,
    ) -> String {
        trace!("if statement at {location}");
        format!("(if {condition} {})", Self::scope(body))
    }

    fn for_statement(
        &mut self,
        init: Option<String>,
        condition: Option<String>,
        increment: Option<String>,
        body: LoweredScope<String>,
        location: &Location,
    ) -> String {
        trace!("for statement at {location}");
        let clause = |clause: Option<String>| clause.unwrap_or_else(|| "_".to_string());
        format!(
            "(for {} {} {} {})",
            clause(init),
            clause(condition),
            clause(increment),
            Self::scope(body)
        )
    }

    fn expression_statement(&mut self, expression: String, location: &Location) -> String {
        trace!("expression statement at {location}");
        format!("(expr {expression})")
    }

    fn compound_statement(&mut self, first: String, second: String, location: &Location) -> String {
        trace!("compound statement at {location}");
        format!("(compound {first} {second})")
    }

    fn enter_scope(&mut self) {
        self.depth += 1;
        trace!("entered scope, depth {}", self.depth);
    }

    fn leave_scope(&mut self) {
        trace!("leaving scope, depth {}", self.depth);
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinto_parsing::Parser;
    use test_log::test;

    fn render(src: &str) -> Vec<String> {
        let mut parser = Parser::from_source("main.rin", src, TreeBackend::new());
        parser.parse();
        assert!(
            !parser.diagnostics().has_errors(),
            "unexpected diagnostics: {:?}",
            parser.diagnostics().messages()
        );
        let statements = parser.lower();
        assert_eq!(parser.backend().depth(), 0);
        statements
    }

    #[test]
    fn test_render_declarations() {
        assert_eq!(
            render("float x = 1\nx = x * 2 + 1\n"),
            ["(compound (var-dec x) (assign x 1))", "(assign x (+ (* x 2) 1))"]
        );
    }

    #[test]
    fn test_render_if() {
        assert_eq!(
            render("float x;\nif x > 0 {\n  x++\n}\n"),
            ["(var-dec x)", "(if (cond (> x 0)) (scope (inc (++ x))))"]
        );
    }

    #[test]
    fn test_render_for() {
        assert_eq!(
            render("float t = 0\nfor float i = 0; i < 3; i++ {\n  t = t + i\n}\n"),
            [
                "(compound (var-dec t) (assign t 0))",
                "(for (compound (var-dec i) (assign i 0)) (expr (cond (< i 3))) (inc (++ i)) (scope (assign t (+ t i))))"
            ]
        );
    }

    #[test]
    fn test_render_empty_bodies() {
        assert_eq!(
            render("float x\nif x {\n}\nfor ; ; {\n}\n"),
            ["(var-dec x)", "(if (cond x) (scope))", "(for _ _ _ (scope))"]
        );
    }
}
