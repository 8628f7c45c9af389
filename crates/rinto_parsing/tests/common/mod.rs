use rinto_ast::{Backend, LoweredScope, NamedObject};
use rinto_common::Location;
use rinto_parsing::Parser;
use rinto_tokens::{FloatValue, OperatorTag};

/// Records the calls it receives, rendering every handle as an s-expression
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<String>,
}

impl RecordingBackend {
    fn record(&mut self, call: String) -> String {
        self.calls.push(call.clone());
        call
    }
}

impl Backend for RecordingBackend {
    type Variable = String;
    type Expression = String;
    type Statement = String;

    fn variable(&mut self, object: &NamedObject) -> String {
        object.identifier().to_string()
    }

    fn invalid_expression(&mut self) -> String {
        self.record("invalid_expression()".to_string())
    }

    fn unary_expression(&mut self, op: OperatorTag, operand: String, _: &Location) -> String {
        format!("({op} {operand})")
    }

    fn binary_expression(
        &mut self,
        op: OperatorTag,
        left: String,
        right: String,
        _: &Location,
    ) -> String {
        format!("({op} {left} {right})")
    }

    fn var_reference(&mut self, variable: String, _: &Location) -> String {
        variable
    }

    fn float_expression(&mut self, value: &FloatValue, _: &Location) -> String {
        value.to_string()
    }

    fn conditional_expression(&mut self, condition: String, _: &Location) -> String {
        format!("(cond {condition})")
    }

    fn invalid_statement(&mut self) -> String {
        self.record("invalid_statement()".to_string())
    }

    fn var_dec_statement(&mut self, variable: String) -> String {
        self.record(format!("var_dec_statement({variable})"))
    }

    fn assignment_statement(&mut self, lhs: String, rhs: String, _: &Location) -> String {
        self.record(format!("assignment_statement({lhs}, {rhs})"))
    }

    fn inc_statement(&mut self, operand: String, _: &Location) -> String {
        self.record(format!("inc_statement({operand})"))
    }

    fn dec_statement(&mut self, operand: String, _: &Location) -> String {
        self.record(format!("dec_statement({operand})"))
    }

    fn if_statement(
        &mut self,
        condition: String,
        body: LoweredScope<String>,
        _: &Location,
    ) -> String {
        self.record(format!(
            "if_statement({condition}, [{}])",
            body.statements.join(", ")
        ))
    }

    fn for_statement(
        &mut self,
        init: Option<String>,
        condition: Option<String>,
        increment: Option<String>,
        body: LoweredScope<String>,
        _: &Location,
    ) -> String {
        let clause = |clause: Option<String>| clause.unwrap_or_else(|| "_".to_string());
        self.record(format!(
            "for_statement({}, {}, {}, [{}])",
            clause(init),
            clause(condition),
            clause(increment),
            body.statements.join(", ")
        ))
    }

    fn expression_statement(&mut self, expression: String, _: &Location) -> String {
        self.record(format!("expression_statement({expression})"))
    }

    fn compound_statement(&mut self, first: String, second: String, _: &Location) -> String {
        self.record(format!("compound_statement({first}, {second})"))
    }

    fn enter_scope(&mut self) {
        self.calls.push("enter_scope()".to_string());
    }

    fn leave_scope(&mut self) {
        self.calls.push("leave_scope()".to_string());
    }
}

/// Parses and lowers source text, returning the backend and every diagnostic message
pub fn lower(src: &str) -> (RecordingBackend, Vec<String>) {
    let mut parser = Parser::from_source("main.rin", src, RecordingBackend::default());
    parser.parse();
    parser.lower();
    let (backend, diagnostics) = parser.into_parts();
    let messages = diagnostics
        .messages()
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect();
    (backend, messages)
}
