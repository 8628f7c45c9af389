use rinto_tokens::{OperatorTag, NOT_IN_EXPRESSION, NO_PRECEDENCE};

#[test]
fn test_brackets_and_statement_operators_are_outside_precedence_climbing() {
    assert_eq!(OperatorTag::LParen.precedence(), NO_PRECEDENCE);
    assert_eq!(OperatorTag::RParen.precedence(), NO_PRECEDENCE);
    for tag in [OperatorTag::Assign, OperatorTag::Semicolon, OperatorTag::LBrace] {
        assert_eq!(tag.precedence(), NOT_IN_EXPRESSION, "{tag:?}");
    }
    assert!(OperatorTag::Mul.precedence() > OperatorTag::Add.precedence());
}
