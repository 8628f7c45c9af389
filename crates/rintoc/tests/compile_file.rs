use rinto_common::Severity;
use rintoc::{Emit, RintoC, RintoCErrorKind};
use test_log::test;
use tracing::info;

mod common;

#[test]
fn test_compile_single_file() -> eyre::Result<()> {
    let file = common::source_file(
        "float total = 0\n\
         for float i = 0; i < 10; i++ {\n\
         \x20 if i > 4 {\n\
         \x20   total = total + i\n\
         \x20 }\n\
         }\n",
    );
    info!("compiling {:?}", file.path());
    let mut rintoc = RintoC::builder().build()?;
    let compilation = rintoc.compile(file.path())?;

    assert_eq!(compilation.path(), file.path());
    assert!(compilation.diagnostics().is_empty());
    assert_eq!(
        compilation.statements(),
        [
            "(compound (var-dec total) (assign total 0))",
            "(for (compound (var-dec i) (assign i 0)) (expr (cond (< i 10))) (inc (++ i)) \
             (scope (if (cond (> i 4)) (scope (assign total (+ total i))))))"
        ]
    );
    Ok(())
}

#[test]
fn test_emit_none() -> eyre::Result<()> {
    let file = common::source_file("float x = 1\nx++\n");
    let mut rintoc = RintoC::builder().emit(Emit::None).build()?;
    let compilation = rintoc.compile(file.path())?;
    assert!(compilation.statements().is_empty());
    Ok(())
}

#[test]
fn test_errors_fail_compilation() -> eyre::Result<()> {
    let file = common::source_file("float x\ny = 1\nx = 2 + ;\n");
    let mut rintoc = RintoC::builder().build()?;
    let error = rintoc.compile(file.path()).expect_err("should not compile");

    match error.kind() {
        RintoCErrorKind::Diagnostics { path, errors } => {
            assert_eq!(path, file.path());
            assert_eq!(*errors, 2);
        }
        other => panic!("unexpected error kind: {other}"),
    }
    let messages = error
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message())
        .collect::<Vec<_>>();
    assert_eq!(
        messages,
        ["'y' is undefined", "expected expression as operand of '+' operator"]
    );
    assert!(error
        .to_string()
        .ends_with("due to 2 previous error(s)"));
    Ok(())
}

#[test]
fn test_quote_chars() -> eyre::Result<()> {
    let file = common::source_file("y = 1\n");
    let mut rintoc = RintoC::builder().quote_chars("‘", "’").build()?;
    let error = rintoc.compile(file.path()).expect_err("should not compile");
    assert_eq!(error.diagnostics()[0].message(), "‘y’ is undefined");
    Ok(())
}

#[test]
fn test_warnings_as_errors_on_clean_file() -> eyre::Result<()> {
    let file = common::source_file("float x\nx = x * 2\n");
    let mut rintoc = RintoC::builder().warnings_as_errors(true).build()?;
    let compilation = rintoc.compile(file.path())?;
    assert_eq!(compilation.warning_count(), 0);
    assert_eq!(compilation.statements(), ["(var-dec x)", "(assign x (* x 2))"]);
    Ok(())
}

#[test]
fn test_compile_all_gathers_errors() -> eyre::Result<()> {
    let good = common::source_file("float x\n");
    let bad = common::source_file("x++\n");
    let mut rintoc = RintoC::builder().build()?;

    let compilations = rintoc.compile_all(vec![good.path().to_path_buf()])?;
    assert_eq!(compilations.len(), 1);

    let error = rintoc
        .compile_all(vec![
            good.path().to_path_buf(),
            bad.path().to_path_buf(),
            good.path().with_extension("missing"),
        ])
        .expect_err("should not compile");
    let RintoCErrorKind::Multi(errors) = error.kind() else {
        panic!("expected multiple errors, got {}", error.kind());
    };
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0].kind(), RintoCErrorKind::Diagnostics { .. }));
    assert!(matches!(errors[1].kind(), RintoCErrorKind::Fatal(_)));
    assert_eq!(error.diagnostics().len(), 2);
    assert_eq!(error.diagnostics()[1].severity(), Severity::Fatal);
    Ok(())
}
