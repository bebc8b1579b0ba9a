use std::{collections::HashMap, fs};

use rolox::{
    Session,
    ast::{Expr, NodeIds, Stmt},
    error::{ErrorReporter, ExecError, ParseError, ResolveError, RuntimeError, StaticError},
    interpreter::value::Value,
    parse, resolve, run, scan,
};
use walkdir::WalkDir;

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn eval(src: &str) -> Value {
    Session::new().run_expression(src)
                  .unwrap_or_else(|e| panic!("Expression failed: {e}"))
}

#[test]
fn example_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "lox")
                                     })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&content) {
            panic!("Script {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn arithmetic_and_grouping() {
    assert_eq!(eval("1 + 2 * 3"), Value::Number(7.0));
    assert_eq!(eval("(1 + 2) * 3"), Value::Number(9.0));
    assert_eq!(eval("10 - 4 - 3"), Value::Number(3.0));
    assert_eq!(eval("-(-3)"), Value::Number(3.0));
    assert_eq!(eval("10 / 4"), Value::Number(2.5));
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_eq!(eval("1 / 0"), Value::Number(f64::INFINITY));
    assert_eq!(eval("-1 / 0"), Value::Number(f64::NEG_INFINITY));
}

#[test]
fn string_concatenation() {
    assert_eq!(eval(r#""foo" + "bar""#), Value::Str("foobar".to_string()));
    assert_eq!(eval(r#""" + """#), Value::Str(String::new()));
}

#[test]
fn comparisons_and_equality() {
    assert_eq!(eval("2 < 3"), Value::Bool(true));
    assert_eq!(eval("3 <= 3"), Value::Bool(true));
    assert_eq!(eval("2 > 3"), Value::Bool(false));
    assert_eq!(eval("1 == 1"), Value::Bool(true));
    assert_eq!(eval(r#""a" == "a""#), Value::Bool(true));
    assert_eq!(eval("nil == nil"), Value::Bool(true));

    // Equality never coerces.
    assert_eq!(eval(r#"1 == "1""#), Value::Bool(false));
    assert_eq!(eval("0 == false"), Value::Bool(false));
    assert_eq!(eval("nil == false"), Value::Bool(false));
    assert_eq!(eval("1 != 2"), Value::Bool(true));
}

#[test]
fn truthiness() {
    assert_eq!(eval("!nil"), Value::Bool(true));
    assert_eq!(eval("!false"), Value::Bool(true));
    // Zero and the empty string are truthy.
    assert_eq!(eval("!0"), Value::Bool(false));
    assert_eq!(eval(r#"!"""#), Value::Bool(false));
}

#[test]
fn logical_operators_return_operands_and_short_circuit() {
    assert_eq!(eval("nil or 2"), Value::Number(2.0));
    assert_eq!(eval("1 or 2"), Value::Number(1.0));
    assert_eq!(eval("1 and 2"), Value::Number(2.0));
    assert_eq!(eval("false and 2"), Value::Bool(false));

    // `missing` is undefined; short-circuiting must skip it entirely.
    assert_eq!(eval("false and missing"), Value::Bool(false));
    assert_eq!(eval("1 or missing"), Value::Number(1.0));
}

#[test]
fn ternary_operator() {
    assert_eq!(eval("true ? 1 : 2"), Value::Number(1.0));
    assert_eq!(eval("false ? 1 : 2"), Value::Number(2.0));
    // Right-associative: groups as a ? b : (c ? d : e).
    assert_eq!(eval("false ? 1 : true ? 2 : 3"), Value::Number(2.0));
    // Only the selected branch may touch an undefined name.
    assert_eq!(eval("true ? 1 : missing"), Value::Number(1.0));
}

#[test]
fn ternary_without_colon_is_an_error() {
    match run("true ? 1;") {
        Err(ExecError::Static(errors)) => {
            assert!(errors.iter()
                          .any(|e| matches!(e, StaticError::Parse(ParseError::Expected { .. }))));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn number_formatting() {
    assert_eq!(eval("8 / 4").to_string(), "2");
    assert_eq!(eval("10 / 4").to_string(), "2.5");
    assert_eq!(eval(r#""text""#).to_string(), "text");
    assert_eq!(eval("nil").to_string(), "nil");
}

#[test]
fn variables_and_block_scoping() {
    let mut session = Session::new();
    session.run("var a = 1; var b; { var a = 2; b = a; }")
           .unwrap();

    // The inner declaration shadowed the outer one without replacing it.
    assert_eq!(session.run_expression("b").unwrap(), Value::Number(2.0));
    assert_eq!(session.run_expression("a").unwrap(), Value::Number(1.0));
}

#[test]
fn declaration_without_initializer_is_nil() {
    let mut session = Session::new();
    session.run("var a;").unwrap();
    assert_eq!(session.run_expression("a").unwrap(), Value::Nil);
}

#[test]
fn assignment_is_an_expression() {
    let mut session = Session::new();
    session.run("var a; var b; a = b = 2;").unwrap();
    assert_eq!(session.run_expression("a").unwrap(), Value::Number(2.0));
    assert_eq!(session.run_expression("b").unwrap(), Value::Number(2.0));
}

#[test]
fn assignment_to_undefined_variable_fails() {
    assert!(matches!(run("a = 1;"),
                     Err(ExecError::Runtime(RuntimeError::UndefinedVariable { .. }))));
}

#[test]
fn functions_and_recursion() {
    let mut session = Session::new();
    session.run("fun fib(n) {
                     if (n < 2) return n;
                     return fib(n - 2) + fib(n - 1);
                 }
                 var r = fib(10);")
           .unwrap();
    assert_eq!(session.run_expression("r").unwrap(), Value::Number(55.0));
}

#[test]
fn function_without_return_yields_nil() {
    let mut session = Session::new();
    session.run("fun noop() {} var r = noop();").unwrap();
    assert_eq!(session.run_expression("r").unwrap(), Value::Nil);
}

#[test]
fn closures_capture_their_defining_scope() {
    let mut session = Session::new();
    session.run("fun makeCounter() {
                     var i = 0;
                     fun count() {
                         i = i + 1;
                         return i;
                     }
                     return count;
                 }
                 var counter = makeCounter();
                 var a = counter();
                 var b = counter();")
           .unwrap();

    assert_eq!(session.run_expression("a").unwrap(), Value::Number(1.0));
    assert_eq!(session.run_expression("b").unwrap(), Value::Number(2.0));
}

#[test]
fn resolution_is_static_not_dynamic() {
    // The classic: a closure keeps seeing the binding that was visible
    // where it was written, even after a shadowing declaration.
    let mut session = Session::new();
    session.run(r#"var first;
                   var second;
                   var a = "global";
                   {
                       fun showA() { return a; }
                       first = showA();
                       var a = "block";
                       second = showA();
                   }"#)
           .unwrap();

    assert_eq!(session.run_expression("first").unwrap(),
               Value::Str("global".to_string()));
    assert_eq!(session.run_expression("second").unwrap(),
               Value::Str("global".to_string()));
}

#[test]
fn anonymous_functions_are_values() {
    let mut session = Session::new();
    session.run("var twice = fun (f, x) { return f(f(x)); };
                 fun inc(n) { return n + 1; }
                 var r = twice(inc, 1);")
           .unwrap();
    assert_eq!(session.run_expression("r").unwrap(), Value::Number(3.0));

    assert_eq!(eval("(fun (x) { return x * 2; })(21)"), Value::Number(42.0));
}

#[test]
fn while_and_for_loops() {
    let mut session = Session::new();
    session.run("var n = 1; while (n < 100) n = n * 2;").unwrap();
    assert_eq!(session.run_expression("n").unwrap(), Value::Number(128.0));

    // The accumulator encodes iteration order: 1, then 2, then 3.
    let mut session = Session::new();
    session.run("var sum = 0;
                 for (var i = 1; i <= 3; i = i + 1) sum = sum * 10 + i;")
           .unwrap();
    assert_eq!(session.run_expression("sum").unwrap(),
               Value::Number(123.0));

    // The loop variable must not leak out of the desugared block.
    assert!(matches!(session.run_expression("i"),
                     Err(ExecError::Runtime(RuntimeError::UndefinedVariable { .. }))));
}

#[test]
fn for_loop_clauses_are_optional() {
    let mut session = Session::new();
    session.run("var i = 0; for (; i < 3;) i = i + 1;").unwrap();
    assert_eq!(session.run_expression("i").unwrap(), Value::Number(3.0));
}

#[test]
fn binding_distances_reflect_scope_depth() {
    let source = "{
                      var a = 1;
                      {
                          var b = 2;
                          {
                              var c = 3;
                              print a + b + c;
                          }
                      }
                  }";

    let mut reporter = ErrorReporter::new();
    let mut ids = NodeIds::new();
    let tokens = scan(source, &mut reporter);
    let statements = parse(&tokens, &mut ids, &mut reporter);
    let locals = resolve(&statements, &mut reporter);
    assert!(!reporter.had_errors(), "{:?}", reporter.errors());

    let mut distances = HashMap::new();
    collect_variable_distances(&statements, &locals, &mut distances);

    assert_eq!(distances.get("c"), Some(&0));
    assert_eq!(distances.get("b"), Some(&1));
    assert_eq!(distances.get("a"), Some(&2));
}

fn collect_variable_distances(statements: &[Stmt],
                              locals: &HashMap<usize, usize>,
                              out: &mut HashMap<String, usize>) {
    for statement in statements {
        match statement {
            Stmt::Block { statements, .. } => {
                collect_variable_distances(statements, locals, out);
            },
            Stmt::Print { expr, .. } | Stmt::Expression { expr, .. } => {
                collect_variables(expr, locals, out);
            },
            Stmt::Var { initializer: Some(expr), .. } => {
                collect_variables(expr, locals, out);
            },
            _ => {},
        }
    }
}

fn collect_variables(expr: &Expr,
                     locals: &HashMap<usize, usize>,
                     out: &mut HashMap<String, usize>) {
    match expr {
        Expr::Variable { name, id, .. } => {
            if let Some(distance) = locals.get(id) {
                out.insert(name.clone(), *distance);
            }
        },
        Expr::Binary { left, right, .. } => {
            collect_variables(left, locals, out);
            collect_variables(right, locals, out);
        },
        Expr::Grouping { expr, .. } => collect_variables(expr, locals, out),
        _ => {},
    }
}

#[test]
fn parser_recovers_and_reports_every_error() {
    match run("var 1 = 2;\nvar y = ;\nprint 3;") {
        Err(ExecError::Static(errors)) => assert_eq!(errors.len(), 2, "{errors:?}"),
        other => panic!("Expected static errors, got {other:?}"),
    }
}

#[test]
fn invalid_assignment_target_is_reported() {
    match run("1 + 2 = 3;") {
        Err(ExecError::Static(errors)) => {
            assert!(errors.iter().any(|e| {
                matches!(e, StaticError::Parse(ParseError::InvalidAssignmentTarget { .. }))
            }));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn binary_operator_without_left_operand_is_reported() {
    match run("* 3;") {
        Err(ExecError::Static(errors)) => {
            assert!(errors.iter().any(|e| {
                matches!(e, StaticError::Parse(ParseError::MissingLeftOperand { .. }))
            }));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn lexical_errors_are_reported_with_lines() {
    match run("/* a\nb */\nvar x = ;") {
        Err(ExecError::Static(errors)) => {
            // The block comment spans two lines, so the error is on line 3.
            assert!(matches!(errors[0],
                             StaticError::Parse(ParseError::ExpectedExpression { line: 3, .. })),
                    "{errors:?}");
        },
        other => panic!("Expected a static error, got {other:?}"),
    }

    match run("var s = \"abc") {
        Err(ExecError::Static(errors)) => {
            assert!(errors.iter().any(|e| {
                matches!(e, StaticError::Parse(ParseError::UnterminatedString { .. }))
            }));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }

    match run("var x = 1 @ 2;") {
        Err(ExecError::Static(errors)) => {
            assert!(matches!(errors[0],
                             StaticError::Parse(ParseError::UnexpectedCharacter { .. })));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn comments_are_skipped() {
    assert_success("// just a comment");
    assert_success("/* block */ print 1; // trailing");
    assert_success("/* spans\nseveral\nlines */ print 2;");
    // An unterminated block comment swallows the rest of the input.
    assert_success("print 3; /* open");
}

#[test]
fn resolver_rejects_duplicate_local_declarations() {
    match run("{ var a = 1; var a = 2; }") {
        Err(ExecError::Static(errors)) => {
            assert!(matches!(errors[0],
                             StaticError::Resolve(ResolveError::VariableAlreadyDeclared { .. })));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }

    // Globals may redeclare freely.
    assert_success("var a = 1; var a = 2;");
}

#[test]
fn resolver_rejects_self_referencing_initializer() {
    match run("{ var a = 1; { var a = a; } }") {
        Err(ExecError::Static(errors)) => {
            assert!(matches!(errors[0],
                             StaticError::Resolve(ResolveError::SelfReferencingInitializer { .. })));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn resolver_rejects_top_level_return() {
    match run("return 1;") {
        Err(ExecError::Static(errors)) => {
            assert!(matches!(errors[0],
                             StaticError::Resolve(ResolveError::TopLevelReturn { .. })));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }

    assert_success("fun f() { return 1; } f();");
}

#[test]
fn runtime_type_errors() {
    assert!(matches!(run(r#"-"str";"#),
                     Err(ExecError::Runtime(RuntimeError::OperandMustBeNumber { .. }))));
    assert!(matches!(run(r#"1 + "a";"#),
                     Err(ExecError::Runtime(RuntimeError::OperandsMustBeNumbersOrStrings { .. }))));
    assert!(matches!(run(r#""a" < "b";"#),
                     Err(ExecError::Runtime(RuntimeError::OperandsMustBeNumbers { .. }))));
    assert!(matches!(run("print missing;"),
                     Err(ExecError::Runtime(RuntimeError::UndefinedVariable { .. }))));
    assert!(matches!(run(r#""hi"();"#),
                     Err(ExecError::Runtime(RuntimeError::NotCallable { .. }))));
}

#[test]
fn arity_is_checked() {
    match run("fun f(a) { return a; } f();") {
        Err(ExecError::Runtime(RuntimeError::ArityMismatch { expected, found, .. })) => {
            assert_eq!(expected, 1);
            assert_eq!(found, 0);
        },
        other => panic!("Expected an arity error, got {other:?}"),
    }

    assert_failure("fun f() {} f(1);");
}

#[test]
fn clock_native_function() {
    assert_eq!(eval("clock() >= 0"), Value::Bool(true));
    assert!(matches!(run("clock(1);"),
                     Err(ExecError::Runtime(RuntimeError::ArityMismatch { .. }))));
}

#[test]
fn bare_expression_rejects_trailing_tokens() {
    match Session::new().run_expression("1 2") {
        Err(ExecError::Static(errors)) => {
            assert!(matches!(errors[0],
                             StaticError::Parse(ParseError::UnexpectedTrailingTokens { .. })));
        },
        other => panic!("Expected a static error, got {other:?}"),
    }
}

#[test]
fn static_errors_prevent_execution() {
    let mut session = Session::new();
    // The declaration parses but the second statement does not; nothing may
    // run, so `a` must remain undefined afterwards.
    assert!(session.run("var a = 1; var b = ;").is_err());
    assert!(matches!(session.run_expression("a"),
                     Err(ExecError::Runtime(RuntimeError::UndefinedVariable { .. }))));
}
