use std::{cell::RefCell, rc::Rc};

use lazex::{
    evaluate, EvalError, ExprError, Expression, HostValue, LazyValue, LexError, SyntaxError, Value,
};
use pretty_assertions::assert_eq;

fn assert_value(source: &str, expected: &str) {
    let value = evaluate(source).unwrap_or_else(|e| panic!("'{source}' failed: {e}"));
    assert_eq!(value.to_string(), expected, "source: {source}");
}

fn assert_fails(source: &str) {
    assert!(evaluate(source).is_err(), "'{source}' succeeded but was expected to fail");
}

#[test]
fn arithmetic_precedence() {
    assert_value("2+3*4", "14");
    assert_value("(2+3)*4", "20");
    assert_value("8 - 5", "3");
    assert_value("10 / 2", "5");
    assert_value("10 / 4", "2.5");
    assert_value("7 % 4", "3");
}

#[test]
fn power_operator() {
    assert_value("2^10", "1024");
    assert_value("2^-2", "0.25");
    assert_value("4^0.5", "2");
    assert_value("9^0.5", "3");
    assert_value("(-2)^2", "4");

    let root_two = evaluate("2^0.5").unwrap().to_string();
    assert!(root_two.starts_with("1.41421356"), "2^0.5 was {root_two}");

    // A fractional power of a negative base has no real value.
    assert_fails("(-2)^0.5");
}

#[test]
fn power_is_right_associative() {
    // 2^(3^2), not (2^3)^2.
    assert_value("2^3^2", "512");
}

#[test]
fn short_circuit() {
    // The right side divides by zero, but the left side already decides.
    assert_value("0 != 0 && (1/0 > 0)", "0");
    assert_value("1 == 1 || (1/0 > 0)", "1");
    assert_fails("1/0 > 0");
    assert_value("1 > 0 && 2 > 1", "1");
    assert_value("0 > 1 || 0 > 2", "0");
}

#[test]
fn conditionals() {
    assert_value("if(1 > 0, 10, 20)", "10");
    assert_value("if(0 > 1, 10, 20)", "20");

    // The untaken branch is never forced: the assignment must not happen.
    assert_value("if(1, 1, x = 9); x", "0");
}

#[test]
fn case_selects_first_true_condition() {
    assert_value("case(0, 1, 1, 2, 3)", "2");
    assert_value("case(0, 1, 0, 2, 3)", "3");
    assert_value("case(1, 'yes', 'no')", "yes");

    // Arity must be odd and at least three.
    assert_fails("case(1, 2)");
    assert_fails("case(1, 2, 3, 4)");
}

#[test]
fn assignment_and_reuse() {
    let mut expression = Expression::new("x = 5; x * 2");
    assert_eq!(expression.eval().unwrap(), Value::from(10));
    assert_eq!(expression.variable("x").unwrap(), Some(Value::from(5)));

    assert_value("x = 5", "5");
    assert_value("x = y = 3; x + y", "6");
}

#[test]
fn assignment_needs_a_variable() {
    let error = evaluate("3 = 4").unwrap_err();
    assert!(matches!(error, ExprError::Eval(EvalError::UnboundAssignment { .. })),
            "got {error:?}");
}

#[test]
fn swap_exchanges_bindings() {
    let mut expression = Expression::new("a <> b");
    expression.set_variable("a", Value::from(1))
              .set_variable("b", Value::from(2));
    expression.eval().unwrap();
    assert_eq!(expression.variable("a").unwrap(), Some(Value::from(2)));
    assert_eq!(expression.variable("b").unwrap(), Some(Value::from(1)));

    assert_fails("1 <> 2");
}

#[test]
fn reduce_accumulates() {
    assert_value("reduce(acc + _, list(1, 2, 3, 4), 0)", "10");
    assert_value("reduce(acc + _, list(), 7)", "7");
    assert_value("reduce(acc * _, list(1, 2, 3, 4), 1)", "24");
}

#[test]
fn repeated_evaluation_replays_the_cached_tree() {
    let mut pure = Expression::new("2 + 3");
    assert_eq!(pure.eval().unwrap(), Value::from(5));
    assert_eq!(pure.eval().unwrap(), Value::from(5));

    // Side effects re-execute on replay.
    let mut counting = Expression::new("x = x + 1");
    counting.eval().unwrap();
    counting.eval().unwrap();
    assert_eq!(counting.variable("x").unwrap(), Some(Value::from(2)));
}

#[test]
fn malformed_input() {
    assert_fails("2+");
    assert_fails("");
    assert_fails("   ");
    assert_fails("(2+3");
    assert_fails("2+3)");
    assert_fails("1, 2");

    // Two adjacent literals report a missing operator at the second one.
    let error = evaluate("2 3").unwrap_err();
    assert!(matches!(error, ExprError::Syntax(SyntaxError::MissingOperator { offset: 2 })),
            "got {error:?}");

    let error = evaluate("2 @ 3").unwrap_err();
    assert!(matches!(error,
                     ExprError::Syntax(SyntaxError::UnknownOperator { ref op, offset: 2 }) if op == "@"),
            "got {error:?}");

    let error = evaluate("foo(1)").unwrap_err();
    assert!(error.to_string().contains("foo"), "got {error}");

    let error = evaluate("'abc").unwrap_err();
    assert!(matches!(error, ExprError::Lex(LexError::UnterminatedString { offset: 0 })),
            "got {error:?}");
}

#[test]
fn hex_literals() {
    assert_value("0xFF", "255");
    assert_value("0x10 + 1", "17");

    let error = evaluate("0x + 1").unwrap_err();
    assert!(matches!(error, ExprError::Lex(LexError::MalformedNumber { offset: 0 })),
            "got {error:?}");
}

#[test]
fn strings() {
    assert_value("'hello'", "hello");

    // Adjacent quoted literals continue one another.
    assert_value("'ab' 'cd'", "abcd");

    // Addition concatenates when either side is text.
    assert_value("'a' + 1", "a1");
    assert_value("1 + 'a'", "1a");
    assert_value("'a' < 'b'", "1");
}

#[test]
fn cross_type_total_order() {
    assert_value("NULL < 0", "1");
    assert_value("1 < 'a'", "1");
    assert_value("list(1, 2) > 'z'", "1");
    assert_value("list(1, 2) == list(1, 2)", "1");
    assert_value("list(1) < list(1, 1)", "1");
    assert_value("NULL == NULL", "1");
}

#[test]
fn inequality_and_its_legacy_mode() {
    assert_value("2 != 3", "1");
    assert_value("2 != 2", "0");

    // The historical engine answered equality for `!=`.
    let mut legacy = Expression::new("2 != 2");
    legacy.registry_mut().use_legacy_inequality();
    assert_eq!(legacy.eval().unwrap(), Value::from(1));

    let mut legacy = Expression::new("2 != 3");
    legacy.registry_mut().use_legacy_inequality();
    assert_eq!(legacy.eval().unwrap(), Value::from(0));
}

#[test]
fn unary_operators() {
    assert_value("-3 + 5", "2");
    assert_value("- -3", "3");
    assert_value("+5", "5");

    // Unary minus binds tighter than the power operator.
    assert_value("-2^2", "4");
    assert_value("2^-2", "0.25");

    assert_fails("+'a'");
}

#[test]
fn implicit_multiplication() {
    assert_value("2(3+4)", "14");
    assert_value("(1+1)(2+2)", "8");
    assert_value("(2)(3)", "6");

    let mut expression = Expression::new("2x");
    expression.set_variable("x", Value::from(5));
    assert_eq!(expression.eval().unwrap(), Value::from(10));
}

#[test]
fn math_functions() {
    assert_value("sqrt(9)", "3");
    assert_value("sin(0)", "0");
    assert_value("sin(90)", "1");
    assert_value("cos(0)", "1");
    assert_value("abs(-5)", "5");
    assert_value("floor(3.7)", "3");
    assert_value("floor(-3.2)", "-4");
    assert_value("ceil(3.2)", "4");
    assert_value("round(3.14159, 2)", "3.14");
    assert_value("relu(-3)", "0");
    assert_value("relu(4)", "4");
    assert_value("fact(5)", "120");
    assert_value("not(0)", "1");
    assert_value("not(3)", "0");
    assert_value("log(1)", "0");

    assert_fails("sqrt(-1)");
    assert_fails("atanh(2)");
    assert_fails("sqrt(1, 2)");
}

#[test]
fn min_and_max_are_variadic() {
    assert_value("min(3, 1, 2)", "1");
    assert_value("max(3, 1, 2)", "3");
    assert_value("min(4)", "4");
    assert_fails("min()");
}

#[test]
fn division_by_zero() {
    let error = evaluate("1 / 0").unwrap_err();
    assert!(matches!(error, ExprError::Eval(EvalError::DivisionByZero { .. })),
            "got {error:?}");
    let error = evaluate("1 % 0").unwrap_err();
    assert!(matches!(error, ExprError::Eval(EvalError::DivisionByZero { .. })),
            "got {error:?}");
}

#[test]
fn iteration_constructs() {
    assert_value("loop(_ + 1, 5)", "5");
    assert_value("loop(_, 0)", "0");
    assert_value("loop(x = x + 1, 3); x", "3");
    assert_value("while(_ < 3, 10, _)", "2");
    assert_value("while(_ < 100, 3, _)", "2");
    assert_value("while(0, 10, _)", "0");
    assert_value("map(_ * 2, list(1, 2, 3))", "[2, 4, 6]");
    assert_value("for(_ > 1, list(1, 2, 3))", "2");

    assert_fails("map(_, 5)");
}

#[test]
fn loop_bindings_are_restored() {
    let mut expression = Expression::new("loop(_, 3)");
    expression.set_variable("_", Value::from(99));
    assert_eq!(expression.eval().unwrap(), Value::from(2));
    assert_eq!(expression.variable("_").unwrap(), Some(Value::from(99)));

    let mut expression = Expression::new("reduce(acc + _, list(1), 0)");
    expression.set_variable("acc", Value::from(42));
    assert_eq!(expression.eval().unwrap(), Value::from(1));
    assert_eq!(expression.variable("acc").unwrap(), Some(Value::from(42)));
}

#[test]
fn loop_bindings_are_restored_on_error() {
    let mut expression = Expression::new("map(1 / 0, list(1))");
    expression.set_variable("_", Value::from(7));
    assert!(expression.eval().is_err());
    assert_eq!(expression.variable("_").unwrap(), Some(Value::from(7)));
}

#[test]
fn sequencing_reports_to_the_log_sink() {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);

    let mut expression = Expression::new("x = 1; x + 1; print(100)");
    expression.set_log_output(move |line| sink.borrow_mut().push(line.to_owned()));
    assert_eq!(expression.eval().unwrap(), Value::from(100));
    assert_eq!(*lines.borrow(), vec!["1", "2", "100"]);
}

#[test]
fn print_passes_its_value_through() {
    assert_value("print(5) + 1", "6");
}

#[test]
fn textual_variable_binding() {
    let mut expression = Expression::new("a * 2");
    expression.set_variable_text("a", "5");
    assert_eq!(expression.eval().unwrap(), Value::from(10));

    let mut expression = Expression::new("s");
    expression.set_variable_text("s", "hi");
    assert_eq!(expression.eval().unwrap().to_string(), "hi");

    let mut expression = Expression::new("if(n, 1, 2)");
    expression.set_variable_text("n", "null");
    assert_eq!(expression.eval().unwrap(), Value::from(2));
}

#[test]
fn lazy_variables_are_forced_on_read() {
    let mut expression = Expression::new("t + 1");
    expression.set_lazy_variable("t", LazyValue::thunk(|_context| Ok(Value::from(7))));
    assert_eq!(expression.eval().unwrap(), Value::from(8));
}

#[test]
fn seeded_constants() {
    assert_value("PI > 3.14 && PI < 3.15", "1");
    assert_value("e > 2.7 && e < 2.72", "1");
    assert_value("TRUE", "1");
    assert_value("FALSE", "0");
    assert_value("if(TRUE, 1, 2)", "1");

    // Constants carry no binding name, so they cannot be assigned to.
    let error = evaluate("PI = 3").unwrap_err();
    assert!(matches!(error, ExprError::Eval(EvalError::UnboundAssignment { .. })),
            "got {error:?}");
}

#[test]
fn unset_variables_default_to_zero() {
    assert_value("y", "0");
    assert_value("y + 3", "3");
}

#[derive(Debug)]
struct Points(Vec<i64>);

impl HostValue for Points {
    fn text(&self) -> String {
        format!("{} point(s)", self.0.len())
    }

    fn items(&self) -> Option<Vec<Value>> {
        Some(self.0.iter().map(|n| Value::from(*n)).collect())
    }
}

#[test]
fn host_values_plug_into_coercion_and_iteration() {
    let mut expression = Expression::new("map(_ * 2, points)");
    expression.set_variable("points", Value::host(Rc::new(Points(vec![1, 2]))));
    assert_eq!(expression.eval().unwrap().to_string(), "[2, 4]");

    let mut expression = Expression::new("if(points, 'some', 'none'); print(points)");
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    expression.set_variable("points", Value::host(Rc::new(Points(vec![1, 2, 3]))));
    expression.set_log_output(move |line| sink.borrow_mut().push(line.to_owned()));
    expression.eval().unwrap();
    assert_eq!(*lines.borrow(), vec!["some", "3 point(s)"]);
}

#[test]
fn sequencing_yields_the_right_side() {
    assert_value("1; 2; 3", "3");
    assert_value("x = 2; y = 3; x * y", "6");
}
