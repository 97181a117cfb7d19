//! Converter table precedence and failure tests

use resolve_chain::{CandidateKind, Chain, ResolveError, Source, Via};

#[derive(Debug, Clone, PartialEq)]
struct Celsius(f64);

#[derive(Debug, Clone, PartialEq)]
struct Kelvin(f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + 273.15)
    }
}

#[test]
fn test_exact_converter_beats_supertype() {
    let chain = Chain::<String>::new()
        .assign_if(Some(Celsius(20.0)))
        .convert(|k: Kelvin| format!("{:.2}K", k.0))
        .convert(|c: Celsius| format!("{:.1}C", c.0))
        .widen::<Celsius, Kelvin>();
    assert_eq!(chain.resolve().unwrap(), "20.0C");
}

#[test]
fn test_supertype_converter_applies_after_widening() {
    let chain = Chain::<String>::new()
        .assign_if(Some(Celsius(20.0)))
        .convert(|k: Kelvin| format!("{:.2}K", k.0))
        .widen::<Celsius, Kelvin>();

    let resolution = chain.resolve_detailed().unwrap();
    assert_eq!(resolution.value().map(String::as_str), Some("293.15K"));
    match resolution.source() {
        Source::Candidate {
            via: Via::Widened { supertype },
            ..
        } => assert!(supertype.ends_with("Kelvin")),
        other => panic!("expected widened candidate, got {other:?}"),
    }
}

#[test]
fn test_last_converter_registration_wins() {
    let chain = Chain::<i64>::new()
        .assign_if(Some("abc".to_string()))
        .convert(|s: String| s.len() as i64)
        .convert(|s: String| -(s.len() as i64));
    assert_eq!(chain.resolve().unwrap(), -3);
}

#[test]
fn test_direct_type_skips_converter() {
    let chain = Chain::<i64>::new()
        .assign_if(Some(5_i64))
        .convert(|v: i64| v * 100);
    assert_eq!(chain.resolve().unwrap(), 5);
}

#[test]
fn test_failing_converter_propagates() {
    let chain = Chain::<i64>::new()
        .assign_if(Some("not a number".to_string()))
        .assign_if(Some(1_i64))
        .try_convert(|s: String| s.parse::<i64>())
        .default_value(0);

    match chain.resolve() {
        Err(ResolveError::Conversion { from, target, .. }) => {
            assert_eq!(from, "alloc::string::String");
            assert_eq!(target, "i64");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn test_mixed_input_types() {
    let chain = Chain::<f64>::new()
        .assign_if(None::<u8>)
        .assign_if(Some(3_u8))
        .assign_if(Some("2.5".to_string()))
        .convert(|v: u8| f64::from(v))
        .try_convert(|s: String| s.parse::<f64>());
    assert_eq!(chain.resolve().unwrap(), 3.0);
}

#[test]
fn test_reregistered_converter_keeps_scan_position() {
    let chain = Chain::<String>::new()
        .assign_if(Some(7_i32))
        .convert(|v: i64| format!("first {v}"))
        .convert(|v: f64| format!("float {v}"))
        .convert(|v: i64| format!("wide {v}"))
        .widen::<i32, f64>()
        .widen::<i32, i64>();

    let resolution = chain.resolve_detailed().unwrap();
    assert_eq!(resolution.value().map(String::as_str), Some("wide 7"));
    assert_eq!(
        resolution.source(),
        Source::Candidate {
            index: 0,
            kind: CandidateKind::Literal,
            via: Via::Widened { supertype: "i64" },
        }
    );
}

#[test]
fn test_unconvertible_fallback_reaches_default() {
    let chain = Chain::<i64>::new()
        .assign_if(Some(1.5_f64))
        .or_else(Some("x"))
        .convert(|s: String| s.len() as i64)
        .default_value(9);

    let resolution = chain.resolve_detailed().unwrap();
    assert_eq!(resolution.value(), Some(&9));
    assert_eq!(resolution.source(), Source::DefaultValue);
}
