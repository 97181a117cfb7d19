//! End-to-end resolution scenarios

use pretty_assertions::assert_eq;
use resolve_chain::{CandidateKind, Chain, Source, Via};

#[test]
fn test_empty_chain_fails_or_is_absent() {
    let chain = Chain::<i64>::new();
    let err = chain.resolve().unwrap_err();
    assert!(err.is_unresolved());
    assert!(err.to_string().contains("'i64'"));
    assert_eq!(chain.resolve_optional().unwrap(), None);
}

#[test]
fn test_null_then_string_parsed_to_int() {
    let chain = Chain::<i32>::new()
        .assign_if(None::<String>)
        .assign_if(Some("42".to_string()))
        .try_convert(|s: String| s.parse::<i32>());
    assert_eq!(chain.resolve().unwrap(), 42);
}

#[test]
fn test_default_factory_without_candidates() {
    let chain = Chain::<i32>::new().default_with(|| 7);
    assert_eq!(chain.resolve().unwrap(), 7);
    assert_eq!(chain.resolve_optional().unwrap(), Some(7));
}

#[test]
fn test_false_predicate_then_or_else() {
    let chain = Chain::<String>::new()
        .assign_if_with(Some("primary".to_string()), |_| false)
        .or_else(Some("fallback".to_string()));
    assert_eq!(chain.resolve().unwrap(), "fallback");
}

#[test]
fn test_no_matching_converter_and_no_default() {
    let chain = Chain::<i32>::new()
        .assign_if(Some(1.5_f64))
        .convert(|s: String| s.len() as i32);
    assert!(chain.resolve().unwrap_err().is_unresolved());
    assert_eq!(chain.resolve_optional().unwrap(), None);
}

#[test]
fn test_default_value_preferred_over_factory() {
    let chain = Chain::<String>::new()
        .default_value("value".to_string())
        .default_with(|| "factory".to_string());
    assert_eq!(chain.resolve().unwrap(), "value");
}

#[test]
fn test_config_style_lookup() {
    let cli_flag: Option<u16> = None;
    let env_value: Option<String> = Some(String::new());
    let file_value: Option<String> = Some("9090".to_string());

    let resolution = Chain::<u16>::new()
        .assign_if(cli_flag)
        .assign_if_with(env_value, |s| !s.is_empty())
        .assign_if(file_value)
        .try_convert(|s: String| s.parse::<u16>())
        .default_value(8080)
        .resolve_detailed()
        .unwrap();

    assert_eq!(resolution.value(), Some(&9090));
    assert_eq!(
        resolution.source(),
        Source::Candidate {
            index: 2,
            kind: CandidateKind::Literal,
            via: Via::Converter,
        }
    );
}

#[test]
fn test_chain_resolves_repeatedly() {
    let chain = Chain::<i64>::new().assign_if(Some(5_i64)).default_value(1);
    assert_eq!(chain.resolve().unwrap(), 5);
    assert_eq!(chain.resolve().unwrap(), 5);
}
