//! Lazy evaluation and short-circuit tests

use super::test_utils::Counter;
use resolve_chain::Chain;

#[test]
fn test_later_factories_not_evaluated() {
    let later = Counter::new();
    let default = Counter::new();
    let (later_hit, default_hit) = (later.clone(), default.clone());

    let chain = Chain::<i64>::new()
        .assign_if(Some(1_i64))
        .assign_if_lazy(move || {
            later_hit.hit();
            Some(2_i64)
        })
        .default_with(move || {
            default_hit.hit();
            3
        });

    assert_eq!(chain.resolve().unwrap(), 1);
    assert_eq!(later.get(), 0);
    assert_eq!(default.get(), 0);
}

#[test]
fn test_each_producer_runs_once_per_resolve() {
    let first = Counter::new();
    let second = Counter::new();
    let (first_hit, second_hit) = (first.clone(), second.clone());

    let chain = Chain::<i64>::new()
        .assign_if_lazy(move || {
            first_hit.hit();
            None::<i64>
        })
        .assign_if_lazy(move || {
            second_hit.hit();
            Some(2_i64)
        });

    assert_eq!(chain.resolve().unwrap(), 2);
    assert_eq!((first.get(), second.get()), (1, 1));

    assert_eq!(chain.resolve().unwrap(), 2);
    assert_eq!((first.get(), second.get()), (2, 2));
}

#[test]
fn test_default_factory_runs_only_when_needed() {
    let default = Counter::new();
    let default_hit = default.clone();

    let chain = Chain::<i64>::new()
        .assign_if_lazy_with(|| Some(-1_i64), |v| *v >= 0)
        .default_with(move || {
            default_hit.hit();
            0
        });

    assert_eq!(chain.resolve().unwrap(), 0);
    assert_eq!(default.get(), 1);
}

#[test]
fn test_predicate_not_called_for_absent_value() {
    let predicate = Counter::new();
    let predicate_hit = predicate.clone();

    let chain = Chain::<i64>::new()
        .assign_if_with(None::<i64>, move |_| {
            predicate_hit.hit();
            true
        })
        .default_value(5);

    assert_eq!(chain.resolve().unwrap(), 5);
    assert_eq!(predicate.get(), 0);
}

#[test]
fn test_candidate_converter_skipped_when_predicate_fails() {
    let converter = Counter::new();
    let converter_hit = converter.clone();

    let chain = Chain::<i64>::new()
        .assign_if_lazy_convert(
            || Some("x".to_string()),
            |s| s.len() > 1,
            move |s| {
                converter_hit.hit();
                s.len() as i64
            },
        )
        .or_else(Some(9_i64));

    assert_eq!(chain.resolve().unwrap(), 9);
    assert_eq!(converter.get(), 0);
}
