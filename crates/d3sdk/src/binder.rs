//! # Argument Binder
//!
//! Resolves a call's positional and keyword arguments against a
//! [`Signature`] into [`BoundArguments`].
//!
//! ## Order of checks
//!
//! 1. Positional overflow.
//! 2. Positional assignment in declaration order.
//! 3. Keyword collision with a positionally filled parameter.
//! 4. Keyword resolution. Positional-only names never match a keyword.
//! 5. Default fill, or a missing-argument failure.
//! 6. Output shaping.
//!
//! The first failing check decides the error. Binding never looks at value
//! shapes, only at arity and names.

use d3rpc::BoundArguments;
use d3rpc::CallArguments;
use indexmap::IndexMap;

use crate::Value;
use crate::signature::ParameterKind;
use crate::signature::Signature;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("too many positional arguments: takes {accepted} but {given} were given")]
    TooManyPositionalArguments { accepted: usize, given: usize },
    #[error("multiple values for argument '{0}'")]
    MultipleValuesForArgument(String),
    #[error("missing a required argument: '{0}'")]
    MissingRequiredArgument(String),
    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedKeywordArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Binds `args` against `signature`.
pub fn bind(signature: &Signature, args: CallArguments) -> Result<BoundArguments> {
    let CallArguments { positional, keyword } = args;

    let accepted = signature.positional_count();
    if positional.len() > accepted {
        return Err(Error::TooManyPositionalArguments {
            accepted,
            given: positional.len(),
        });
    }

    // positional-capable parameters lead the list, so slot i is parameter i
    let mut slots: Vec<Option<Value>> = vec![None; signature.len()];
    for (slot, value) in slots.iter_mut().zip(positional) {
        *slot = Some(value);
    }

    for name in keyword.keys() {
        let Some(index) = signature.position_of(name) else { continue };
        let kind = signature.params()[index].kind;
        if kind.accepts_keyword() && slots[index].is_some() {
            return Err(Error::MultipleValuesForArgument(name.clone()));
        }
    }

    for (name, value) in keyword {
        match signature.position_of(&name) {
            Some(index) if signature.params()[index].kind.accepts_keyword() => {
                slots[index] = Some(value);
            }
            _ => return Err(Error::UnexpectedKeywordArgument(name)),
        }
    }

    let mut bound = BoundArguments {
        positional: Vec::with_capacity(accepted),
        keyword: IndexMap::new(),
    };

    for (param, slot) in signature.params().iter().zip(slots) {
        let value = match (slot, &param.default) {
            (Some(value), _) => value,
            (None, Some(default)) => default.clone(),
            (None, None) => return Err(Error::MissingRequiredArgument(param.name.clone())),
        };

        match param.kind {
            ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword => {
                bound.positional.push(value);
            }
            ParameterKind::KeywordOnly => {
                bound.keyword.insert(param.name.clone(), value);
            }
        }
    }

    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    use d3rpc::call_args;
    use serde_json::json;

    fn simple() -> Signature {
        Signature::builder().param("a").param("b").build().unwrap()
    }

    fn with_defaults() -> Signature {
        Signature::builder()
            .param("x")
            .param_with_default("y", 10)
            .param_with_default("z", 20)
            .build()
            .unwrap()
    }

    fn keyword_only() -> Signature {
        Signature::builder().keyword_only("name").keyword_only("value").build().unwrap()
    }

    fn mixed() -> Signature {
        Signature::builder()
            .param("a")
            .param_with_default("b", 5)
            .keyword_only("c")
            .build()
            .unwrap()
    }

    fn positional_only() -> Signature {
        Signature::builder().positional_only("a").positional_only("b").build().unwrap()
    }

    // --- Rejections ---

    #[test]
    fn test_too_many_positional_arguments() {
        let err = bind(&simple(), call_args![1, 2, 3]).unwrap_err();
        assert_eq!(err, Error::TooManyPositionalArguments { accepted: 2, given: 3 });
        assert!(err.to_string().contains("too many positional arguments"));
    }

    #[test]
    fn test_overflow_wins_over_other_problems() {
        let err = bind(&simple(), call_args![1, 2, 3; a = 1, unexpected = 2]).unwrap_err();
        assert!(matches!(err, Error::TooManyPositionalArguments { .. }));
    }

    #[test]
    fn test_multiple_values_for_argument() {
        let err = bind(&simple(), call_args![1; a = 2]).unwrap_err();
        assert_eq!(err, Error::MultipleValuesForArgument("a".into()));
        assert_eq!(err.to_string(), "multiple values for argument 'a'");
    }

    #[test]
    fn test_missing_required_argument() {
        let err = bind(&simple(), call_args![1]).unwrap_err();
        assert_eq!(err, Error::MissingRequiredArgument("b".into()));
        assert_eq!(err.to_string(), "missing a required argument: 'b'");
    }

    #[test]
    fn test_unexpected_keyword_argument() {
        let err = bind(&simple(), call_args![1, 2; unexpected = 3]).unwrap_err();
        assert_eq!(err, Error::UnexpectedKeywordArgument("unexpected".into()));
        assert_eq!(err.to_string(), "got an unexpected keyword argument 'unexpected'");
    }

    #[test]
    fn test_unexpected_keyword_reported_before_missing() {
        let err = bind(&simple(), call_args![1; c = 3]).unwrap_err();
        assert_eq!(err, Error::UnexpectedKeywordArgument("c".into()));
    }

    #[test]
    fn test_keyword_only_passed_positionally() {
        let err = bind(&keyword_only(), call_args!["n", 1]).unwrap_err();
        assert!(matches!(err, Error::TooManyPositionalArguments { accepted: 0, given: 2 }));
    }

    #[test]
    fn test_mixed_missing_keyword_only() {
        let err = bind(&mixed(), call_args![1, 2]).unwrap_err();
        assert_eq!(err, Error::MissingRequiredArgument("c".into()));
    }

    #[test]
    fn test_positional_only_by_keyword_is_unexpected() {
        let err = bind(&positional_only(), call_args![1; b = 2]).unwrap_err();
        assert_eq!(err, Error::UnexpectedKeywordArgument("b".into()));

        // also when the slot was already filled positionally
        let err = bind(&positional_only(), call_args![1, 2; a = 3]).unwrap_err();
        assert_eq!(err, Error::UnexpectedKeywordArgument("a".into()));
    }

    // --- Successful binds ---

    #[test]
    fn test_empty_signature_no_args() {
        let bound = bind(&Signature::empty(), CallArguments::new()).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn test_empty_signature_rejects_anything() {
        assert!(matches!(
            bind(&Signature::empty(), call_args![1]),
            Err(Error::TooManyPositionalArguments { accepted: 0, given: 1 })
        ));
        assert!(matches!(
            bind(&Signature::empty(), call_args![; a = 1]),
            Err(Error::UnexpectedKeywordArgument(_))
        ));
    }

    #[test]
    fn test_positional_arguments_extraction() {
        let sig = Signature::builder().param("a").param("b").param("c").build().unwrap();
        let bound = bind(&sig, call_args![1, 2, 3]).unwrap();
        assert_eq!(bound.positional, vec![json!(1), json!(2), json!(3)]);
        assert!(bound.keyword.is_empty());
    }

    #[test]
    fn test_defaults_fill_trailing_slots() {
        let bound = bind(&with_defaults(), call_args![5]).unwrap();
        assert_eq!(bound.positional, vec![json!(5), json!(10), json!(20)]);
    }

    #[test]
    fn test_keyword_fills_later_slot_and_defaults_fill_gap() {
        let bound = bind(&with_defaults(), call_args![5; z = 30]).unwrap();
        assert_eq!(bound.positional, vec![json!(5), json!(10), json!(30)]);
    }

    #[test]
    fn test_all_positionals_override_defaults() {
        let bound = bind(&with_defaults(), call_args![5, 15, 25]).unwrap();
        assert_eq!(bound.positional, vec![json!(5), json!(15), json!(25)]);
    }

    #[test]
    fn test_positional_or_keyword_by_keyword() {
        let bound = bind(&simple(), call_args![; b = 2, a = 1]).unwrap();
        assert_eq!(bound.positional, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_keyword_only_binding() {
        let bound = bind(&keyword_only(), call_args![; value = 1, name = "n"]).unwrap();
        assert!(bound.positional.is_empty());
        assert_eq!(bound.keyword["name"], json!("n"));
        assert_eq!(bound.keyword["value"], json!(1));

        // declaration order, not call order
        let names: Vec<&str> = bound.keyword.keys().map(String::as_str).collect();
        assert_eq!(names, ["name", "value"]);
    }

    #[test]
    fn test_mixed_arguments_extraction() {
        let bound = bind(&mixed(), call_args![1; b = 10, c = "test"]).unwrap();
        assert_eq!(bound.positional, vec![json!(1), json!(10)]);
        assert_eq!(bound.keyword.len(), 1);
        assert_eq!(bound.keyword["c"], json!("test"));
    }

    #[test]
    fn test_mixed_default_filled() {
        let bound = bind(&mixed(), call_args![1; c = "test"]).unwrap();
        assert_eq!(bound.positional, vec![json!(1), json!(5)]);
    }

    #[test]
    fn test_keyword_only_default_filled() {
        let sig = Signature::builder()
            .keyword_only_with_default("mode", "fast")
            .keyword_only("target")
            .build()
            .unwrap();
        let bound = bind(&sig, call_args![; target = 3]).unwrap();
        assert_eq!(bound.keyword["mode"], json!("fast"));
        assert_eq!(bound.keyword["target"], json!(3));
    }

    #[test]
    fn test_positional_only_binding() {
        let bound = bind(&positional_only(), call_args![2, 3]).unwrap();
        assert_eq!(bound.positional, vec![json!(2), json!(3)]);
    }

    #[test]
    fn test_rebinding_bound_arguments_is_stable() {
        let sig = mixed();
        let first = bind(&sig, call_args![1; c = "x"]).unwrap();

        let again = CallArguments {
            positional: first.positional.clone(),
            keyword: first.keyword.clone(),
        };
        let second = bind(&sig, again).unwrap();
        assert_eq!(first, second);
    }
}
