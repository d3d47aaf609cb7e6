//! Tsubaki Core - Fundamental types
//!
//! This crate provides the types shared by the addon host and addon authors:
//! - `AddonMetadata` / `DomainSet`: declared name and capability tags
//! - `TriState` / `AddonOutput` / `Callback`: what an addon reports back
//! - `ExecutedResult` / `Execution`: the dispatcher's verdict
//! - `AddonError`: lookup and discovery failures

mod error;
mod metadata;
mod outcome;

pub use error::{AddonError, codes};
pub use metadata::{AddonMetadata, DomainSet, UNNAMED_ADDON};
pub use outcome::{AddonOutput, Callback, ExecutedResult, Execution, TriState};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AddonError, AddonMetadata, AddonOutput, Callback, DomainSet, ExecutedResult, Execution,
        TriState,
    };
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod domain_tests {
        use super::*;

        #[test]
        fn test_normalizes_case_and_whitespace() {
            let set: DomainSet = ["  Weather ", "weather", "NEWS"].into_iter().collect();
            assert_eq!(set.len(), 2);
            assert!(set.contains("weather"));
            assert!(set.contains("News"));
        }

        #[test]
        fn test_drops_blank_tags() {
            let set: DomainSet = ["", "   ", "math"].into_iter().collect();
            assert_eq!(set.len(), 1);
            assert!(!set.contains(""));
        }

        #[test]
        fn test_intersection_and_union() {
            let a: DomainSet = ["math", "sum", "text"].into_iter().collect();
            let b: DomainSet = ["sum", "text", "echo", "extra"].into_iter().collect();
            assert_eq!(a.intersection_count(&b), 2);
            assert_eq!(a.union_count(&b), 5);
            assert_eq!(a.intersection_count(&DomainSet::new()), 0);
        }

        #[test]
        fn test_deserialize_normalizes() {
            let set: DomainSet = serde_json::from_str(r#"["Echo", " echo ", "Text"]"#).unwrap();
            assert_eq!(set.len(), 2);
            assert_eq!(serde_json::to_string(&set).unwrap(), r#"["echo","text"]"#);
        }
    }

    mod metadata_tests {
        use super::*;

        #[test]
        fn test_unnamed_detection() {
            assert!(AddonMetadata::unnamed(["x"]).is_unnamed());
            assert!(AddonMetadata::new("   ", ["x"]).is_unnamed());
            assert!(!AddonMetadata::new("echo", ["x"]).is_unnamed());
        }

        #[test]
        fn test_display_name_placeholder() {
            assert_eq!(AddonMetadata::unnamed(["x"]).display_name(), UNNAMED_ADDON);
            assert_eq!(AddonMetadata::new("", ["x"]).display_name(), UNNAMED_ADDON);
            assert_eq!(AddonMetadata::new("echo", ["x"]).display_name(), "echo");
        }

        #[test]
        fn test_deserialize_defaults() {
            let meta: AddonMetadata = serde_json::from_str("{}").unwrap();
            assert!(meta.name.is_none());
            assert!(meta.domains.is_empty());
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_tristate_from_option() {
            assert_eq!(TriState::from(Some(true)), TriState::Handled);
            assert_eq!(TriState::from(Some(false)), TriState::Failed);
            assert_eq!(TriState::from(None), TriState::Declined);
        }

        #[test]
        fn test_result_mapping() {
            assert_eq!(ExecutedResult::from(TriState::Handled), ExecutedResult::Success);
            assert_eq!(ExecutedResult::from(TriState::Failed), ExecutedResult::Failure);
            assert_eq!(ExecutedResult::from(TriState::Declined), ExecutedResult::Disabled);
        }

        #[test]
        fn test_ran() {
            assert!(!ExecutedResult::NoAddon.ran());
            assert!(!ExecutedResult::NoMatched.ran());
            assert!(ExecutedResult::Disabled.ran());
        }

        #[test]
        fn test_result_serialization() {
            let json = serde_json::to_string(&ExecutedResult::NoMatched).unwrap();
            assert_eq!(json, "\"no_matched\"");
            assert_eq!(ExecutedResult::NoAddon.to_string(), "no_addon");
        }

        #[test]
        fn test_callback_downcast() {
            let cb = Callback::new(String::from("hello"));
            assert!(cb.is::<String>());
            assert_eq!(cb.downcast_ref::<String>().map(String::as_str), Some("hello"));
            let cb = match cb.downcast::<i64>() {
                Ok(_) => panic!("expected type mismatch"),
                Err(cb) => cb,
            };
            assert_eq!(cb.downcast::<String>().unwrap(), "hello");
        }

        #[test]
        fn test_execution_from_output() {
            let exec = Execution::from_output(AddonOutput::failed().with_callback(7i64));
            assert_eq!(exec.result, ExecutedResult::Failure);
            assert_eq!(exec.callback.unwrap().downcast::<i64>().unwrap(), 7);
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_not_found_carries_name() {
            let err = AddonError::not_found("x");
            assert_eq!(err.code(), codes::NOT_FOUND);
            assert!(err.to_string().contains("x"));
            assert!(matches!(err, AddonError::NotFound { ref name } if name == "x"));
        }

        #[test]
        fn test_invalid_argument_display() {
            let err = AddonError::invalid_argument("name", "must not be empty");
            assert_eq!(err.code(), codes::INVALID_ARGUMENT);
            assert_eq!(err.to_string(), "Invalid argument 'name': must not be empty");
        }
    }
}
