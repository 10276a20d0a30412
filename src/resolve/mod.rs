//! Method resolution
//!
//! Picks the member of a [`LoadedModule`] to call for a requested name and
//! parsed argument list. Two passes, first match wins:
//!
//! 1. members with the requested name and matching arity/types;
//! 2. any member with matching arity/types, in declaration order.
//!
//! The second pass can select a member whose name differs from the request.
//! It is kept for compatibility with existing callers.

pub mod java_type;

use crate::args::ParsedArgument;
use crate::compile::{CallableMember, LoadedModule};
use crate::config::types::{ExecError, Result};
use java_type::{JavaType, Primitive, BOOLEAN, DOUBLE, INTEGER, LONG};

/// Primitive/boxed pairs accepted in either direction
const BOXED_EQUIVALENTS: &[(Primitive, &str)] = &[
    (Primitive::Int, INTEGER),
    (Primitive::Double, DOUBLE),
    (Primitive::Boolean, BOOLEAN),
    (Primitive::Long, LONG),
];

fn boxed_equivalent(a: &JavaType, b: &JavaType) -> bool {
    let pair_matches = |primitive: &JavaType, boxed: &JavaType| match (primitive, boxed) {
        (JavaType::Primitive(p), JavaType::Class(name)) => BOXED_EQUIVALENTS
            .iter()
            .any(|(prim, class)| prim == p && *class == name.as_str()),
        _ => false,
    };
    pair_matches(a, b) || pair_matches(b, a)
}

/// Whether a parameter of type `param` accepts an argument of runtime type
/// `arg`. `None` stands for a null argument, which matches anything.
pub fn parameter_accepts(param: &JavaType, arg: Option<&JavaType>) -> bool {
    let Some(arg) = arg else {
        return true;
    };
    match (param, arg) {
        (JavaType::Array(param_element), JavaType::Array(arg_element)) => {
            param_element.is_assignable_from(arg_element)
        }
        _ => param.is_assignable_from(arg) || boxed_equivalent(param, arg),
    }
}

/// Arity and every parameter must match.
pub fn member_accepts(member: &CallableMember, arg_types: &[JavaType]) -> bool {
    member.arity() == arg_types.len()
        && member
            .parameter_types
            .iter()
            .zip(arg_types)
            .all(|(param, arg)| parameter_accepts(param, Some(arg)))
}

/// Resolve `requested` against `module` for `args`.
pub fn resolve<'m>(
    module: &'m LoadedModule,
    requested: &str,
    args: &[ParsedArgument],
) -> Result<&'m CallableMember> {
    let arg_types: Vec<JavaType> = args.iter().map(ParsedArgument::java_type).collect();

    let exact = module
        .members
        .iter()
        .find(|m| m.name == requested && member_accepts(m, &arg_types));
    if let Some(member) = exact {
        log::debug!("Resolved '{}' to {}", requested, member);
        return Ok(member);
    }

    if let Some(member) = module.members.iter().find(|m| member_accepts(m, &arg_types)) {
        log::warn!(
            "No member named '{}' accepts the arguments; falling back to {}",
            requested,
            member
        );
        return Ok(member);
    }

    Err(ExecError::Resolution {
        requested: requested.to_string(),
        arity: args.len(),
        available: module.signatures(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ErrorKind;
    use java_type::{OBJECT, STRING};
    use std::path::PathBuf;

    fn member(name: &str, params: Vec<JavaType>) -> CallableMember {
        CallableMember {
            name: name.to_string(),
            parameter_types: params,
            return_type: JavaType::class(OBJECT),
            is_static: false,
        }
    }

    fn module(members: Vec<CallableMember>) -> LoadedModule {
        LoadedModule {
            class_name: "UserCode".to_string(),
            class_dir: PathBuf::from("/tmp/classes"),
            has_default_constructor: true,
            members,
        }
    }

    fn int() -> JavaType {
        JavaType::Primitive(Primitive::Int)
    }

    fn string() -> JavaType {
        JavaType::class(STRING)
    }

    #[test]
    fn test_overload_by_argument_type() {
        let module = module(vec![
            member("add", vec![string(), string()]),
            member("add", vec![int(), int()]),
        ]);
        let args = [ParsedArgument::Integer(2), ParsedArgument::Integer(3)];
        let resolved = resolve(&module, "add", &args).unwrap();
        assert_eq!(resolved.to_string(), "add(int, int)");

        let args = [
            ParsedArgument::Str("a".to_string()),
            ParsedArgument::Str("b".to_string()),
        ];
        assert_eq!(
            resolve(&module, "add", &args).unwrap().to_string(),
            "add(String, String)"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let module = module(vec![
            member("f", vec![JavaType::class(OBJECT)]),
            member("f", vec![int()]),
        ]);
        let args = [ParsedArgument::Integer(1)];
        let first = resolve(&module, "f", &args).unwrap();
        for _ in 0..10 {
            assert!(std::ptr::eq(first, resolve(&module, "f", &args).unwrap()));
        }
        assert_eq!(first.to_string(), "f(Object)");
    }

    #[test]
    fn test_exact_name_wins_over_declaration_order() {
        let module = module(vec![member("other", vec![int()]), member("square", vec![int()])]);
        let args = [ParsedArgument::Integer(4)];
        assert_eq!(resolve(&module, "square", &args).unwrap().name, "square");
    }

    #[test]
    fn test_fallback_ignores_name() {
        let module = module(vec![member("greet", vec![string()]), member("twice", vec![int()])]);
        let args = [ParsedArgument::Integer(4)];
        assert_eq!(resolve(&module, "run", &args).unwrap().name, "twice");
    }

    #[test]
    fn test_arity_mismatch_is_never_guessed() {
        let module = module(vec![member("square", vec![int()])]);
        let args = [ParsedArgument::Integer(4), ParsedArgument::Integer(5)];
        let err = resolve(&module, "square", &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn test_failure_lists_available_signatures() {
        let module = module(vec![member("greet", vec![string()])]);
        let err = resolve(&module, "shout", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        let message = err.to_string();
        assert!(message.contains("shout"));
        assert!(message.contains("greet(String)"));
    }

    #[test]
    fn test_boxed_equivalences() {
        let integer = JavaType::class(INTEGER);
        assert!(parameter_accepts(&int(), Some(&integer)));
        assert!(parameter_accepts(&integer, Some(&int())));
        assert!(parameter_accepts(
            &JavaType::Primitive(Primitive::Long),
            Some(&JavaType::class(LONG))
        ));
        assert!(parameter_accepts(
            &JavaType::Primitive(Primitive::Double),
            Some(&JavaType::class(DOUBLE))
        ));
        assert!(parameter_accepts(
            &JavaType::Primitive(Primitive::Boolean),
            Some(&JavaType::class(BOOLEAN))
        ));
        assert!(!parameter_accepts(
            &JavaType::Primitive(Primitive::Long),
            Some(&integer)
        ));
        assert!(!parameter_accepts(
            &JavaType::Primitive(Primitive::Double),
            Some(&integer)
        ));
    }

    #[test]
    fn test_null_matches_anything() {
        assert!(parameter_accepts(&int(), None));
        assert!(parameter_accepts(&JavaType::array_of(string()), None));
    }

    #[test]
    fn test_array_element_assignability() {
        let int_array = JavaType::array_of(int());
        let object_array = JavaType::array_of(JavaType::class(OBJECT));
        let module = module(vec![
            member("sum", vec![object_array]),
            member("sum", vec![int_array]),
        ]);

        let ints = [ParsedArgument::IntegerArray(vec![1, 2, 3])];
        assert_eq!(resolve(&module, "sum", &ints).unwrap().to_string(), "sum(int[])");

        let strings = [ParsedArgument::StringArray(vec!["a".to_string()])];
        assert_eq!(
            resolve(&module, "sum", &strings).unwrap().to_string(),
            "sum(Object[])"
        );
    }

    #[test]
    fn test_large_integer_needs_long() {
        let module = module(vec![
            member("f", vec![int()]),
            member("f", vec![JavaType::Primitive(Primitive::Long)]),
        ]);
        let args = [ParsedArgument::Integer(5_000_000_000)];
        assert_eq!(resolve(&module, "f", &args).unwrap().to_string(), "f(long)");
    }
}
