//! # Token Normalizer
//!
//! Maps one raw grammar match to its canonical element name. Rules are
//! applied in order and each fires at most once:
//!
//! 1. strip `_jsxs(`, or else `_jsx(`;
//! 2. if the operand is `"…"`, strip the leading and trailing quote;
//! 3. else if it starts with `_components.`, strip that prefix;
//! 4. else the operand is already a component identifier.
//!
//! The output must not be fed back through [`normalize`].

use crate::grammar::{CallWrapper, OperandShape, COMPONENTS_PREFIX};

/// Canonical element name of a raw call-expression match.
pub fn normalize(raw: &str) -> &str {
    let operand = CallWrapper::ALL
        .into_iter()
        .find_map(|wrapper| raw.strip_prefix(wrapper.prefix()))
        .unwrap_or(raw);

    if operand.len() >= 2 && operand.starts_with('"') && operand.ends_with('"') {
        &operand[1..operand.len() - 1]
    } else if let Some(member) = operand.strip_prefix(COMPONENTS_PREFIX) {
        member
    } else {
        operand
    }
}

/// Render `name` as the raw match the compiler would emit for it.
pub fn wrap(wrapper: CallWrapper, shape: OperandShape, name: &str) -> String {
    let prefix = wrapper.prefix();
    match shape {
        OperandShape::Member => format!("{prefix}{COMPONENTS_PREFIX}{name}"),
        OperandShape::Literal => format!("{prefix}\"{name}\""),
        OperandShape::Ident => format!("{prefix}{name}"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn wrapper() -> impl Strategy<Value = CallWrapper> {
        prop_oneof![Just(CallWrapper::Multi), Just(CallWrapper::Single)]
    }

    fn shape() -> impl Strategy<Value = OperandShape> {
        prop_oneof![
            Just(OperandShape::Member),
            Just(OperandShape::Literal),
            Just(OperandShape::Ident),
        ]
    }

    proptest! {
        /// Normalizing a wrapped name returns the name for every shape and
        /// wrapper.
        #[test]
        fn normalize_is_left_inverse_of_wrap(
            w in wrapper(),
            s in shape(),
            name in "[a-zA-Z0-9_-]{1,24}",
        ) {
            let raw = wrap(w, s, &name);
            prop_assert_eq!(normalize(&raw), name.as_str());
        }
    }
}
