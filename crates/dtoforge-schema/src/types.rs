use crate::node::SchemaType;
use derive_more::{Display, FromStr};
use serde::Serialize;
use std::sync::Arc;

///
/// Variant
///
/// The three derived shapes the engine produces for an entity.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
pub enum Variant {
    Create,
    Update,
    Response,
}

///
/// Primitive
///
/// Semantic base types an attribute can declare.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Primitive {
    Blob,
    Bool,
    Date,
    Decimal,
    Float64,
    Int,
    Nat,
    Text,
    Timestamp,
    Ulid,
    Unit,
}

///
/// TypeExpr
///
/// Recursive type expression for schema fields.
///
/// `Named` is a forward-reference placeholder: a type that does not exist
/// yet at declaration time. `Any` is the permissive fallback a field is
/// left with when lenient resolution gives up on a placeholder.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeExpr {
    Primitive(Primitive),
    Opt(Box<TypeExpr>),
    List(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Schema(Arc<SchemaType>),
    Named(String),
    Any,
}

impl TypeExpr {
    /// Wrap in `Opt` unless the expression is already optional.
    /// Partial-update shapes need every field to be omissible.
    #[must_use]
    pub fn optional(self) -> Self {
        if self.is_optional() {
            self
        } else {
            Self::Opt(Box::new(self))
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Opt(_))
    }

    /// True once no `Named` placeholder remains anywhere in the expression.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Named(_) => false,
            Self::Opt(inner) | Self::List(inner) => inner.is_resolved(),
            Self::Map(key, value) => key.is_resolved() && value.is_resolved(),
            Self::Primitive(_) | Self::Schema(_) | Self::Any => true,
        }
    }

    /// Expand placeholder strings into structural container nodes.
    ///
    /// Built-in generic wrappers resolve without a forward-reference entry:
    /// `"list of X"`, `"optional X"` and `"map of K to V"` recurse into their
    /// inner placeholder, and primitive names parse directly. Only named
    /// custom types survive as `Named` leaves.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Named(name) => Self::parse_placeholder(&name),
            Self::Opt(inner) => Self::Opt(Box::new(inner.normalized())),
            Self::List(inner) => Self::List(Box::new(inner.normalized())),
            Self::Map(key, value) => {
                Self::Map(Box::new(key.normalized()), Box::new(value.normalized()))
            }
            other => other,
        }
    }

    /// Parse one placeholder string into a type expression.
    #[must_use]
    pub fn parse_placeholder(placeholder: &str) -> Self {
        let placeholder = placeholder.trim();

        if let Some(inner) = placeholder.strip_prefix("list of ") {
            return Self::List(Box::new(Self::parse_placeholder(inner)));
        }
        if let Some(inner) = placeholder.strip_prefix("optional ") {
            return Self::parse_placeholder(inner).optional();
        }
        if let Some(inner) = placeholder.strip_prefix("map of ")
            && let Some((key, value)) = inner.split_once(" to ")
        {
            return Self::Map(
                Box::new(Self::parse_placeholder(key)),
                Box::new(Self::parse_placeholder(value)),
            );
        }
        if let Ok(primitive) = placeholder.parse::<Primitive>() {
            return Self::Primitive(primitive);
        }

        Self::Named(placeholder.to_string())
    }

    /// Collect every remaining `Named` leaf, outermost first.
    pub fn collect_pending(&self, out: &mut Vec<String>) {
        match self {
            Self::Named(name) => out.push(name.clone()),
            Self::Opt(inner) | Self::List(inner) => inner.collect_pending(out),
            Self::Map(key, value) => {
                key.collect_pending(out);
                value.collect_pending(out);
            }
            Self::Primitive(_) | Self::Schema(_) | Self::Any => {}
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_does_not_double_wrap() {
        let once = TypeExpr::Primitive(Primitive::Text).optional();
        let twice = once.clone().optional();

        assert_eq!(once, twice);
    }

    #[test]
    fn placeholder_parses_builtin_containers() {
        let parsed = TypeExpr::parse_placeholder("list of optional Tag");

        assert_eq!(
            parsed,
            TypeExpr::List(Box::new(TypeExpr::Opt(Box::new(TypeExpr::Named(
                "Tag".to_string()
            )))))
        );
    }

    #[test]
    fn placeholder_parses_map_and_primitives() {
        let parsed = TypeExpr::parse_placeholder("map of Text to Score");

        assert_eq!(
            parsed,
            TypeExpr::Map(
                Box::new(TypeExpr::Primitive(Primitive::Text)),
                Box::new(TypeExpr::Named("Score".to_string()))
            )
        );
    }

    #[test]
    fn pending_names_come_from_leaves_only() {
        let ty = TypeExpr::parse_placeholder("map of Text to list of Widget");
        let mut pending = Vec::new();
        ty.collect_pending(&mut pending);

        assert_eq!(pending, vec!["Widget".to_string()]);
        assert!(!ty.is_resolved());
    }

    #[test]
    fn primitive_round_trips_through_display() {
        let parsed = "Timestamp".parse::<Primitive>().unwrap();

        assert_eq!(parsed, Primitive::Timestamp);
        assert_eq!(parsed.to_string(), "Timestamp");
    }
}
