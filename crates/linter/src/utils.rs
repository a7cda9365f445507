//! Helpers for inspecting TypeScript type annotations

use oxc_ast::ast::{TSType, TSUnionType};
use oxc_span::{GetSpan, Span};

/// A type that denotes "no value"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceMarker {
    Undefined,
    Null,
}

impl AbsenceMarker {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
        }
    }
}

/// Look through any number of `( ... )` around a type
pub fn unparenthesized<'t, 'a>(mut ty: &'t TSType<'a>) -> &'t TSType<'a> {
    while let TSType::TSParenthesizedType(paren) = ty {
        ty = &paren.type_annotation;
    }
    ty
}

/// The marker a single type is, if it is one
pub fn as_absence_marker(ty: &TSType) -> Option<AbsenceMarker> {
    match unparenthesized(ty) {
        TSType::TSUndefinedKeyword(_) => Some(AbsenceMarker::Undefined),
        TSType::TSNullKeyword(_) => Some(AbsenceMarker::Null),
        _ => None,
    }
}

/// First member of a union that is an absence marker
pub fn union_absence_marker(union: &TSUnionType) -> Option<(AbsenceMarker, Span)> {
    union
        .types
        .iter()
        .find_map(|member| as_absence_marker(member).map(|marker| (marker, member.span())))
}

/// Absence marker carried by a declared type.
///
/// Only `A | undefined` style unions and arrays of such unions count; every other
/// shape is treated as not carrying a marker.
pub fn declared_absence_marker(ty: &TSType) -> Option<(AbsenceMarker, Span)> {
    match unparenthesized(ty) {
        TSType::TSUnionType(union) => union_absence_marker(union),
        TSType::TSArrayType(array) => match unparenthesized(&array.element_type) {
            TSType::TSUnionType(union) => union_absence_marker(union),
            _ => None,
        },
        _ => None,
    }
}
