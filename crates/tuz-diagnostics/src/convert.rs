// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from compiler error types to `Diagnostic`.

use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Resolve Errors
// ============================================================================

impl ToDiagnostic for tuz_resolve::ResolveError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tuz_resolve::ResolveErrorKind::*;

        let message = self.kind.to_string();
        let diag = match &self.kind {
            UnknownIdentifier { name } => Diagnostic::error(message)
                .with_code("E0200")
                .with_label("not found in this scope")
                .with_help(format!("declare `{}` before using it", name)),

            AlreadyDeclared { name } => Diagnostic::error(message)
                .with_code("E0201")
                .with_label("redeclared here")
                .with_help(format!(
                    "rename this `{}`, or move it into a nested block to shadow the earlier one",
                    name
                )),

            UnresolvedType { .. } => Diagnostic::error(message)
                .with_code("E0202")
                .with_label("no struct with this name")
                .with_note("only struct types can be referred to by name"),

            FieldAccessOnUnknownType => Diagnostic::error(message)
                .with_code("E0203")
                .with_label("type of this expression is not known here"),

            FieldAccessOnNonStruct { ty } => Diagnostic::error(message)
                .with_code("E0204")
                .with_label(format!("this has type `{}`", ty))
                .with_note("fields can be accessed on a struct or a pointer to a struct"),

            UnknownField { struct_name, .. } => Diagnostic::error(message)
                .with_code("E0205")
                .with_label(format!("not a field of `{}`", struct_name)),

            Internal { .. } => Diagnostic::fatal(message)
                .with_code("E0900")
                .with_note("this is a bug in the compiler, not in your program"),
        };

        diag.at(self.loc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use tuz_ast::Location;
    use tuz_resolve::ResolveError;

    fn code(d: &Diagnostic) -> &str {
        d.code.as_ref().map(|c| c.0.as_str()).unwrap_or("")
    }

    #[test]
    fn codes_per_kind() {
        let loc = Location::new(4, 9);
        let cases = [
            (ResolveError::unknown_identifier("x".into(), loc), "E0200"),
            (ResolveError::already_declared("x".into(), loc), "E0201"),
            (ResolveError::unresolved_type("T".into(), loc), "E0202"),
            (ResolveError::unknown_field_base(loc), "E0203"),
            (ResolveError::not_a_struct("i32".into(), loc), "E0204"),
            (ResolveError::unknown_field("z".into(), "Point".into(), loc), "E0205"),
        ];
        for (err, expected) in cases {
            let d = err.to_diagnostic();
            assert_eq!(code(&d), expected, "{}", err);
            assert_eq!(d.severity, Severity::Error);
            assert_eq!(d.location, Some(loc));
            assert_eq!(d.message, err.to_string());
        }
    }

    #[test]
    fn internal_errors_are_fatal() {
        let d = ResolveError::internal("cannot pop global scope", Location::default()).to_diagnostic();
        assert_eq!(d.severity, Severity::Fatal);
        assert_eq!(code(&d), "E0900");
        assert!(d.location.is_none());
        assert!(d.message.contains("cannot pop global scope"));
    }

    #[test]
    fn unknown_field_message_is_kept() {
        let d = ResolveError::unknown_field("z".into(), "Point".into(), Location::new(1, 1))
            .to_diagnostic();
        assert_eq!(d.message, "unknown field 'z' in struct Point");
        assert_eq!(d.label.as_deref(), Some("not a field of `Point`"));
    }
}
