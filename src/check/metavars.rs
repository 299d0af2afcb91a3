//! Capture-variable (metavariable) tokenizing and validation.

use super::PatternCheck;
use crate::pattern::{ErrorKind, PatternError, Severity};

/// How many nodes a capture token binds, decided purely by sigil count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `$NAME`: exactly one node.
    Single,
    /// `$$NAME`: never valid, almost always meant as multi.
    Double,
    /// `$$$NAME`: zero or more nodes.
    Multi,
}

/// A capture token found in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaVar<'a> {
    /// Byte offset of the first `$`.
    pub start: usize,
    /// Byte offset one past the name.
    pub end: usize,
    pub arity: Arity,
    pub name: &'a str,
}

impl MetaVar<'_> {
    /// Byte length of the token, sigils included.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a bare sigil run with no name after it.
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// True for `$_` and `$$$_`.
    pub fn is_wildcard(&self) -> bool {
        self.name == "_"
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scans `pattern` left to right for `$` runs of one to three sigils plus a name.
///
/// A run of four or more dollars splits into a three-sigil token followed by
/// another token, matching a greedy `\$\${0,2}\w*`.
pub fn scan(pattern: &str) -> Vec<MetaVar<'_>> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        let start = i;
        let mut sigils = 0;
        while i < bytes.len() && bytes[i] == b'$' && sigils < 3 {
            sigils += 1;
            i += 1;
        }

        let name_start = i;
        let name_len: usize = pattern[name_start..]
            .chars()
            .take_while(|c| is_name_char(*c))
            .map(char::len_utf8)
            .sum();
        i = name_start + name_len;

        let arity = match sigils {
            1 => Arity::Single,
            2 => Arity::Double,
            _ => Arity::Multi,
        };
        tokens.push(MetaVar {
            start,
            end: i,
            arity,
            name: &pattern[name_start..i],
        });
    }

    tokens
}

/// Flags bad capture arities and names.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaVarChecker;

impl MetaVarChecker {
    pub fn new() -> Self {
        Self
    }
}

impl PatternCheck for MetaVarChecker {
    fn name(&self) -> &'static str {
        "metavariables"
    }

    fn check(&self, pattern: &str) -> Vec<PatternError> {
        let mut errors = Vec::new();

        for token in scan(pattern) {
            let pos = token.start;

            if token.arity == Arity::Double {
                errors.push(
                    PatternError::new(
                        ErrorKind::InvalidVariadic,
                        Severity::Warning,
                        format!("Invalid metavariable syntax '$$' at position {pos}"),
                    )
                    .at(pos, token.len())
                    .suggest("Use $$$ for variadic capture or $ for single capture")
                    .fixable(),
                );
            }

            if token.is_unnamed() {
                errors.push(
                    PatternError::new(
                        ErrorKind::EmptyMetavarName,
                        Severity::Warning,
                        format!("Empty metavariable name at position {pos}"),
                    )
                    .at(pos, token.len())
                    .suggest("Add a name after $ or use $_ for wildcard"),
                );
            }

            if token.name.starts_with(|c: char| c.is_ascii_digit()) {
                errors.push(
                    PatternError::new(
                        ErrorKind::InvalidMetavarName,
                        Severity::Warning,
                        format!("Metavariable name cannot start with number at position {pos}"),
                    )
                    .at(pos, token.len())
                    .suggest("Use a name starting with letter or underscore"),
                );
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_arities() {
        let tokens = scan("foo($A, $$B, $$$C)");
        let arities: Vec<Arity> = tokens.iter().map(|t| t.arity).collect();
        assert_eq!(arities, vec![Arity::Single, Arity::Double, Arity::Multi]);
        assert_eq!(tokens[2].name, "C");
        assert_eq!(tokens[2].start, 13);
        assert_eq!(tokens[2].len(), 4);
    }

    #[test]
    fn test_scan_wildcards() {
        let tokens = scan("$_ $$$_");
        assert!(tokens.iter().all(|t| t.is_wildcard()));
    }

    #[test]
    fn test_valid_pattern_has_no_findings() {
        assert!(MetaVarChecker.check("$VAR = $VALUE").is_empty());
        assert!(MetaVarChecker.check("def $NAME($$$PARAMS):").is_empty());
        assert!(MetaVarChecker.check("$_ + $$$_").is_empty());
    }

    #[test]
    fn test_double_dollar_is_invalid_variadic() {
        let errors = MetaVarChecker.check("function $NAME($$PARAMS)");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::InvalidVariadic);
        assert_eq!(errors[0].position, Some(15));
        assert_eq!(errors[0].length, Some(8));
        assert!(errors[0].auto_fixable);
    }

    #[test]
    fn test_triple_dollar_is_not_flagged() {
        assert!(MetaVarChecker.check("$$$ARGS").is_empty());
    }

    #[test]
    fn test_empty_name() {
        let errors = MetaVarChecker.check("$ = 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::EmptyMetavarName);
        assert!(!errors[0].auto_fixable);
    }

    #[test]
    fn test_digit_leading_name() {
        let errors = MetaVarChecker.check("$123VAR");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::InvalidMetavarName);
        assert_eq!(errors[0].severity, Severity::Warning);
        assert!(!errors[0].auto_fixable);
    }

    #[test]
    fn test_findings_in_scan_order() {
        let errors = MetaVarChecker.check("$1A $$B");
        assert_eq!(errors[0].kind, ErrorKind::InvalidMetavarName);
        assert_eq!(errors[1].kind, ErrorKind::InvalidVariadic);
    }
}
