//! Integration tests for the pattern doctor.

use pattern_doctor::prelude::*;
use std::fs;
use tempfile::TempDir;

fn analyzer() -> PatternAnalyzer {
    PatternAnalyzer::new().unwrap()
}

#[test]
fn test_unclosed_brace_in_javascript() {
    let diag = analyzer().analyze_pattern("if ($COND {", "javascript", None);

    assert!(!diag.is_valid);
    let unclosed = diag.errors_of(ErrorKind::UnclosedBracket);
    assert!(unclosed.iter().any(|e| e.position == Some(10)));
    assert!(unclosed.iter().all(|e| e.severity == Severity::Critical));

    let corrected = diag.corrected_pattern.unwrap();
    assert!(corrected.ends_with("})"));
}

#[test]
fn test_two_dollar_variadic() {
    let diag = analyzer().analyze_pattern("function $NAME($$PARAMS)", "javascript", None);

    assert!(diag.has_error(ErrorKind::InvalidVariadic));
    assert_eq!(
        diag.corrected_pattern.as_deref(),
        Some("function $NAME($$$PARAMS)")
    );
    assert!(diag.confidence_score > 0.8);
}

#[test]
fn test_valid_assignment() {
    let diag = analyzer().analyze_pattern("$VAR = $VALUE", "python", None);

    assert!(diag.is_valid);
    assert!(diag.errors.is_empty());
    assert!(diag.corrected_pattern.is_none());
}

#[test]
fn test_python_missing_colon_is_advisory() {
    let diag = analyzer().analyze_pattern("if $COND", "python", None);

    let colon = diag.errors_of(ErrorKind::MissingColon);
    assert_eq!(colon.len(), 1);
    assert_eq!(colon[0].severity, Severity::Warning);
    assert_eq!(diag.corrected_pattern.as_deref(), Some("if $COND:"));
}

#[test]
fn test_digit_leading_capture_not_fixed() {
    let diag = analyzer().analyze_pattern("$123VAR", "python", None);

    let invalid = diag.errors_of(ErrorKind::InvalidMetavarName);
    assert!(!invalid.is_empty());
    assert!(invalid.iter().all(|e| !e.auto_fixable));
    assert!(diag.corrected_pattern.is_none());
}

#[test]
fn test_empty_pattern() {
    let diag = analyzer().analyze_pattern("", "rust", None);

    assert_eq!(diag.errors.len(), 1);
    assert_eq!(diag.errors[0].kind, ErrorKind::EmptyPattern);
    assert_eq!(diag.errors[0].severity, Severity::Critical);
    assert!(!diag.is_valid);
    assert!(diag.suggestions.is_empty());
}

#[test]
fn test_whitespace_only_patterns() {
    let a = analyzer();
    for pattern in ["   ", "\n\t", " \n "] {
        let diag = a.analyze_pattern(pattern, "python", None);
        assert_eq!(diag.errors.len(), 1, "pattern {pattern:?}");
        assert_eq!(diag.errors[0].kind, ErrorKind::EmptyPattern);
        assert!(!diag.is_valid);
    }
}

#[test]
fn test_unclosed_position_is_opener_index() {
    let a = analyzer();
    let cases = [
        ("foo(", vec![3]),
        ("a[b", vec![1]),
        ("x { y", vec![2]),
        ("f($X, [1, 2", vec![1, 6]),
        ("{ ( [", vec![0, 2, 4]),
    ];

    for (pattern, openers) in cases {
        let diag = a.analyze_pattern(pattern, "javascript", None);
        assert!(!diag.is_valid, "pattern {pattern:?}");
        for pos in openers {
            assert!(
                diag.errors_of(ErrorKind::UnclosedBracket)
                    .iter()
                    .any(|e| e.position == Some(pos) && e.is_critical()),
                "pattern {pattern:?} missing unclosed at {pos}"
            );
        }
    }
}

#[test]
fn test_single_variadic_warning() {
    let a = analyzer();
    for (pattern, expected) in [
        ("foo($$ARGS)", "foo($$$ARGS)"),
        ("console.log($$MSG)", "console.log($$$MSG)"),
        ("$$ITEMS", "$$$ITEMS"),
    ] {
        let diag = a.analyze_pattern(pattern, "javascript", None);
        let variadic = diag.errors_of(ErrorKind::InvalidVariadic);
        assert_eq!(variadic.len(), 1, "pattern {pattern:?}");
        assert_eq!(variadic[0].severity, Severity::Warning);
        assert_eq!(diag.corrected_pattern.as_deref(), Some(expected));
    }
}

#[test]
fn test_correction_is_idempotent() {
    let a = analyzer();
    let cases = [
        ("if ($COND {", "javascript"),
        ("function $NAME($$PARAMS)", "javascript"),
        ("f(x]]", "javascript"),
        ("foo($$ARGS", "javascript"),
        ("fucntion $F() {", "javascript"),
        ("if ($$X", "python"),
        ("def $F($$$P", "python"),
    ];

    for (pattern, language) in cases {
        let diag = a.analyze_pattern(pattern, language, None);
        assert!(
            diag.errors.iter().all(|e| e.auto_fixable),
            "pattern {pattern:?} has unfixable findings"
        );

        let corrected = diag.corrected_pattern.unwrap();
        let again = a.analyze_pattern(&corrected, language, None);
        assert!(again.is_valid, "{pattern:?} -> {corrected:?} still invalid");
    }
}

#[test]
fn test_stray_closers_get_no_empty_fix() {
    let a = analyzer();
    for pattern in [")", ") ]"] {
        let diag = a.analyze_pattern(pattern, "javascript", None);
        assert!(!diag.is_valid);
        assert!(diag.has_error(ErrorKind::ExtraClosingBracket));
        assert!(diag.corrected_pattern.is_none(), "pattern {pattern:?}");

        let report = a.report(pattern, "javascript", None, None);
        assert!(report.corrected_pattern.is_none());
        assert!(report.correction_confidence.is_none());
    }
}

#[test]
fn test_confidence_drops_with_more_fixes() {
    let a = analyzer();

    let one = a.analyze_pattern("foo($$ARGS)", "javascript", None);
    let two = a.analyze_pattern("foo($$ARGS", "javascript", None);

    assert!(one.corrected_pattern.is_some());
    assert!(two.corrected_pattern.is_some());
    assert!(two.confidence_score < one.confidence_score);
}

#[test]
fn test_analysis_is_deterministic() {
    let a = analyzer();
    for (pattern, language) in [
        ("def $F($$ARGS)", "python"),
        ("if ($COND {", "javascript"),
        ("fn $NAME($$$P) -> $R {", "rust"),
    ] {
        let first = serde_json::to_string(&a.analyze_pattern(pattern, language, None)).unwrap();
        let second = serde_json::to_string(&a.analyze_pattern(pattern, language, None)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_analyzer_shared_across_threads() {
    let a = analyzer();
    let expected = a.analyze_pattern("if ($COND {", "javascript", None);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| a.analyze_pattern("if ($COND {", "javascript", None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_report_json_shape() {
    let report = analyzer().report("def $F(", "python", None, None);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["is_valid"], false);
    assert_eq!(json["language"], "python");
    assert_eq!(json["errors"][0]["type"], "unclosed_bracket");
    assert!(json.get("original_error").is_none());

    let help = report.help_message.unwrap();
    assert!(help.contains("Pattern Analysis Results"));
    assert!(help.contains("Critical Issues Found:"));
}

#[test]
fn test_config_from_json_sets_threshold() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doctor.json");
    fs::write(&path, r#"{ "correction_threshold": 0.95 }"#).unwrap();

    let config = AnalyzerConfig::from_file(&path).unwrap();
    assert_eq!(config.correction_threshold, 0.95);
    assert_eq!(config.max_corrections, 5);

    let strict = PatternAnalyzer::with_config(config).unwrap();
    let report = strict.report("function $NAME($$PARAMS)", "javascript", None, None);
    assert!(report.corrected_pattern.is_none());

    let report = analyzer().report("function $NAME($$PARAMS)", "javascript", None, None);
    assert_eq!(
        report.corrected_pattern.as_deref(),
        Some("function $NAME($$$PARAMS)")
    );
}

#[test]
fn test_config_rejects_out_of_range_ratio() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doctor.yaml");
    fs::write(&path, "similarity_cutoff: 1.5\n").unwrap();

    assert!(AnalyzerConfig::from_file(&path).is_err());
}

#[test]
fn test_library_file_extends_builtin_entries() {
    let dir = TempDir::new().unwrap();
    let library = dir.path().join("library.yaml");
    fs::write(
        &library,
        "Python:\n  async_with: \"async with $CTX as $VAR:\"\n  broken: \"def $F(:\"\nelixir:\n  defmodule: \"defmodule $NAME do $$$BODY end\"\n",
    )
    .unwrap();

    let config_path = dir.path().join("doctor.yaml");
    fs::write(
        &config_path,
        format!("library_files:\n  - {}\n", library.display()),
    )
    .unwrap();

    let config = AnalyzerConfig::from_file(&config_path).unwrap();
    let a = PatternAnalyzer::with_config(config).unwrap();
    let lib = a.library();

    assert_eq!(
        lib.get("python", "async_with").map(|e| e.pattern.as_str()),
        Some("async with $CTX as $VAR:")
    );
    assert!(lib.get("python", "broken").is_none());
    assert!(lib.get("python", "function_definition").is_some());
    assert_eq!(lib.entries("elixir").len(), 1);
}

#[test]
fn test_library_file_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, r#"{ "go": { "select": "select { $$$CASES }" } }"#).unwrap();

    let mut library = PatternLibrary::new();
    library.load_file(&path).unwrap();
    assert_eq!(library.entries("go").len(), 1);
    assert_eq!(
        library.get("go", "select").unwrap().display(),
        "select: select { $$$CASES }"
    );
}

#[test]
fn test_library_file_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.txt");
    fs::write(&path, "python: {}").unwrap();

    let config = AnalyzerConfig::default().library_file(&path);
    assert!(PatternAnalyzer::with_config(config).is_err());
}
