//! End-to-end tests for the Kira front end
//!
//! Every fixture runs through the same pipeline the CLI uses: preprocess, lex, parse, print.

use std::fs;
use std::path::{Path, PathBuf};

use kira::ast::{Decl, Expr, Statement};
use kira::cli::commands::{ast_source, parse_source, tokens_source};
use kira::config::KiraConfig;
use kira::diagnostics::DiagnosticKind;
use kira_syntax::source::SourcePosition;

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "kira"))
        .collect();
    paths.sort();
    paths
}

fn load(kind: &str, name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(kind)
        .join(format!("{name}.kira"));
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path.display()))
}

#[test]
fn test_valid_fixtures_parse_with_every_window_size() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty());
    for path in paths {
        let source = fs::read_to_string(&path).unwrap();
        let reference = parse_source(&source, &KiraConfig::default())
            .unwrap_or_else(|d| panic!("{} failed:\n{}", path.display(), d.render(&source, Default::default())));
        for size in [4, 8, 32, 64] {
            let config = KiraConfig::default().with_window_size(size);
            assert_eq!(parse_source(&source, &config).unwrap(), reference, "{} at window {size}", path.display());
        }
    }
}

#[test]
fn test_invalid_fixtures_fail_with_a_positioned_diagnostic() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty());
    for path in paths {
        let source = fs::read_to_string(&path).unwrap();
        let diagnostic = parse_source(&source, &KiraConfig::default())
            .expect_err(&format!("{} should not parse", path.display()));
        assert_ne!(diagnostic.kind, DiagnosticKind::Internal, "{}", path.display());
        assert!(diagnostic.location.is_some(), "{}", path.display());
    }
}

#[test]
fn test_shapes_declarations() {
    let program = parse_source(&load("valid", "shapes"), &KiraConfig::default()).unwrap();
    assert_eq!(program.module().map(|m| m.path()), Some("shapes"));

    let names: Vec<&str> = program
        .statements
        .iter()
        .filter_map(|s| match &s.node {
            Statement::Decl(decl) => Some(decl.name()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["exoad:shapes", "Shape", "Outline", "Box", "Color", "Id", "Geometry"]);

    let class = program
        .statements
        .iter()
        .find_map(|s| match &s.node {
            Statement::Decl(Decl::Class(class)) => Some(class),
            _ => None,
        })
        .unwrap();
    let members = class.members.as_ref().unwrap();
    assert_eq!(members.len(), 4);
    assert!(!members[2].node.is_stub());
    assert!(members[1].node.modifiers().iter().any(|m| m.id.to_string() == "weak"));
}

#[test]
fn test_control_flow_fixture_tree() {
    let tree = ast_source(&load("valid", "control_flow"), &KiraConfig::default()).unwrap();
    for expected in [
        "VariableDecl counter: Int32\n",
        "IntegerLiteral 16\n",
        "VariableDecl total: Int32 [mut]\n",
        "CompoundAssignmentExpr total SHR\n",
        "TypeCheckExpr Int32\n",
        "TypeCastExpr Int64\n",
        "MemberAccessExpr static\n",
        "WithMember depth\n",
        "MapLiteral\n",
        "Named color\n",
        "Named scale\n",
        "ReturnStmt\n",
        "NoExpr\n",
    ] {
        assert!(tree.contains(expected), "missing {expected:?} in\n{tree}");
    }
}

#[test]
fn test_invalid_fixture_positions() {
    let cases = [
        ("missing_module", "Parser::parse", (1, 1)),
        ("require_variable", "Parser::check_modifiers", (2, 1)),
        ("unclosed_block", "Parser::parse_block", (4, 1)),
        ("unknown_symbol", "Lexer::next_token", (2, 12)),
    ];
    for (name, tag, (line, column)) in cases {
        let diagnostic = parse_source(&load("invalid", name), &KiraConfig::default()).unwrap_err();
        assert_eq!(diagnostic.tag, tag, "{name}");
        assert_eq!(diagnostic.location, Some(SourcePosition::new(line, column)), "{name}");
    }
}

#[test]
fn test_comments_keep_positions() {
    let source = "// header\nmodule \"a:b\" // trailing\n\n// note\nx: Int32 = )\n";
    let diagnostic = parse_source(source, &KiraConfig::default()).unwrap_err();
    assert_eq!(diagnostic.location, Some(SourcePosition::new(5, 12)));
}

#[test]
fn test_reparse_is_structurally_identical() {
    let source = load("valid", "control_flow");
    let config = KiraConfig::default();
    assert_eq!(parse_source(&source, &config).unwrap(), parse_source(&source, &config).unwrap());
}

#[test]
fn test_token_dump_ends_with_eof() {
    let dump = tokens_source("module \"a:b\"", &KiraConfig::default()).unwrap();
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.lines().last().unwrap().contains("end of file"));
}

#[test]
fn test_assignment_statement_shape() {
    let program = parse_source("module \"a:b\"\nx = y = 1\n", &KiraConfig::default()).unwrap();
    match &program.statements[1].node {
        Statement::Expr(Expr::Assignment(outer)) => {
            assert_eq!(outer.target.name, "x");
            assert!(matches!(&outer.value.node, Expr::Assignment(inner) if inner.target.name == "y"));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}
