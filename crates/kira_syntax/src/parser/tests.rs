#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the context-sensitive parts of the grammar (angle runs, call vs declaration, modifier
/// contexts) and on the exact shape of the fatal diagnostics.
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::lexer;
    use kira_core::lang::precedence::UnaryOp;

    fn parse_str(source: &str) -> Result<Program, Diagnostic> {
        let tokens = lexer::lex(source)?;
        parse(&tokens)
    }

    /// Parse `body` after a module header and return the statements that follow it.
    fn body(body: &str) -> Vec<Statement> {
        let program = parse_str(&format!("module \"test:unit\"\n{body}")).unwrap();
        program.statements.into_iter().skip(1).map(|s| s.node).collect()
    }

    fn body_err(body: &str) -> Diagnostic {
        parse_str(&format!("module \"test:unit\"\n{body}")).unwrap_err()
    }

    fn decl(source: &str) -> Decl {
        match body(source).into_iter().next() {
            Some(Statement::Decl(decl)) => decl,
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    fn expr(source: &str) -> Expr {
        let tokens = lexer::lex(source).unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_expression().unwrap().node
    }

    fn ident(expr: &Spanned<Expr>) -> &str {
        match &expr.node {
            Expr::Identifier(i) => &i.name,
            other => panic!("expected identifier, got {other:?}"),
        }
    }

    fn binary(expr: &Expr) -> &BinaryExpr {
        match expr {
            Expr::Binary(b) => b,
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    // ========================================================================
    // Program shape
    // ========================================================================

    #[test]
    fn test_first_statement_must_be_a_module() {
        let err = parse_str("x: Int32 = 1\nmodule \"a:b\"\n").unwrap_err();
        assert_eq!(err.tag, "Parser::parse");
        assert_eq!(err.message, "The first statement must be a module declaration, but found 'x'.");
        assert_eq!(err.location, Some(SourcePosition::new(1, 1)));
    }

    #[test]
    fn test_empty_input_has_no_module() {
        let err = parse_str("").unwrap_err();
        assert!(err.message.contains("end of file"));
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let program = parse_str("\n\n;module \"exoad:std/io\"\n").unwrap();
        let module = program.module().unwrap();
        assert_eq!(module.author(), "exoad");
        assert_eq!(module.path(), "std/io");
    }

    #[test]
    fn test_module_uri_must_have_author_and_path() {
        for bad in ["module \"nocolon\"", "module \":path\"", "module \"author:\""] {
            let err = parse_str(bad).unwrap_err();
            assert_eq!(err.tag, "Parser::parse_module_decl", "{bad}");
        }
    }

    #[test]
    fn test_invalid_module_uri_underlines_the_whole_literal() {
        let err = parse_str("module \"nocolon\"").unwrap_err();
        assert_eq!(err.location, Some(SourcePosition::new(1, 8)));
        assert_eq!(err.byte_offset, Some(7));
        assert_eq!(err.underline_length, "\"nocolon\"".len());

        let err = parse_str("module \"grüße\"").unwrap_err();
        assert_eq!(err.underline_length, 7);
        assert_eq!(err.underline_bytes, "\"grüße\"".len());
    }

    #[test]
    fn test_statements_share_a_line_with_semicolons() {
        let stmts = body("a = 1; b = 2;");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[1], Statement::Expr(Expr::Assignment(a)) if a.target.name == "b"));
    }

    #[test]
    fn test_idempotent_over_the_same_tokens() {
        let source = "module \"a:b\"\nclass P<T> : Q { pub x: T\n get(): T { return x } }\ny: Int32 = 1 + 2 * 3\n";
        let tokens = lexer::lex(source).unwrap();
        assert_eq!(parse(&tokens).unwrap(), parse(&tokens).unwrap());
    }

    // ========================================================================
    // Angle runs
    // ========================================================================

    #[test]
    fn test_nested_generic_closes_are_consumed_one_at_a_time() {
        let Decl::Variable(var) = decl("x: Array<Array<Array<Int32>>>\n") else {
            panic!("expected variable");
        };
        assert_eq!(var.ty.depth(), 3);
        assert_eq!(var.ty.to_string(), "Array<Array<Array<Int32>>>");
        assert!(var.value.is_none());
    }

    #[test]
    fn test_angle_runs_in_operator_position() {
        for (source, op) in [
            ("a >>> b", BinaryOp::UShr),
            ("a >> b", BinaryOp::Shr),
            ("a >= b", BinaryOp::Ge),
            ("a > b", BinaryOp::Gt),
        ] {
            let tokens = lexer::lex(source).unwrap();
            assert!(
                tokens[1..tokens.len() - 2]
                    .iter()
                    .all(|t| t.is_operator(OperatorId::Gt) || t.is_operator(OperatorId::Eq)),
                "{source} should lex as a run of single '>' tokens"
            );
            let e = expr(source);
            let b = binary(&e);
            assert_eq!(b.op, op, "{source}");
            assert_eq!(ident(&b.left), "a");
            assert_eq!(ident(&b.right), "b");
        }
    }

    #[test]
    fn test_separated_angles_are_not_merged() {
        let tokens = lexer::lex("a > > b").unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.message, "'>' is not allowed here.");
        assert_eq!(err.location, Some(SourcePosition::new(1, 5)));
    }

    #[test]
    fn test_shift_binds_tighter_than_comparison() {
        let e = expr("a >> 1 > b");
        let gt = binary(&e);
        assert_eq!(gt.op, BinaryOp::Gt);
        assert_eq!(binary(&gt.left.node).op, BinaryOp::Shr);
    }

    #[test]
    fn test_compound_shift_assignment() {
        for (source, op) in [("x >>= 2", BinaryOp::Shr), ("x >>>= 2", BinaryOp::UShr), ("x <<= 2", BinaryOp::Shl)] {
            match expr(source) {
                Expr::CompoundAssignment(c) => {
                    assert_eq!(c.target.name, "x");
                    assert_eq!(c.op, op, "{source}");
                    assert_eq!(c.value.node, Expr::Literal(Literal::Integer(2)));
                }
                other => panic!("{source}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_lexed_compound_assignments() {
        for (source, op) in [("x += 1", BinaryOp::Add), ("x %= 1", BinaryOp::Mod), ("x ^= 1", BinaryOp::Xor)] {
            assert!(matches!(expr(source), Expr::CompoundAssignment(c) if c.op == op), "{source}");
        }
    }

    #[test]
    fn test_shift_assign_stops_a_binary_expression() {
        let tokens = lexer::lex("a.b >>= 2").unwrap();
        let mut parser = Parser::new(&tokens);
        let e = parser.parse_expression().unwrap();
        assert!(matches!(e.node, Expr::MemberAccess(_)));
        assert!(parser.current().is_operator(OperatorId::Gt));
        assert_eq!(parser.snapshot().cursor, 3);
    }

    #[test]
    fn test_angle_runs_work_with_the_smallest_window() {
        let tokens = lexer::lex("module \"a:b\"\nx >>>= y >>> 1\n").unwrap();
        let program = parse_with_window_size(&tokens, 4).unwrap().unwrap();
        assert!(matches!(
            &program.statements[1].node,
            Statement::Expr(Expr::CompoundAssignment(c)) if c.op == BinaryOp::UShr
        ));
    }

    #[test]
    fn test_reading_an_angle_run_leaves_the_cursor_in_place() {
        for (source, run) in [
            ("a > b", AngleRun::Gt),
            ("a >", AngleRun::Gt),
            ("a > = b", AngleRun::Gt),
            ("a >= b", AngleRun::Ge),
            ("a >> b", AngleRun::Shr),
            ("a >>>= b", AngleRun::UShrAssign),
        ] {
            let tokens = lexer::lex(source).unwrap();
            let mut parser = Parser::new(&tokens);
            parser.buffer.advance();
            assert_eq!(parser.read_angle_run().unwrap(), run, "{source}");
            assert_eq!(parser.buffer.position(), 1, "{source}");
            assert!(parser.stack.is_empty(), "{source}");
        }
    }

    #[test]
    fn test_invalid_window_size_is_rejected() {
        let tokens = lexer::lex("module \"a:b\"").unwrap();
        assert_eq!(parse_with_window_size(&tokens, 6).unwrap_err(), InvalidWindowSize(6));
    }

    // ========================================================================
    // Call vs declaration
    // ========================================================================

    #[test]
    fn test_call_and_declaration_share_a_prefix() {
        let stmts = body("foo(x)\nfoo(x: Int32): Void { }\n");
        match &stmts[0] {
            Statement::Expr(Expr::FunctionCall(call)) => {
                assert_eq!(call.callee.name, "foo");
                assert_eq!(call.positional.len(), 1);
                assert_eq!(ident(&call.positional[0].value), "x");
            }
            other => panic!("expected call, got {other:?}"),
        }
        match &stmts[1] {
            Statement::Decl(Decl::Function(f)) => {
                assert_eq!(f.name.name, "foo");
                assert_eq!(f.literal.parameters.len(), 1);
                assert_eq!(f.literal.parameters[0].ty.name, "Int32");
                assert_eq!(f.literal.body.as_deref(), Some(&[][..]));
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_parameter_declaration_and_call() {
        let stmts = body("run(): Void\nrun()\n");
        assert!(matches!(&stmts[0], Statement::Decl(d @ Decl::Function(_)) if d.is_stub()));
        assert!(matches!(&stmts[1], Statement::Expr(Expr::FunctionCall(c)) if c.positional.is_empty()));
    }

    #[test]
    fn test_nested_call_arguments() {
        let stmts = body("outer(inner(1), 2)\n");
        let Statement::Expr(Expr::FunctionCall(call)) = &stmts[0] else {
            panic!("expected call");
        };
        assert_eq!(call.positional.len(), 2);
        assert_eq!(call.positional[1].index, 1);
        assert!(matches!(call.positional[0].value.node, Expr::FunctionCall(_)));
    }

    #[test]
    fn test_named_arguments_follow_positional_ones() {
        let Expr::FunctionCall(call) = expr("draw(1, color = red)") else {
            panic!("expected call");
        };
        assert_eq!(call.positional.len(), 1);
        assert_eq!(call.named[0].name.name, "color");

        let tokens = lexer::lex("draw(color = red, 1)").unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.message, "Positional arguments cannot follow named arguments.");
    }

    #[test]
    fn test_unterminated_call_reports_the_open_paren() {
        let err = body_err("foo(1, 2");
        assert_eq!(err.message, "Expected ')' but found end of file.");
        assert_eq!(err.help.as_deref(), Some("The '(' at 2:4 is never closed."));
    }

    #[test]
    fn test_colons_inside_call_arguments_do_not_make_a_declaration() {
        let stmts = body("foo({1: 2})\nfoo(fx(a: Int32): Void { })\nfoo(with { depth: 1 })\n");
        assert_eq!(stmts.len(), 3);
        let argument = |stmt: &Statement| match stmt {
            Statement::Expr(Expr::FunctionCall(call)) => {
                assert_eq!(call.callee.name, "foo");
                assert_eq!(call.positional.len(), 1);
                call.positional[0].value.node.clone()
            }
            other => panic!("expected call, got {other:?}"),
        };
        assert!(matches!(argument(&stmts[0]), Expr::Literal(Literal::Map(_))));
        assert!(matches!(argument(&stmts[1]), Expr::Literal(Literal::Function(_))));
        assert!(matches!(argument(&stmts[2]), Expr::With(_)));
    }

    #[test]
    fn test_declaration_with_generic_parameter_types() {
        let d = decl("apply(f: Int32, xs: Array<Int32>): Void { }\n");
        let Decl::Function(f) = d else {
            panic!("expected function declaration");
        };
        assert_eq!(f.literal.parameters.len(), 2);
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    #[test]
    fn test_require_is_rejected_on_a_module_level_variable() {
        let err = body_err("require x: Int32 = 1\n");
        assert_eq!(err.tag, "Parser::check_modifiers");
        assert_eq!(err.message, "The modifier 'require' cannot be applied to a variable.");
        assert_eq!(err.location, Some(SourcePosition::new(2, 1)));
        assert_eq!(err.underline_length, "require".len());
    }

    #[test]
    fn test_pub_is_accepted_on_a_module_level_variable() {
        let d = decl("pub x: Int32 = 1\n");
        assert!(d.has_modifier(ModifierId::Public));
        assert!(!d.is_stub());
    }

    #[test]
    fn test_require_is_accepted_on_class_and_trait_members() {
        let Decl::Class(class) = decl("class A { require x: Int32\n require f(): Void }\n") else {
            panic!("expected class");
        };
        let members = class.members.unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|m| m.node.has_modifier(ModifierId::Require)));

        assert!(matches!(decl("trait T { require f(): Void }\n"), Decl::Trait(_)));
    }

    #[test]
    fn test_duplicate_modifier() {
        let err = body_err("pub pub x: Int32\n");
        assert_eq!(err.message, "The modifier 'pub' was already specified at 2:1.");
        assert_eq!(err.location, Some(SourcePosition::new(2, 5)));
    }

    #[test]
    fn test_modifier_must_precede_a_declaration() {
        let err = body_err("pub 1 + 2\n");
        assert_eq!(err.message, "The modifier 'pub' must be followed by a declaration, but found '1'.");
    }

    #[test]
    fn test_parameter_modifiers_use_the_parameter_context() {
        let Decl::Function(f) = decl("f(weak a: Node): Void\n") else {
            panic!("expected function");
        };
        assert_eq!(f.literal.parameters[0].modifiers[0].id, ModifierId::Weak);

        let err = body_err("f(pub a: Node): Void\n");
        assert_eq!(err.message, "The modifier 'pub' cannot be applied to a function parameter.");
    }

    #[test]
    fn test_mut_before_a_literal_is_not_a_modifier() {
        let Decl::Variable(var) = decl("xs: List<Int32> = mut [1, 2]\n") else {
            panic!("expected variable");
        };
        assert!(matches!(var.value.unwrap().node, Expr::Literal(Literal::List(items)) if items.len() == 2));
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let e = expr("1 + 2 * 3");
        let add = binary(&e);
        assert_eq!(add.op, BinaryOp::Add);
        assert_eq!(binary(&add.right.node).op, BinaryOp::Mul);
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        let e = expr("a - b - c");
        let outer = binary(&e);
        assert_eq!(ident(&outer.right), "c");
        let inner = binary(&outer.left.node);
        assert_eq!((ident(&inner.left), ident(&inner.right)), ("a", "b"));
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let e = expr("-a + b");
        let add = binary(&e);
        assert!(matches!(&add.left.node, Expr::Unary(u) if u.op == UnaryOp::Neg));
        assert_eq!(ident(&add.right), "b");
    }

    #[test]
    fn test_logical_operators_sit_below_comparison() {
        let e = expr("a == b && !c || d");
        let or = binary(&e);
        assert_eq!(or.op, BinaryOp::Or);
        let and = binary(&or.left.node);
        assert_eq!(and.op, BinaryOp::And);
        assert_eq!(binary(&and.left.node).op, BinaryOp::Eq);
        assert!(matches!(&and.right.node, Expr::Unary(u) if u.op == UnaryOp::Not));
    }

    #[test]
    fn test_member_and_static_access() {
        let Expr::MemberAccess(outer) = expr("a.b::c") else {
            panic!("expected member access");
        };
        assert!(outer.is_static);
        assert_eq!(ident(&outer.member), "c");
        assert!(matches!(&outer.object.node, Expr::MemberAccess(inner) if !inner.is_static));
    }

    #[test]
    fn test_range_between_integers() {
        let Expr::Range(range) = expr("0..10") else {
            panic!("expected range");
        };
        assert_eq!(range.start.node, Expr::Literal(Literal::Integer(0)));
        assert_eq!(range.end.node, Expr::Literal(Literal::Integer(10)));
    }

    #[test]
    fn test_type_check_and_cast_take_a_type() {
        assert!(matches!(expr("x is Array<Int32>"), Expr::TypeCheck(t) if t.ty.generics.len() == 1));
        assert!(matches!(expr("x as Float64?"), Expr::TypeCast(t) if t.ty.nullable));
    }

    #[test]
    fn test_parentheses_group() {
        let e = expr("(1 + 2) * 3");
        let mul = binary(&e);
        assert_eq!(mul.op, BinaryOp::Mul);
        assert_eq!(binary(&mul.left.node).op, BinaryOp::Add);
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("42"), Expr::Literal(Literal::Integer(42)));
        assert_eq!(expr("0xFF"), Expr::Literal(Literal::Integer(255)));
        assert_eq!(expr("1.5"), Expr::Literal(Literal::Float(1.5)));
        assert_eq!(expr("\"a\\n\""), Expr::Literal(Literal::String("a\\n".to_string())));
        assert_eq!(expr("true"), Expr::Literal(Literal::Bool(true)));
        assert_eq!(expr("null"), Expr::Literal(Literal::Null));
    }

    #[test]
    fn test_integer_overflow_is_a_diagnostic() {
        let err = body_err("x: Int64 = 99999999999999999999\n");
        assert_eq!(err.tag, "Parser::parse_integer_literal");
        assert_eq!(err.location, Some(SourcePosition::new(2, 12)));
    }

    #[test]
    fn test_unexpected_token_position() {
        let err = body_err("x: Int32 = )\n");
        assert_eq!(err.tag, "Parser::parse_primary");
        assert_eq!(err.message, "')' is not allowed here.");
        assert_eq!(err.location, Some(SourcePosition::new(2, 12)));
    }

    #[test]
    fn test_aggregate_literals() {
        assert!(matches!(expr("[1, 2, 3]"), Expr::Literal(Literal::Array(items)) if items.len() == 3));
        assert!(matches!(expr("[1, 2,]"), Expr::Literal(Literal::Array(items)) if items.len() == 2));
        assert!(matches!(expr("[\n1,\n2\n]"), Expr::Literal(Literal::Array(items)) if items.len() == 2));
        assert!(matches!(expr("[]"), Expr::Literal(Literal::Array(items)) if items.is_empty()));
        assert!(matches!(
            expr("{\"a\": 1, \"b\": 2}"),
            Expr::Literal(Literal::Map(m)) if m.entries.len() == 2 && !m.mutable
        ));
        assert!(matches!(expr("mut {}"), Expr::Literal(Literal::Map(m)) if m.entries.is_empty() && m.mutable));
    }

    #[test]
    fn test_aggregate_elements_need_commas() {
        let tokens = lexer::lex("[1 2]").unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.message, "Expected ',' or ']' but found '2'.");
    }

    #[test]
    fn test_unclosed_array() {
        let err = body_err("x: Array<Int32> = [1, 2\n");
        assert_eq!(err.message, "Expected ']' but found end of file.");
        assert_eq!(err.help.as_deref(), Some("The '[' at 2:19 is never closed."));
    }

    #[test]
    fn test_intrinsic_calls() {
        let Expr::IntrinsicCall(call) = expr("@trace(\"hi\", x)") else {
            panic!("expected intrinsic call");
        };
        assert_eq!(call.intrinsic, intrinsics::IntrinsicId::Trace);
        assert_eq!(call.arguments.len(), 2);

        let tokens = lexer::lex("@nope()").unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.message, "I could not find an intrinsic named '@nope'.");
    }

    #[test]
    fn test_with_expression() {
        let Expr::With(with) = expr("with { a: 1, b: x + 1 }") else {
            panic!("expected with");
        };
        let names: Vec<_> = with.members.iter().map(|m| m.name.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_function_literal() {
        let Decl::Variable(var) = decl("f: Fn = fx(a: Int32): Int32 { return a }\n") else {
            panic!("expected variable");
        };
        match var.value.unwrap().node {
            Expr::Literal(Literal::Function(f)) => {
                assert_eq!(f.parameters.len(), 1);
                assert_eq!(f.body.unwrap().len(), 1);
            }
            other => panic!("expected function literal, got {other:?}"),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_if_else_chain_across_lines() {
        let stmts = body("if (a) { b }\nelse if (c) { d }\nelse { e }\n");
        let Statement::If(stmt) = &stmts[0] else {
            panic!("expected if");
        };
        assert_eq!(ident(&stmt.condition), "a");
        assert_eq!(stmt.else_ifs.len(), 1);
        assert_eq!(stmt.else_ifs[0].position, SourcePosition::new(3, 6));
        assert_eq!(stmt.else_block.as_ref().map(Vec::len), Some(1));
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_loops() {
        let stmts = body("while (x < 10) { x += 1 }\ndo { x = x - 1 }\nwhile (x > 0)\nfor (mut i : 0..10) { continue }\n");
        assert_eq!(stmts.len(), 3);
        assert!(matches!(&stmts[0], Statement::While(w) if w.body.len() == 1));
        assert!(matches!(&stmts[1], Statement::DoWhile(d) if binary(&d.condition.node).op == BinaryOp::Gt));
        let Statement::For(f) = &stmts[2] else {
            panic!("expected for");
        };
        assert!(f.iteration.mutable);
        assert_eq!(f.iteration.binding.name, "i");
        assert!(matches!(f.iteration.target.node, Expr::Range(_)));
        assert_eq!(f.body, vec![Spanned::new(Statement::Continue, SourcePosition::new(4, 23))]);
    }

    #[test]
    fn test_return_without_value() {
        let Decl::Function(f) = decl("f(): Void { return }\n") else {
            panic!("expected function");
        };
        let body = f.literal.body.unwrap();
        assert!(matches!(&body[0].node, Statement::Return(r) if r.value.node == Expr::NoExpr));
    }

    #[test]
    fn test_use_and_break() {
        let stmts = body("use \"std:io\"\nwhile (true) { break }\n");
        assert_eq!(stmts[0], Statement::Use(UseStmt { uri: "std:io".into() }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = body_err("while (true) {\n x = 1\n");
        assert_eq!(err.message, "Expected '}' but found end of file.");
        assert_eq!(err.help.as_deref(), Some("The '{' at 2:14 is never closed."));
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_class_with_generics_parent_and_members() {
        let Decl::Class(class) = decl("pub class Box<T> : Base {\n pub value: T\n get(): T { return value }\n}\n") else {
            panic!("expected class");
        };
        assert_eq!(class.name.name, "Box");
        assert_eq!(class.generics[0].name, "T");
        assert_eq!(class.parent.unwrap().name, "Base");
        let members = class.members.unwrap();
        assert!(matches!(members[0].node, Decl::Variable(_)));
        assert!(matches!(members[1].node, Decl::Function(_)));
    }

    #[test]
    fn test_class_without_body_is_a_stub() {
        let d = decl("class Opaque\n");
        assert!(d.is_stub());
    }

    #[test]
    fn test_class_body_rejects_calls() {
        let err = body_err("class A { run() }\n");
        assert_eq!(err.tag, "Parser::parse_class_member");
        assert_eq!(err.message, "Expected a function declaration but found 'run'.");
    }

    #[test]
    fn test_enum_members() {
        let Decl::Enum(e) = decl("enum Color { Red, Green = 2,\n Blue = \"b\" }\n") else {
            panic!("expected enum");
        };
        assert_eq!(e.members.len(), 3);
        assert_eq!(e.members[0].value, None);
        assert_eq!(e.members[1].value, Some(Literal::Integer(2)));
        assert_eq!(e.members[2].value, Some(Literal::String("b".into())));
    }

    #[test]
    fn test_enum_values_must_be_simple_literals() {
        let err = body_err("enum E { A = [1] }\n");
        assert_eq!(err.message, "Only simple literals are allowed as enum values.");
    }

    #[test]
    fn test_namespace_trait_alias_and_variant() {
        let stmts = body(
            "namespace Geo { pub class Point\n origin(): Point }\n\
             trait Shape : Named, Sized { area(): Float64 }\n\
             type Id = Int64\n\
             variant Result : Base { class Ok { value: Int32 }\n class Err }\n",
        );
        let decls: Vec<&Decl> = stmts
            .iter()
            .map(|s| match s {
                Statement::Decl(d) => d,
                other => panic!("expected declaration, got {other:?}"),
            })
            .collect();
        assert!(matches!(decls[0], Decl::Namespace(n) if n.members.len() == 2));
        assert!(matches!(decls[1], Decl::Trait(t) if t.parents.len() == 2));
        assert!(matches!(decls[2], Decl::TypeAlias(a) if a.target.name == "Int64"));
        assert!(matches!(decls[3], Decl::Variant(v) if v.members.len() == 2));
    }

    #[test]
    fn test_namespace_members_use_the_member_context() {
        let err = body_err("namespace N { require x: Int32 }\n");
        assert_eq!(err.message, "The modifier 'require' cannot be applied to a namespace member.");
    }

    #[test]
    fn test_evaluate_rewinds_a_failed_type() {
        let tokens = lexer::lex("Array<Int32").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(parser.evaluate(|p| p.parse_type()).is_err());
        assert_eq!(parser.snapshot().cursor, 0);
        assert_eq!(parser.stack.depth(), 0);
    }

    // ========================================================================
    // Nesting depth
    // ========================================================================

    fn parenthesized(levels: usize) -> String {
        format!("{}1{}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn test_nesting_up_to_the_limit_parses() {
        let source = parenthesized(MAX_NESTING_DEPTH - 1);
        let tokens = lexer::lex(&source).unwrap();
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.parse_expression().unwrap().node, Expr::Literal(Literal::Integer(1)));
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_nesting_past_the_limit_is_a_diagnostic() {
        let tokens = lexer::lex(&parenthesized(MAX_NESTING_DEPTH)).unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Syntax);
        assert_eq!(err.tag, "Parser::nested");
        assert_eq!(err.message, format!("Nesting is deeper than {MAX_NESTING_DEPTH} levels."));
        assert_eq!(err.location, Some(SourcePosition::new(1, MAX_NESTING_DEPTH as i32 + 1)));
    }

    #[test]
    fn test_deep_input_of_every_shape_fails_without_overflowing() {
        let deep = 10_000;
        for source in [
            format!("x: Int32 = {}", parenthesized(deep)),
            format!("x: Int32 = {}1", "-".repeat(deep)),
            format!("x = {}1{}", "[".repeat(deep), "]".repeat(deep)),
            format!("main(): Void {}{}", "{ if (a) ".repeat(deep), "}".repeat(deep)),
            format!("x: {}Int32{}", "Array<".repeat(deep), ">".repeat(deep)),
            format!("{}{}", "namespace N { ".repeat(deep), "}".repeat(deep)),
        ] {
            let err = body_err(&source);
            assert_eq!(err.tag, "Parser::nested", "{}", &source[..40]);
        }
    }
}
