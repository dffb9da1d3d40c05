//! AST tree printer
//!
//! Renders a parsed [`Program`] as an indented tree, one node per line:
//!
//! ```text
//! Program
//!   ModuleDecl "me:demo"
//!   VariableDecl x: Int32
//!     BinaryExpr ADD
//!       IntegerLiteral 1
//!       IntegerLiteral 2
//! ```
//!
//! Operator tags come from the `kira_core` tables, so the dump never drifts from the parser's vocabulary.

use kira_core::lang::{intrinsics, precedence};
use kira_syntax::ast::*;

const INDENT_WIDTH: usize = 2;

/// Render `program` as an indented tree.
pub fn print_program(program: &Program) -> String {
    let mut printer = AstPrinter::new();
    printer.visit_program(program);
    printer.finish()
}

/// Visitor that builds the tree dump
#[derive(Debug, Default)]
pub struct AstPrinter {
    output: String,
    depth: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rendered tree
    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.output.push_str(&" ".repeat(self.depth * INDENT_WIDTH));
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    /// Print `header`, then everything `children` prints one level deeper.
    fn node(&mut self, header: impl AsRef<str>, children: impl FnOnce(&mut Self)) {
        self.line(header);
        self.depth += 1;
        children(self);
        self.depth -= 1;
    }

    fn block(&mut self, label: &str, block: &Block) {
        self.node(label, |p| walk_block(p, block));
    }
}

/// ` [pub, weak]`, or nothing when there are no modifiers.
fn modifier_suffix(modifiers: &[Modifier]) -> String {
    if modifiers.is_empty() {
        return String::new();
    }
    let names: Vec<String> = modifiers.iter().map(|m| m.id.to_string()).collect();
    format!(" [{}]", names.join(", "))
}

/// One-line rendering of literals that have no children.
fn scalar_literal(literal: &Literal) -> Option<String> {
    Some(match literal {
        Literal::Integer(value) => format!("IntegerLiteral {value}"),
        Literal::Float(value) => format!("FloatLiteral {value}"),
        Literal::String(value) => format!("StringLiteral \"{value}\""),
        Literal::Bool(value) => format!("BoolLiteral {value}"),
        Literal::Null => "NullLiteral".to_string(),
        _ => return None,
    })
}

impl Visitor for AstPrinter {
    fn visit_program(&mut self, program: &Program) {
        self.node("Program", |p| walk_program(p, program));
    }

    // ---- statements -------------------------------------------------------

    fn visit_if(&mut self, stmt: &IfStmt) {
        self.node("IfStmt", |p| {
            p.visit_expr(&stmt.condition);
            p.block("Then", &stmt.then_block);
            for branch in &stmt.else_ifs {
                p.visit_else_if(branch);
            }
            if let Some(block) = &stmt.else_block {
                p.block("Else", block);
            }
        });
    }

    fn visit_else_if(&mut self, branch: &ElseIfBranch) {
        self.node("ElseIf", |p| walk_else_if(p, branch));
    }

    fn visit_while(&mut self, stmt: &WhileStmt) {
        self.node("WhileStmt", |p| walk_while(p, stmt));
    }

    fn visit_do_while(&mut self, stmt: &DoWhileStmt) {
        self.node("DoWhileStmt", |p| walk_do_while(p, stmt));
    }

    fn visit_for(&mut self, stmt: &ForStmt) {
        self.node("ForStmt", |p| walk_for(p, stmt));
    }

    fn visit_for_iteration(&mut self, iteration: &ForIterationExpr) {
        let header = if iteration.mutable {
            format!("ForIteration mut {}", iteration.binding.name)
        } else {
            format!("ForIteration {}", iteration.binding.name)
        };
        self.node(header, |p| p.visit_expr(&iteration.target));
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        self.node("ReturnStmt", |p| p.visit_expr(&stmt.value));
    }

    fn visit_break(&mut self) {
        self.line("BreakStmt");
    }

    fn visit_continue(&mut self) {
        self.line("ContinueStmt");
    }

    fn visit_use(&mut self, stmt: &UseStmt) {
        self.line(format!("UseStmt \"{}\"", stmt.uri));
    }

    // ---- expressions ------------------------------------------------------

    fn visit_literal(&mut self, literal: &Literal) {
        if let Some(text) = scalar_literal(literal) {
            self.line(text);
            return;
        }
        let header = match literal {
            Literal::Array(_) => "ArrayLiteral",
            Literal::List(_) => "ListLiteral",
            Literal::Map(map) if map.mutable => "MapLiteral mut",
            Literal::Map(_) => "MapLiteral",
            // Function literals print their own header.
            _ => return walk_literal(self, literal),
        };
        self.node(header, |p| walk_literal(p, literal));
    }

    fn visit_identifier(&mut self, ident: &Identifier) {
        self.line(format!("Identifier {}", ident.name));
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) {
        self.node(format!("BinaryExpr {}", precedence::info_for(expr.op).name), |p| {
            p.visit_expr(&expr.left);
            p.visit_expr(&expr.right);
        });
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) {
        self.node(format!("UnaryExpr {}", expr.op.name()), |p| p.visit_expr(&expr.operand));
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) {
        self.node(format!("AssignmentExpr {}", expr.target.name), |p| p.visit_expr(&expr.value));
    }

    fn visit_compound_assignment(&mut self, expr: &CompoundAssignmentExpr) {
        let header = format!(
            "CompoundAssignmentExpr {} {}",
            expr.target.name,
            precedence::info_for(expr.op).name
        );
        self.node(header, |p| p.visit_expr(&expr.value));
    }

    fn visit_member_access(&mut self, expr: &MemberAccessExpr) {
        let header = if expr.is_static { "MemberAccessExpr static" } else { "MemberAccessExpr" };
        self.node(header, |p| {
            p.visit_expr(&expr.object);
            p.visit_expr(&expr.member);
        });
    }

    fn visit_range(&mut self, expr: &RangeExpr) {
        self.node("RangeExpr", |p| {
            p.visit_expr(&expr.start);
            p.visit_expr(&expr.end);
        });
    }

    fn visit_function_call(&mut self, expr: &FunctionCallExpr) {
        self.node(format!("FunctionCallExpr {}", expr.callee.name), |p| {
            for arg in &expr.positional {
                p.visit_positional_argument(arg);
            }
            for arg in &expr.named {
                p.visit_named_argument(arg);
            }
        });
    }

    fn visit_positional_argument(&mut self, arg: &FunctionCallPositionalParameter) {
        self.node(format!("Positional #{}", arg.index), |p| p.visit_expr(&arg.value));
    }

    fn visit_named_argument(&mut self, arg: &FunctionCallNamedParameter) {
        self.node(format!("Named {}", arg.name.name), |p| p.visit_expr(&arg.value));
    }

    fn visit_type_check(&mut self, expr: &TypeCheckExpr) {
        self.node(format!("TypeCheckExpr {}", expr.ty), |p| p.visit_expr(&expr.value));
    }

    fn visit_type_cast(&mut self, expr: &TypeCastExpr) {
        self.node(format!("TypeCastExpr {}", expr.ty), |p| p.visit_expr(&expr.value));
    }

    fn visit_with(&mut self, expr: &WithExpr) {
        self.node("WithExpr", |p| {
            for member in &expr.members {
                p.visit_with_member(member);
            }
        });
    }

    fn visit_with_member(&mut self, member: &WithExprMember) {
        self.node(format!("WithMember {}", member.name.name), |p| p.visit_expr(&member.value));
    }

    fn visit_intrinsic_call(&mut self, expr: &IntrinsicCallExpr) {
        self.node(format!("IntrinsicCallExpr @{}", intrinsics::as_str(expr.intrinsic)), |p| {
            for arg in &expr.arguments {
                p.visit_expr(arg);
            }
        });
    }

    fn visit_no_expr(&mut self) {
        self.line("NoExpr");
    }

    fn visit_function_literal(&mut self, literal: &FunctionLiteral) {
        let header = if literal.is_stub() { "FunctionLiteral stub" } else { "FunctionLiteral" };
        self.node(format!("{header}: {}", literal.return_type), |p| {
            for param in &literal.parameters {
                p.visit_parameter(param);
            }
            if let Some(body) = &literal.body {
                walk_block(p, body);
            }
        });
    }

    fn visit_parameter(&mut self, param: &FunctionParameter) {
        self.line(format!(
            "Parameter {}: {}{}",
            param.name.name,
            param.ty,
            modifier_suffix(&param.modifiers)
        ));
    }

    // ---- declarations -----------------------------------------------------

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        let header = format!("VariableDecl {}: {}{}", decl.name.name, decl.ty, modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            if let Some(value) = &decl.value {
                p.visit_expr(value);
            }
        });
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) {
        let header = format!("FunctionDecl {}{}", decl.name.name, modifier_suffix(&decl.modifiers));
        self.node(header, |p| p.visit_function_literal(&decl.literal));
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        let mut header = format!("ClassDecl {}", decl.name.name);
        if !decl.generics.is_empty() {
            let generics: Vec<String> = decl.generics.iter().map(ToString::to_string).collect();
            header.push_str(&format!("<{}>", generics.join(", ")));
        }
        if let Some(parent) = &decl.parent {
            header.push_str(&format!(" : {parent}"));
        }
        if decl.members.is_none() {
            header.push_str(" stub");
        }
        header.push_str(&modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            for member in decl.members.iter().flatten() {
                p.visit_decl(member);
            }
        });
    }

    fn visit_enum_decl(&mut self, decl: &EnumDecl) {
        let header = format!("EnumDecl {}{}", decl.name.name, modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            for member in &decl.members {
                p.visit_enum_member(member);
            }
        });
    }

    fn visit_enum_member(&mut self, member: &EnumMemberExpr) {
        match member.value.as_ref().and_then(scalar_literal) {
            Some(value) => self.line(format!("EnumMember {} = {value}", member.name.name)),
            None => self.line(format!("EnumMember {}", member.name.name)),
        }
    }

    fn visit_module_decl(&mut self, decl: &ModuleDecl) {
        self.line(format!("ModuleDecl \"{}\"", decl.uri));
    }

    fn visit_namespace_decl(&mut self, decl: &NamespaceDecl) {
        let header = format!("NamespaceDecl {}{}", decl.name.name, modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            for member in &decl.members {
                p.visit_decl(member);
            }
        });
    }

    fn visit_trait_decl(&mut self, decl: &TraitDecl) {
        let mut header = format!("TraitDecl {}", decl.name.name);
        if !decl.parents.is_empty() {
            let parents: Vec<String> = decl.parents.iter().map(ToString::to_string).collect();
            header.push_str(&format!(" : {}", parents.join(", ")));
        }
        header.push_str(&modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            for member in decl.members.iter().flatten() {
                p.visit_decl(member);
            }
        });
    }

    fn visit_type_alias_decl(&mut self, decl: &TypeAliasDecl) {
        self.line(format!(
            "TypeAliasDecl {} = {}{}",
            decl.name.name,
            decl.target,
            modifier_suffix(&decl.modifiers)
        ));
    }

    fn visit_variant_decl(&mut self, decl: &VariantDecl) {
        let mut header = format!("VariantDecl {}", decl.name.name);
        if let Some(parent) = &decl.parent {
            header.push_str(&format!(" : {parent}"));
        }
        header.push_str(&modifier_suffix(&decl.modifiers));
        self.node(header, |p| {
            for member in &decl.members {
                p.visit_decl(member);
            }
        });
    }

    fn visit_type(&mut self, ty: &TypeSpecifier) {
        self.line(format!("Type {ty}"));
    }
}
