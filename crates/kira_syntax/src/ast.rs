//! Abstract Syntax Tree for Kira
//!
//! The tree is a closed set of enums: [`Statement`], [`Expr`], [`Literal`] and [`Decl`]. Adding a variant breaks
//! every exhaustive `match` in the `walk_*` functions below until it is handled, which is how downstream
//! [`Visitor`]s stay complete.
//!
//! ## Notes
//! - Nodes own their children (`Box`/`Vec`); there is no sharing and no cycles.
//! - Nodes are built once by the parser and never mutated afterwards.
//! - Equality is structural. Two parses of the same token list compare equal.

use kira_core::lang::intrinsics::IntrinsicId;
use kira_core::lang::modifiers::ModifierId;
use kira_core::lang::precedence::{BinaryOp, UnaryOp};

use crate::source::SourcePosition;

/// A node paired with the source position of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub position: SourcePosition,
}

impl<T> Spanned<T> {
    pub fn new(node: T, position: SourcePosition) -> Self {
        Self { node, position }
    }
}

/// A sequence of statements between braces.
pub type Block = Vec<Spanned<Statement>>;

/// A compilation unit. The first statement is always the module declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
}

impl Program {
    /// The leading `module "author:path"` declaration.
    pub fn module(&self) -> Option<&ModuleDecl> {
        match self.statements.first().map(|s| &s.node) {
            Some(Statement::Decl(Decl::Module(module))) => Some(module),
            _ => None,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expr),
    Decl(Decl),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Break,
    Continue,
    Use(UseStmt),
}

/// `if (c) { } else if (c) { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_block: Block,
    pub else_ifs: Vec<ElseIfBranch>,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfBranch {
    pub condition: Spanned<Expr>,
    pub block: Block,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

/// `do { } while (c)`
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt {
    pub body: Block,
    pub condition: Spanned<Expr>,
}

/// `for (mut x : target) { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub iteration: ForIterationExpr,
    pub body: Block,
}

/// The `(binding : target)` header of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForIterationExpr {
    pub mutable: bool,
    pub binding: Identifier,
    pub target: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Spanned<Expr>,
}

/// `use "author:path"`
#[derive(Debug, Clone, PartialEq)]
pub struct UseStmt {
    pub uri: String,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Assignment(AssignmentExpr),
    CompoundAssignment(CompoundAssignmentExpr),
    MemberAccess(MemberAccessExpr),
    Range(RangeExpr),
    FunctionCall(FunctionCallExpr),
    TypeCheck(TypeCheckExpr),
    TypeCast(TypeCastExpr),
    With(WithExpr),
    IntrinsicCall(IntrinsicCallExpr),
    /// Placeholder where the grammar allows an expression to be absent.
    NoExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    /// Body of the string with escapes kept verbatim.
    String(String),
    Bool(bool),
    Null,
    /// `[a, b]`
    Array(Vec<Spanned<Expr>>),
    /// `mut [a, b]`
    List(Vec<Spanned<Expr>>),
    /// `{k: v}` or `mut {k: v}`
    Map(MapLiteral),
    /// `fx(params): Ret { body }`
    Function(Box<FunctionLiteral>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLiteral {
    pub entries: Vec<(Spanned<Expr>, Spanned<Expr>)>,
    pub mutable: bool,
}

/// Parameters, return type and optional body shared by function declarations and `fx` literals.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<FunctionParameter>,
    pub return_type: TypeSpecifier,
    /// `None` for a stub (signature only).
    pub body: Option<Block>,
}

impl FunctionLiteral {
    pub fn is_stub(&self) -> bool {
        self.body.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: Identifier,
    pub ty: TypeSpecifier,
    pub modifiers: Vec<Modifier>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Spanned<Expr>>,
    pub op: BinaryOp,
    pub right: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Spanned<Expr>>,
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Identifier,
    pub value: Box<Spanned<Expr>>,
}

/// `name op= value`, e.g. `x >>>= 2` with `op` = [`BinaryOp::UShr`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundAssignmentExpr {
    pub target: Identifier,
    pub op: BinaryOp,
    pub value: Box<Spanned<Expr>>,
}

/// `object.member` or, when `is_static`, `object::member`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessExpr {
    pub object: Box<Spanned<Expr>>,
    pub member: Box<Spanned<Expr>>,
    pub is_static: bool,
}

/// `start..end`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    pub start: Box<Spanned<Expr>>,
    pub end: Box<Spanned<Expr>>,
}

/// `name(a, b, key = c)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpr {
    pub callee: Identifier,
    pub positional: Vec<FunctionCallPositionalParameter>,
    pub named: Vec<FunctionCallNamedParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallPositionalParameter {
    /// Zero-based argument index.
    pub index: usize,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallNamedParameter {
    pub name: Identifier,
    pub value: Spanned<Expr>,
}

/// `value is Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCheckExpr {
    pub value: Box<Spanned<Expr>>,
    pub ty: TypeSpecifier,
}

/// `value as Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastExpr {
    pub value: Box<Spanned<Expr>>,
    pub ty: TypeSpecifier,
}

/// `with { name: value, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WithExpr {
    pub members: Vec<WithExprMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithExprMember {
    pub name: Identifier,
    pub value: Spanned<Expr>,
    pub position: SourcePosition,
}

/// `@name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct IntrinsicCallExpr {
    pub intrinsic: IntrinsicId,
    pub arguments: Vec<Spanned<Expr>>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Variable(VariableDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Module(ModuleDecl),
    Namespace(NamespaceDecl),
    Trait(TraitDecl),
    TypeAlias(TypeAliasDecl),
    Variant(VariantDecl),
}

impl Decl {
    /// The declared name (the URI for modules).
    pub fn name(&self) -> &str {
        match self {
            Decl::Variable(d) => &d.name.name,
            Decl::Function(d) => &d.name.name,
            Decl::Class(d) => &d.name.name,
            Decl::Enum(d) => &d.name.name,
            Decl::Module(d) => &d.uri,
            Decl::Namespace(d) => &d.name.name,
            Decl::Trait(d) => &d.name.name,
            Decl::TypeAlias(d) => &d.name.name,
            Decl::Variant(d) => &d.name.name,
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Decl::Variable(d) => &d.modifiers,
            Decl::Function(d) => &d.modifiers,
            Decl::Class(d) => &d.modifiers,
            Decl::Enum(d) => &d.modifiers,
            Decl::Module(_) => &[],
            Decl::Namespace(d) => &d.modifiers,
            Decl::Trait(d) => &d.modifiers,
            Decl::TypeAlias(d) => &d.modifiers,
            Decl::Variant(d) => &d.modifiers,
        }
    }

    /// True for forward declarations: no value, no body.
    pub fn is_stub(&self) -> bool {
        match self {
            Decl::Variable(d) => d.value.is_none(),
            Decl::Function(d) => d.literal.is_stub(),
            Decl::Class(d) => d.members.is_none(),
            Decl::Trait(d) => d.members.is_none(),
            Decl::Enum(_) | Decl::Module(_) | Decl::Namespace(_) | Decl::TypeAlias(_) | Decl::Variant(_) => false,
        }
    }

    pub fn has_modifier(&self, id: ModifierId) -> bool {
        self.modifiers().iter().any(|m| m.id == id)
    }
}

/// A modifier as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    pub id: ModifierId,
    pub position: SourcePosition,
}

/// `Name`, `Name<T, U>`, `Name?`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpecifier {
    pub name: String,
    pub generics: Vec<TypeSpecifier>,
    pub nullable: bool,
    pub position: SourcePosition,
}

impl TypeSpecifier {
    /// Generic nesting depth: `Int32` is 0, `Array<Array<Int32>>` is 2.
    pub fn depth(&self) -> usize {
        self.generics.iter().map(|g| g.depth() + 1).max().unwrap_or(0)
    }
}

impl std::fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.generics.is_empty() {
            f.write_str("<")?;
            for (i, g) in self.generics.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{g}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// `mods name: Type = value`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: Identifier,
    pub ty: TypeSpecifier,
    pub value: Option<Box<Spanned<Expr>>>,
    pub modifiers: Vec<Modifier>,
}

/// `mods name(params): Ret { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub literal: FunctionLiteral,
    pub modifiers: Vec<Modifier>,
}

/// `mods class Name<T> : Parent { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Identifier,
    pub generics: Vec<TypeSpecifier>,
    pub parent: Option<TypeSpecifier>,
    /// `None` when the class has no body.
    pub members: Option<Vec<Spanned<Decl>>>,
    pub modifiers: Vec<Modifier>,
}

/// `enum Name { A, B = 2 }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Identifier,
    pub members: Vec<EnumMemberExpr>,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberExpr {
    pub name: Identifier,
    /// Only simple literals are accepted.
    pub value: Option<Literal>,
    pub position: SourcePosition,
}

/// `module "author:path"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDecl {
    pub uri: String,
}

impl ModuleDecl {
    pub fn author(&self) -> &str {
        self.uri.split_once(':').map_or("", |(author, _)| author)
    }

    pub fn path(&self) -> &str {
        self.uri.split_once(':').map_or("", |(_, path)| path)
    }
}

/// `namespace Name { decls }`
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: Identifier,
    pub members: Vec<Spanned<Decl>>,
    pub modifiers: Vec<Modifier>,
}

/// `trait Name : A, B { function members }`
#[derive(Debug, Clone, PartialEq)]
pub struct TraitDecl {
    pub name: Identifier,
    pub parents: Vec<TypeSpecifier>,
    pub members: Option<Vec<Spanned<Decl>>>,
    pub modifiers: Vec<Modifier>,
}

/// `type Alias = Target`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: Identifier,
    pub target: TypeSpecifier,
    pub modifiers: Vec<Modifier>,
}

/// `variant Name : Parent { class cases and members }`
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDecl {
    pub name: Identifier,
    pub parent: Option<TypeSpecifier>,
    pub members: Vec<Spanned<Decl>>,
    pub modifiers: Vec<Modifier>,
}

// ============================================================================
// Visitor
// ============================================================================

/// Read-only traversal with one hook per concrete node.
///
/// Every hook defaults to the matching `walk_*` function, so an implementation overrides only what it cares about
/// and calls `walk_*` itself to keep descending.
pub trait Visitor: Sized {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        walk_statement(self, stmt);
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        walk_if(self, stmt);
    }

    fn visit_else_if(&mut self, branch: &ElseIfBranch) {
        walk_else_if(self, branch);
    }

    fn visit_while(&mut self, stmt: &WhileStmt) {
        walk_while(self, stmt);
    }

    fn visit_do_while(&mut self, stmt: &DoWhileStmt) {
        walk_do_while(self, stmt);
    }

    fn visit_for(&mut self, stmt: &ForStmt) {
        walk_for(self, stmt);
    }

    fn visit_for_iteration(&mut self, iteration: &ForIterationExpr) {
        walk_for_iteration(self, iteration);
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) {
        self.visit_expr(&stmt.value);
    }

    fn visit_break(&mut self) {}

    fn visit_continue(&mut self) {}

    fn visit_use(&mut self, _stmt: &UseStmt) {}

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    fn visit_literal(&mut self, literal: &Literal) {
        walk_literal(self, literal);
    }

    fn visit_identifier(&mut self, _ident: &Identifier) {}

    fn visit_binary(&mut self, expr: &BinaryExpr) {
        self.visit_expr(&expr.left);
        self.visit_expr(&expr.right);
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) {
        self.visit_expr(&expr.operand);
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) {
        self.visit_identifier(&expr.target);
        self.visit_expr(&expr.value);
    }

    fn visit_compound_assignment(&mut self, expr: &CompoundAssignmentExpr) {
        self.visit_identifier(&expr.target);
        self.visit_expr(&expr.value);
    }

    fn visit_member_access(&mut self, expr: &MemberAccessExpr) {
        self.visit_expr(&expr.object);
        self.visit_expr(&expr.member);
    }

    fn visit_range(&mut self, expr: &RangeExpr) {
        self.visit_expr(&expr.start);
        self.visit_expr(&expr.end);
    }

    fn visit_function_call(&mut self, expr: &FunctionCallExpr) {
        walk_function_call(self, expr);
    }

    fn visit_positional_argument(&mut self, arg: &FunctionCallPositionalParameter) {
        self.visit_expr(&arg.value);
    }

    fn visit_named_argument(&mut self, arg: &FunctionCallNamedParameter) {
        self.visit_identifier(&arg.name);
        self.visit_expr(&arg.value);
    }

    fn visit_type_check(&mut self, expr: &TypeCheckExpr) {
        self.visit_expr(&expr.value);
        self.visit_type(&expr.ty);
    }

    fn visit_type_cast(&mut self, expr: &TypeCastExpr) {
        self.visit_expr(&expr.value);
        self.visit_type(&expr.ty);
    }

    fn visit_with(&mut self, expr: &WithExpr) {
        for member in &expr.members {
            self.visit_with_member(member);
        }
    }

    fn visit_with_member(&mut self, member: &WithExprMember) {
        self.visit_identifier(&member.name);
        self.visit_expr(&member.value);
    }

    fn visit_intrinsic_call(&mut self, expr: &IntrinsicCallExpr) {
        for arg in &expr.arguments {
            self.visit_expr(arg);
        }
    }

    fn visit_no_expr(&mut self) {}

    fn visit_function_literal(&mut self, literal: &FunctionLiteral) {
        walk_function_literal(self, literal);
    }

    fn visit_parameter(&mut self, param: &FunctionParameter) {
        for modifier in &param.modifiers {
            self.visit_modifier(modifier);
        }
        self.visit_identifier(&param.name);
        self.visit_type(&param.ty);
    }

    fn visit_decl(&mut self, decl: &Spanned<Decl>) {
        walk_decl(self, decl);
    }

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        walk_variable_decl(self, decl);
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) {
        for modifier in &decl.modifiers {
            self.visit_modifier(modifier);
        }
        self.visit_identifier(&decl.name);
        self.visit_function_literal(&decl.literal);
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        walk_class_decl(self, decl);
    }

    fn visit_enum_decl(&mut self, decl: &EnumDecl) {
        for modifier in &decl.modifiers {
            self.visit_modifier(modifier);
        }
        self.visit_identifier(&decl.name);
        for member in &decl.members {
            self.visit_enum_member(member);
        }
    }

    fn visit_enum_member(&mut self, member: &EnumMemberExpr) {
        self.visit_identifier(&member.name);
        if let Some(value) = &member.value {
            self.visit_literal(value);
        }
    }

    fn visit_module_decl(&mut self, _decl: &ModuleDecl) {}

    fn visit_namespace_decl(&mut self, decl: &NamespaceDecl) {
        for modifier in &decl.modifiers {
            self.visit_modifier(modifier);
        }
        self.visit_identifier(&decl.name);
        for member in &decl.members {
            self.visit_decl(member);
        }
    }

    fn visit_trait_decl(&mut self, decl: &TraitDecl) {
        walk_trait_decl(self, decl);
    }

    fn visit_type_alias_decl(&mut self, decl: &TypeAliasDecl) {
        for modifier in &decl.modifiers {
            self.visit_modifier(modifier);
        }
        self.visit_identifier(&decl.name);
        self.visit_type(&decl.target);
    }

    fn visit_variant_decl(&mut self, decl: &VariantDecl) {
        walk_variant_decl(self, decl);
    }

    fn visit_type(&mut self, ty: &TypeSpecifier) {
        for generic in &ty.generics {
            self.visit_type(generic);
        }
    }

    fn visit_modifier(&mut self, _modifier: &Modifier) {}
}

/// Double-dispatch entry point for any node.
pub trait Node {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl Node for Program {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_program(self);
    }
}

impl Node for Spanned<Statement> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_statement(self);
    }
}

impl Node for Spanned<Expr> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_expr(self);
    }
}

impl Node for Spanned<Decl> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_decl(self);
    }
}

impl Node for TypeSpecifier {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit_type(self);
    }
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for stmt in &program.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for stmt in block {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, stmt: &Spanned<Statement>) {
    match &stmt.node {
        Statement::Expr(expr) => visitor.visit_expr(&Spanned::new(expr.clone(), stmt.position)),
        Statement::Decl(decl) => visitor.visit_decl(&Spanned::new(decl.clone(), stmt.position)),
        Statement::If(s) => visitor.visit_if(s),
        Statement::While(s) => visitor.visit_while(s),
        Statement::DoWhile(s) => visitor.visit_do_while(s),
        Statement::For(s) => visitor.visit_for(s),
        Statement::Return(s) => visitor.visit_return(s),
        Statement::Break => visitor.visit_break(),
        Statement::Continue => visitor.visit_continue(),
        Statement::Use(s) => visitor.visit_use(s),
    }
}

pub fn walk_if<V: Visitor>(visitor: &mut V, stmt: &IfStmt) {
    visitor.visit_expr(&stmt.condition);
    walk_block(visitor, &stmt.then_block);
    for branch in &stmt.else_ifs {
        visitor.visit_else_if(branch);
    }
    if let Some(block) = &stmt.else_block {
        walk_block(visitor, block);
    }
}

pub fn walk_else_if<V: Visitor>(visitor: &mut V, branch: &ElseIfBranch) {
    visitor.visit_expr(&branch.condition);
    walk_block(visitor, &branch.block);
}

pub fn walk_while<V: Visitor>(visitor: &mut V, stmt: &WhileStmt) {
    visitor.visit_expr(&stmt.condition);
    walk_block(visitor, &stmt.body);
}

pub fn walk_do_while<V: Visitor>(visitor: &mut V, stmt: &DoWhileStmt) {
    walk_block(visitor, &stmt.body);
    visitor.visit_expr(&stmt.condition);
}

pub fn walk_for<V: Visitor>(visitor: &mut V, stmt: &ForStmt) {
    visitor.visit_for_iteration(&stmt.iteration);
    walk_block(visitor, &stmt.body);
}

pub fn walk_for_iteration<V: Visitor>(visitor: &mut V, iteration: &ForIterationExpr) {
    visitor.visit_identifier(&iteration.binding);
    visitor.visit_expr(&iteration.target);
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        Expr::Literal(l) => visitor.visit_literal(l),
        Expr::Identifier(i) => visitor.visit_identifier(i),
        Expr::Binary(b) => visitor.visit_binary(b),
        Expr::Unary(u) => visitor.visit_unary(u),
        Expr::Assignment(a) => visitor.visit_assignment(a),
        Expr::CompoundAssignment(c) => visitor.visit_compound_assignment(c),
        Expr::MemberAccess(m) => visitor.visit_member_access(m),
        Expr::Range(r) => visitor.visit_range(r),
        Expr::FunctionCall(c) => visitor.visit_function_call(c),
        Expr::TypeCheck(t) => visitor.visit_type_check(t),
        Expr::TypeCast(t) => visitor.visit_type_cast(t),
        Expr::With(w) => visitor.visit_with(w),
        Expr::IntrinsicCall(i) => visitor.visit_intrinsic_call(i),
        Expr::NoExpr => visitor.visit_no_expr(),
    }
}

pub fn walk_literal<V: Visitor>(visitor: &mut V, literal: &Literal) {
    match literal {
        Literal::Integer(_) | Literal::Float(_) | Literal::String(_) | Literal::Bool(_) | Literal::Null => {}
        Literal::Array(items) | Literal::List(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        Literal::Map(map) => {
            for (key, value) in &map.entries {
                visitor.visit_expr(key);
                visitor.visit_expr(value);
            }
        }
        Literal::Function(function) => visitor.visit_function_literal(function),
    }
}

pub fn walk_function_call<V: Visitor>(visitor: &mut V, expr: &FunctionCallExpr) {
    visitor.visit_identifier(&expr.callee);
    for arg in &expr.positional {
        visitor.visit_positional_argument(arg);
    }
    for arg in &expr.named {
        visitor.visit_named_argument(arg);
    }
}

pub fn walk_function_literal<V: Visitor>(visitor: &mut V, literal: &FunctionLiteral) {
    for param in &literal.parameters {
        visitor.visit_parameter(param);
    }
    visitor.visit_type(&literal.return_type);
    if let Some(body) = &literal.body {
        walk_block(visitor, body);
    }
}

pub fn walk_decl<V: Visitor>(visitor: &mut V, decl: &Spanned<Decl>) {
    match &decl.node {
        Decl::Variable(d) => visitor.visit_variable_decl(d),
        Decl::Function(d) => visitor.visit_function_decl(d),
        Decl::Class(d) => visitor.visit_class_decl(d),
        Decl::Enum(d) => visitor.visit_enum_decl(d),
        Decl::Module(d) => visitor.visit_module_decl(d),
        Decl::Namespace(d) => visitor.visit_namespace_decl(d),
        Decl::Trait(d) => visitor.visit_trait_decl(d),
        Decl::TypeAlias(d) => visitor.visit_type_alias_decl(d),
        Decl::Variant(d) => visitor.visit_variant_decl(d),
    }
}

pub fn walk_variable_decl<V: Visitor>(visitor: &mut V, decl: &VariableDecl) {
    for modifier in &decl.modifiers {
        visitor.visit_modifier(modifier);
    }
    visitor.visit_identifier(&decl.name);
    visitor.visit_type(&decl.ty);
    if let Some(value) = &decl.value {
        visitor.visit_expr(value);
    }
}

pub fn walk_class_decl<V: Visitor>(visitor: &mut V, decl: &ClassDecl) {
    for modifier in &decl.modifiers {
        visitor.visit_modifier(modifier);
    }
    visitor.visit_identifier(&decl.name);
    for generic in &decl.generics {
        visitor.visit_type(generic);
    }
    if let Some(parent) = &decl.parent {
        visitor.visit_type(parent);
    }
    for member in decl.members.iter().flatten() {
        visitor.visit_decl(member);
    }
}

pub fn walk_trait_decl<V: Visitor>(visitor: &mut V, decl: &TraitDecl) {
    for modifier in &decl.modifiers {
        visitor.visit_modifier(modifier);
    }
    visitor.visit_identifier(&decl.name);
    for parent in &decl.parents {
        visitor.visit_type(parent);
    }
    for member in decl.members.iter().flatten() {
        visitor.visit_decl(member);
    }
}

pub fn walk_variant_decl<V: Visitor>(visitor: &mut V, decl: &VariantDecl) {
    for modifier in &decl.modifiers {
        visitor.visit_modifier(modifier);
    }
    visitor.visit_identifier(&decl.name);
    if let Some(parent) = &decl.parent {
        visitor.visit_type(parent);
    }
    for member in &decl.members {
        visitor.visit_decl(member);
    }
}
