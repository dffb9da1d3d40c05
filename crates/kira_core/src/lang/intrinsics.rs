//! Compiler intrinsics (`@name(...)`).
//!
//! Intrinsics inject behavior that has no source-level spelling: operator hooks, comparison hooks and compile-time
//! facts such as the call site. They are the only identifiers that may contain underscores.
//!
//! ## Examples
//! ```rust
//! use kira_core::lang::intrinsics::{self, IntrinsicId};
//!
//! assert_eq!(intrinsics::from_str("op_add"), Some(IntrinsicId::OpAdd));
//! assert_eq!(intrinsics::from_str("opAdd"), None);
//! ```

use super::registry::Since;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicId {
    Trace,
    Magic,
    CmpGt,
    CmpLt,
    CmpGe,
    CmpLe,
    CmpEq,
    CmpNe,
    OpAdd,
    OpSub,
    OpMul,
    OpDiv,
    OpMod,
    OpShr,
    OpShl,
    OpBitAnd,
    OpAnd,
    OpOr,
    OpBitOr,
    OpXor,
}

#[derive(Debug, Clone, Copy)]
pub struct IntrinsicInfo {
    pub id: IntrinsicId,
    pub name: &'static str,
    pub description: &'static str,
    pub since: Since,
}

pub const INTRINSICS: &[IntrinsicInfo] = &[
    info(IntrinsicId::Trace, "trace", "Print the arguments together with the call site."),
    info(IntrinsicId::Magic, "magic", "Reserved hook for compiler experiments."),
    info(IntrinsicId::CmpGt, "cmp_gt", "Overload of `>`."),
    info(IntrinsicId::CmpLt, "cmp_lt", "Overload of `<`."),
    info(IntrinsicId::CmpGe, "cmp_ge", "Overload of `>=`."),
    info(IntrinsicId::CmpLe, "cmp_le", "Overload of `<=`."),
    info(IntrinsicId::CmpEq, "cmp_eq", "Overload of `==`."),
    info(IntrinsicId::CmpNe, "cmp_ne", "Overload of `!=`."),
    info(IntrinsicId::OpAdd, "op_add", "Overload of `+`."),
    info(IntrinsicId::OpSub, "op_sub", "Overload of `-`."),
    info(IntrinsicId::OpMul, "op_mul", "Overload of `*`."),
    info(IntrinsicId::OpDiv, "op_div", "Overload of `/`."),
    info(IntrinsicId::OpMod, "op_mod", "Overload of `%`."),
    info(IntrinsicId::OpShr, "op_shr", "Overload of `>>`."),
    info(IntrinsicId::OpShl, "op_shl", "Overload of `<<`."),
    info(IntrinsicId::OpBitAnd, "op_bit_and", "Overload of `&`."),
    info(IntrinsicId::OpAnd, "op_and", "Overload of `&&`."),
    info(IntrinsicId::OpOr, "op_or", "Overload of `||`."),
    info(IntrinsicId::OpBitOr, "op_bit_or", "Overload of `|`."),
    info(IntrinsicId::OpXor, "op_xor", "Overload of `^`."),
];

/// Intrinsic name without the leading `@`.
pub fn as_str(id: IntrinsicId) -> &'static str {
    info_for(id).name
}

/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: IntrinsicId) -> &'static IntrinsicInfo {
    INTRINSICS.iter().find(|i| i.id == id).expect("intrinsic info missing")
}

/// Lookup by name (without the leading `@`).
pub fn from_str(name: &str) -> Option<IntrinsicId> {
    INTRINSICS.iter().find(|i| i.name == name).map(|i| i.id)
}

const fn info(id: IntrinsicId, name: &'static str, description: &'static str) -> IntrinsicInfo {
    IntrinsicInfo {
        id,
        name,
        description,
        since: Since(0, 1),
    }
}
