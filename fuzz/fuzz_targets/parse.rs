#![no_main]

use kira::diagnostics::DiagnosticKind;
use kira::{lexer, parser, strip_comments};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let stripped = strip_comments(s);
    if let Ok(tokens) = lexer::lex(&stripped.source) {
        for size in [4, 16] {
            if let Ok(Err(diagnostic)) = parser::parse_with_window_size(&tokens, size) {
                assert_ne!(diagnostic.kind, DiagnosticKind::Internal, "{}", diagnostic.message);
            }
        }
    }
});
