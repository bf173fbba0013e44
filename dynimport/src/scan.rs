use std::ops::Range;

const IMPORT_CALL: &str = "import(";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch {
    pub span: Range<usize>,
    pub arg_span: Range<usize>,
}

impl ImportMatch {
    pub fn raw_arg<'a>(&self, source: &'a str) -> &'a str {
        &source[self.arg_span.clone()]
    }
}

// Single linear scan for literal `import(` spans. Quoted regions (including
// template-literal bodies) are opaque; parens nest. An argument list that
// never closes ends the scan.
pub fn find_import_calls(source: &str) -> Vec<ImportMatch> {
    let mut out: Vec<ImportMatch> = vec![];
    let mut from = 0usize;
    while let Some(found) = source[from..].find(IMPORT_CALL) {
        let start = from + found;
        let arg_start = start + IMPORT_CALL.len();
        if !starts_own_identifier(source.as_bytes(), start) {
            from = arg_start;
            continue;
        }
        let Some(close) = find_closing_paren(source, arg_start) else {
            break;
        };
        out.push(ImportMatch {
            span: start..close + 1,
            arg_span: arg_start..close,
        });
        from = close + 1;
    }
    out
}

// Rejects `myimport(`, `a.import(`, `$import(` and the generated
// `_DynamicImport(` while keeping a leading `import(`.
fn starts_own_identifier(bytes: &[u8], start: usize) -> bool {
    if start == 0 {
        return true;
    }
    let prev = bytes[start - 1];
    !(prev == b'.' || prev == b'$' || prev == b'_' || prev.is_ascii_alphanumeric())
}

fn find_closing_paren(source: &str, arg_start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = source[arg_start..].char_indices();
    while let Some((offset, ch)) = chars.next() {
        match quote {
            Some(open) => {
                if ch == '\\' {
                    let _ = chars.next();
                } else if ch == open {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        return Some(arg_start + offset);
                    }
                    depth -= 1;
                }
                _ => {}
            },
        }
    }
    None
}
