use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)//.*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImportArg {
    // Backtick-quoted template form, used when the call text is spliced.
    pub template: String,
    // Backticks stripped; `${...}` markers survive. This is the destination
    // path the classifier works on.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandShape {
    SingleQuoted,
    DoubleQuoted,
    Template,
    Bare,
}

pub fn normalize_import_arg(raw_expr: &str) -> NormalizedImportArg {
    let cleaned = strip_comments(raw_expr);
    let template = to_template_literal(&cleaned);
    let path = template.replace('`', "");
    NormalizedImportArg { template, path }
}

pub fn strip_comments(raw: &str) -> String {
    let without_blocks = BLOCK_COMMENT_RE.replace_all(raw, "");
    LINE_COMMENT_RE
        .replace_all(&without_blocks, "")
        .trim()
        .to_string()
}

// Lexical rewrite of a concatenation chain into one template literal:
// `"a" + x`, `x + "a"`, `x + y` and adjacent string literals all collapse
// into `${...}` segments. Expressions that already start with a backtick
// pass through. Nested calls, ternaries and parenthesized subexpressions
// are not understood; they fall out as bare `${...}` segments.
fn to_template_literal(cleaned: &str) -> String {
    if cleaned.starts_with('`') {
        return cleaned.to_string();
    }
    let body = split_top_level_plus(cleaned)
        .iter()
        .map(|operand| operand_segment(operand))
        .collect::<String>();
    format!("`{body}`")
}

fn operand_segment(operand: &str) -> String {
    let trimmed = operand.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match operand_shape(trimmed) {
        OperandShape::SingleQuoted | OperandShape::DoubleQuoted | OperandShape::Template => {
            trimmed[1..trimmed.len() - 1].to_string()
        }
        OperandShape::Bare => format!("${{{trimmed}}}"),
    }
}

fn operand_shape(trimmed: &str) -> OperandShape {
    if trimmed.len() < 2 {
        return OperandShape::Bare;
    }
    let first = trimmed.as_bytes()[0];
    let last = trimmed.as_bytes()[trimmed.len() - 1];
    match (first, last) {
        (b'\'', b'\'') => OperandShape::SingleQuoted,
        (b'"', b'"') => OperandShape::DoubleQuoted,
        (b'`', b'`') => OperandShape::Template,
        _ => OperandShape::Bare,
    }
}

// Splits on `+` at paren depth zero outside quotes. `${...}` bodies inside a
// template operand sit inside the backtick quote state, so a `+` there does
// not split.
fn split_top_level_plus(expr: &str) -> Vec<String> {
    let mut operands: Vec<String> = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = expr.chars();
    while let Some(ch) = chars.next() {
        match quote {
            Some(open) => {
                current.push(ch);
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else if ch == open {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' | '`' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                '+' if depth == 0 => {
                    operands.push(std::mem::take(&mut current));
                }
                _ => current.push(ch),
            },
        }
    }
    operands.push(current);
    operands
}
