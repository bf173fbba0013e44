use std::ops::Range;
use std::path::Path;

use crate::classify::{self, Classification};
use crate::glob_resolve::GlobResolver;
use crate::module_map::{self, QueuedImport};
use crate::normalize;
use crate::options::PluginConfig;
use crate::scan;

struct TextEdit {
    span: Range<usize>,
    replacement: String,
}

pub fn rewrite_dynamic_imports(
    source: &str,
    source_dir: &Path,
    config: &PluginConfig,
    resolver: &dyn GlobResolver,
) -> String {
    let matches = scan::find_import_calls(source);
    if matches.is_empty() {
        return source.to_string();
    }

    let mut edits: Vec<TextEdit> = vec![];
    let mut queued: Vec<QueuedImport> = vec![];
    for found in &matches {
        let normalized = normalize::normalize_import_arg(found.raw_arg(source));
        match classify::classify(&normalized.path, source_dir, config) {
            Classification::RewriteAbsolute { absolute } => edits.push(TextEdit {
                span: found.arg_span.clone(),
                replacement: format!("`{absolute}`"),
            }),
            Classification::GlobTransform => queued.push(QueuedImport {
                span: found.span.clone(),
                template: normalized.template,
                path: normalized.path,
            }),
            Classification::Keep => {}
        }
    }

    // When nothing resolves, queued calls stay as real dynamic imports; any
    // in-place absolute rewrites above still apply.
    let prelude = (!queued.is_empty())
        .then(|| module_map::synthesize(&queued, source_dir, resolver))
        .flatten()
        .map(|ir| {
            for import in &queued {
                edits.push(TextEdit {
                    span: import.span.clone(),
                    replacement: format!("{}({})", module_map::LOOKUP_FN_NAME, import.template),
                });
            }
            ir.render()
        });

    let rewritten = apply_edits(source, edits);
    match prelude {
        Some(prelude) => format!("{prelude}{rewritten}"),
        None => rewritten,
    }
}

// Spans never overlap, so splicing back-to-front keeps earlier offsets valid.
fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.span.clone(), &edit.replacement);
    }
    out
}
