use std::ops::Range;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::classify::{INTERPOLATION_RE, normalize_lexically};
use crate::glob_resolve::GlobResolver;

pub const MODULE_BINDING_PREFIX: &str = "_DynamicImportModule";
pub const MODULE_MAP_NAME: &str = "_DynamicImportModuleMap";
pub const LOOKUP_FN_NAME: &str = "_DynamicImport";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedImport {
    // Full `import(...)` span in the source text.
    pub span: Range<usize>,
    // Backtick-quoted template, spliced back as the lookup argument.
    pub template: String,
    // Template with backticks stripped; still carries `${...}` markers.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMapIr {
    slots: Vec<Slot>,
    entries: IndexMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    binding: String,
    import_source: String,
}

// The rewriter cannot know the runtime value of an interpolation, so each
// marker over-approximates to every path that could satisfy it.
pub fn glob_pattern_for(destination: &str) -> String {
    INTERPOLATION_RE.replace_all(destination, "**/*").to_string()
}

pub fn synthesize(
    queued: &[QueuedImport],
    source_dir: &Path,
    resolver: &dyn GlobResolver,
) -> Option<ModuleMapIr> {
    let resolved = queued
        .iter()
        .map(|import| glob_pattern_for(&import.path))
        .flat_map(|pattern| match resolver.resolve(&pattern, source_dir) {
            Ok(spellings) => spellings,
            Err(err) => {
                eprintln!("dynimport: glob {pattern} failed: {err}");
                vec![]
            }
        })
        .collect::<Vec<_>>();
    if resolved.is_empty() {
        return None;
    }

    let mut slots: Vec<Slot> = vec![];
    let mut slot_by_target: IndexMap<PathBuf, usize> = IndexMap::new();
    let mut entries: IndexMap<String, usize> = IndexMap::new();
    for spelling in &resolved {
        let target = normalize_lexically(&source_dir.join(spelling));
        let slot = *slot_by_target.entry(target).or_insert_with(|| {
            slots.push(Slot {
                binding: format!("{MODULE_BINDING_PREFIX}{}", slots.len()),
                import_source: import_source_for(spelling),
            });
            slots.len() - 1
        });
        entries.entry(spelling.clone()).or_insert(slot);
        if let Some(alias) = spelling.strip_suffix(".js") {
            entries.entry(alias.to_string()).or_insert(slot);
        }
    }
    Some(ModuleMapIr { slots, entries })
}

// Bundlers treat a bare `mod-a.js` as a package specifier, so bare spellings
// gain a `./` prefix in the emitted static import. Map keys keep the raw
// spelling.
fn import_source_for(spelling: &str) -> String {
    if spelling.starts_with("./") || spelling.starts_with("../") || spelling.starts_with('/') {
        spelling.to_string()
    } else {
        format!("./{spelling}")
    }
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

impl ModuleMapIr {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn entry_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn slot_of(&self, key: &str) -> Option<usize> {
        self.entries.get(key).copied()
    }

    // Single serialization boundary for everything prepended to the file:
    // static imports, the module map object, and the lookup function.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for slot in &self.slots {
            out.push_str(&format!(
                "import * as {} from {};\n",
                slot.binding,
                js_string(&slot.import_source)
            ));
        }
        out.push_str(&format!("const {MODULE_MAP_NAME} = {{\n"));
        for (key, slot) in &self.entries {
            out.push_str(&format!(
                "  {}: {},\n",
                js_string(key),
                self.slots[*slot].binding
            ));
        }
        out.push_str("};\n");
        out.push_str(&format!("function {LOOKUP_FN_NAME}(path) {{\n"));
        out.push_str(&format!("  let module = {MODULE_MAP_NAME}[path];\n"));
        out.push_str("  if (module === undefined && path.startsWith(\"./\")) {\n");
        out.push_str(&format!("    module = {MODULE_MAP_NAME}[path.slice(2)];\n"));
        out.push_str("  }\n");
        out.push_str("  if (module === undefined) {\n");
        out.push_str("    return module;\n");
        out.push_str("  }\n");
        out.push_str("  if (!(\"__esModule\" in module)) {\n");
        out.push_str(
            "    Object.defineProperty(module, \"__esModule\", { value: true });\n",
        );
        out.push_str("  }\n");
        out.push_str("  return Promise.resolve(module);\n");
        out.push_str("}\n");
        out
    }
}
