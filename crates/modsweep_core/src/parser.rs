use anyhow::{Context, Result};
use dashmap::DashMap;
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::types::{SpecKind, Specifier};

/// Extracts the static import specifiers of one module.
///
/// Two declaration forms contribute specifiers: `import ... from "x"`
/// (bare side-effect and type-only imports included; a module referenced
/// only for its types is still referenced) and `export * from "x"`.
/// Dynamic `import()` expressions and `require()` calls never contribute
/// specifiers.
pub fn imports_for(
    file: &Path,
    cache: &DashMap<PathBuf, Vec<Specifier>>,
) -> Result<Vec<Specifier>> {
    let file_buf = file.to_path_buf();
    if let Some(v) = cache.get(&file_buf) {
        trace!("Cache hit for imports: {}", file.display());
        return Ok(v.clone());
    }
    trace!("Parsing file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let st = source_type_for(file);
    let allocator = Allocator::default();
    let ParserReturn { program, .. } = OxcParser::new(&allocator, &src, st).parse();

    let mut specs: Vec<Specifier> = Vec::new();

    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                let req = decl.source.value.to_string();
                trace!("Found static import: '{}' in {}", req, file.display());
                specs.push(Specifier { request: req, kind: SpecKind::Import });
            }
            Statement::ExportAllDeclaration(decl) => {
                let req = decl.source.value.to_string();
                trace!("Found re-export: '{}' in {}", req, file.display());
                specs.push(Specifier { request: req, kind: SpecKind::ReexportAll });
            }
            _ => {}
        }
    }

    debug!("Found {} import specifiers in {}", specs.len(), file.display());
    cache.insert(file_buf, specs.clone());
    Ok(specs)
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let mut st = SourceType::default()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx")));

    // ESM heuristic - .mjs is always an ES module
    if matches!(ext, Some("mjs")) {
        st = st.with_module(true);
    }

    st
}
