//! Shared fixtures: an in-process stand-in for the MDX compiler and helpers
//! for building puzzle corpora on disk.

#![allow(dead_code)]

use std::path::Path;

use pzl_validate::{CompileError, CompiledDocument, Compiler};
use serde_json::Value;

/// Minimal markdown-to-JSX compiler.
///
/// - `---` delimited YAML frontmatter is parsed into `frontmatter`.
/// - `# text` becomes `_jsx(_components.h1, …)`.
/// - `<Name />` becomes `_jsx(Name, {})`.
/// - `<tag>` (lowercase) becomes `_jsx("tag", {})`.
/// - Any other non-blank line becomes a paragraph whose text is emitted as
///   an escaped string literal, like the real compiler does.
/// - A document containing `FAIL_COMPILE` is rejected.
pub struct FakeMdxCompiler;

impl Compiler for FakeMdxCompiler {
    fn compile(&self, raw: &str) -> Result<CompiledDocument, CompileError> {
        if raw.contains("FAIL_COMPILE") {
            return Err(CompileError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "Unexpected character".to_string(),
            });
        }

        let (frontmatter, body) = split_frontmatter(raw)?;
        let mut children = Vec::new();
        for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(title) = line.strip_prefix("# ") {
                children.push(format!(
                    "_jsx(_components.h1, {{children: {}}})",
                    Value::String(title.to_string())
                ));
            } else if let Some(name) = line.strip_prefix('<').and_then(|l| l.strip_suffix(" />")) {
                children.push(format!("_jsx({name}, {{}})"));
            } else if let Some(tag) = line.strip_prefix('<').and_then(|l| l.strip_suffix('>')) {
                children.push(format!("_jsx(\"{tag}\", {{}})"));
            } else {
                children.push(format!(
                    "_jsx(_components.p, {{children: {}}})",
                    Value::String(line.to_string())
                ));
            }
        }

        let compiled_source = format!(
            "const {{jsx: _jsx, jsxs: _jsxs}} = arguments[0];\n\
             function _createMdxContent(props) {{\n  \
               const _components = Object.assign({{h1: \"h1\", p: \"p\"}}, props.components);\n  \
               return _jsxs(_Fragment, {{children: [{}]}});\n\
             }}",
            children.join(", ")
        );

        Ok(CompiledDocument {
            frontmatter,
            compiled_source,
        })
    }
}

fn split_frontmatter(raw: &str) -> Result<(Option<Value>, &str), CompileError> {
    let Some(rest) = raw.strip_prefix("---\n") else {
        return Ok((None, raw));
    };
    let Some(end) = rest.find("\n---") else {
        return Err(CompileError::InvalidOutput("unterminated frontmatter".into()));
    };
    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| CompileError::InvalidOutput(e.to_string()))?;
    Ok((Some(value), body))
}

pub fn addr(c: char) -> String {
    format!("0x{}", c.to_string().repeat(40))
}

/// Frontmatter with the given author and contributors.
pub fn frontmatter(author: &str, contributors: &[&str]) -> String {
    let mut fm = format!("---\nauthor: \"{author}\"\ncontributors:\n");
    for c in contributors {
        fm.push_str(&format!("  - \"{c}\"\n"));
    }
    fm.push_str("---\n");
    fm
}

pub fn write_doc(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
