use std::env;
use std::path::{Component, Path, PathBuf};

use super::types::{MapError, Resolution};
use super::LineMapper;

/// Directive state in force on one generated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEntry {
    /// 1-based line number in the generated file.
    pub generated_line: usize,
    /// Path recorded by the most recent directive, if any.
    pub source_file: Option<String>,
    /// Original line the directive asserts for this generated line.
    pub source_line: Option<usize>,
}

/// Parse a line-marker directive: `#` then optional whitespace, the asserted
/// original line number, whitespace, and a double-quoted path. Both the
/// short form (`#12 "f.pc"`) and the spaced form (`# 12 "f.pc"`) match;
/// anything after the closing quote is ignored.
fn parse_directive(line: &str) -> Option<(usize, &str)> {
    let rest = line.strip_prefix('#')?;
    let rest = rest.trim_start_matches([' ', '\t']);

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let number: usize = rest[..digits_end].parse().ok()?;

    let rest = &rest[digits_end..];
    let after_ws = rest.trim_start_matches([' ', '\t']);
    if after_ws.len() == rest.len() {
        // Grammar requires whitespace between the digits and the quote.
        return None;
    }

    let path = after_ws.strip_prefix('"')?;
    let end = path.find('"')?;
    Some((number, &path[..end]))
}

/// Scan the generated file once, stamping every line with the directive
/// state in force on it. Between directives the generated file is assumed
/// line-for-line faithful, so the line counter advances by one per line.
pub fn build_marker_table(generated: &[&str]) -> Vec<MarkerEntry> {
    let mut table = Vec::with_capacity(generated.len());
    let mut current_file: Option<String> = None;
    let mut current_line: Option<usize> = None;

    for (i, line) in generated.iter().enumerate() {
        if let Some((number, path)) = parse_directive(line) {
            current_line = Some(number);
            current_file = Some(path.to_string());
        }

        table.push(MarkerEntry {
            generated_line: i + 1,
            source_file: current_file.clone(),
            source_line: current_line,
        });

        if let Some(n) = current_line.as_mut() {
            *n += 1;
        }
    }

    table
}

/// Resolve a path for comparison: canonicalize when the file exists,
/// otherwise fold `.`/`..` lexically against the current directory. Keeps
/// relative and absolute spellings of the same file comparable.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(real) = path.canonicalize() {
        return real;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for comp in absolute.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Walk the table backward from the target line and answer with the nearest
/// entry whose recorded file is the target original file, offset by the
/// lines elapsed since that entry.
pub fn resolve_via_markers(
    target_line: usize,
    table: &[MarkerEntry],
    original_path: &Path,
) -> Result<Resolution, MapError> {
    if target_line < 1 || target_line > table.len() {
        return Err(MapError::LineOutOfRange {
            line: target_line,
            total: table.len(),
        });
    }

    let want = normalize_path(original_path);
    for entry in table[..target_line].iter().rev() {
        if let (Some(file), Some(line)) = (entry.source_file.as_deref(), entry.source_line) {
            if normalize_path(Path::new(file)) == want {
                return Ok(Resolution::Original(
                    line + (target_line - entry.generated_line),
                ));
            }
        }
    }

    Ok(Resolution::NotFound)
}

/// Marker strategy: trusts the line-marker directives embedded in the
/// generated file.
pub struct MarkerMapper {
    table: Vec<MarkerEntry>,
    original_path: PathBuf,
}

impl MarkerMapper {
    pub fn new(generated: &[&str], original_path: &Path) -> Self {
        Self {
            table: build_marker_table(generated),
            original_path: original_path.to_path_buf(),
        }
    }
}

impl LineMapper for MarkerMapper {
    fn resolve(&self, target_line: usize) -> Result<Resolution, MapError> {
        resolve_via_markers(target_line, &self.table, &self.original_path)
    }
}
