use std::collections::HashMap;
use std::ops::Range;

use super::diff::line_opcodes;
use super::types::{MapError, Resolution, SpanKind};
use super::LineMapper;

/// Where a single generated line points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOrigin {
    /// 1-based line in the original file.
    Line(usize),
    /// Inserted by the preprocessor; no original counterpart.
    Injected,
    /// Before any region traceable to the original file (sentinel zero).
    Boilerplate,
}

/// Mapping from 1-based generated line numbers to their original lines.
/// Immutable once built; safe to share across queries for the same pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    entries: HashMap<usize, LineOrigin>,
    first_mapped: usize,
}

/// Callback invoked once per alignment span, for diagnostics.
pub type TraceSink<'a> = &'a mut dyn FnMut(SpanKind, Range<usize>, Range<usize>);

/// Align the two files line-by-line and expand the opcode spans into a
/// per-generated-line map.
pub fn build_alignment_map(
    original: &[&str],
    generated: &[&str],
    mut trace: Option<TraceSink<'_>>,
) -> LineMap {
    let mut entries = HashMap::new();

    for span in line_opcodes(original, generated) {
        if let Some(sink) = trace.as_mut() {
            sink(span.kind, span.original.clone(), span.generated.clone());
        }

        match span.kind {
            SpanKind::Equal => {
                for (offset, g) in span.generated.clone().enumerate() {
                    entries.insert(g + 1, LineOrigin::Line(span.original.start + offset + 1));
                }
            }
            SpanKind::Replace => {
                // Heuristic kept from the original tool: pin every line of a
                // replaced region to the first original line of the span, or
                // to the last original line when the original side is empty
                // or starts past the end of the file.
                let target = if !span.original.is_empty() && span.original.start < original.len()
                {
                    span.original.start + 1
                } else {
                    original.len()
                };
                for g in span.generated.clone() {
                    entries.insert(g + 1, LineOrigin::Line(target));
                }
            }
            SpanKind::Insert => {
                for g in span.generated.clone() {
                    entries.insert(g + 1, LineOrigin::Injected);
                }
            }
            SpanKind::Delete => {}
        }
    }

    // Everything before the first line that maps to a real original line is
    // preamble the preprocessor put there; answer those with the sentinel.
    let first_mapped = entries
        .iter()
        .filter(|(_, origin)| matches!(origin, LineOrigin::Line(_)))
        .map(|(g, _)| *g)
        .min()
        .unwrap_or(1);
    for g in 1..first_mapped {
        entries.insert(g, LineOrigin::Boilerplate);
    }

    LineMap {
        entries,
        first_mapped,
    }
}

/// Look up one generated line. Total over `[1, total_generated]`; anything
/// outside that range is a validation error.
pub fn query_alignment_map(
    target_line: usize,
    map: &LineMap,
    total_generated: usize,
) -> Result<Resolution, MapError> {
    if target_line < 1 || target_line > total_generated {
        return Err(MapError::LineOutOfRange {
            line: target_line,
            total: total_generated,
        });
    }

    Ok(match map.entries.get(&target_line) {
        Some(LineOrigin::Line(n)) => Resolution::Original(*n),
        Some(LineOrigin::Injected) => Resolution::Injected,
        Some(LineOrigin::Boilerplate) => Resolution::Boilerplate,
        None if target_line < map.first_mapped => Resolution::Boilerplate,
        None => Resolution::NotFound,
    })
}

/// Alignment strategy: ignores directives entirely and aligns the two full
/// texts, so it survives generated files with no trustworthy markers.
pub struct AlignmentMapper {
    map: LineMap,
    total_generated: usize,
}

impl AlignmentMapper {
    pub fn new(original: &[&str], generated: &[&str], trace: Option<TraceSink<'_>>) -> Self {
        Self {
            map: build_alignment_map(original, generated, trace),
            total_generated: generated.len(),
        }
    }
}

impl LineMapper for AlignmentMapper {
    fn resolve(&self, target_line: usize) -> Result<Resolution, MapError> {
        query_alignment_map(target_line, &self.map, self.total_generated)
    }
}
