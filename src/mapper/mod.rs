mod alignment;
mod diff;
mod markers;
mod types;

pub use alignment::{build_alignment_map, query_alignment_map, AlignmentMapper, LineMap, TraceSink};
pub use diff::line_opcodes;
pub use markers::{
    build_marker_table, normalize_path, resolve_via_markers, MarkerEntry, MarkerMapper,
};
pub use types::{MapError, OpSpan, Resolution, SpanKind};

/// Which mapping strategy the driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Markers,
    Alignment,
}

/// A line mapper answers "which original line is responsible for this
/// generated line" for one (original, generated) file pair.
pub trait LineMapper {
    fn resolve(&self, target_line: usize) -> Result<Resolution, MapError>;
}
