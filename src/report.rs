use std::path::Path;

use serde::Serialize;

use crate::mapper::{Resolution, Strategy};
use crate::render::ContextRow;

/// Machine-readable result of one mapping query, for editor tooling.
#[derive(Debug, Serialize)]
pub struct MappingReport {
    pub strategy: &'static str,
    pub generated_line: usize,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_line: Option<usize>,
    pub original_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<ContextLine>>,
}

#[derive(Debug, Serialize)]
pub struct ContextLine {
    pub line: usize,
    pub text: String,
    #[serde(rename = "center")]
    pub is_center: bool,
}

pub fn strategy_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Markers => "markers",
        Strategy::Alignment => "alignment",
    }
}

pub fn outcome_name(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::Original(_) => "resolved",
        Resolution::Injected => "injected",
        Resolution::Boilerplate => "boilerplate",
        Resolution::NotFound => "not-found",
    }
}

impl MappingReport {
    pub fn new(
        strategy: Strategy,
        generated_line: usize,
        resolution: Resolution,
        original_file: &Path,
    ) -> Self {
        Self {
            strategy: strategy_name(strategy),
            generated_line,
            outcome: outcome_name(resolution),
            original_line: match resolution {
                Resolution::Original(n) => Some(n),
                _ => None,
            },
            original_file: original_file.display().to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, rows: &[ContextRow]) -> Self {
        self.context = Some(
            rows.iter()
                .map(|row| ContextLine {
                    line: row.line_number,
                    text: row.text.clone(),
                    is_center: row.is_center,
                })
                .collect(),
        );
        self
    }
}
