/// Cognitive complexity analysis module (SonarSource, 2017).
///
/// Measures the difficulty of understanding code by penalizing
/// nested control flow and rewarding linear structures.
/// Levels: Simple, Moderate, Complex, VeryComplex, Extreme.
mod analyzer;
mod detection;
pub(crate) mod markers;

pub use analyzer::{CognitiveLevel, FileCognitive, FunctionCognitive};

use crate::lang::counter::LineKind;
use crate::lang::registry::LanguageSpec;
use analyzer::analyze;
use markers::cognitive_markers_for;

/// Compute cognitive complexity for pre-classified source lines.
/// Returns `None` when the language has no cognitive markers.
pub(crate) fn analyze_content(
    lines: &[String],
    kinds: &[LineKind],
    spec: &LanguageSpec,
) -> Option<FileCognitive> {
    let cm = cognitive_markers_for(spec.name)?;
    analyze(lines, kinds, cm)
}
