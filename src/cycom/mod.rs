/// Cyclomatic complexity analysis module.
///
/// Detects functions per file, counts control-flow decision points
/// (if, for, while, match, etc.), and classifies complexity as
/// Simple, Moderate, Complex, HighlyComplex, or Extreme.
mod analyzer;
mod detection;
pub(crate) mod markers;

pub use analyzer::{CyclomaticLevel, FileComplexity, FunctionComplexity};

use crate::lang::counter::LineKind;
use crate::lang::registry::LanguageSpec;
use analyzer::analyze;
use markers::markers_for;

/// Compute cyclomatic complexity for pre-classified source lines.
/// Returns `None` when the language has no cyclomatic markers (the caller
/// should fall back to recording a warning, not treat this as an error).
pub(crate) fn analyze_content(
    lines: &[String],
    kinds: &[LineKind],
    spec: &LanguageSpec,
) -> Option<FileComplexity> {
    let cm = markers_for(spec.name)?;
    analyze(lines, kinds, cm)
}
