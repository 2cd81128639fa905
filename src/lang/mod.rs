/// Language detection and line classification.
///
/// `registry` holds the language specification table (extensions,
/// filenames, comment/string syntax, shebangs) and detection functions.
/// `counter`/`fsm` implement the character-level FSM that classifies each
/// line of a file as blank, comment, or code — the shared input both the
/// cyclomatic and cognitive analyzers run on.
pub(crate) mod counter;
mod fsm;
mod lang_macro;
pub(crate) mod registry;
