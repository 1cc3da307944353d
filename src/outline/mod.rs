//! Heading detection and leveling.
//!
//! The pipeline has four stages:
//!
//! 1. **normalize** merges each layout block's spans into one candidate line
//!    with a mean font size.
//! 2. **filter** drops lines that cannot be headings: boilerplate, overlong
//!    text, table-of-contents rows.
//! 3. **title** reads the first page's spans to name the document.
//! 4. **classify** levels each surviving line, preferring a numeric prefix
//!    (`1`, `1.2`, `1.2.3`) and falling back to the rank of its font size
//!    among the three largest sizes in the document, and drops repeats.
//!
//! [`OutlineExtractor`] runs them in order.

mod classify;
mod config;
mod extractor;
mod filter;
mod normalize;
mod title;
mod trace;

pub use classify::{HeadingClassifier, SizeRankTable};
pub use config::{OutlineConfig, PLACEHOLDER_TITLE};
pub use extractor::OutlineExtractor;
pub use filter::NoiseFilter;
pub use normalize::{clean_text, normalize_block, normalize_document, normalize_page};
pub use title::infer_title;
pub use trace::{LevelSource, NoopTrace, OutlineTrace, RecordingTrace, Rejection, TraceEvent};
