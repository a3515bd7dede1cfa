// Extraction engine core.
// Field extractors and the experience segmenter are independent single-pass
// scans over the same borrowed text; the assembler merges their outputs
// under the configured limits. Nothing here performs I/O.

pub mod assembler;
pub mod fields;
pub mod segmenter;

pub use assembler::extract_profile;
