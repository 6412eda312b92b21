//! Maps a line number in a preprocessor-generated C file back to the
//! responsible line of the original Pro*C source it was translated from.

pub mod mapper;
pub mod render;
pub mod report;
