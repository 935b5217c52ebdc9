//! Animation compilation.
//!
//! Frame files are read back in keyframe order and encoded into one GIF.

/// GIF compiler.
pub mod gif;
