//! The library code for the `pagemill` bulk page generator. The architecture
//! can be generally broken down into two distinct steps:
//!
//! 1. Assembling a batch of page records from the keyword pools
//!    ([`crate::record`])
//! 2. Rendering the records through the page template and writing the
//!    results to disk ([`crate::batch`])
//!
//! Of the two, the second step is the more involved. It is itself composed
//! of three distinct sub-steps:
//!
//! 1. Selecting the target directory under the folder-capacity rule
//!    ([`crate::target`])
//! 2. Cross-linking the records of the batch to one another
//! 3. Substituting each record into the template ([`crate::render`]) and
//!    writing the result
//!
//! Directory selection is a bounded-fill heuristic: each base folder's
//! newest subdirectory is reused until it holds the capacity limit of
//! `.html` files, at which point a fresh randomly-labelled subdirectory is
//! allocated. Rendering is a two-pass substitution: the named tokens first,
//! then a pattern-based rewrite of any residual timestamp-shaped substrings
//! left in the template body.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod batch;
pub mod config;
pub mod keywords;
pub mod record;
pub mod render;
pub mod slug;
pub mod target;
pub mod text;

mod util;
