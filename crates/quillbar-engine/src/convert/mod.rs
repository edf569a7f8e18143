//! Conversion between the persisted text body and the editable tree.
//!
//! The pair is a lossy-but-stable round trip: `from_editable_tree` of a
//! freshly serialized tree re-parses to the same blocks as the source
//! text, and any normalisation it applies (heading levels, list
//! separators, trailing blanks) is a fixed point on the second pass.

mod deserialize;
mod serialize;

pub use deserialize::from_editable_tree;
pub use serialize::to_editable_tree;
