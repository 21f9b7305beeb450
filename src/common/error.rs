//! Error types for arbordb.

use thiserror::Error;

use crate::common::config::MIN_ORDER;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in arbordb.
///
/// The tree-mutation operations themselves are total: a duplicate insert
/// and a missing-key remove are silent no-ops, and lookups report absence
/// through `Option`. The only runtime failure is constructing a tree with
/// an unusable order. Internal invariant violations are programming errors
/// and panic instead of surfacing here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested B-tree order is below [`MIN_ORDER`].
    #[error("invalid B-tree order {0}: must be at least {MIN_ORDER}")]
    InvalidOrder(usize),
}
