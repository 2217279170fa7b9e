//! Error types and error-construction macros used throughout the crate.

use thiserror::Error;

macro_rules! invalid_argument {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidArgument {
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument {
            message: format!($fmt, $($arg)*),
        }
    };
}

macro_rules! invalid_state {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidState {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidState {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Failures fall into two categories with different recovery stories, and the
/// two variants keep them distinguishable at the call site.
///
/// # Error Categories
///
/// ## Precondition Violations
/// - [`Error::InvalidArgument`] - The caller supplied a malformed or missing
///   required structure: an empty graph, an absent or edge-less START/END
///   node, an empty or colliding node label, an unknown label lookup. Always
///   detected before any computation begins and always surfaced with a
///   message naming the violated precondition.
///
/// ## Consistency Violations
/// - [`Error::InvalidState`] - An internal consistency check failed while an
///   algorithm was running: the reverse-post-order node count did not match
///   the graph (disconnected/forest input), a node visited during an LCA
///   walk had more than one predecessor (not a tree), or no predecessor of a
///   node had been placed in the dominator tree yet (irreducible input).
///   These indicate the input violates an assumption of the single-pass
///   algorithm rather than a usage mistake; callers may retry with the
///   fixpoint method.
///
/// # Examples
///
/// ```rust
/// use flowdom::{Error, FlowGraph};
/// use flowdom::algorithms::build_dominator_tree;
///
/// let empty: FlowGraph<()> = FlowGraph::new();
/// match build_dominator_tree(&empty) {
///     Err(Error::InvalidArgument { message }) => {
///         assert!(message.contains("empty"));
///     }
///     other => panic!("expected InvalidArgument, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied structure was malformed or missing.
    ///
    /// The message names the specific violated precondition, e.g.
    /// "flow graph is empty" or "flow graph's start points to nothing".
    #[error("Invalid argument - {message}")]
    InvalidArgument {
        /// Description of the violated precondition
        message: String,
    },

    /// An internal consistency check failed mid-algorithm.
    ///
    /// The error includes the source location where the inconsistency was
    /// detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the failed check
    /// * `file` - Source file where the check failed
    /// * `line` - Source line where the check failed
    #[error("Invalid state - {file}:{line}: {message}")]
    InvalidState {
        /// Description of the failed consistency check
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
