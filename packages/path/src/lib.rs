//! Path type with opaque exact-match segments.
//!
//! Paths address nodes in a treefs hierarchy. A path is an ordered sequence
//! of non-empty segments joined by `/`. Segments are opaque: no escaping, no
//! normalization beyond dropping empty segments, no interpretation of `.` or
//! `..`.

use std::fmt;

/// The segment delimiter used in path strings.
pub const SEPARATOR: char = '/';

/// A root-relative path in a treefs hierarchy.
///
/// Ordering is segment-wise lexicographic. Within any one sibling set this
/// is the same order as comparing the full path strings, since siblings
/// differ only in their final segment.
///
/// # Examples
///
/// ```rust
/// use treefs_path::Path;
///
/// let path = Path::parse("a/b/c");
/// assert_eq!(path.len(), 3);
///
/// // Empty segments are dropped
/// assert_eq!(Path::parse("a/b/"), Path::parse("a//b"));
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a path string.
    ///
    /// Segments are separated by `/`; empty segments are ignored, which
    /// normalizes `//` and leading/trailing `/`. Parsing never fails because
    /// segments carry no further syntax.
    pub fn parse(s: &str) -> Self {
        Path {
            segments: s
                .split(SEPARATOR)
                .filter(|seg| !seg.is_empty())
                .map(|seg| seg.to_string())
                .collect(),
        }
    }

    /// Create a path from pre-split segments.
    ///
    /// Empty segments are dropped, matching [`Path::parse`].
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|seg| !seg.is_empty())
                .collect(),
        }
    }

    /// True for the zero-segment path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The child path formed by appending one segment.
    #[must_use]
    pub fn join(&self, segment: &str) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(
            segment
                .split(SEPARATOR)
                .filter(|seg| !seg.is_empty())
                .map(|seg| seg.to_string()),
        );
        Path { segments }
    }

    /// Segment-aligned prefix test: true iff `other` equals `self` or
    /// begins with all of `self`'s segments.
    ///
    /// This is the building block for the parent/child invariant: a node is
    /// a legal child of a parent exactly when the parent's path is a prefix
    /// of the child's and the remainder is a single segment.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments == other.segments[..self.segments.len()]
    }

    /// The segments of `self` below `prefix`, or `None` if `prefix` does
    /// not prefix `self`.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        if prefix.is_prefix_of(self) {
            Some(Path {
                segments: self.segments[prefix.len()..].to_vec(),
            })
        } else {
            None
        }
    }

    /// The parent path (all but the last segment), or `None` for a path of
    /// fewer than two segments' worth of ancestry (the empty path has no
    /// parent).
    #[must_use]
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Path {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use treefs_path::path;
///
/// let p = path!("a/b/c");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
