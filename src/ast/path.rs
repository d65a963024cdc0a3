use std::fmt;

/// A segment of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field access by name
    ///
    /// # Examples
    /// - `$.name` → `Field("name")`
    /// - `$['odd key']` → `Field("odd key")`
    Field(String),

    /// Array element access by index
    ///
    /// # Examples
    /// - `$.items[0]` → `[Field("items"), Index(0)]`
    ///
    /// # Note
    /// Indices are unsigned; the lexer rejects anything but a run of digits.
    Index(usize),
}

/// A sequence of path segments identifying a location in an evaluation context.
///
/// A path has no meaning until it is resolved against a [`Context`](crate::Context).
/// The empty path refers to the context root.
///
/// # Examples
///
/// For `$.user.items[0]['display name']` the segments are:
/// - `PathSegment::Field("user")`
/// - `PathSegment::Field("items")`
/// - `PathSegment::Index(0)`
/// - `PathSegment::Field("display name")`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }
}

impl From<&str> for PathSegment {
    fn from(field: &str) -> Self {
        PathSegment::Field(field.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Fields that can be written as `.name` rather than `['name']`.
fn is_plain_field(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) if is_plain_field(name) => write!(f, ".{}", name),
            PathSegment::Field(name) => {
                f.write_str("['")?;
                for ch in name.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("']")
            }
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Builds a [`Path`] from field names and indices.
///
/// ```
/// use sprig_lang::path;
///
/// let p = path!["items", 0usize, "price"];
/// assert_eq!(p.to_string(), "$.items[0].price");
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        $crate::ast::Path::new(vec![$($crate::ast::PathSegment::from($segment)),*])
    };
}
