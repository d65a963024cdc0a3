/// Forward-only cursor over a sequence of elements.
///
/// The lexer scans runes with a `Cursor<char>` and the parser walks tokens
/// with a `Cursor<Token>`. A cursor cannot be rewound; construct a new one
/// to scan again.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    items: Vec<T>,
    position: usize,
}

impl<T> Cursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Cursor { items, position: 0 }
    }

    /// Returns the current element and advances past it.
    pub fn next(&mut self) -> Option<&T> {
        let item = self.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    /// Returns the current element without advancing.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.position)
    }

    pub fn done(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Offset of the current element from the start of the sequence.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<T: Copy> Cursor<T> {
    /// Copying variant of [`Cursor::next`], convenient for runes.
    pub fn bump(&mut self) -> Option<T> {
        self.next().copied()
    }

    /// Copying variant of [`Cursor::peek`].
    pub fn current(&self) -> Option<T> {
        self.peek().copied()
    }
}

impl From<&str> for Cursor<char> {
    fn from(text: &str) -> Self {
        Cursor::new(text.chars().collect())
    }
}

#[test]
fn test_rune_cursor() {
    let mut cursor = Cursor::from("ab");
    assert_eq!(cursor.current(), Some('a'));
    assert_eq!(cursor.bump(), Some('a'));
    assert!(!cursor.done());
    assert_eq!(cursor.bump(), Some('b'));
    assert!(cursor.done());
    assert_eq!(cursor.bump(), None);
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.position(), 2);
}

#[test]
fn test_empty_cursor() {
    let mut cursor: Cursor<String> = Cursor::new(vec![]);
    assert!(cursor.done());
    assert!(cursor.peek().is_none());
    assert!(cursor.next().is_none());
}
