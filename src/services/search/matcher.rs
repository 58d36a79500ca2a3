use memchr::memmem::Finder;

/// Literal substring matcher compiled once per session and reused for every file.
#[derive(Clone, Debug)]
pub struct LiteralMatcher {
    finder: Finder<'static>,
}

impl LiteralMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            finder: Finder::new(query.as_bytes()).into_owned(),
        }
    }

    pub fn query_len(&self) -> usize {
        self.finder.needle().len()
    }

    /// All start offsets of the query in `text`, overlaps included, in increasing order.
    pub fn find_all<'a>(&'a self, text: &'a str) -> Matches<'a> {
        Matches::new(self.finder.as_ref(), text)
    }
}

/// Convenience for one-off searches. See [`LiteralMatcher::find_all`].
pub fn find_all<'a>(text: &'a str, query: &'a str) -> Matches<'a> {
    Matches::new(Finder::new(query.as_bytes()), text)
}

/// Lazy iterator over byte offsets of query occurrences.
///
/// Cloning yields an independent iterator starting from the same position.
#[derive(Clone, Debug)]
pub struct Matches<'a> {
    finder: Finder<'a>,
    haystack: &'a [u8],
    next_start: Option<usize>,
}

impl<'a> Matches<'a> {
    fn new(finder: Finder<'a>, text: &'a str) -> Self {
        let needle_len = finder.needle().len();
        let next_start = if needle_len == 0 || needle_len > text.len() {
            None
        } else {
            Some(0)
        };
        Self {
            finder,
            haystack: text.as_bytes(),
            next_start,
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let start = self.next_start?;
        match self.haystack.get(start..).and_then(|rest| self.finder.find(rest)) {
            Some(found) => {
                let offset = start + found;
                // A UTF-8 needle never matches at a continuation byte, so stepping one
                // byte keeps later hits on char boundaries.
                self.next_start = Some(offset + 1);
                Some(offset)
            }
            None => {
                self.next_start = None;
                None
            }
        }
    }
}
