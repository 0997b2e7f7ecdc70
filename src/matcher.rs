/// Membership rule for one tracker section.
///
/// Matching is case-insensitive substring search against the transaction
/// description. A non-inverse rule matches when any keyword is found (and no
/// exception is, if exceptions are configured). An inverse rule is a
/// catch-all: it matches when no keyword is found; exception keywords
/// re-admit known edge cases that would otherwise be excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRule {
    keywords: Vec<String>,
    exceptions: Vec<String>,
    inverse: bool,
}

fn normalize(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl KeywordRule {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: normalize(keywords),
            exceptions: Vec::new(),
            inverse: false,
        }
    }

    pub fn with_exceptions(mut self, exceptions: &[String]) -> Self {
        self.exceptions = normalize(exceptions);
        self
    }

    pub fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// True iff `description` belongs to this rule's category.
    pub fn matches(&self, description: &str) -> bool {
        let desc = description.to_uppercase();
        let any_keyword = self.keywords.iter().any(|k| desc.contains(k));
        let any_exception = self.exceptions.iter().any(|e| desc.contains(e));

        if self.inverse {
            if self.exceptions.is_empty() {
                !any_keyword
            } else {
                !any_keyword || any_exception
            }
        } else if self.exceptions.is_empty() {
            any_keyword
        } else {
            any_keyword && !any_exception
        }
    }
}
