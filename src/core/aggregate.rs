use std::collections::HashSet;

/// Unique, trimmed keywords gathered from one or more sources.
///
/// Backed by a hash set, so iteration order is unspecified. Use
/// [`KeywordSet::sorted`] wherever a reproducible order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入單一關鍵字，回傳是否為新的關鍵字
    pub fn insert(&mut self, raw: &str) -> bool {
        let keyword = raw.trim();
        if keyword.is_empty() {
            return false;
        }
        self.keywords.insert(keyword.to_string())
    }

    /// Folds another source into the set, returning how many keywords were new.
    pub fn extend_from<I, S>(&mut self, source: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        source
            .into_iter()
            .filter(|keyword| self.insert(keyword.as_ref()))
            .count()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords in lexicographic order.
    pub fn sorted(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self.keywords.iter().cloned().collect();
        keywords.sort();
        keywords
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        set.extend_from(iter);
        set
    }
}

/// Union of several keyword sequences: trimmed, case preserved, empties dropped.
pub fn aggregate<I, J, S>(sources: I) -> KeywordSet
where
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = KeywordSet::new();
    for source in sources {
        set.extend_from(source);
    }
    set
}
