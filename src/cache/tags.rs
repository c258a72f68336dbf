use super::error::*;

use std::collections::*;

/// Maximum length of a tag.
pub const MAX_TAG_LENGTH: usize = 256;

/// Maximum number of tags per cache entry.
pub const MAX_TAGS: usize = 128;

/// Validate a tag.
pub fn validate_tag(tag: &str) -> Result<(), CacheError> {
    if tag.is_empty() {
        Err(CacheError::InvalidTag(tag.into(), "empty"))
    } else if tag.len() > MAX_TAG_LENGTH {
        Err(CacheError::InvalidTag(tag.into(), "too long"))
    } else {
        Ok(())
    }
}

//
// Tags
//

/// Tags for a cache entry.
///
/// Invalid tags are dropped with a warning rather than failing, as are tags beyond [MAX_TAGS].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    /// Add a tag.
    pub fn add(&mut self, tag: impl Into<String>) {
        let tag = tag.into();

        if let Err(error) = validate_tag(&tag) {
            tracing::warn!("dropping tag: {}", error);
            return;
        }

        if self.0.len() >= MAX_TAGS && !self.0.contains(&tag) {
            tracing::warn!("dropping tag {:?}: more than {} tags", tag, MAX_TAGS);
            return;
        }

        self.0.insert(tag);
    }

    /// Whether we contain a tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether we have no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a comma-separated list.
    pub fn parse_list(list: &str) -> Self {
        let mut tags = Self::default();
        for tag in list.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
            tags.add(tag);
        }
        tags
    }

    /// Comma-separated list.
    pub fn to_list(&self) -> String {
        let tags: Vec<_> = self.0.iter().map(String::as_str).collect();
        tags.join(",")
    }
}

impl<TagT> FromIterator<TagT> for Tags
where
    TagT: Into<String>,
{
    fn from_iter<IteratorT>(iterator: IteratorT) -> Self
    where
        IteratorT: IntoIterator<Item = TagT>,
    {
        let mut tags = Self::default();
        for tag in iterator {
            tags.add(tag);
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_long_tags() {
        assert!(validate_tag("cocktail-11007").is_ok());
        assert!(validate_tag("").is_err());
        assert!(validate_tag(&"x".repeat(MAX_TAG_LENGTH + 1)).is_err());
    }

    #[test]
    fn drops_invalid_tags_and_excess() {
        let mut tags: Tags = (0..MAX_TAGS + 5)
            .map(|index| format!("tag-{}", index))
            .collect();
        tags.add("");
        assert_eq!(tags.len(), MAX_TAGS);
        assert!(tags.contains("tag-0"));
        assert!(!tags.contains(&format!("tag-{}", MAX_TAGS)));
    }

    #[test]
    fn comma_separated_lists() {
        let tags = Tags::parse_list(" user-123 , all-data,,type-user");
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.to_list(), "all-data,type-user,user-123");
    }
}
