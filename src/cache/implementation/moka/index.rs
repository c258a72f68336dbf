use super::super::super::{key::*, tags::*};

use {
    parking_lot::RwLock,
    std::{collections::*, sync::Arc},
};

//
// TagIndex
//

/// Index from tags to the keys of the entries carrying them.
///
/// The index may contain keys that are no longer in the cache (or whose current entry no longer
/// carries the tag). Lookups must verify against the entry.
#[derive(Clone, Debug, Default)]
pub struct TagIndex {
    keys_by_tag: Arc<RwLock<HashMap<String, HashSet<CacheKey>>>>,
}

impl TagIndex {
    /// Add a key under all its tags.
    pub fn add(&self, key: &CacheKey, tags: &Tags) {
        if tags.is_empty() {
            return;
        }

        let mut keys_by_tag = self.keys_by_tag.write();
        for tag in tags.iter() {
            keys_by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }
    }

    /// Remove a key from all its tags.
    pub fn remove(&self, key: &CacheKey, tags: &Tags) {
        if tags.is_empty() {
            return;
        }

        let mut keys_by_tag = self.keys_by_tag.write();
        for tag in tags.iter() {
            Self::forget_locked(&mut keys_by_tag, tag, key);
        }
    }

    /// Remove a key from a tag.
    pub fn forget(&self, tag: &str, key: &CacheKey) {
        Self::forget_locked(&mut self.keys_by_tag.write(), tag, key);
    }

    /// Keys for a tag.
    pub fn keys(&self, tag: &str) -> Vec<CacheKey> {
        self.keys_by_tag
            .read()
            .get(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of indexed tags.
    pub fn tag_count(&self) -> usize {
        self.keys_by_tag.read().len()
    }

    /// Clear.
    pub fn clear(&self) {
        self.keys_by_tag.write().clear();
    }

    fn forget_locked(
        keys_by_tag: &mut HashMap<String, HashSet<CacheKey>>,
        tag: &str,
        key: &CacheKey,
    ) {
        if let Some(keys) = keys_by_tag.get_mut(tag) {
            keys.remove(key);
            if keys.is_empty() {
                keys_by_tag.remove(tag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let index = TagIndex::default();
        let key = CacheKey::function("user_data", vec!["1".into()]);
        let tags: Tags = ["user-1", "all-data"].into_iter().collect();

        index.add(&key, &tags);
        assert_eq!(index.keys("user-1"), vec![key.clone()]);
        assert_eq!(index.tag_count(), 2);

        index.remove(&key, &tags);
        assert!(index.keys("user-1").is_empty());
        assert_eq!(index.tag_count(), 0);
    }
}
