use super::tags::*;

use serde_json::Value;

//
// CacheWeight
//

/// Cache weight.
pub trait CacheWeight {
    /// Cache weight as a byte count.
    ///
    /// It is *not* the amount of memory used, but rather an indicator of *potential* storage
    /// requirements, intended for apples-to-apples comparisons between entries.
    fn cache_weight(&self) -> usize;
}

impl CacheWeight for String {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<String>();
        SELF_SIZE + self.len()
    }
}

impl CacheWeight for Tags {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<Tags>();
        let mut size = SELF_SIZE;
        for tag in self.iter() {
            size += tag.cache_weight();
        }
        size
    }
}

impl CacheWeight for Value {
    fn cache_weight(&self) -> usize {
        const SELF_SIZE: usize = size_of::<Value>();
        SELF_SIZE
            + match self {
                Value::Null | Value::Bool(_) | Value::Number(_) => 0,
                Value::String(string) => string.len(),
                Value::Array(array) => array.iter().map(CacheWeight::cache_weight).sum(),
                Value::Object(object) => object
                    .iter()
                    .map(|(key, value)| key.len() + value.cache_weight())
                    .sum(),
            }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn heavier_values_weigh_more() {
        let light = json!({"id": "1"});
        let heavy = json!({"id": "1", "data": "x".repeat(100)});
        assert!(heavy.cache_weight() > light.cache_weight() + 100);
    }
}
