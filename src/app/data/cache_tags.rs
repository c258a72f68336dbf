use super::{super::super::cache::*, simulate_latency};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Tag shared by all tagged example data.
pub const ALL_DATA_TAG: &str = "all-data";

//
// TaggedData
//

/// Tagged example data.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TaggedData {
    /// Resource type.
    #[serde(rename = "type")]
    pub type_: String,

    /// Resource ID.
    pub id: String,

    /// When it was computed.
    pub timestamp: DateTime<Utc>,

    /// Data.
    pub data: String,
}

/// The tags of tagged example data, from most to least specific.
pub fn data_tags(type_: &str, id: &str) -> [String; 3] {
    [format!("{}-{}", type_, id), format!("type-{}", type_), ALL_DATA_TAG.into()]
}

/// Cached tagged data.
///
/// Can be revalidated per resource (`{type}-{id}`), per type (`type-{type}`), or all at once
/// ([ALL_DATA_TAG]).
pub async fn data_with_tags<CacheT>(
    memoizer: &Memoizer<CacheT>,
    type_: &str,
    id: &str,
) -> Result<Cached<TaggedData>, CacheError>
where
    CacheT: Cache,
{
    let mut call = memoizer
        .function("data_with_tags")
        .argument(type_)
        .argument(id)
        .life(CacheLife::HOURS);
    for tag in data_tags(type_, id) {
        call = call.tag(tag);
    }

    let type_ = type_.to_string();
    let id = id.to_string();

    call.run(move || async move {
        tracing::info!("fetching {}: {}", type_, id);
        simulate_latency(150).await;

        let data = format!("Sample {} data for {}", type_, id);
        Ok(TaggedData {
            type_,
            id,
            timestamp: Utc::now(),
            data,
        })
    })
    .await
}
