use super::{random_id, simulate_latency};

use chrono::{DateTime, Utc};

//
// PageData
//

/// Data for a page that is cached as a whole.
#[derive(Clone, Debug)]
pub struct PageData {
    /// When it was computed.
    pub timestamp: DateTime<Utc>,

    /// Random identifier.
    pub random_id: String,
}

/// Page data.
///
/// Not memoized: the page that renders it is cached by the caching layer.
pub async fn page_data() -> PageData {
    simulate_latency(100).await;
    PageData {
        timestamp: Utc::now(),
        random_id: random_id(),
    }
}
