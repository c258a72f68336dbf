use super::error::*;

use {
    duration_str::HumanFormat,
    std::{fmt, str::*, time::*},
};

const SECOND: Duration = Duration::from_secs(1);
const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(60 * 60 * 24);
const WEEK: Duration = Duration::from_secs(60 * 60 * 24 * 7);
const MONTH: Duration = Duration::from_secs(60 * 60 * 24 * 30);
const YEAR: Duration = Duration::from_secs(60 * 60 * 24 * 365);

//
// Freshness
//

/// Freshness of a cache entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Freshness {
    /// Serve as is.
    Fresh,

    /// Serve as is, but recompute in the background.
    Stale,

    /// Discard and recompute before serving.
    Expired,
}

//
// CacheLife
//

/// Cache lifetime.
///
/// All durations are measured from the moment the value was computed:
///
/// * Before `stale` the value is [Fresh](Freshness::Fresh).
/// * Until `expire` it is [Stale](Freshness::Stale). With no `expire` it stays stale forever.
/// * After that it is [Expired](Freshness::Expired).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CacheLife {
    /// How long the value is fresh.
    pub stale: Duration,

    /// How long downstream caches may serve the value stale while revalidating.
    pub revalidate: Duration,

    /// Absolute maximum age. [None] means never.
    pub expire: Option<Duration>,
}

impl CacheLife {
    /// "default" preset: 5min / 15min / never.
    pub const DEFAULT: Self =
        Self::new(Duration::from_secs(5 * 60), Duration::from_secs(15 * 60), None);

    /// "seconds" preset: 1s / 10s / 1min.
    pub const SECONDS: Self = Self::new(SECOND, Duration::from_secs(10), Some(MINUTE));

    /// "minutes" preset: 1min / 10min / 1h.
    pub const MINUTES: Self = Self::new(MINUTE, Duration::from_secs(10 * 60), Some(HOUR));

    /// "hours" preset: 1h / 2h / 1day.
    pub const HOURS: Self = Self::new(HOUR, Duration::from_secs(2 * 60 * 60), Some(DAY));

    /// "days" preset: 1day / 7days / 30days.
    pub const DAYS: Self = Self::new(DAY, WEEK, Some(MONTH));

    /// "weeks" preset: 7days / 30days / 1year.
    pub const WEEKS: Self = Self::new(WEEK, MONTH, Some(YEAR));

    /// "max" preset: 1year / 1year / never.
    pub const MAX: Self = Self::new(YEAR, YEAR, None);

    /// Preset names with their lives.
    pub const PRESETS: &[(&str, Self)] = &[
        ("default", Self::DEFAULT),
        ("seconds", Self::SECONDS),
        ("minutes", Self::MINUTES),
        ("hours", Self::HOURS),
        ("days", Self::DAYS),
        ("weeks", Self::WEEKS),
        ("max", Self::MAX),
    ];

    /// Constructor.
    pub const fn new(stale: Duration, revalidate: Duration, expire: Option<Duration>) -> Self {
        Self {
            stale,
            revalidate,
            expire,
        }
    }

    /// Constructor from seconds.
    pub const fn from_secs(stale: u64, revalidate: u64, expire: u64) -> Self {
        Self::new(
            Duration::from_secs(stale),
            Duration::from_secs(revalidate),
            Some(Duration::from_secs(expire)),
        )
    }

    /// Preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, life)| *life)
    }

    /// Preset name, if we are identical to a preset.
    pub fn preset_name(&self) -> Option<&'static str> {
        Self::PRESETS
            .iter()
            .find(|(_, life)| life == self)
            .map(|(preset, _)| *preset)
    }

    /// How long an entry should be stored at all.
    ///
    /// [None] means forever (until evicted for capacity or revalidated with "expire").
    pub fn lifetime(&self) -> Option<Duration> {
        self.expire
    }

    /// Freshness for a value of this age.
    ///
    /// Note that `revalidate` does not shorten the stale window. It is a hint for downstream
    /// caches (see [cache_control](Self::cache_control)).
    pub fn freshness(&self, age: Duration) -> Freshness {
        if let Some(expire) = self.expire
            && age >= expire
        {
            Freshness::Expired
        } else if age < self.stale {
            Freshness::Fresh
        } else {
            Freshness::Stale
        }
    }

    /// `Cache-Control` header value.
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.stale.as_secs(),
            self.revalidate.as_secs()
        )
    }
}

impl Default for CacheLife {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CacheLife {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let expire = self
            .expire
            .map(|expire| expire.human_format())
            .unwrap_or_else(|| "never".into());

        write!(
            formatter,
            "stale: {}, revalidate: {}, expire: {}",
            self.stale.human_format(),
            self.revalidate.human_format(),
            expire
        )
    }
}

impl FromStr for CacheLife {
    type Err = CacheError;

    /// Either a preset name or a custom `"<stale>, <revalidate>, <expire>"`.
    ///
    /// Each custom part is a [duration-str](https://github.com/baoyachi/duration-str)
    /// expression. Expire can also be "never".
    fn from_str(representation: &str) -> Result<Self, Self::Err> {
        let representation = representation.trim();

        if let Some(life) = Self::preset(representation) {
            return Ok(life);
        }

        let parts: Vec<_> = representation.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CacheError::InvalidLife(format!(
                "not a preset or a stale/revalidate/expire triple: {:?}",
                representation
            )));
        }

        let stale = parse_duration(parts[0])?;
        let revalidate = parse_duration(parts[1])?;
        let expire = if parts[2].eq_ignore_ascii_case("never") {
            None
        } else {
            Some(parse_duration(parts[2])?)
        };

        Ok(Self::new(stale, revalidate, expire))
    }
}

fn parse_duration(representation: &str) -> Result<Duration, CacheError> {
    duration_str::parse(representation)
        .map_err(|error| CacheError::InvalidLife(format!("{:?}: {}", representation, error)))
}
