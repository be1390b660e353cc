use crate::provider::Provider;

pub const TOMORROW: i32 = -1;
pub const TODAY: i32 = 0;
pub const YESTERDAY: i32 = 1;

const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Low,
    #[default]
    High,
}

impl Resolution {
    /// Anything other than the provider's low token selects `High`.
    pub fn from_token(token: &str, provider: &Provider) -> Self {
        if token == provider.low_token {
            Resolution::Low
        } else {
            Resolution::High
        }
    }

    pub fn token<'a>(&self, provider: &'a Provider) -> &'a str {
        match self {
            Resolution::Low => &provider.low_token,
            Resolution::High => &provider.high_token,
        }
    }
}

/// Arguments of a metadata request, always within the provider's bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestArgs {
    /// 0 is today, 1 yesterday, -1 tomorrow.
    pub day_offset: i32,
    pub count: usize,
    pub locale: String,
    pub resolution: Resolution,
}

impl Default for RequestArgs {
    fn default() -> Self {
        Self {
            day_offset: TODAY,
            count: 1,
            locale: String::from(DEFAULT_LOCALE),
            resolution: Resolution::High,
        }
    }
}

/// Unvalidated changes to apply on top of a `RequestArgs`.
#[derive(Debug, Clone, Default)]
pub struct ArgsPatch {
    pub day_offset: Option<i32>,
    pub count: Option<i64>,
    pub locale: Option<String>,
    pub resolution: Option<String>,
}

impl RequestArgs {
    pub fn from_patch(patch: ArgsPatch, provider: &Provider) -> Self {
        Self::default().merge(patch, provider)
    }

    /// Applies `patch` and clamps the result. Never fails.
    pub fn merge(&self, patch: ArgsPatch, provider: &Provider) -> Self {
        let day_offset = patch
            .day_offset
            .unwrap_or(self.day_offset)
            .max(provider.min_day_offset);

        let limit = provider.limit.max(1);
        let count = match patch.count {
            Some(n) => n.clamp(1, limit as i64) as usize,
            None => self.count.clamp(1, limit),
        };

        let resolution = match patch.resolution {
            Some(token) => Resolution::from_token(&token, provider),
            None => self.resolution,
        };

        Self {
            day_offset,
            count,
            locale: patch.locale.unwrap_or_else(|| self.locale.clone()),
            resolution,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn normalize(patch: ArgsPatch) -> RequestArgs {
        RequestArgs::from_patch(patch, &Provider::default())
    }

    #[test]
    fn count_is_clamped() {
        for n in -10..=20 {
            let args = normalize(ArgsPatch {
                count: Some(n),
                ..Default::default()
            });
            assert!((1..=8).contains(&args.count), "count {n} -> {}", args.count);
        }
        let args = normalize(ArgsPatch {
            count: Some(9),
            ..Default::default()
        });
        assert_eq!(args.count, 8);
        let args = normalize(ArgsPatch {
            count: Some(0),
            ..Default::default()
        });
        assert_eq!(args.count, 1);
    }

    #[test]
    fn zero_limit_still_allows_one() {
        let provider = Provider {
            limit: 0,
            ..Provider::default()
        };
        let args = RequestArgs::from_patch(
            ArgsPatch {
                count: Some(5),
                ..Default::default()
            },
            &provider,
        );
        assert_eq!(args.count, 1);
        assert_eq!(args.merge(ArgsPatch::default(), &provider).count, 1);
    }

    #[test]
    fn day_offset_is_floored_at_tomorrow() {
        for offset in [-100, -10, -2] {
            let args = normalize(ArgsPatch {
                day_offset: Some(offset),
                ..Default::default()
            });
            assert_eq!(args.day_offset, TOMORROW);
        }
        let args = normalize(ArgsPatch {
            day_offset: Some(YESTERDAY),
            ..Default::default()
        });
        assert_eq!(args.day_offset, YESTERDAY);
    }

    #[test]
    fn unknown_resolution_falls_back_to_high() {
        for token in ["1920x1200", "foo", "", "1366X768"] {
            let args = normalize(ArgsPatch {
                resolution: Some(token.to_string()),
                ..Default::default()
            });
            assert_eq!(args.resolution, Resolution::High);
        }
        let args = normalize(ArgsPatch {
            resolution: Some("1366x768".to_string()),
            ..Default::default()
        });
        assert_eq!(args.resolution, Resolution::Low);
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let provider = Provider::default();
        let current = RequestArgs::from_patch(
            ArgsPatch {
                count: Some(3),
                locale: Some("de-DE".to_string()),
                resolution: Some("1366x768".to_string()),
                ..Default::default()
            },
            &provider,
        );
        let merged = current.merge(
            ArgsPatch {
                day_offset: Some(2),
                ..Default::default()
            },
            &provider,
        );
        assert_eq!(
            merged,
            RequestArgs {
                day_offset: 2,
                count: 3,
                locale: "de-DE".to_string(),
                resolution: Resolution::Low,
            }
        );
    }
}
