/// Normalized paging window.
///
/// Built from untrusted query values: anything that does not parse as a positive
/// integer falls back to the default instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: i64,
    pub(crate) limit: i64,
}

impl PageRequest {
    pub(crate) const DEFAULT_PAGE: i64 = 1;
    pub(crate) const DEFAULT_LIMIT: i64 = 10;

    pub(crate) fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    pub(crate) fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|value| *value > 0)
}
