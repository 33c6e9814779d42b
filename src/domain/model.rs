use serde::{Deserialize, Serialize};

/// One row of a listing: a summary record flattened with its detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub id: u32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub entries: Vec<ListingEntry>,
    pub total: u64,
}

/// Primary record, species record and evolution chain, resolved in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDetailBundle {
    pub primary: serde_json::Value,
    pub species: serde_json::Value,
    pub evolution_chain: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

impl PageWindow {
    pub fn new(offset: u64, limit: u64, total: u64) -> Self {
        Self {
            offset,
            limit,
            total,
        }
    }

    pub fn previous_offset(&self) -> Option<u64> {
        if self.offset == 0 || self.limit == 0 {
            None
        } else {
            Some(self.offset.saturating_sub(self.limit))
        }
    }

    pub fn next_offset(&self) -> Option<u64> {
        let next = self.offset.checked_add(self.limit)?;
        if self.limit > 0 && next < self.total {
            Some(next)
        } else {
            None
        }
    }

    /// 1-based page number of the current offset.
    pub fn current_page(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit).max(1)
    }
}

/// Which listing endpoint a page request is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Interprets a raw `typeOf` query value. Absent, blank and `all` select the full listing.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(token) if token.eq_ignore_ascii_case("all") => CategoryFilter::All,
            Some(token) => CategoryFilter::Category(token.to_lowercase()),
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(token) => token,
        }
    }
}
