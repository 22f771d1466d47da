//! Page resolution and page-link computation for list views.

use tracing::warn;

/// Rows per page requested by the list view.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound on numbered links built for one page; arrows still use the
/// full page count.
pub const MAX_PAGE_LINKS: u32 = 10_000;

const LIST_ROUTE: &str = "/students";

/// Read `page` from a query string such as `page=2&sort=asc`.
///
/// Keys and values are percent-decoded and the last `page` wins. Anything
/// that is not a positive integer resolves to page 1.
pub fn resolve_page(query: &str) -> u32 {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .rev()
        .find(|(key, _)| decode_component(key) == "page")
        .and_then(|(_, value)| decode_component(value).parse::<u32>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}

/// Decode `+` and `%XX` escapes; malformed escapes are kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match raw.get(i + 1..i + 3).and_then(|hex| u8::from_str_radix(hex, 16).ok()) {
                Some(byte) => {
                    out.push(byte);
                    i += 2;
                }
                None => out.push(b'%'),
            },
            byte => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse the total-count header value; a missing or malformed value is 0.
pub fn parse_total_count(header: Option<&str>) -> u64 {
    match header.map(str::trim) {
        None => 0,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, "ignoring malformed total-count header");
            0
        }),
    }
}

pub fn page_href(page: u32) -> String {
    format!("{LIST_ROUTE}?page={page}")
}

/// One page of a paginated collection, derived fresh from every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            total_count,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.total_pages() > 0 && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn links(&self) -> PageLinks {
        let previous = if self.has_previous() {
            NavLink::to(self.page - 1)
        } else {
            NavLink::Disabled
        };
        let next = if self.has_next() {
            NavLink::to(self.page + 1)
        } else {
            NavLink::Disabled
        };
        let total_pages = self.total_pages();
        if total_pages > MAX_PAGE_LINKS {
            warn!(
                total_pages,
                limit = MAX_PAGE_LINKS,
                "truncating numbered page links"
            );
        }
        let pages = (1..=total_pages.min(MAX_PAGE_LINKS))
            .map(|number| PageLink {
                number,
                href: page_href(number),
                active: number == self.page,
            })
            .collect();
        PageLinks { previous, pages, next }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLink {
    Disabled,
    Enabled { page: u32, href: String },
}

impl NavLink {
    fn to(page: u32) -> Self {
        NavLink::Enabled {
            page,
            href: page_href(page),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, NavLink::Enabled { .. })
    }

    pub fn target(&self) -> Option<u32> {
        match self {
            NavLink::Enabled { page, .. } => Some(*page),
            NavLink::Disabled => None,
        }
    }
}

/// A numbered page link; `active` only affects styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub previous: NavLink,
    pub pages: Vec<PageLink>,
    pub next: NavLink,
}

impl PageLinks {
    pub fn active(&self) -> Option<&PageLink> {
        self.pages.iter().find(|link| link.active)
    }
}
