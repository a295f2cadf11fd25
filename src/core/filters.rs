use crate::models::{SearchFilters, ServiceLocation};

/// Check if a location passes the attribute filters of a search
///
/// Category must match exactly (ignoring case and surrounding whitespace).
/// Keyword must appear in the title or provider name (ignoring case).
/// Blank filter values are treated as absent.
#[inline]
pub fn matches_filters(location: &ServiceLocation, filters: &SearchFilters) -> bool {
    if let Some(category) = non_blank(filters.category.as_deref()) {
        if !location.category.trim().eq_ignore_ascii_case(category) {
            return false;
        }
    }

    if let Some(keyword) = non_blank(filters.keyword.as_deref()) {
        let keyword = keyword.to_lowercase();
        let in_title = location.title.to_lowercase().contains(&keyword);
        let in_provider = location
            .provider_name
            .as_deref()
            .map(|name| name.to_lowercase().contains(&keyword))
            .unwrap_or(false);

        if !in_title && !in_provider {
            return false;
        }
    }

    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
