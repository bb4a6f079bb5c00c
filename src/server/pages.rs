//! Page context builders: turn tagged items and listing state into
//! template data

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::config::SiteConfig;
use crate::content::{Article, Content, Event, Tagged};
use crate::helpers::{asset_url, google_calendar_url, pager_slots, with_query, PagerSlot};
use crate::listing::{Listing, SortOrder};
use crate::templates::{
    CardData, DetailPageData, ListingPageData, PagerLinkData, PaginationData, SiteData,
    TagFilterData,
};

/// Pages shown on either side of the current one in the pager
const PAGER_MID_SIZE: usize = 2;

/// Anchor the listing scrolls back to after a page change
const LISTING_TOP: &str = "#listing-top";

/// Content types with listing and detail pages
pub trait PageKind: Content {
    /// Listing route, e.g. `/articles`
    const BASE_PATH: &'static str;
    const HEADING: &'static str;

    fn card(item: &Tagged<Self>, config: &SiteConfig) -> CardData;

    fn detail(item: &Tagged<Self>, config: &SiteConfig) -> DetailPageData;
}

impl PageKind for Article {
    const BASE_PATH: &'static str = "/articles";
    const HEADING: &'static str = "Articles";

    fn card(item: &Tagged<Self>, config: &SiteConfig) -> CardData {
        CardData {
            title: item.title.clone(),
            path: detail_path::<Self>(item),
            image: item.image.as_deref().map(|image| asset_url(config, image)),
            date: item.date_created.clone().unwrap_or_default(),
            excerpt: item
                .summary
                .clone()
                .or_else(|| item.content.clone())
                .unwrap_or_default(),
            tags: item.tags.clone(),
            time: None,
            location: None,
        }
    }

    fn detail(item: &Tagged<Self>, config: &SiteConfig) -> DetailPageData {
        DetailPageData {
            kind: Self::KIND.to_string(),
            title: item.title.clone(),
            image: item.image.as_deref().map(|image| asset_url(config, image)),
            date: item.date_created.clone().unwrap_or_default(),
            tags: tag_links::<Self>(&item.tags),
            summary: item.summary.clone(),
            content: item.content.clone().unwrap_or_default(),
            time: None,
            end_time: None,
            location: None,
            fee: None,
            calendar_url: None,
            back_link: Self::BASE_PATH.to_string(),
        }
    }
}

impl PageKind for Event {
    const BASE_PATH: &'static str = "/events";
    const HEADING: &'static str = "Events";

    fn card(item: &Tagged<Self>, config: &SiteConfig) -> CardData {
        CardData {
            title: item.title.clone(),
            path: detail_path::<Self>(item),
            image: item.image.as_deref().map(|image| asset_url(config, image)),
            date: item.date_created.clone().unwrap_or_default(),
            excerpt: item
                .description
                .clone()
                .or_else(|| item.content.clone())
                .unwrap_or_default(),
            tags: item.tags.clone(),
            time: item.time.clone(),
            location: item.location.clone(),
        }
    }

    fn detail(item: &Tagged<Self>, config: &SiteConfig) -> DetailPageData {
        let calendar_url = item
            .time
            .as_ref()
            .map(|_| google_calendar_url(&item.calendar_event()));

        DetailPageData {
            kind: Self::KIND.to_string(),
            title: item.title.clone(),
            image: item.image.as_deref().map(|image| asset_url(config, image)),
            date: item.date_created.clone().unwrap_or_default(),
            tags: tag_links::<Self>(&item.tags),
            summary: item.description.clone(),
            content: item.content.clone().unwrap_or_default(),
            time: item.time.clone(),
            end_time: item.end_time.clone(),
            location: item.location.clone(),
            fee: item.fee.clone(),
            calendar_url,
            back_link: Self::BASE_PATH.to_string(),
        }
    }
}

fn detail_path<T: PageKind>(item: &Tagged<T>) -> String {
    format!(
        "{}/{}",
        T::BASE_PATH,
        crate::helpers::encode_component(item.slug())
    )
}

/// Detail-page tags link to the listing filtered by that tag
fn tag_links<T: PageKind>(tags: &[String]) -> Vec<TagFilterData> {
    tags.iter()
        .map(|label| TagFilterData {
            label: label.clone(),
            selected: false,
            href: with_query(T::BASE_PATH, &[("tags", label.clone())]),
        })
        .collect()
}

pub fn site_data(config: &SiteConfig) -> SiteData {
    SiteData {
        title: config.title.clone(),
        description: config.description.clone(),
        language: config.language.clone(),
        date_format: config.date_format.clone(),
        datetime_format: format!("{} {}", config.date_format, config.time_format),
    }
}

/// Listing view parameters carried in the query string:
/// `?tags=Art,Music&sort=oldest&page=2`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListingQuery {
    pub tags: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

impl ListingQuery {
    pub fn selected_tags(&self) -> BTreeSet<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn page(&self) -> Option<usize> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }

    /// Replay the query as listing actions
    pub fn apply_to<T: Content>(&self, listing: &mut Listing<T>) {
        for tag in self.selected_tags() {
            listing.toggle_tag(&tag);
        }
        if self.sort_order() != listing.state().sort_order {
            listing.toggle_sort_order();
        }
        if let Some(page) = self.page() {
            if !listing.go_to_page(page).scroll_to_top() {
                tracing::debug!(
                    "Ignoring page {} of {} (only {} pages)",
                    page,
                    T::COLLECTION,
                    listing.total_pages()
                );
            }
        }
    }
}

/// Link to `base` with the given listing state
fn listing_href(base: &str, tags: &BTreeSet<String>, sort: SortOrder, page: usize) -> String {
    let tags = tags.iter().cloned().collect::<Vec<_>>().join(",");
    let sort = match sort {
        SortOrder::Newest => String::new(),
        SortOrder::Oldest => sort.to_string(),
    };
    let page = if page > 1 {
        page.to_string()
    } else {
        String::new()
    };
    with_query(base, &[("tags", tags), ("sort", sort), ("page", page)])
}

pub fn listing_page<T: PageKind>(listing: &Listing<T>, config: &SiteConfig) -> ListingPageData {
    let view = listing.view();
    let selected = view.selected_tags;
    let sort = view.sort_order;

    let tags = listing
        .tags()
        .iter()
        .map(|label| {
            let mut toggled = selected.clone();
            if !toggled.remove(label) {
                toggled.insert(label.clone());
            }
            TagFilterData {
                label: label.clone(),
                selected: selected.contains(label),
                href: listing_href(T::BASE_PATH, &toggled, sort, 1),
            }
        })
        .collect();

    let page_href = |page: usize| {
        format!(
            "{}{}",
            listing_href(T::BASE_PATH, selected, sort, page),
            LISTING_TOP
        )
    };

    let links = pager_slots(view.current_page, view.total_pages, PAGER_MID_SIZE)
        .into_iter()
        .map(|slot| {
            let href = match &slot {
                PagerSlot::Page { number, .. } => Some(page_href(*number)),
                PagerSlot::Ellipsis => None,
            };
            PagerLinkData { slot, href }
        })
        .collect();

    let pagination = PaginationData {
        current: view.current_page,
        total: view.total_pages,
        prev_link: (view.current_page > 1).then(|| page_href(view.current_page - 1)),
        next_link: (view.current_page < view.total_pages).then(|| page_href(view.current_page + 1)),
        links,
    };

    ListingPageData {
        kind: T::KIND.to_string(),
        heading: T::HEADING.to_string(),
        base_path: T::BASE_PATH.to_string(),
        cards: view.items.iter().map(|item| T::card(item, config)).collect(),
        tags,
        clear_link: (!selected.is_empty())
            .then(|| listing_href(T::BASE_PATH, &BTreeSet::new(), sort, 1)),
        sort_order: sort.to_string(),
        sort_link: listing_href(T::BASE_PATH, selected, sort.toggled(), view.current_page),
        filtered_count: view.filtered_count,
        degraded: listing.degraded().is_some(),
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::PAGE_SIZE;

    fn event(id: i64, date: &str, tags: &[&str]) -> Tagged<Event> {
        Tagged {
            item: Event {
                id: id.into(),
                slug: format!("event-{id}"),
                title: format!("Event {id}"),
                image: Some("img-1".to_string()),
                date_created: Some(date.to_string()),
                time: Some("2024-07-01T10:00:00Z".to_string()),
                end_time: Some("2024-07-01T12:00:00Z".to_string()),
                location: Some("Park".to_string()),
                fee: None,
                description: None,
                content: Some("<p>Bring a chair</p>".to_string()),
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn query(tags: &str, sort: &str, page: &str) -> ListingQuery {
        ListingQuery {
            tags: Some(tags.to_string()),
            sort: Some(sort.to_string()),
            page: Some(page.to_string()),
        }
    }

    #[test]
    fn test_query_parsing() {
        let q = query(" Art, ,Music,Art ", "OLDEST", "x");
        assert_eq!(
            q.selected_tags().into_iter().collect::<Vec<_>>(),
            vec!["Art", "Music"]
        );
        assert_eq!(q.sort_order(), SortOrder::Oldest);
        assert_eq!(q.page(), None);
        assert_eq!(ListingQuery::default().sort_order(), SortOrder::Newest);
    }

    #[test]
    fn test_apply_query_to_listing() {
        let items = (0..30)
            .map(|i| event(i, "2024-01-01", if i % 2 == 0 { &["Art"] } else { &["Music"] }))
            .collect();
        let mut listing = Listing::with_items(items, PAGE_SIZE);

        query("Art", "oldest", "2").apply_to(&mut listing);
        let state = listing.state();
        assert_eq!(state.selected_tags.len(), 1);
        assert_eq!(state.sort_order, SortOrder::Oldest);
        assert_eq!(state.current_page, 2);

        let mut listing2 = Listing::with_items(vec![event(1, "2024-01-01", &[])], PAGE_SIZE);
        query("", "newest", "9").apply_to(&mut listing2);
        assert_eq!(listing2.state().current_page, 1);
    }

    #[test]
    fn test_listing_page_links() {
        let items = (0..13)
            .map(|i| event(i, "2024-01-01", &["Art", "Music"]))
            .collect();
        let mut listing = Listing::with_items(items, PAGE_SIZE);
        listing.toggle_tag("Art");
        let page = listing_page(&listing, &SiteConfig::default());

        assert_eq!(page.cards.len(), 12);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(
            page.pagination.next_link.as_deref(),
            Some("/events?tags=Art&page=2#listing-top")
        );
        assert_eq!(page.pagination.prev_link, None);
        assert_eq!(page.sort_link, "/events?tags=Art&sort=oldest");
        assert_eq!(page.clear_link.as_deref(), Some("/events"));

        let art = page.tags.iter().find(|t| t.label == "Art").unwrap();
        assert!(art.selected);
        assert_eq!(art.href, "/events");
        let music = page.tags.iter().find(|t| t.label == "Music").unwrap();
        assert_eq!(music.href, "/events?tags=Art%2CMusic");
    }

    #[test]
    fn test_event_detail_has_calendar_link() {
        let mut config = SiteConfig::default();
        config.cms_url = "https://cms.example.org".to_string();
        let detail = Event::detail(&event(1, "2024-01-01", &["Art"]), &config);

        assert_eq!(detail.image.as_deref(), Some("https://cms.example.org/assets/img-1"));
        let calendar = detail.calendar_url.unwrap();
        assert!(calendar.contains("dates=20240701T100000Z%2F20240701T120000Z"));
        assert_eq!(detail.tags[0].href, "/events?tags=Art");
    }
}
