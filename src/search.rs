use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::debounce::Debouncer;
use crate::location::QueryParams;
use crate::router::Navigator;

/// Free-text search parameter
pub const QUERY_PARAM: &str = "query";
/// Category filter parameter
pub const CATEGORY_PARAM: &str = "category";
/// Category value that means "no filter" and never appears in the URL
pub const DEFAULT_CATEGORY: &str = "all";

/// Options offered by the category selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    All,
    Books,
    Movies,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::All, Category::Books, Category::Movies];

    /// Value written to the `category` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => DEFAULT_CATEGORY,
            Category::Books => "books",
            Category::Movies => "movies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Books => "Books",
            Category::Movies => "Movies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// `params` with `query` set to `term`, or removed when `term` is empty.
pub fn apply_search(params: &QueryParams, term: &str) -> QueryParams {
    let mut next = params.clone();
    if term.is_empty() {
        next.delete(QUERY_PARAM);
    } else {
        next.set(QUERY_PARAM, term);
    }
    next
}

/// `params` with `category` set, or removed when it is the default.
pub fn apply_category(params: &QueryParams, category: &str) -> QueryParams {
    let mut next = params.clone();
    if category == DEFAULT_CATEGORY {
        next.delete(CATEGORY_PARAM);
    } else {
        next.set(CATEGORY_PARAM, category);
    }
    next
}

/// Rewrite the navigator's current query string with `update` and replace the
/// current history entry.
fn replace_with(
    navigator: &dyn Navigator,
    update: impl FnOnce(&QueryParams) -> QueryParams,
) -> String {
    let location = navigator.location();
    let next = location.with_params(update(&location.params));
    let href = next.href();
    tracing::debug!("replace: {} -> {}", location.href(), href);
    navigator.replace(&href);
    href
}

/// Search box plus category selector, synced into the navigator's query string.
///
/// Text input goes through a debounced search; category changes apply
/// immediately. Dropping the control cancels a pending search.
pub struct SearchControl {
    navigator: Arc<dyn Navigator>,
    selected_category: String,
    debounced_search: Debouncer<String>,
}

impl SearchControl {
    pub fn new(navigator: Arc<dyn Navigator>, delay: Duration, runtime: Handle) -> Self {
        let selected_category = navigator
            .location()
            .params
            .get(CATEGORY_PARAM)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        let target = Arc::clone(&navigator);
        let debounced_search = Debouncer::with_handle(runtime, delay, move |term: String| {
            replace_with(target.as_ref(), |params| apply_search(params, &term));
        });

        tracing::debug!(
            "search control mounted: category={}, delay={:?}",
            selected_category,
            delay
        );

        Self {
            navigator,
            selected_category,
            debounced_search,
        }
    }

    /// Initial value for the text input
    pub fn initial_query(&self) -> String {
        self.navigator
            .location()
            .params
            .get(QUERY_PARAM)
            .unwrap_or_default()
            .to_string()
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// The selector option matching the selected category, if it is one we offer.
    pub fn selected_option(&self) -> Option<Category> {
        self.selected_category.parse().ok()
    }

    /// Write `term` into the URL now. Returns the href navigated to.
    pub fn handle_search(&self, term: &str) -> String {
        replace_with(self.navigator.as_ref(), |params| apply_search(params, term))
    }

    /// Write `category` into the URL now. Returns the href navigated to.
    pub fn handle_search_category(&self, category: &str) -> String {
        replace_with(self.navigator.as_ref(), |params| {
            apply_category(params, category)
        })
    }

    /// Selector changed: update local state, then the URL. Not debounced.
    pub fn handle_category_change(&mut self, category: &str) -> String {
        tracing::debug!("category: {} -> {}", self.selected_category, category);
        self.selected_category = category.to_string();
        self.handle_search_category(category)
    }

    /// Text input changed. The URL is updated once typing pauses.
    pub fn on_input(&self, value: impl Into<String>) {
        self.debounced_search.call(value.into());
    }

    /// Whether a debounced search is waiting to fire
    pub fn search_pending(&self) -> bool {
        self.debounced_search.is_pending()
    }

    pub fn delay(&self) -> Duration {
        self.debounced_search.delay()
    }

    /// Tear down, discarding any search that has not fired yet.
    pub fn unmount(self) {
        self.debounced_search.cancel();
        tracing::debug!("search control unmounted");
    }
}
