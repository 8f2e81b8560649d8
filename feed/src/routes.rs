//! The viewer's page table.

/// Name of the application, used as the fallback page title and in analytics events.
pub const APP_NAME: &str = "YouTube TikTok Viewer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The swipe feed.
    Home,
    Search,
    Quiz,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Search, Route::Quiz];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Search => "/search",
            Route::Quiz => "/quiz",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Search => "Search",
            Route::Quiz => "Quiz",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home - YouTube TikTok Viewer",
            Route::Search => "Search - YouTube TikTok Viewer",
            Route::Quiz => "Quiz - YouTube TikTok Viewer",
        }
    }

    /// Finds the route for a request path. Query string, fragment and a trailing slash are
    /// ignored.
    pub fn recognize(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// The document title for a route, or the app name for unknown pages.
pub fn document_title(route: Option<Route>) -> &'static str {
    route.map(Route::title).unwrap_or(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognize() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize(""), Some(Route::Home));
        assert_eq!(Route::recognize("/search"), Some(Route::Search));
        assert_eq!(Route::recognize("/search/"), Some(Route::Search));
        assert_eq!(Route::recognize("/search?q=cats"), Some(Route::Search));
        assert_eq!(Route::recognize("/quiz#q3"), Some(Route::Quiz));
        assert_eq!(Route::recognize("/quizzes"), None);
        assert_eq!(Route::recognize("/admin"), None);
    }

    #[test]
    fn titles() {
        assert_eq!(
            document_title(Route::recognize("/")),
            "Home - YouTube TikTok Viewer"
        );
        assert_eq!(document_title(Route::recognize("/nope")), APP_NAME);
        for route in Route::ALL {
            assert!(route.title().starts_with(route.name()));
            assert_eq!(Route::recognize(route.path()), Some(route));
        }
    }
}
