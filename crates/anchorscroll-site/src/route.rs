#![forbid(unsafe_code)]

//! Path-to-view table for the site.

/// Routed page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Blog,
    NotFound,
}

impl Route {
    /// Resolve a location path. Query string and fragment are ignored; an
    /// empty path is the site root.
    #[must_use]
    pub fn match_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            "" | "/" => Self::Home,
            "/blog" => Self::Blog,
            _ => Self::NotFound,
        }
    }

    /// Canonical path, if the view has one.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::Blog => Some("/blog"),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Blog => "blog",
            Self::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::match_path("/"), Route::Home);
        assert_eq!(Route::match_path("/blog"), Route::Blog);
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(Route::match_path("/?ref=nav"), Route::Home);
        assert_eq!(Route::match_path("/blog#latest"), Route::Blog);
        assert_eq!(Route::match_path("/#pricing"), Route::Home);
    }

    #[test]
    fn everything_else_is_not_found() {
        for path in ["/blog/", "/blog/post-1", "/Blog", "/pricing", "blog"] {
            assert_eq!(Route::match_path(path), Route::NotFound, "path {path:?}");
        }
    }

    #[test]
    fn empty_path_is_home() {
        assert_eq!(Route::match_path(""), Route::Home);
    }

    #[test]
    fn canonical_paths_round_trip() {
        for route in [Route::Home, Route::Blog] {
            let path = route.path().expect("routable view");
            assert_eq!(Route::match_path(path), route);
        }
        assert_eq!(Route::NotFound.path(), None);
    }
}
