use crate::routes::{Route, RouteParams, RouteSpec, CATALOG};
use crate::Error;
use std::collections::HashMap;
use std::fmt;

/// Unit of upstream ratelimit accounting: a route together with the value of
/// its major parameter. Global routes carry an empty major component.
///
/// The major value of interaction routes is the interaction token, so log
/// `route` rather than the whole key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub route: Route,
    pub major: Box<str>,
}

impl BucketKey {
    pub fn new(route: Route, major: impl Into<Box<str>>) -> BucketKey {
        BucketKey {
            route,
            major: major.into(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.major.is_empty()
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(f, "{}", self.route)
        } else {
            write!(f, "{}:{}", self.route, self.major)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Upstream path relative to the upstream base URL, without a leading slash.
    pub path: String,
    pub bucket: BucketKey,
}

/// Read-only lookup from route identity to its template and major parameter.
/// Built once at startup and shared between requests.
pub struct RouteResolver {
    table: HashMap<Route, &'static RouteSpec>,
}

impl RouteResolver {
    pub fn new(specs: &'static [RouteSpec]) -> RouteResolver {
        let table = specs.iter().map(|spec| (spec.route, spec)).collect();
        RouteResolver { table }
    }

    pub fn resolve(&self, route: Route, params: &RouteParams) -> Result<ResolvedRoute, Error> {
        let spec = self
            .table
            .get(&route)
            .ok_or(Error::UnresolvableRoute(route))?;

        let param = |name: &'static str| {
            params
                .get(name)
                .ok_or(Error::MissingRouteParameter { route, param: name })
        };

        let mut path = String::with_capacity(spec.template.len());
        for (i, segment) in spec.template.split('/').enumerate() {
            if i > 0 {
                path.push('/');
            }

            match segment
                .strip_prefix('{')
                .and_then(|segment| segment.strip_suffix('}'))
            {
                Some(name) => path.push_str(param(name)?),
                None => path.push_str(segment),
            }
        }

        let major = match spec.major {
            Some(name) => param(name)?,
            None => "",
        };

        Ok(ResolvedRoute {
            path,
            bucket: BucketKey::new(route, major),
        })
    }
}

impl Default for RouteResolver {
    fn default() -> Self {
        RouteResolver::new(CATALOG)
    }
}
