mod catalog;
pub use catalog::{Route, CATALOG};

mod matcher;
pub use matcher::{RouteCatalog, RouteMatch, RouteParams};

use warp::http::Method;

/// One row of the route table: which upstream endpoint a method and path
/// template map to, and which path parameter partitions its ratelimit.
#[derive(Debug)]
pub struct RouteSpec {
    pub route: Route,
    pub method: Method,
    pub template: &'static str,
    pub major: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

impl RouteSpec {
    pub(crate) fn segments(&self) -> impl Iterator<Item = Segment> {
        self.template.split('/').map(|segment| {
            match segment
                .strip_prefix('{')
                .and_then(|segment| segment.strip_suffix('}'))
            {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(segment),
            }
        })
    }
}
