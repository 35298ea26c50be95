use super::{Route, RouteSpec, Segment, CATALOG};
use warp::http::Method;

/// Matches inbound method and path pairs against the route table.
///
/// When several templates fit the same path, the one with the most literal
/// segments wins, so `users/@me` is preferred over `users/{user_id}`.
pub struct RouteCatalog {
    specs: &'static [RouteSpec],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: RouteParams,
}

/// Path parameter values bound by a matched template, kept exactly as they
/// appeared in the inbound path (still percent-encoded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(&'static str, Box<str>)>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| &value[..])
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<Box<str>>) {
        self.0.push((name, value.into()));
    }
}

impl RouteCatalog {
    pub fn new(specs: &'static [RouteSpec]) -> RouteCatalog {
        RouteCatalog { specs }
    }

    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let path = path.trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();

        let mut best: Option<(usize, RouteMatch)> = None;

        for spec in self.specs.iter().filter(|spec| spec.method == method) {
            if let Some((literals, params)) = bind(spec, &segments) {
                let better = match &best {
                    Some((best_literals, _)) => literals > *best_literals,
                    None => true,
                };

                if better {
                    best = Some((
                        literals,
                        RouteMatch {
                            route: spec.route,
                            params,
                        },
                    ));
                }
            }
        }

        best.map(|(_, route_match)| route_match)
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        RouteCatalog::new(CATALOG)
    }
}

fn bind(spec: &RouteSpec, segments: &[&str]) -> Option<(usize, RouteParams)> {
    let mut literals = 0;
    let mut params = RouteParams::default();
    let mut remaining = segments.iter();

    for expected in spec.segments() {
        let segment = remaining.next()?;

        match expected {
            Segment::Literal(literal) if literal == *segment => literals += 1,
            Segment::Literal(_) => return None,
            Segment::Param(_) if segment.is_empty() => return None,
            Segment::Param(name) => params.insert(name, *segment),
        }
    }

    if remaining.next().is_some() {
        return None;
    }

    Some((literals, params))
}
