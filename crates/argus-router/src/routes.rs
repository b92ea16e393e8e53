//! The static route table and path matching.

/// One entry of the route table.
///
/// `view` names the page component; loading it is the renderer's job.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub redirect: Option<&'static str>,
    pub view: Option<&'static str>,
    pub children: &'static [RouteRecord],
}

impl RouteRecord {
    const fn page(path: &'static str, name: &'static str, view: &'static str) -> Self {
        Self {
            path,
            name: Some(name),
            redirect: None,
            view: Some(view),
            children: &[],
        }
    }
}

const HOME_CHILDREN: &[RouteRecord] = &[
    RouteRecord::page("/index", "index", "views/index/index"),
    RouteRecord::page("/analysis", "analysis", "views/analysis/index"),
    RouteRecord::page("/trend", "trend", "views/trend/index"),
    RouteRecord::page("/supervision", "supervision", "views/supervision/index"),
    RouteRecord::page("/environmental", "environmental", "views/environmental/index"),
    RouteRecord::page("/policy", "policy", "views/policy/index"),
    RouteRecord::page("/report", "report", "views/report/index"),
];

/// Application routes. Child paths are absolute.
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: None,
        redirect: Some("/login"),
        view: None,
        children: &[],
    },
    RouteRecord::page("/login", "login", "views/Login"),
    RouteRecord {
        path: "/home",
        name: Some("home"),
        redirect: None,
        view: Some("views/HomeView"),
        children: HOME_CHILDREN,
    },
];

/// Strip a trailing slash (except for the root path).
pub(crate) fn normalize(path: &str) -> &str {
    let trimmed = path.trim();
    match trimmed.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ if trimmed.is_empty() => "/",
        _ => trimmed,
    }
}

/// Match `path` against [`ROUTES`].
///
/// Returns the chain of matched records from outermost to innermost
/// (`[home, report]` for `/report`), or an empty vector when nothing matches.
pub fn resolve(path: &str) -> Vec<&'static RouteRecord> {
    let path = normalize(path);
    let mut chain = Vec::new();
    if find_in(ROUTES, path, &mut chain) {
        chain
    } else {
        Vec::new()
    }
}

fn find_in(
    records: &'static [RouteRecord],
    path: &str,
    chain: &mut Vec<&'static RouteRecord>,
) -> bool {
    for record in records {
        chain.push(record);
        if record.path == path || find_in(record.children, path, chain) {
            return true;
        }
        chain.pop();
    }
    false
}
