//! Transfer resolution for station displays.
//!
//! Turns a station's own route plus its transfer list into the ordered,
//! de-duplicated list of routes that can be drawn as badges, and regroups
//! that list per operator.

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::RouteCatalog;
use crate::domain::{RouteDescriptor, RouteRef, Station};

/// Number of badges shown before the overflow marker.
pub const DEFAULT_BADGE_LIMIT: usize = 3;

/// Resolved routes of one operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferModel {
    pub company_name: String,
    pub route_names: Vec<String>,
}

/// A route paired with its descriptor, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteBadge {
    pub route: RouteRef,
    pub descriptor: RouteDescriptor,
}

/// The leading badges of a resolved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBadges {
    pub badges: Vec<RouteBadge>,
    /// More routes exist than are shown.
    pub overflow: bool,
}

/// Orders and filters routes against a [`RouteCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct TransferResolver<'a> {
    catalog: &'a RouteCatalog,
}

impl<'a> TransferResolver<'a> {
    pub fn new(catalog: &'a RouteCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve a list of routes for display.
    ///
    /// Routes without a descriptor are dropped. The rest are ordered by:
    /// 1. the home route first
    /// 2. routes of the home company last
    /// 3. route name ascending
    /// 4. company name ascending
    ///
    /// Finally an entry is dropped when the next entry is the same
    /// (company, route) pair.
    pub fn resolve(
        &self,
        routes: &[RouteRef],
        home_company: Option<&str>,
        home_route: Option<&str>,
    ) -> Vec<RouteRef> {
        let mut displayable: Vec<RouteRef> = routes
            .iter()
            .filter(|r| self.catalog.lookup(&r.route_name).is_some())
            .cloned()
            .collect();

        displayable.sort_by(|a, b| display_order(a, b, home_company, home_route));

        let mut resolved = Vec::with_capacity(displayable.len());
        let mut iter = displayable.into_iter().peekable();
        while let Some(route) = iter.next() {
            if iter.peek() != Some(&route) {
                resolved.push(route);
            }
        }
        resolved
    }

    /// Resolve a station's own route together with its transfers.
    pub fn resolve_station(&self, station: &Station) -> Vec<RouteRef> {
        self.resolve(
            &station.routes(),
            Some(station.company_name.as_str()),
            Some(station.route_name.as_str()),
        )
    }

    /// The first `limit` routes with their descriptors.
    pub fn badges(&self, resolved: &[RouteRef], limit: usize) -> TransferBadges {
        let badges = resolved
            .iter()
            .take(limit)
            .filter_map(|route| {
                self.catalog.lookup(&route.route_name).map(|d| RouteBadge {
                    route: route.clone(),
                    descriptor: d.clone(),
                })
            })
            .collect();

        TransferBadges {
            badges,
            overflow: resolved.len() > limit,
        }
    }
}

fn display_order(
    a: &RouteRef,
    b: &RouteRef,
    home_company: Option<&str>,
    home_route: Option<&str>,
) -> Ordering {
    let is_home_route = |r: &RouteRef| home_route == Some(r.route_name.as_str());
    let is_home_company = |r: &RouteRef| home_company == Some(r.company_name.as_str());

    is_home_route(b)
        .cmp(&is_home_route(a))
        .then_with(|| is_home_company(a).cmp(&is_home_company(b)))
        .then_with(|| a.route_name.cmp(&b.route_name))
        .then_with(|| a.company_name.cmp(&b.company_name))
}

/// Regroup resolved routes per operator.
///
/// Operators appear in order of first appearance, routes in resolved order.
pub fn group_by_company(resolved: &[RouteRef]) -> Vec<TransferModel> {
    let mut groups: Vec<TransferModel> = Vec::new();

    for route in resolved {
        match groups
            .iter_mut()
            .find(|g| g.company_name == route.company_name)
        {
            Some(group) => group.route_names.push(route.route_name.clone()),
            None => groups.push(TransferModel {
                company_name: route.company_name.clone(),
                route_names: vec![route.route_name.clone()],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperatorRoutes;
    use crate::domain::RouteColor;
    use crate::domain::fixtures::station;

    fn descriptor(text: &str) -> RouteDescriptor {
        RouteDescriptor::new(RouteColor::parse("#00AC9B").unwrap(), text)
    }

    fn catalog() -> RouteCatalog {
        RouteCatalog::new(vec![
            OperatorRoutes::new("東京メトロ")
                .route("南北線", descriptor("N"))
                .route("銀座線", descriptor("G"))
                .route("丸ノ内線", descriptor("M")),
            OperatorRoutes::new("東京都交通局")
                .route("三田線", descriptor("I"))
                .route("大江戸線", descriptor("E")),
            OperatorRoutes::new("東急電鉄").route("東急目黒線", descriptor("MG")),
            OperatorRoutes::new("test").route("R1", descriptor("R")),
        ])
        .unwrap()
    }

    fn r(company: &str, route: &str) -> RouteRef {
        RouteRef::new(company, route)
    }

    #[test]
    fn adjacent_duplicate_collapsed() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);

        let resolved = resolver.resolve(&[r("X", "R1"), r("X", "R1")], None, None);
        assert_eq!(resolved, vec![r("X", "R1")]);
    }

    #[test]
    fn unknown_routes_dropped() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);

        let resolved = resolver.resolve(&[r("X", "R1"), r("X", "未知線")], None, None);
        assert_eq!(resolved, vec![r("X", "R1")]);
        assert!(resolver.resolve(&[r("X", "未知線")], None, None).is_empty());
        assert!(resolver.resolve(&[], None, None).is_empty());
    }

    #[test]
    fn home_route_first_home_company_last() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);

        let meguro = station(
            "東京メトロ",
            "南北線",
            "目黒",
            &[("東急電鉄", "東急目黒線"), ("東京メトロ", "銀座線"), ("東京都交通局", "三田線")],
        );

        let resolved = resolver.resolve_station(&meguro);
        assert_eq!(
            resolved,
            vec![
                r("東京メトロ", "南北線"),
                r("東京都交通局", "三田線"),
                r("東急電鉄", "東急目黒線"),
                r("東京メトロ", "銀座線"),
            ]
        );
    }

    #[test]
    fn ties_broken_by_route_then_company() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);

        let resolved = resolver.resolve(
            &[r("B", "R1"), r("A", "R1"), r("C", "三田線")],
            None,
            None,
        );
        // "R1" < "三田線" by byte order
        assert_eq!(resolved, vec![r("A", "R1"), r("B", "R1"), r("C", "三田線")]);
    }

    #[test]
    fn duplicates_of_home_route_collapsed() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);

        let ginza = station(
            "東京メトロ",
            "銀座線",
            "銀座",
            &[("東京メトロ", "銀座線"), ("東京メトロ", "丸ノ内線"), ("東京メトロ", "丸ノ内線")],
        );
        let resolved = resolver.resolve_station(&ginza);
        assert_eq!(resolved, vec![r("東京メトロ", "銀座線"), r("東京メトロ", "丸ノ内線")]);
    }

    #[test]
    fn group_by_company_first_appearance() {
        let groups = group_by_company(&[
            r("東京メトロ", "南北線"),
            r("東京都交通局", "三田線"),
            r("東京メトロ", "銀座線"),
        ]);

        assert_eq!(
            groups,
            vec![
                TransferModel {
                    company_name: "東京メトロ".to_string(),
                    route_names: vec!["南北線".to_string(), "銀座線".to_string()],
                },
                TransferModel {
                    company_name: "東京都交通局".to_string(),
                    route_names: vec!["三田線".to_string()],
                },
            ]
        );
        assert!(group_by_company(&[]).is_empty());
    }

    #[test]
    fn badges_truncate_with_overflow() {
        let catalog = catalog();
        let resolver = TransferResolver::new(&catalog);
        let resolved = vec![
            r("東京メトロ", "南北線"),
            r("東京都交通局", "三田線"),
            r("東急電鉄", "東急目黒線"),
            r("東京メトロ", "銀座線"),
        ];

        let badges = resolver.badges(&resolved, DEFAULT_BADGE_LIMIT);
        assert_eq!(badges.badges.len(), 3);
        assert!(badges.overflow);
        assert_eq!(badges.badges[0].descriptor.short_text, "N");
        assert_eq!(badges.badges[2].route, r("東急電鉄", "東急目黒線"));

        let badges = resolver.badges(&resolved[..3], DEFAULT_BADGE_LIMIT);
        assert_eq!(badges.badges.len(), 3);
        assert!(!badges.overflow);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::OperatorRoutes;
    use crate::domain::RouteColor;
    use proptest::prelude::*;

    const ROUTES: [&str; 4] = ["a", "b", "c", "d"];

    /// Catalog knowing routes "a" to "c"; "d" is never displayable.
    fn catalog() -> RouteCatalog {
        let color = RouteColor::parse("#123456").unwrap();
        let table = ROUTES[..3].iter().fold(OperatorRoutes::new("op"), |op, name| {
            op.route(*name, RouteDescriptor::new(color.clone(), name.to_uppercase()))
        });
        RouteCatalog::new(vec![table]).unwrap()
    }

    fn route_ref() -> impl Strategy<Value = RouteRef> {
        (prop::sample::select(vec!["X", "Y", "Z"]), prop::sample::select(ROUTES.to_vec()))
            .prop_map(|(c, r)| RouteRef::new(c, r))
    }

    fn home() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec!["X", "Y", "a", "b"]))
    }

    proptest! {
        /// Resolving twice gives the same result
        #[test]
        fn idempotent(routes in prop::collection::vec(route_ref(), 0..12), hc in home(), hr in home()) {
            let catalog = catalog();
            let resolver = TransferResolver::new(&catalog);
            prop_assert_eq!(resolver.resolve(&routes, hc, hr), resolver.resolve(&routes, hc, hr));
        }

        /// Output is displayable, duplicate-free and no longer than input
        #[test]
        fn output_invariants(routes in prop::collection::vec(route_ref(), 0..12), hc in home(), hr in home()) {
            let catalog = catalog();
            let resolver = TransferResolver::new(&catalog);
            let resolved = resolver.resolve(&routes, hc, hr);

            prop_assert!(resolved.len() <= routes.len());
            for route in &resolved {
                prop_assert!(catalog.lookup(&route.route_name).is_some());
            }
            for pair in resolved.windows(2) {
                prop_assert_ne!(&pair[0], &pair[1]);
            }
        }

        /// Output is sorted by the display order and keeps every distinct
        /// displayable input
        #[test]
        fn sorted_and_complete(routes in prop::collection::vec(route_ref(), 0..12), hc in home(), hr in home()) {
            let catalog = catalog();
            let resolver = TransferResolver::new(&catalog);
            let resolved = resolver.resolve(&routes, hc, hr);

            for pair in resolved.windows(2) {
                prop_assert_eq!(display_order(&pair[0], &pair[1], hc, hr), Ordering::Less);
            }
            for route in routes.iter().filter(|r| r.route_name != "d") {
                prop_assert!(resolved.contains(route));
            }
        }
    }
}
