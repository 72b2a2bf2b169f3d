//! Interleaved route decoding.
//!
//! Planner routes alternate graph node and link ids, starting with a node:
//! `[node, link, node, link, ...]`.

use crate::error::Diagnostic;
use crate::model::{Coordinates, RouteData};
use crate::polyline::Polyline;
use crate::schedule::RouteSummary;
use crate::traits::GraphLookup;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRoute {
    pub node_ids: Vec<String>,
    pub link_ids: Vec<String>,
    /// Blank entries dropped while decoding.
    pub skipped: usize,
}

/// Split by position: even index is a node, odd index is a link.
///
/// Blank entries are dropped without shifting the parity of the rest.
pub fn decode_interleaved(route: &[String]) -> DecodedRoute {
    let mut decoded = DecodedRoute::default();

    for (index, id) in route.iter().enumerate() {
        let id = id.trim();
        if id.is_empty() {
            decoded.skipped += 1;
            continue;
        }
        if index % 2 == 0 {
            decoded.node_ids.push(id.to_string());
        } else {
            decoded.link_ids.push(id.to_string());
        }
    }

    decoded
}

/// Inverse of [`decode_interleaved`]. Surplus ids of the longer list follow
/// the alternating part.
pub fn interleave(node_ids: &[String], link_ids: &[String]) -> Vec<String> {
    let mut route = Vec::with_capacity(node_ids.len() + link_ids.len());
    let mut nodes = node_ids.iter();
    let mut links = link_ids.iter();

    loop {
        let node = nodes.next();
        let link = links.next();
        if node.is_none() && link.is_none() {
            break;
        }
        route.extend(node.cloned());
        route.extend(link.cloned());
    }

    route
}

/// Route data for one day from its planner summary, if any.
pub fn route_data(summary: Option<&RouteSummary>, diagnostics: &mut Vec<Diagnostic>) -> RouteData {
    let Some(summary) = summary else {
        return RouteData::default();
    };

    let decoded = decode_interleaved(&summary.interleaved_route);
    if decoded.skipped > 0 {
        tracing::warn!(
            day = %summary.day,
            skipped = decoded.skipped,
            "dropped blank entries from interleaved route"
        );
        diagnostics.push(Diagnostic::MalformedRoute {
            day_key: summary.day.clone(),
            skipped: decoded.skipped,
        });
    }

    let total_distance_km = if summary.total_distance_m.is_finite() && summary.total_distance_m > 0.0 {
        summary.total_distance_m / 1000.0
    } else {
        0.0
    };

    RouteData {
        node_ids: decoded.node_ids,
        link_ids: decoded.link_ids,
        segment_routes: Vec::new(),
        places_routed: summary.places_routed.clone(),
        total_distance_km,
    }
}

/// Renderable geometry for a day's route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteGeometry {
    pub nodes: Vec<Coordinates>,
    pub links: Vec<Polyline>,
    /// Ids the graph could not resolve.
    pub unresolved: Vec<String>,
}

/// Resolve every node and link id through the graph, skipping unknown ids.
pub fn route_geometry<G: GraphLookup + ?Sized>(route: &RouteData, graph: &G) -> RouteGeometry {
    let mut geometry = RouteGeometry::default();

    for id in &route.node_ids {
        match graph.resolve_node(id) {
            Some(point) => geometry.nodes.push(point),
            None => geometry.unresolved.push(id.clone()),
        }
    }
    for id in &route.link_ids {
        match graph.resolve_link(id) {
            Some(line) => geometry.links.push(line),
            None => geometry.unresolved.push(id.clone()),
        }
    }

    geometry
}
