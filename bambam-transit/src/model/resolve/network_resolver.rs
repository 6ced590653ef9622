use super::{ResolveError, SnappedLocation, SpatialResolver};
use crate::model::{
    network::{EdgeAttributes, EdgeId, GraphStore, ProfileId, RoutingNetwork},
    TravelMode,
};
use geo::{Closest, ClosestPoint, Coord, Distance, Haversine, Line, Point};
use itertools::Itertools;
use kdam::tqdm;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// meters per degree of latitude on the mean earth sphere
const METERS_PER_DEGREE: f64 = 111_195.0;

/// an edge of the network, stored as a straight segment in degree space.
struct EdgeSegment {
    edge_id: EdgeId,
    profile: ProfileId,
    line: Line<f64>,
}

impl EdgeSegment {
    /// closest point on this segment to the query point.
    fn project(&self, point: &Point<f64>) -> Point<f64> {
        match self.line.closest_point(point) {
            Closest::Intersection(p) => p,
            Closest::SinglePoint(p) => p,
            Closest::Indeterminate => self.line.start_point(),
        }
    }

    /// fraction of the segment between its start and a projected point.
    fn fraction_at(&self, projected: &Point<f64>) -> f64 {
        let dx = self.line.dx();
        let dy = self.line.dy();
        let length_2 = dx * dx + dy * dy;
        if length_2 == 0.0 {
            return 0.0;
        }
        let px = projected.x() - self.line.start.x;
        let py = projected.y() - self.line.start.y;
        ((px * dx + py * dy) / length_2).clamp(0.0, 1.0)
    }
}

impl RTreeObject for EdgeSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (p1, p2) = self.line.points();
        AABB::from_corners([p1.x(), p1.y()], [p2.x(), p2.y()])
    }
}

impl PointDistance for EdgeSegment {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let query = Point::new(point[0], point[1]);
        let projected = self.project(&query);
        let dx = projected.x() - query.x();
        let dy = projected.y() - query.y();
        dx * dx + dy * dy
    }
}

/// resolves coordinates onto the edges of a [`RoutingNetwork`] using an
/// R-tree over the edge segments. the index is a snapshot; edges added to
/// the network afterward are not visible to it.
pub struct NetworkResolver {
    tree: RTree<EdgeSegment>,
    profiles: Vec<EdgeAttributes>,
    search_distance: f64,
}

impl NetworkResolver {
    pub fn new(network: &RoutingNetwork, search_distance_meters: f64) -> NetworkResolver {
        let iter = tqdm!(
            network.edges(),
            total = network.edge_count(),
            desc = "index network edges"
        );
        let segments = iter
            .filter_map(|(edge_id, edge)| {
                let src = network.get_coordinate(edge.from)?;
                let dst = network.get_coordinate(edge.to)?;
                Some(EdgeSegment {
                    edge_id,
                    profile: edge.profile,
                    line: Line::new(to_f64(&src), to_f64(&dst)),
                })
            })
            .collect_vec();
        eprintln!();
        log::debug!("built resolver index over {} edge segments", segments.len());

        let profiles = network
            .profiles()
            .iter()
            .map(|(_, attrs)| attrs.clone())
            .collect_vec();

        NetworkResolver {
            tree: RTree::bulk_load(segments),
            profiles,
            search_distance: search_distance_meters,
        }
    }

    pub fn search_distance(&self) -> f64 {
        self.search_distance
    }

    fn accessible(&self, profile: ProfileId, modes: &[TravelMode]) -> bool {
        match self.profiles.get(profile.0 as usize) {
            Some(attributes) => modes.iter().any(|m| m.can_traverse(attributes)),
            None => false,
        }
    }
}

impl SpatialResolver for NetworkResolver {
    fn resolve(
        &self,
        coordinate: Coord<f32>,
        modes: &[TravelMode],
    ) -> Result<SnappedLocation, ResolveError> {
        if modes.is_empty() {
            return Err(ResolveError::NoModes);
        }
        let query = Point::from(to_f64(&coordinate));

        // degree distances shrink with latitude along x, so scaling by the
        // cosine gives a lower bound on the great-circle distance
        let meters_per_degree = METERS_PER_DEGREE * query.y().to_radians().cos().abs().max(0.01);

        let mut best: Option<(f64, &EdgeSegment, Point<f64>)> = None;
        for (segment, distance_2) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[query.x(), query.y()])
        {
            let lower_bound = distance_2.sqrt() * meters_per_degree;
            if lower_bound > self.search_distance {
                break;
            }
            if matches!(best, Some((meters, _, _)) if lower_bound > meters) {
                break;
            }
            if !self.accessible(segment.profile, modes) {
                continue;
            }
            let projected = segment.project(&query);
            let meters = Haversine.distance(query, projected);
            let improves = match best {
                None => true,
                Some((best_meters, _, _)) => meters < best_meters,
            };
            if meters <= self.search_distance && improves {
                best = Some((meters, segment, projected));
            }
        }

        match best {
            Some((meters, segment, projected)) => {
                let offset = SnappedLocation::offset_from_fraction(segment.fraction_at(&projected));
                let snapped = Coord {
                    x: projected.x() as f32,
                    y: projected.y() as f32,
                };
                Ok(SnappedLocation::new(segment.edge_id, offset, snapped, meters))
            }
            None => Err(ResolveError::NoEdgeWithinDistance {
                x: coordinate.x,
                y: coordinate.y,
                distance: self.search_distance,
                modes: modes.iter().join(","),
            }),
        }
    }
}

fn to_f64(coord: &Coord<f32>) -> Coord<f64> {
    Coord {
        x: coord.x as f64,
        y: coord.y as f64,
    }
}
