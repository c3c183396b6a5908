// Grid geometry helpers shared by the hazard builder, flood fill and field ranker

use serde::Deserialize;

use crate::types::{Coord, Direction};

/// Distance function used for all potential-field math in one build
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `|dx| + |dy|`
    #[default]
    Manhattan,
    /// `floor(sqrt(dx^2 + dy^2))`
    Euclidean,
}

impl DistanceMetric {
    pub fn distance(&self, a: Coord, b: Coord) -> i32 {
        match self {
            DistanceMetric::Manhattan => manhattan_distance(a, b),
            DistanceMetric::Euclidean => euclidean_distance(a, b),
        }
    }
}

/// The four orthogonal neighbours of `c`, in `Direction::all()` order.
/// No bounds filtering.
pub fn neighbors(c: Coord) -> [Coord; 4] {
    Direction::all().map(|dir| dir.apply(&c))
}

/// Neighbours of `c` that lie on a `width` x `height` board
pub fn neighbors_in_bounds(c: Coord, width: i32, height: i32) -> impl Iterator<Item = Coord> {
    neighbors(c)
        .into_iter()
        .filter(move |n| in_bounds(*n, width, height))
}

pub fn in_bounds(c: Coord, width: i32, height: i32) -> bool {
    c.x >= 0 && c.x < width && c.y >= 0 && c.y < height
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean distance truncated toward zero
pub fn euclidean_distance(a: Coord, b: Coord) -> i32 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt().floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_follow_direction_order() {
        let n = neighbors(Coord::new(3, 3));
        assert_eq!(
            n,
            [
                Coord::new(3, 4),
                Coord::new(3, 2),
                Coord::new(2, 3),
                Coord::new(4, 3)
            ]
        );
    }

    #[test]
    fn test_neighbors_are_not_filtered() {
        let n = neighbors(Coord::new(0, 0));
        assert!(n.contains(&Coord::new(-1, 0)));
        assert!(n.contains(&Coord::new(0, -1)));
    }

    #[test]
    fn test_neighbors_in_bounds_at_corner() {
        let n: Vec<Coord> = neighbors_in_bounds(Coord::new(0, 0), 11, 11).collect();
        assert_eq!(n, vec![Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(Coord::new(0, 0), 11, 11));
        assert!(in_bounds(Coord::new(10, 10), 11, 11));
        assert!(!in_bounds(Coord::new(11, 5), 11, 11));
        assert!(!in_bounds(Coord::new(5, 11), 11, 11));
        assert!(!in_bounds(Coord::new(-1, 5), 11, 11));
        assert!(!in_bounds(Coord::new(5, -1), 11, 11));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(Coord::new(0, 0), Coord::new(3, 4)), 7);
        assert_eq!(manhattan_distance(Coord::new(5, 5), Coord::new(5, 5)), 0);
    }

    #[test]
    fn test_euclidean_distance_truncates() {
        assert_eq!(euclidean_distance(Coord::new(0, 0), Coord::new(3, 4)), 5);
        // sqrt(2) = 1.41
        assert_eq!(euclidean_distance(Coord::new(0, 0), Coord::new(1, 1)), 1);
        // sqrt(8) = 2.83
        assert_eq!(euclidean_distance(Coord::new(2, 2), Coord::new(0, 0)), 2);
    }

    #[test]
    fn test_metric_dispatch() {
        let a = Coord::new(1, 1);
        let b = Coord::new(4, 5);
        assert_eq!(DistanceMetric::Manhattan.distance(a, b), 7);
        assert_eq!(DistanceMetric::Euclidean.distance(a, b), 5);
        assert_eq!(DistanceMetric::default(), DistanceMetric::Manhattan);
    }
}
