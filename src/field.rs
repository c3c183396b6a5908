// Potential field ranking
//
// Every board cell gets a score built by superimposing distance-decayed
// contributions from points of interest. Hazard cells are dead: they report
// the sentinel DEAD_RANK and never receive further contributions.

use crate::config::{FieldConfig, FoodTargets};
use crate::geometry::{in_bounds, neighbors_in_bounds, DistanceMetric};
use crate::hazards::HazardSet;
use crate::types::{Battlesnake, Board, Coord};

/// Rank reported for dead (hazard) cells
pub const DEAD_RANK: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Dead,
    Score(i32),
}

/// Per-turn score for every cell of the board
#[derive(Debug, Clone)]
pub struct RankMap {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl RankMap {
    /// All cells start at 0, hazard cells start dead
    pub fn new(width: i32, height: i32, hazards: &HazardSet) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        let mut map = RankMap {
            width,
            height,
            cells: vec![Cell::Score(0); size],
        };

        for &cell in hazards.iter() {
            if let Some(idx) = map.index(cell) {
                map.cells[idx] = Cell::Dead;
            }
        }

        map
    }

    fn index(&self, c: Coord) -> Option<usize> {
        in_bounds(c, self.width, self.height).then(|| (c.y * self.width + c.x) as usize)
    }

    fn coord_at(&self, idx: usize) -> Coord {
        let idx = idx as i32;
        Coord::new(idx % self.width, idx / self.width)
    }

    /// Rank of `c`: `DEAD_RANK` for dead cells, `None` off-board
    pub fn get(&self, c: Coord) -> Option<i32> {
        self.index(c).map(|idx| match self.cells[idx] {
            Cell::Dead => DEAD_RANK,
            Cell::Score(score) => score,
        })
    }

    pub fn is_dead(&self, c: Coord) -> bool {
        self.index(c)
            .map(|idx| self.cells[idx] == Cell::Dead)
            .unwrap_or(false)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Adds `weight * max(0, radius - distance(c, source))` to every live cell
    pub fn apply_field(&mut self, source: Coord, weight: i32, metric: DistanceMetric, radius: i32) {
        for idx in 0..self.cells.len() {
            let c = self.coord_at(idx);
            if let Cell::Score(score) = &mut self.cells[idx] {
                let falloff = (radius - metric.distance(c, source)).max(0);
                *score += weight * falloff;
            }
        }
    }

    /// Adds a flat amount to one live, on-board cell
    pub fn add_flat(&mut self, c: Coord, amount: i32) {
        if let Some(idx) = self.index(c) {
            if let Cell::Score(score) = &mut self.cells[idx] {
                *score += amount;
            }
        }
    }

    /// Highest-ranked live cell, first in row-major order on ties
    pub fn best_cell(&self) -> Option<(Coord, i32)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| match cell {
                Cell::Score(score) => Some((self.coord_at(idx), *score)),
                Cell::Dead => None,
            })
            .fold(None, |best: Option<(Coord, i32)>, (c, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((c, score)),
            })
    }
}

/// Closest food to `from`, first listed on ties
pub fn nearest_food(from: Coord, food: &[Coord], metric: DistanceMetric) -> Option<Coord> {
    food.iter()
        .copied()
        .min_by_key(|&f| metric.distance(from, f))
}

/// Builds this turn's rank map for `you`
///
/// Sources, in order: own head, food, then each opponent. Opponents we strictly
/// outgrow pull us in and reward the cells around their head; opponents of equal
/// or greater length push us away and punish those cells heavily.
pub fn build_rank_map(
    board: &Board,
    you: &Battlesnake,
    hazards: &HazardSet,
    config: &FieldConfig,
) -> RankMap {
    let metric = config.distance_metric;
    let radius = config.radius;
    let mut map = RankMap::new(board.width, board.height, hazards);

    map.apply_field(you.head, config.head_weight, metric, radius);

    match config.food_targets {
        FoodTargets::Nearest => {
            if let Some(food) = nearest_food(you.head, &board.food, metric) {
                map.apply_field(food, config.food_weight, metric, radius);
            }
        }
        FoodTargets::All => {
            for &food in &board.food {
                map.apply_field(food, config.food_weight, metric, radius);
            }
        }
    }

    let opponents = board
        .snakes
        .iter()
        .filter(|s| s.id != you.id && s.head != you.head && !s.body.is_empty());

    for opponent in opponents {
        let reach = neighbors_in_bounds(opponent.head, board.width, board.height);

        if you.len() > opponent.len() {
            map.apply_field(opponent.head, config.hunt_weight, metric, radius);
            for cell in reach {
                map.add_flat(cell, config.kill_bonus);
            }
        } else {
            map.apply_field(opponent.head, -config.threat_weight, metric, radius);
            for cell in reach {
                map.add_flat(cell, -config.head_to_head_penalty);
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn hazards(cells: &[(i32, i32)]) -> HazardSet {
        cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    #[test]
    fn test_new_map_marks_hazards_dead() {
        let map = RankMap::new(5, 5, &hazards(&[(1, 1), (9, 9)]));
        assert_eq!(map.get(Coord::new(1, 1)), Some(DEAD_RANK));
        assert!(map.is_dead(Coord::new(1, 1)));
        assert_eq!(map.get(Coord::new(0, 0)), Some(0));
        assert_eq!(map.get(Coord::new(9, 9)), None);
    }

    #[test]
    fn test_apply_field_linear_decay() {
        let mut map = RankMap::new(11, 11, &HazardSet::default());
        map.apply_field(Coord::new(0, 0), 2, DistanceMetric::Manhattan, 10);

        assert_eq!(map.get(Coord::new(0, 0)), Some(20));
        assert_eq!(map.get(Coord::new(3, 0)), Some(14));
        assert_eq!(map.get(Coord::new(5, 5)), Some(0));
        assert_eq!(map.get(Coord::new(10, 10)), Some(0));
    }

    #[test]
    fn test_apply_field_never_touches_dead_cells() {
        let mut map = RankMap::new(7, 7, &hazards(&[(3, 3), (3, 4)]));
        map.apply_field(Coord::new(3, 3), 5, DistanceMetric::Manhattan, 10);
        map.apply_field(Coord::new(0, 0), -7, DistanceMetric::Euclidean, 10);
        map.add_flat(Coord::new(3, 4), 1000);

        assert_eq!(map.get(Coord::new(3, 3)), Some(DEAD_RANK));
        assert_eq!(map.get(Coord::new(3, 4)), Some(DEAD_RANK));
    }

    #[test]
    fn test_scored_cell_at_minus_one_is_not_dead() {
        let mut map = RankMap::new(3, 3, &HazardSet::default());
        map.add_flat(Coord::new(1, 1), -1);
        map.apply_field(Coord::new(0, 0), 1, DistanceMetric::Manhattan, 10);

        assert!(!map.is_dead(Coord::new(1, 1)));
        // -1 + (10 - 2)
        assert_eq!(map.get(Coord::new(1, 1)), Some(7));
    }

    #[test]
    fn test_euclidean_field() {
        let mut map = RankMap::new(11, 11, &HazardSet::default());
        map.apply_field(Coord::new(0, 0), 1, DistanceMetric::Euclidean, 10);
        // floor(sqrt(18)) = 4
        assert_eq!(map.get(Coord::new(3, 3)), Some(6));
    }

    #[test]
    fn test_best_cell_prefers_first_on_ties() {
        let mut map = RankMap::new(3, 3, &HazardSet::default());
        assert_eq!(map.best_cell(), Some((Coord::new(0, 0), 0)));
        map.add_flat(Coord::new(2, 2), 4);
        assert_eq!(map.best_cell(), Some((Coord::new(2, 2), 4)));
    }

    #[test]
    fn test_nearest_food_first_on_tie() {
        let food = vec![Coord::new(2, 0), Coord::new(0, 2), Coord::new(9, 9)];
        let nearest = nearest_food(Coord::new(0, 0), &food, DistanceMetric::Manhattan);
        assert_eq!(nearest, Some(Coord::new(2, 0)));
        assert_eq!(nearest_food(Coord::new(0, 0), &[], DistanceMetric::Manhattan), None);
    }

    #[test]
    fn test_build_rank_map_head_and_food() {
        let config = Config::default_hardcoded();
        let you = snake("you", &[(5, 5), (5, 4)]);
        let board = Board {
            width: 11,
            height: 11,
            food: vec![Coord::new(5, 8)],
            snakes: vec![you.clone()],
            hazards: vec![],
        };
        let hz = hazards(&[(5, 5), (5, 4)]);
        let map = build_rank_map(&board, &you, &hz, &config.field);

        // head 9 + food 2 * 8
        assert_eq!(map.get(Coord::new(5, 6)), Some(25));
        // head 9 + food 2 * 6
        assert_eq!(map.get(Coord::new(4, 5)), Some(21));
        assert_eq!(map.get(Coord::new(5, 5)), Some(DEAD_RANK));
    }

    #[test]
    fn test_all_food_targets_superimpose() {
        let mut config = Config::default_hardcoded();
        config.field.food_targets = FoodTargets::All;
        config.field.head_weight = 0;
        let you = snake("you", &[(0, 0), (0, 1)]);
        let board = Board {
            width: 11,
            height: 11,
            food: vec![Coord::new(5, 5), Coord::new(5, 7)],
            snakes: vec![you.clone()],
            hazards: vec![],
        };
        let map = build_rank_map(&board, &you, &HazardSet::default(), &config.field);

        // 2 * 10 + 2 * 8
        assert_eq!(map.get(Coord::new(5, 5)), Some(36));
    }

    #[test]
    fn test_equal_opponent_neighbors_strongly_negative() {
        let config = Config::default_hardcoded();
        let you = snake("you", &[(5, 5), (4, 5), (3, 5)]);
        let enemy = snake("enemy", &[(7, 5), (8, 5), (9, 5)]);
        let board = Board {
            width: 11,
            height: 11,
            food: vec![],
            snakes: vec![you.clone(), enemy],
            hazards: vec![],
        };
        let map = build_rank_map(&board, &you, &HazardSet::default(), &config.field);

        let contested = map.get(Coord::new(6, 5)).unwrap();
        let open = map.get(Coord::new(5, 6)).unwrap();
        assert!(contested < 0, "contested cell scored {}", contested);
        assert!(contested + config.field.head_to_head_penalty / 2 < open);
    }

    #[test]
    fn test_weaker_opponent_neighbors_rewarded() {
        let config = Config::default_hardcoded();
        let you = snake("you", &[(5, 5), (4, 5), (3, 5), (2, 5)]);
        let enemy = snake("enemy", &[(7, 5), (8, 5)]);
        let board = Board {
            width: 11,
            height: 11,
            food: vec![],
            snakes: vec![you.clone(), enemy],
            hazards: vec![],
        };
        let map = build_rank_map(&board, &you, &HazardSet::default(), &config.field);

        let target = map.get(Coord::new(6, 5)).unwrap();
        let open = map.get(Coord::new(5, 6)).unwrap();
        assert!(target > open + config.field.kill_bonus / 2);
    }
}
