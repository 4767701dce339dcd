use nalgebra::Vector2;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub const FIELD_HALF_LENGTH: f32 = 52.5;
pub const FIELD_HALF_WIDTH: f32 = 34.0;
pub const DEFAULT_CELL_SIZE: f32 = 2.0;

const ORTHOGONAL_COST: f32 = 1.0;
const DIAGONAL_COST: f32 = 1.41;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        FieldBounds {
            x_min: -FIELD_HALF_LENGTH,
            x_max: FIELD_HALF_LENGTH,
            y_min: -FIELD_HALF_WIDTH,
            y_max: FIELD_HALF_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

impl GridCell {
    pub fn new(x: usize, y: usize) -> Self {
        GridCell { x, y }
    }

    fn chebyshev(&self, other: &GridCell) -> f32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y)) as f32
    }
}

/// Open-set entry. `BinaryHeap` is a max-heap, so the ordering is reversed to
/// pop the lowest f first; equal f falls back to the cell for determinism.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    cell: GridCell,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

/// A* over a coarse grid laid on the pitch.
///
/// Used as a one-shot fallback when direct steering is boxed in by opponents.
/// Every obstacle blocks its own cell plus the eight around it.
#[derive(Debug, Clone)]
pub struct GridPlanner {
    bounds: FieldBounds,
    cell_size: f32,
    width: usize,
    height: usize,
}

impl Default for GridPlanner {
    fn default() -> Self {
        GridPlanner::new(DEFAULT_CELL_SIZE)
    }
}

impl GridPlanner {
    pub fn new(cell_size: f32) -> Self {
        Self::with_bounds(FieldBounds::default(), cell_size)
    }

    pub fn with_bounds(bounds: FieldBounds, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };

        let width = (((bounds.x_max - bounds.x_min) / cell_size) as usize).max(1);
        let height = (((bounds.y_max - bounds.y_min) / cell_size) as usize).max(1);

        GridPlanner {
            bounds,
            cell_size,
            width,
            height,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn world_to_grid(&self, position: &Vector2<f32>) -> GridCell {
        let gx = ((position.x - self.bounds.x_min) / self.cell_size).floor() as i64;
        let gy = ((position.y - self.bounds.y_min) / self.cell_size).floor() as i64;

        GridCell {
            x: gx.clamp(0, self.width as i64 - 1) as usize,
            y: gy.clamp(0, self.height as i64 - 1) as usize,
        }
    }

    /// Centre of the cell.
    pub fn grid_to_world(&self, cell: GridCell) -> Vector2<f32> {
        Vector2::new(
            self.bounds.x_min + cell.x as f32 * self.cell_size + self.cell_size / 2.0,
            self.bounds.y_min + cell.y as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    /// Plans from `start` to `goal` around `obstacles`.
    ///
    /// The first waypoint is exactly `start`, the rest are cell centres ending
    /// at the goal cell. Returns `None` when no route exists or the expansion
    /// budget (one expansion per grid cell) runs out.
    pub fn plan(
        &self,
        start: &Vector2<f32>,
        goal: &Vector2<f32>,
        obstacles: &[Vector2<f32>],
    ) -> Option<Vec<Vector2<f32>>> {
        if !is_finite(start) || !is_finite(goal) {
            return None;
        }

        let start_cell = self.world_to_grid(start);
        let goal_cell = self.world_to_grid(goal);

        if start_cell == goal_cell {
            return Some(vec![*start, self.grid_to_world(goal_cell)]);
        }

        let cells = self.width * self.height;

        let mut blocked = vec![false; cells];
        for obstacle in obstacles.iter().filter(|o| is_finite(o)) {
            let center = self.world_to_grid(obstacle);
            blocked[self.index(center)] = true;
            for cell in self.neighbors(center) {
                blocked[self.index(cell)] = true;
            }
        }

        // The agent stands on the start cell and the target sits on the goal cell.
        blocked[self.index(start_cell)] = false;
        blocked[self.index(goal_cell)] = false;

        let mut g_score = vec![f32::INFINITY; cells];
        let mut came_from: Vec<Option<GridCell>> = vec![None; cells];
        let mut closed = vec![false; cells];
        let mut open_set = BinaryHeap::new();

        g_score[self.index(start_cell)] = 0.0;
        open_set.push(OpenNode {
            f: start_cell.chebyshev(&goal_cell),
            cell: start_cell,
        });

        let max_expansions = cells;
        let mut expansions = 0;

        while expansions < max_expansions {
            let Some(OpenNode { cell: current, .. }) = open_set.pop() else {
                break;
            };

            let current_index = self.index(current);
            if closed[current_index] {
                continue;
            }
            closed[current_index] = true;
            expansions += 1;

            if current == goal_cell {
                return Some(self.reconstruct(start, current, &came_from));
            }

            for neighbor in self.neighbors(current) {
                let neighbor_index = self.index(neighbor);
                if closed[neighbor_index] || blocked[neighbor_index] {
                    continue;
                }

                let diagonal = neighbor.x != current.x && neighbor.y != current.y;
                let step_cost = if diagonal { DIAGONAL_COST } else { ORTHOGONAL_COST };
                let tentative = g_score[current_index] + step_cost;

                if tentative < g_score[neighbor_index] {
                    came_from[neighbor_index] = Some(current);
                    g_score[neighbor_index] = tentative;
                    open_set.push(OpenNode {
                        f: tentative + neighbor.chebyshev(&goal_cell),
                        cell: neighbor,
                    });
                }
            }
        }

        None
    }

    fn reconstruct(
        &self,
        start: &Vector2<f32>,
        goal_cell: GridCell,
        came_from: &[Option<GridCell>],
    ) -> Vec<Vector2<f32>> {
        let mut path = Vec::new();
        let mut node = goal_cell;

        while let Some(previous) = came_from[self.index(node)] {
            path.push(self.grid_to_world(node));
            node = previous;
        }

        path.push(*start);
        path.reverse();
        path
    }

    fn index(&self, cell: GridCell) -> usize {
        cell.y * self.width + cell.x
    }

    fn neighbors(&self, cell: GridCell) -> impl Iterator<Item = GridCell> + use<> {
        let (width, height) = (self.width as i64, self.height as i64);
        let (cx, cy) = (cell.x as i64, cell.y as i64);

        (-1i64..=1)
            .flat_map(|dx| (-1i64..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| (cx + dx, cy + dy))
            .filter(move |&(nx, ny)| nx >= 0 && nx < width && ny >= 0 && ny < height)
            .map(|(nx, ny)| GridCell::new(nx as usize, ny as usize))
    }
}

fn is_finite(v: &Vector2<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
