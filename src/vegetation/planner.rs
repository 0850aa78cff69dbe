//! Placement planning
//!
//! Two sampling strategies share one output format:
//!
//! - **Drop mode** ([`scatter_dropping`], [`RingScatter`]): exactly one
//!   candidate per requested item. Rejected candidates are dropped and never
//!   retried, so the placed count may come in under the request.
//! - **Bounded mode** ([`scatter_bounded`]): rejection sampling until the
//!   request is met or a hard attempt cap runs out.
//!
//! Both draw the candidate and then, only for accepted candidates, the
//! variant values from the same stream. Changing the accept/reject logic
//! therefore shifts every later draw; keep the order intact to reproduce
//! recorded placements.

use serde::{Deserialize, Serialize};

use crate::math::{point_in_rect, point_in_ring, ExclusionRect, Point2D, RandomStream};

/// Attempt multiplier for bounded sampling
pub const ATTEMPTS_PER_ITEM: usize = 35;

/// One side of a dead-zone inequality
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    /// No constraint on this axis
    #[default]
    Any,
    /// Coordinate strictly below the value
    Below(f64),
    /// Coordinate strictly above the value
    Above(f64),
}

impl Limit {
    fn holds(self, value: f64) -> bool {
        match self {
            Limit::Any => true,
            Limit::Below(limit) => value < limit,
            Limit::Above(limit) => value > limit,
        }
    }
}

/// Hand-tuned cutout: a point is inside when both inequalities hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    #[serde(default)]
    pub x: Limit,
    #[serde(default)]
    pub z: Limit,
}

impl DeadZone {
    pub const fn new(x: Limit, z: Limit) -> Self {
        Self { x, z }
    }

    pub fn contains(&self, point: Point2D) -> bool {
        self.x.holds(point.x) && self.z.holds(point.z)
    }
}

/// One accepted placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem<T> {
    pub position: Point2D,
    pub rotation_y_degrees: f64,
    pub variant: T,
}

/// Bookkeeping for one planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementStats {
    pub requested: usize,
    pub placed: usize,
    pub attempts: usize,
}

impl PlacementStats {
    pub fn rejected(&self) -> usize {
        self.attempts - self.placed
    }
}

/// Items in generation order plus run statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub items: Vec<PlacedItem<T>>,
    pub stats: PlacementStats,
}

/// Drop-mode sampling
///
/// For each index in `0..count`, `candidate` draws one point (or rejects by
/// returning `None`). Accepted points go through `describe`, which draws the
/// variant values and builds the item.
pub fn scatter_dropping<T, C, D>(rng: &mut RandomStream, count: usize, mut candidate: C, mut describe: D) -> Placement<T>
where
    C: FnMut(&mut RandomStream, usize) -> Option<Point2D>,
    D: FnMut(&mut RandomStream, usize, Point2D) -> PlacedItem<T>,
{
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        if let Some(point) = candidate(rng, index) {
            items.push(describe(rng, index, point));
        }
    }

    let stats = PlacementStats {
        requested: count,
        placed: items.len(),
        attempts: count,
    };
    Placement { items, stats }
}

/// Bounded rejection sampling
///
/// Keeps drawing candidates until `count` items are placed or
/// `max(count * ATTEMPTS_PER_ITEM, min_attempts)` attempts have been made.
pub fn scatter_bounded<T, C, D>(
    rng: &mut RandomStream,
    count: usize,
    min_attempts: usize,
    mut candidate: C,
    mut describe: D,
) -> Placement<T>
where
    C: FnMut(&mut RandomStream) -> Option<Point2D>,
    D: FnMut(&mut RandomStream, usize, Point2D) -> PlacedItem<T>,
{
    let max_attempts = count.saturating_mul(ATTEMPTS_PER_ITEM).max(min_attempts);
    let mut items = Vec::with_capacity(count);
    let mut attempts = 0;

    while items.len() < count && attempts < max_attempts {
        attempts += 1;
        if let Some(point) = candidate(rng) {
            let index = items.len();
            items.push(describe(rng, index, point));
        }
    }

    let stats = PlacementStats {
        requested: count,
        placed: items.len(),
        attempts,
    };
    Placement { items, stats }
}

/// Drop-mode scatter over a ring with rectangular and ad-hoc exclusions
#[derive(Debug, Clone, Copy)]
pub struct RingScatter<'a> {
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub exclusions: &'a [ExclusionRect],
    pub dead_zones: &'a [DeadZone],
}

impl<'a> RingScatter<'a> {
    /// True when a point falls in any dead zone or exclusion rectangle
    pub fn is_excluded(&self, point: Point2D) -> bool {
        self.dead_zones.iter().any(|zone| zone.contains(point))
            || self.exclusions.iter().any(|rect| point_in_rect(point, rect))
    }

    pub fn run<T, D>(&self, rng: &mut RandomStream, describe: D) -> Placement<T>
    where
        D: FnMut(&mut RandomStream, usize, Point2D) -> PlacedItem<T>,
    {
        scatter_dropping(
            rng,
            self.count,
            |rng, _| {
                let point = point_in_ring(rng, self.inner_radius, self.outer_radius);
                (!self.is_excluded(point)).then_some(point)
            },
            describe,
        )
    }
}
