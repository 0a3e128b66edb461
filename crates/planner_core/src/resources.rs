//! Village resources and per-hour income.
//!
//! Amounts are signed: a negative stock is how the simulator records an
//! action that was paid for before its cost was fully accrued. Nothing in
//! the planner clamps a deficit away.

use serde::{Deserialize, Serialize};

use crate::math::{accrued, Fixed};

/// The three stockpiled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Wood (`holz`).
    #[serde(alias = "holz")]
    Wood,
    /// Stone / clay (`lehm`).
    #[serde(alias = "lehm")]
    Stone,
    /// Iron (`eisen`).
    #[serde(alias = "eisen")]
    Iron,
}

impl ResourceKind {
    /// All stockpiled resources in a fixed order.
    pub const ALL: [Self; 3] = [Self::Wood, Self::Stone, Self::Iron];
}

/// Amounts of wood, stone and iron plus population used.
///
/// The same shape describes a stock, a cost, and an hourly income. For a
/// cost, `population` is the population the action consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// Wood.
    #[serde(alias = "holz")]
    pub wood: i64,
    /// Stone.
    #[serde(alias = "lehm")]
    pub stone: i64,
    /// Iron.
    #[serde(alias = "eisen")]
    pub iron: i64,
    /// Population used.
    #[serde(alias = "pop")]
    pub population: i64,
}

impl Resources {
    /// No resources.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a resource bundle.
    #[must_use]
    pub const fn new(wood: i64, stone: i64, iron: i64, population: i64) -> Self {
        Self {
            wood,
            stone,
            iron,
            population,
        }
    }

    /// Same amount of every stockpiled resource, no population.
    #[must_use]
    pub const fn uniform(amount: i64) -> Self {
        Self::new(amount, amount, amount, 0)
    }

    /// Amount of a stockpiled resource.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Iron => self.iron,
        }
    }

    /// Mutable amount of a stockpiled resource.
    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut i64 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Iron => &mut self.iron,
        }
    }

    /// Multiply every amount, population included.
    #[must_use]
    pub const fn scaled(self, factor: i64) -> Self {
        Self::new(
            self.wood * factor,
            self.stone * factor,
            self.iron * factor,
            self.population * factor,
        )
    }

    /// Add what `income` (per hour) yields over `elapsed` seconds.
    ///
    /// Each resource accrues independently and is truncated to whole
    /// units. Population is never accrued.
    pub fn accrue(&mut self, income: &Self, elapsed: Fixed) {
        for kind in ResourceKind::ALL {
            *self.get_mut(kind) += accrued(income.get(kind), elapsed);
        }
    }

    /// Pay `cost`: stockpiles go down, population used goes up.
    ///
    /// Stockpiles may go negative; the caller decides whether that is a
    /// deficit worth pricing.
    pub fn pay(&mut self, cost: &Self) {
        for kind in ResourceKind::ALL {
            *self.get_mut(kind) -= cost.get(kind);
        }
        self.population += cost.population;
    }
}

impl std::ops::Add for Resources {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.wood + rhs.wood,
            self.stone + rhs.stone,
            self.iron + rhs.iron,
            self.population + rhs.population,
        )
    }
}

impl std::ops::Sub for Resources {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.wood - rhs.wood,
            self.stone - rhs.stone,
            self.iron - rhs.iron,
            self.population - rhs.population,
        )
    }
}

impl std::ops::AddAssign for Resources {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Resources {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
