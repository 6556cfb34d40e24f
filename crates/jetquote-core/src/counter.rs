// ── Bounded counters ──
//
// Passenger, pet and luggage pickers. Every transition is pure and
// saturates at the field's bounds.

use crate::model::{Luggage, Passengers, Pets};

/// Per-field `(min, max)` bounds.
pub mod bounds {
    pub const ADULTS: (u32, u32) = (1, 19);
    pub const CHILDREN: (u32, u32) = (0, 18);
    pub const INFANTS: (u32, u32) = (0, 6);
    pub const PETS: (u32, u32) = (0, 6);
    pub const LUGGAGE: (u32, u32) = (0, 20);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    value: u32,
    min: u32,
    max: u32,
}

impl Counter {
    /// A counter starting at its minimum. `max` below `min` is raised to `min`.
    pub const fn new(min: u32, max: u32) -> Self {
        let max = if max < min { min } else { max };
        Self {
            value: min,
            min,
            max,
        }
    }

    const fn bounded((min, max): (u32, u32)) -> Self {
        Self::new(min, max)
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn min(self) -> u32 {
        self.min
    }

    pub fn max(self) -> u32 {
        self.max
    }

    pub fn can_increment(self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(self) -> bool {
        self.value > self.min
    }

    #[must_use]
    pub fn increment(self) -> Self {
        self.set(self.value.saturating_add(1))
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        self.set(self.value.saturating_sub(1))
    }

    /// Jump to `value`, clamped into bounds.
    #[must_use]
    pub fn set(self, value: u32) -> Self {
        Self {
            value: value.clamp(self.min, self.max),
            ..self
        }
    }
}

// ── Grouped counters ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassengerCounters {
    pub adults: Counter,
    pub children: Counter,
    pub infants: Counter,
}

impl Default for PassengerCounters {
    fn default() -> Self {
        Self {
            adults: Counter::bounded(bounds::ADULTS),
            children: Counter::bounded(bounds::CHILDREN),
            infants: Counter::bounded(bounds::INFANTS),
        }
    }
}

impl PassengerCounters {
    /// Counters preset from stored counts (clamped).
    pub fn from_counts(p: Passengers) -> Self {
        let d = Self::default();
        Self {
            adults: d.adults.set(p.adults),
            children: d.children.set(p.children),
            infants: d.infants.set(p.infants),
        }
    }
}

impl From<PassengerCounters> for Passengers {
    fn from(c: PassengerCounters) -> Self {
        Self {
            adults: c.adults.value(),
            children: c.children.value(),
            infants: c.infants.value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetCounters {
    pub small: Counter,
    pub large: Counter,
}

impl Default for PetCounters {
    fn default() -> Self {
        Self {
            small: Counter::bounded(bounds::PETS),
            large: Counter::bounded(bounds::PETS),
        }
    }
}

impl PetCounters {
    pub fn from_counts(p: Pets) -> Self {
        let d = Self::default();
        Self {
            small: d.small.set(p.small),
            large: d.large.set(p.large),
        }
    }
}

impl From<PetCounters> for Pets {
    fn from(c: PetCounters) -> Self {
        Self {
            small: c.small.value(),
            large: c.large.value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuggageCounters {
    pub carry_on: Counter,
    pub hold: Counter,
    pub skis: Counter,
    pub golf_bag: Counter,
    pub other: Counter,
}

impl Default for LuggageCounters {
    fn default() -> Self {
        let c = Counter::bounded(bounds::LUGGAGE);
        Self {
            carry_on: c,
            hold: c,
            skis: c,
            golf_bag: c,
            other: c,
        }
    }
}

impl LuggageCounters {
    pub fn from_counts(l: Luggage) -> Self {
        let d = Self::default();
        Self {
            carry_on: d.carry_on.set(l.carry_on),
            hold: d.hold.set(l.hold),
            skis: d.skis.set(l.skis),
            golf_bag: d.golf_bag.set(l.golf_bag),
            other: d.other.set(l.other),
        }
    }
}

impl From<LuggageCounters> for Luggage {
    fn from(c: LuggageCounters) -> Self {
        Self {
            carry_on: c.carry_on.value(),
            hold: c.hold.value(),
            skis: c.skis.value(),
            golf_bag: c.golf_bag.value(),
            other: c.other.value(),
        }
    }
}
