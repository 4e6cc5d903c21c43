use std::fmt;

/// Unique identifier for any actor or world entity tracked by the core.
///
/// Actors (players) and targetable world entities share one id space; the
/// environment assigns ids and the core never fabricates them. A stored id
/// is always a weak reference: liveness must be re-checked through the
/// spatial oracle before every use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u64);

impl EntityId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Absolute point in time, in milliseconds since an arbitrary epoch.
///
/// The core never reads a clock itself; callers sample time once per
/// command/tick and pass it in, which keeps every store a pure function of
/// its inputs and makes cooldown math trivially testable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn saturating_since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0 + rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Converts whole seconds to [`Millis`]-scale milliseconds.
pub const fn seconds_to_millis(seconds: u32) -> u64 {
    seconds as u64 * 1000
}

/// Converts a millisecond span to whole seconds, rounding up.
///
/// A cooldown with 1ms left still reads as "1 second remaining"; it only
/// reads zero once it has actually expired.
pub const fn millis_to_seconds_ceil(millis: u64) -> u32 {
    millis.div_ceil(1000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_seconds_round_up() {
        assert_eq!(millis_to_seconds_ceil(0), 0);
        assert_eq!(millis_to_seconds_ceil(1), 1);
        assert_eq!(millis_to_seconds_ceil(999), 1);
        assert_eq!(millis_to_seconds_ceil(1000), 1);
        assert_eq!(millis_to_seconds_ceil(1001), 2);
    }

    #[test]
    fn saturating_since_never_underflows() {
        assert_eq!(Millis(500).saturating_since(Millis(700)), 0);
        assert_eq!(Millis(700).saturating_since(Millis(500)), 200);
    }
}
