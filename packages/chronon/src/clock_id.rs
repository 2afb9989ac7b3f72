use std::fmt::Debug;
use std::hash::Hash;

/// Identifies the tick source behind a [`Clock`][crate::Clock].
///
/// Operating system clocks use the Linux clock id numbering for their raw value. The CPU counter
/// read modes use reserved negative ids that no operating system assigns.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums, reason = "closed set of supported tick sources")]
pub enum ClockId {
    /// Wall-clock time since the Unix epoch. Follows clock adjustments.
    Realtime,

    /// A faster, lower resolution variant of [`ClockId::Realtime`].
    RealtimeCoarse,

    /// International Atomic Time since the Unix epoch. No leap seconds.
    Tai,

    /// Time since an unspecified starting point. Never jumps, does not count suspend.
    Monotonic,

    /// Like [`ClockId::Monotonic`] but also counts time spent suspended.
    Boottime,

    /// A bare CPU cycle counter read, not ordered with surrounding instructions.
    CpuCounter,

    /// A serializing CPU cycle counter read that waits for preceding instructions to complete.
    CpuCounterSerialized,

    /// A serializing CPU cycle counter read followed by a full memory fence.
    ///
    /// This gives the strongest ordering against instruction reordering, at additional cost.
    CpuCounterFenced,
}

impl ClockId {
    /// Every clock id.
    pub const ALL: [Self; 8] = [
        Self::Realtime,
        Self::RealtimeCoarse,
        Self::Tai,
        Self::Monotonic,
        Self::Boottime,
        Self::CpuCounter,
        Self::CpuCounterSerialized,
        Self::CpuCounterFenced,
    ];

    /// The raw numeric identifier.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Realtime => 0,
            Self::Monotonic => 1,
            Self::RealtimeCoarse => 5,
            Self::Boottime => 7,
            Self::Tai => 11,
            Self::CpuCounter => -1,
            Self::CpuCounterSerialized => -2,
            Self::CpuCounterFenced => -3,
        }
    }

    /// The clock id with the given raw identifier, if there is one.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Realtime),
            1 => Some(Self::Monotonic),
            5 => Some(Self::RealtimeCoarse),
            7 => Some(Self::Boottime),
            11 => Some(Self::Tai),
            -1 => Some(Self::CpuCounter),
            -2 => Some(Self::CpuCounterSerialized),
            -3 => Some(Self::CpuCounterFenced),
            _ => None,
        }
    }

    /// Whether the ticks come from a CPU cycle counter rather than an operating system clock.
    ///
    /// CPU counter ticks have no fixed relation to wall time until calibrated.
    #[must_use]
    pub const fn is_cpu_counter(self) -> bool {
        self.raw() < 0
    }
}

mod sealed {
    pub(crate) trait Sealed {}
}

use sealed::Sealed;

/// A compile-time tick source for a [`Clock`][crate::Clock].
///
/// The tick source is part of the type of every clock, [`Moment`][crate::Moment] and
/// [`MomentDiff`][crate::MomentDiff], so ticks from different sources can never be compared or
/// subtracted. This trait is sealed; the implementations are the marker types in this crate, one
/// per [`ClockId`].
#[expect(private_bounds, reason = "intentional - sealed trait")]
pub trait TickSource:
    Sealed + Clone + Copy + Debug + Default + Eq + Hash + Ord + Send + Sync + 'static
{
    /// The clock this source reads.
    const ID: ClockId;
}

macro_rules! tick_source {
    ($(#[$meta:meta])* $name:ident => $id:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[expect(clippy::exhaustive_structs, reason = "intentionally an empty struct")]
        pub struct $name;

        impl Sealed for $name {}

        impl TickSource for $name {
            const ID: ClockId = $id;
        }
    };
}

tick_source!(
    /// Tick source for [`ClockId::Realtime`]. One tick is one nanosecond.
    Realtime => ClockId::Realtime
);
tick_source!(
    /// Tick source for [`ClockId::RealtimeCoarse`]. One tick is one nanosecond.
    RealtimeCoarse => ClockId::RealtimeCoarse
);
tick_source!(
    /// Tick source for [`ClockId::Tai`]. One tick is one nanosecond.
    Tai => ClockId::Tai
);
tick_source!(
    /// Tick source for [`ClockId::Monotonic`]. One tick is one nanosecond.
    Monotonic => ClockId::Monotonic
);
tick_source!(
    /// Tick source for [`ClockId::Boottime`]. One tick is one nanosecond.
    Boottime => ClockId::Boottime
);
tick_source!(
    /// Tick source for [`ClockId::CpuCounter`]. One tick is one counter increment.
    CpuCounter => ClockId::CpuCounter
);
tick_source!(
    /// Tick source for [`ClockId::CpuCounterSerialized`]. One tick is one counter increment.
    CpuCounterSerialized => ClockId::CpuCounterSerialized
);
tick_source!(
    /// Tick source for [`ClockId::CpuCounterFenced`]. One tick is one counter increment.
    CpuCounterFenced => ClockId::CpuCounterFenced
);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip() {
        for id in ClockId::ALL {
            assert_eq!(ClockId::from_raw(id.raw()), Some(id));
        }
    }

    #[test]
    fn unknown_raw_ids() {
        assert_eq!(ClockId::from_raw(2), None);
        assert_eq!(ClockId::from_raw(-4), None);
    }

    #[test]
    fn cpu_counters_are_negative() {
        let cpu: Vec<_> = ClockId::ALL
            .into_iter()
            .filter(|id| id.is_cpu_counter())
            .collect();

        assert_eq!(
            cpu,
            [
                ClockId::CpuCounter,
                ClockId::CpuCounterSerialized,
                ClockId::CpuCounterFenced
            ]
        );
    }

    #[test]
    fn markers_carry_their_id() {
        assert_eq!(Realtime::ID, ClockId::Realtime);
        assert_eq!(RealtimeCoarse::ID, ClockId::RealtimeCoarse);
        assert_eq!(Tai::ID, ClockId::Tai);
        assert_eq!(Monotonic::ID, ClockId::Monotonic);
        assert_eq!(Boottime::ID, ClockId::Boottime);
        assert_eq!(CpuCounter::ID, ClockId::CpuCounter);
        assert_eq!(CpuCounterSerialized::ID, ClockId::CpuCounterSerialized);
        assert_eq!(CpuCounterFenced::ID, ClockId::CpuCounterFenced);
    }
}
