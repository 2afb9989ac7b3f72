use std::fmt::{self, Debug};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::pal::MockBindings;
use crate::pal::{Bindings, BuildTargetBindings};
use crate::{ClockId, Result};

#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Real(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn real() -> Self {
        Self::Real(&BuildTargetBindings)
    }

    /// Reads the tick count of any clock, dispatching to the matching binding.
    pub(crate) fn read_ticks(&self, clock: ClockId) -> Result<u64> {
        match clock {
            ClockId::CpuCounter => Ok(self.read_counter()),
            ClockId::CpuCounterSerialized => Ok(self.read_counter_serialized()),
            ClockId::CpuCounterFenced => Ok(self.read_counter_fenced()),
            ClockId::Realtime
            | ClockId::RealtimeCoarse
            | ClockId::Tai
            | ClockId::Monotonic
            | ClockId::Boottime => self.clock_gettime_nanos(clock),
        }
    }
}

impl Bindings for BindingsFacade {
    fn clock_gettime_nanos(&self, clock: ClockId) -> Result<u64> {
        match self {
            Self::Real(bindings) => bindings.clock_gettime_nanos(clock),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.clock_gettime_nanos(clock),
        }
    }

    fn read_counter(&self) -> u64 {
        match self {
            Self::Real(bindings) => bindings.read_counter(),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.read_counter(),
        }
    }

    fn read_counter_serialized(&self) -> u64 {
        match self {
            Self::Real(bindings) => bindings.read_counter_serialized(),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.read_counter_serialized(),
        }
    }

    fn read_counter_fenced(&self) -> u64 {
        match self {
            Self::Real(bindings) => bindings.read_counter_fenced(),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.read_counter_fenced(),
        }
    }
}

impl From<&'static BuildTargetBindings> for BindingsFacade {
    fn from(bindings: &'static BuildTargetBindings) -> Self {
        Self::Real(bindings)
    }
}

#[cfg(test)]
impl From<MockBindings> for BindingsFacade {
    fn from(bindings: MockBindings) -> Self {
        Self::Mock(Arc::new(bindings))
    }
}

impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(bindings) => bindings.fmt(f),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.fmt(f),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn read_ticks_dispatches_by_clock_kind() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_clock_gettime_nanos()
            .withf(|clock| *clock == ClockId::Boottime)
            .once()
            .returning(|_| Ok(7));
        bindings.expect_read_counter().once().return_const(1_u64);
        bindings
            .expect_read_counter_serialized()
            .once()
            .return_const(2_u64);
        bindings
            .expect_read_counter_fenced()
            .once()
            .return_const(3_u64);

        let facade = BindingsFacade::from(bindings);

        assert_eq!(facade.read_ticks(ClockId::Boottime).unwrap(), 7);
        assert_eq!(facade.read_ticks(ClockId::CpuCounter).unwrap(), 1);
        assert_eq!(facade.read_ticks(ClockId::CpuCounterSerialized).unwrap(), 2);
        assert_eq!(facade.read_ticks(ClockId::CpuCounterFenced).unwrap(), 3);
    }
}
