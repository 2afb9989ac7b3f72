#[cfg(unix)]
use std::{io, mem};

#[cfg(unix)]
use libc::{clockid_t, timespec};

use crate::pal::Bindings;
#[cfg(unix)]
use crate::units::NANOS_PER_SECOND;
use crate::{ClockId, Error, Result};

/// FFI bindings that target the real operating system and processor that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

impl Bindings for BuildTargetBindings {
    #[cfg(unix)]
    #[expect(
        clippy::cast_sign_loss,
        clippy::arithmetic_side_effects,
        reason = "never going to happen with timestamps within real-universe ranges"
    )]
    fn clock_gettime_nanos(&self, clock: ClockId) -> Result<u64> {
        let id = os_clock_id(clock).ok_or(Error::UnsupportedClock { clock })?;

        // SAFETY: All-zero is a valid initial value for this type.
        let mut ts: timespec = unsafe { mem::zeroed() };

        // SAFETY: We are passing valid arguments, no other safety requirements.
        let result = unsafe { libc::clock_gettime(id, &raw mut ts) };

        if result != 0 {
            return Err(io::Error::last_os_error().into());
        }

        Ok(ts.tv_sec as u64 * NANOS_PER_SECOND + ts.tv_nsec as u64)
    }

    #[cfg(not(unix))]
    fn clock_gettime_nanos(&self, clock: ClockId) -> Result<u64> {
        Err(Error::UnsupportedClock { clock })
    }

    #[cfg_attr(test, mutants::skip)] // Raw hardware read, nothing to observe.
    fn read_counter(&self) -> u64 {
        counter::bare()
    }

    #[cfg_attr(test, mutants::skip)] // Raw hardware read, nothing to observe.
    fn read_counter_serialized(&self) -> u64 {
        counter::serialized()
    }

    #[cfg_attr(test, mutants::skip)] // Raw hardware read, nothing to observe.
    fn read_counter_fenced(&self) -> u64 {
        counter::fenced()
    }
}

#[cfg(target_os = "linux")]
const fn os_clock_id(clock: ClockId) -> Option<clockid_t> {
    match clock {
        ClockId::Realtime => Some(libc::CLOCK_REALTIME),
        ClockId::RealtimeCoarse => Some(libc::CLOCK_REALTIME_COARSE),
        ClockId::Tai => Some(libc::CLOCK_TAI),
        ClockId::Monotonic => Some(libc::CLOCK_MONOTONIC),
        ClockId::Boottime => Some(libc::CLOCK_BOOTTIME),
        ClockId::CpuCounter | ClockId::CpuCounterSerialized | ClockId::CpuCounterFenced => None,
    }
}

#[cfg(all(unix, not(target_os = "linux")))]
const fn os_clock_id(clock: ClockId) -> Option<clockid_t> {
    match clock {
        ClockId::Realtime => Some(libc::CLOCK_REALTIME),
        ClockId::Monotonic => Some(libc::CLOCK_MONOTONIC),
        _ => None,
    }
}

#[cfg(target_arch = "x86_64")]
mod counter {
    use std::arch::x86_64::{__rdtscp, _mm_mfence, _rdtsc};

    #[inline]
    pub(super) fn bare() -> u64 {
        // SAFETY: RDTSC is available on every x86_64 processor and has no preconditions.
        unsafe { _rdtsc() }
    }

    #[inline]
    pub(super) fn serialized() -> u64 {
        // The processor id is written here and discarded.
        let mut aux = 0_u32;

        // SAFETY: RDTSCP only writes to the provided pointer, which is valid for writes.
        unsafe { __rdtscp(&raw mut aux) }
    }

    #[inline]
    pub(super) fn fenced() -> u64 {
        let ticks = serialized();

        // SAFETY: MFENCE is part of SSE2, which every x86_64 processor supports.
        unsafe { _mm_mfence() };

        ticks
    }
}

#[cfg(target_arch = "aarch64")]
mod counter {
    use std::arch::asm;

    #[inline]
    pub(super) fn bare() -> u64 {
        let ticks: u64;

        // SAFETY: CNTVCT_EL0 is readable from user mode on every supported aarch64 OS.
        unsafe {
            asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack, preserves_flags));
        }

        ticks
    }

    #[inline]
    pub(super) fn serialized() -> u64 {
        let ticks: u64;

        // SAFETY: As above; ISB only waits for preceding instructions to complete.
        unsafe {
            asm!("isb", "mrs {}, cntvct_el0", out(reg) ticks, options(nostack, preserves_flags));
        }

        ticks
    }

    #[inline]
    pub(super) fn fenced() -> u64 {
        let ticks: u64;

        // SAFETY: As above; DSB SY is a full system memory barrier with no other effect.
        unsafe {
            asm!(
                "isb",
                "mrs {}, cntvct_el0",
                "dsb sy",
                out(reg) ticks,
                options(nostack, preserves_flags)
            );
        }

        ticks
    }
}

/// Without a user-readable cycle counter we count nanoseconds since first use instead.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod counter {
    use std::sync::LazyLock;
    use std::sync::atomic::{Ordering, fence};
    use std::time::Instant;

    static ORIGIN: LazyLock<Instant> = LazyLock::new(Instant::now);

    pub(super) fn bare() -> u64 {
        u64::try_from(ORIGIN.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    pub(super) fn serialized() -> u64 {
        bare()
    }

    pub(super) fn fenced() -> u64 {
        let ticks = bare();
        fence(Ordering::SeqCst);
        ticks
    }
}

#[cfg(test)]
#[cfg(not(miri))] // Miri cannot talk to the real platform.
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn monotonic_clock_advances() {
        let bindings = BuildTargetBindings;

        let a = bindings.clock_gettime_nanos(ClockId::Monotonic).unwrap();
        let b = bindings.clock_gettime_nanos(ClockId::Monotonic).unwrap();

        assert!(b >= a);
    }

    #[cfg(unix)]
    #[test]
    fn realtime_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        const NANOS_2020: u64 = 1_577_836_800 * NANOS_PER_SECOND;

        let bindings = BuildTargetBindings;

        assert!(bindings.clock_gettime_nanos(ClockId::Realtime).unwrap() > NANOS_2020);
    }

    #[test]
    fn cpu_ids_are_not_os_clocks() {
        let bindings = BuildTargetBindings;

        assert!(matches!(
            bindings.clock_gettime_nanos(ClockId::CpuCounter),
            Err(Error::UnsupportedClock {
                clock: ClockId::CpuCounter
            })
        ));
    }

    #[test]
    fn counter_does_not_go_backwards_on_one_thread() {
        let bindings = BuildTargetBindings;

        let a = bindings.read_counter_fenced();
        let b = bindings.read_counter_fenced();

        assert!(b >= a);
    }
}
