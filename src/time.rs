use {
    std::{
        cmp::Ordering,
        fmt::{Debug, Formatter},
        ops::Add,
        time::Duration,
    },
    uapi::c,
};

/// A point on the monotonic clock.
#[derive(Copy, Clone)]
pub struct Time(pub c::timespec);

impl Debug for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Time")
            .field("tv_sec", &self.0.tv_sec)
            .field("tv_nsec", &self.0.tv_nsec)
            .finish()
    }
}

impl Time {
    pub const ZERO: Time = Time(c::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    });

    pub fn now_unchecked() -> Time {
        let mut time = uapi::pod_zeroed();
        let _ = uapi::clock_gettime(c::CLOCK_MONOTONIC, &mut time);
        Self(time)
    }

    pub fn from_nsec(nsec: u64) -> Time {
        Time(c::timespec {
            tv_sec: (nsec / 1_000_000_000) as _,
            tv_nsec: (nsec % 1_000_000_000) as _,
        })
    }

    pub fn from_msec(msec: u64) -> Time {
        Self::from_nsec(msec.saturating_mul(1_000_000))
    }

    pub fn nsec(self) -> u64 {
        self.0.tv_sec as u64 * 1_000_000_000 + self.0.tv_nsec as u64
    }

    pub fn usec(self) -> u64 {
        self.nsec() / 1_000
    }

    pub fn msec(self) -> u64 {
        self.nsec() / 1_000_000
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Self::Output {
        Self::from_nsec(self.nsec().saturating_add(rhs.as_nanos() as u64))
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.0.tv_sec == other.0.tv_sec && self.0.tv_nsec == other.0.tv_nsec
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .tv_sec
            .cmp(&other.0.tv_sec)
            .then_with(|| self.0.tv_nsec.cmp(&other.0.tv_nsec))
    }
}
