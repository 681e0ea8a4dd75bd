use serde::Serialize;

pub type Timestamp = u64;
pub type Value = f64;

/// Key of a stored level change.
///
/// `NegInf` is the sentinel carrying the baseline, it orders before every real time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint<T> {
    NegInf,
    At(T),
}

impl<T: Copy> Breakpoint<T> {
    pub fn time(&self) -> Option<T> {
        match self {
            Breakpoint::NegInf => None,
            Breakpoint::At(t) => Some(*t),
        }
    }
}

/// A level change at a real time, as reported by the replay tool.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimePoint {
    pub timestamp: Timestamp,
    pub value: Value,
}

impl TimePoint {
    pub fn new(timestamp: Timestamp, value: Value) -> TimePoint {
        TimePoint { timestamp, value }
    }
}
