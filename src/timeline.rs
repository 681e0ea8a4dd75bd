use std::collections::BTreeMap;
use std::iter::once;
use std::ops::Bound::{Excluded, Unbounded};

use crate::common::ops::{TimeCoord, UsageValue};
use crate::common::time_point::{Breakpoint, Timestamp, Value};
use crate::{Result, TimelineErr};

///
/// UsageTimeline keeps a right-continuous step function over time.
///
/// The value at `t` is the value of the latest breakpoint `<= t`. The baseline acts as the
/// breakpoint at negative infinity and is never removed. Adjacent breakpoints never carry
/// the same value, so the size follows the number of real level changes rather than the
/// number of updates.
///
/// UsageTimeline is **NOT** concurrent-safe, callers sharing one must lock around every call.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageTimeline<T: TimeCoord = Timestamp, V: UsageValue = Value> {
    baseline: V,
    points: BTreeMap<T, V>,
}

impl<T: TimeCoord, V: UsageValue> UsageTimeline<T, V> {
    pub fn new(baseline: V) -> Self {
        UsageTimeline {
            baseline,
            points: BTreeMap::new(),
        }
    }

    pub fn baseline(&self) -> V {
        self.baseline
    }

    /// Number of stored breakpoints, the baseline included.
    pub fn breakpoint_count(&self) -> usize {
        self.points.len() + 1
    }

    /// Iterate breakpoints in time order, starting with `(NegInf, baseline)`.
    pub fn breakpoints(&self) -> impl Iterator<Item = (Breakpoint<T>, V)> + '_ {
        once((Breakpoint::NegInf, self.baseline))
            .chain(self.points.iter().map(|(t, v)| (Breakpoint::At(*t), *v)))
    }

    /// Value of the step function at `time`.
    pub fn value_at(&self, time: T) -> V {
        self.points
            .range(..=time)
            .next_back()
            .map_or(self.baseline, |(_, v)| *v)
    }

    /// Add `value` to every time in `[start, end)`.
    pub fn add_usage(&mut self, start: T, end: T, value: V) -> Result<()> {
        check_not_negative("start", start)?;
        if end < start {
            return Err(TimelineErr::InvalidArgument(format!(
                "end {:?} is before start {:?}",
                end, start
            )));
        }
        if value == V::default() || start == end {
            return Ok(());
        }

        // `end` keeps the level it had before this update
        let closing = self.value_at(end);
        self.points.entry(end).or_insert(closing);
        let opening = self.level_before(start);
        self.points.entry(start).or_insert(opening);

        for (_, v) in self.points.range_mut(start..end) {
            *v = *v + value;
        }
        trace!("add {:?} on [{:?}, {:?})", value, start, end);

        self.compact(end);
        self.compact(start);
        Ok(())
    }

    /// Subtract `value` from every time at or after `start`.
    pub fn remove_till_end(&mut self, start: T, value: V) -> Result<()> {
        check_not_negative("start", start)?;
        if value == V::default() {
            return Ok(());
        }

        let opening = self.level_before(start);
        self.points.entry(start).or_insert(opening);

        for (_, v) in self.points.range_mut(start..) {
            *v = *v - value;
        }
        trace!("remove {:?} from {:?} on", value, start);

        self.compact(start);
        Ok(())
    }

    ///
    /// Find the earliest `t0 >= after` such that the value stays `<= max_value` on the whole
    /// window `[t0, t0 + duration)`.
    ///
    /// The last stored level holds for all later time, so a window opened on it is complete:
    /// a window still open when the scan runs past the last breakpoint is reported as found.
    /// Returns `None` when the value is above `max_value` from some point on forever.
    pub fn when_not_above(&self, after: T, duration: T, max_value: V) -> Result<Option<T>> {
        check_not_negative("after", after)?;
        if duration <= T::default() {
            return Err(TimelineErr::InvalidArgument(format!(
                "duration must be positive, got {:?}",
                duration
            )));
        }

        let levels = once((after, self.value_at(after))).chain(
            self.points
                .range((Excluded(after), Unbounded))
                .map(|(t, v)| (*t, *v)),
        );

        // start of the candidate window, `start + duration` may not fit in `T`
        let mut window: Option<T> = None;
        for (time, level) in levels {
            if let Some(start) = window {
                if time - start >= duration {
                    return Ok(Some(start));
                }
            }
            if level > max_value {
                window = None;
            } else if window.is_none() {
                window = Some(time);
            }
        }

        Ok(window)
    }

    // Level in effect right before `time`.
    fn level_before(&self, time: T) -> V {
        self.points
            .range(..time)
            .next_back()
            .map_or(self.baseline, |(_, v)| *v)
    }

    // Drop the breakpoint at `time` if it repeats the previous level.
    fn compact(&mut self, time: T) {
        let current = match self.points.get(&time) {
            Some(v) => *v,
            None => return,
        };
        if self.level_before(time) == current {
            self.points.remove(&time);
            debug!("compacted redundant breakpoint at {:?}", time);
        }
    }
}

fn check_not_negative<T: TimeCoord>(name: &str, time: T) -> Result<()> {
    if time < T::default() {
        return Err(TimelineErr::InvalidArgument(format!(
            "{} must not be negative, got {:?}",
            name, time
        )));
    }
    Ok(())
}
