pub mod option;
pub mod time_point;

pub mod ops {
    use std::fmt::Debug;
    use std::ops::{Add, Sub};

    /// Time coordinate of a timeline.
    ///
    /// `Default` must yield the origin, times below it are rejected as negative.
    pub trait TimeCoord:
        Ord + Copy + Add<Output = Self> + Sub<Output = Self> + Default + Debug
    {
    }

    impl<T> TimeCoord for T where
        T: Ord + Copy + Add<Output = T> + Sub<Output = T> + Default + Debug
    {
    }

    /// Usage amount accumulated on a timeline. `Default` must yield zero.
    pub trait UsageValue:
        PartialOrd + Copy + Add<Output = Self> + Sub<Output = Self> + Default + Debug
    {
    }

    impl<V> UsageValue for V where
        V: PartialOrd + Copy + Add<Output = V> + Sub<Output = V> + Default + Debug
    {
    }
}

#[cfg(test)]
mod test {
    use crate::common::ops::{TimeCoord, UsageValue};

    fn origin<T: TimeCoord>() -> T {
        T::default()
    }

    fn zero<V: UsageValue>() -> V {
        V::default()
    }

    #[test]
    fn default_is_origin() {
        assert_eq!(origin::<u64>(), 0);
        assert_eq!(origin::<i64>(), 0);
        assert_eq!(zero::<f64>(), 0.0);
        assert_eq!(zero::<i32>(), 0);
    }
}
