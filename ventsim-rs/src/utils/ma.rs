use getset::CopyGetters;
use std::collections::VecDeque;
use std::ops::{Add, Sub};

/// A trailing window that keeps the running sum of its last `window`
/// observations.
#[derive(Clone, Debug, Default, PartialEq, CopyGetters)]
pub struct Window<T> {
    #[getset(get_copy = "pub")]
    window: usize,
    buffer: VecDeque<T>,
    total: T,
}

impl<T> Window<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T>,
{
    pub fn new(n: usize) -> Window<T> {
        if n == 0 {
            panic!("Cannot create empty moving window");
        }
        Window {
            window: n,
            buffer: VecDeque::with_capacity(n),
            total: T::default(),
        }
    }

    /// Add single observation, evicting the oldest one if the window is full.
    pub fn add(&mut self, x: T) {
        if self.buffer.len() == self.window {
            if let Some(old) = self.buffer.pop_front() {
                self.total = self.total - old;
            }
        }
        self.buffer.push_back(x);
        self.total = self.total + x;
    }

    /// True once `window` observations have been seen.
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.window
    }

    /// Sum of the observations currently in the window.
    pub fn sum(&self) -> T {
        self.total
    }

    /// Sum of the window, only once it is full.
    pub fn full_sum(&self) -> Option<T> {
        if self.is_full() {
            Some(self.total)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_simple() {
        let mut w = Window::new(3);
        w.add(10_u64);
        assert_eq!(w.sum(), 10);
        assert_eq!(w.full_sum(), None);
        w.add(5);
        assert_eq!(w.sum(), 15);
        w.add(3);
        assert_eq!(w.full_sum(), Some(18));
        w.add(1);
        assert_eq!(w.full_sum(), Some(9));
        w.add(2);
        assert_eq!(w.sum(), 6);
        w.add(3);
        assert_eq!(w.sum(), 6);
        w.add(4);
        assert_eq!(w.sum(), 9);
    }

    #[test]
    fn window_of_one_is_identity() {
        let mut w = Window::new(1);
        for x in [4_u64, 0, 7].iter() {
            w.add(*x);
            assert_eq!(w.full_sum(), Some(*x));
        }
    }

    #[test]
    #[should_panic]
    fn empty_window_panics() {
        let _ = Window::<u64>::new(0);
    }
}
