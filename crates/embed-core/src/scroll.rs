//! # Scroll Lock
//!
//! Reference count behind the `polar-no-scroll` body class. The class is
//! applied while at least one session holds the lock.

/// Class toggled on `<body>` while any embed is open
pub const NO_SCROLL_CLASS: &str = "polar-no-scroll";

/// Transition the caller has to apply to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockChange {
    /// First holder: add the class
    Engage,
    /// Last holder gone: remove the class
    Disengage,
    /// Count changed, class stays as is
    Unchanged,
}

#[derive(Debug, Default)]
pub struct ScrollLock {
    holders: usize,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self) -> LockChange {
        self.holders += 1;
        if self.holders == 1 {
            LockChange::Engage
        } else {
            LockChange::Unchanged
        }
    }

    /// Releasing an unheld lock is a no-op.
    pub fn release(&mut self) -> LockChange {
        match self.holders {
            0 => LockChange::Unchanged,
            1 => {
                self.holders = 0;
                LockChange::Disengage
            }
            _ => {
                self.holders -= 1;
                LockChange::Unchanged
            }
        }
    }

    pub fn holders(&self) -> usize {
        self.holders
    }

    pub fn is_engaged(&self) -> bool {
        self.holders > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_holder() {
        let mut lock = ScrollLock::new();
        assert_eq!(lock.acquire(), LockChange::Engage);
        assert!(lock.is_engaged());
        assert_eq!(lock.release(), LockChange::Disengage);
        assert!(!lock.is_engaged());
    }

    #[test]
    fn test_overlapping_holders() {
        let mut lock = ScrollLock::new();
        assert_eq!(lock.acquire(), LockChange::Engage);
        assert_eq!(lock.acquire(), LockChange::Unchanged);
        assert_eq!(lock.holders(), 2);

        assert_eq!(lock.release(), LockChange::Unchanged);
        assert!(lock.is_engaged());
        assert_eq!(lock.release(), LockChange::Disengage);
    }

    #[test]
    fn test_release_without_holder() {
        let mut lock = ScrollLock::new();
        assert_eq!(lock.release(), LockChange::Unchanged);
        assert_eq!(lock.holders(), 0);
    }
}
