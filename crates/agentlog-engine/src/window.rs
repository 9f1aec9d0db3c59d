/// Fixed-capacity ring keeping the most recent N pushed items
///
/// Capacity 0 disables the bound: every item is kept. Storage grows with the
/// pushed items, never ahead of them, so any capacity is accepted.
#[derive(Debug, Clone)]
pub struct EventWindow<T> {
    slots: Vec<T>,
    capacity: usize,
    /// Index of the oldest retained item once the ring has wrapped
    start: usize,
}

impl<T> EventWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            start: 0,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.capacity > 0
    }

    /// `None` when unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.is_bounded().then_some(self.capacity)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add an item, overwriting the oldest one when full
    pub fn push(&mut self, item: T) {
        if !self.is_bounded() || self.slots.len() < self.capacity {
            self.slots.push(item);
            return;
        }
        self.slots[self.start] = item;
        self.start = (self.start + 1) % self.capacity;
    }

    /// Take the retained items oldest to newest, leaving the window empty
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = std::mem::take(&mut self.slots);
        items.rotate_left(self.start);
        self.start = 0;
        items
    }
}
