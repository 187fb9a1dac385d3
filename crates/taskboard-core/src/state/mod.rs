//! Observable state
//!
//! [`State`] is a generic listener registry; [`ProjectState`] is the single
//! authoritative holder of the board's projects. Neither is a global: the
//! application constructs one `ProjectState` and passes it by reference to
//! whatever needs to mutate it.

mod project_state;

pub use project_state::ProjectState;

/// Subscriber callback, receives an owned snapshot on every change
pub type Listener<T> = Box<dyn FnMut(Vec<T>)>;

/// Listener registry shared by concrete stores
pub struct State<T> {
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> State<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a subscriber. Subscribers are never de-duplicated or removed.
    pub fn add_listener(&mut self, listener: impl FnMut(Vec<T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered subscribers
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Call every subscriber in registration order, each with its own copy of `items`
    pub(crate) fn notify(&mut self, items: &[T]) {
        for listener in &mut self.listeners {
            listener(items.to_vec());
        }
    }
}

impl<T: Clone> Default for State<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut state: State<u32> = State::new();

        for name in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            state.add_listener(move |_| calls.borrow_mut().push(name));
        }

        state.notify(&[1, 2]);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_each_listener_gets_its_own_copy() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state: State<u32> = State::new();

        {
            let seen = Rc::clone(&seen);
            state.add_listener(move |mut items: Vec<u32>| {
                items.push(99);
                seen.borrow_mut().push(items);
            });
        }
        {
            let seen = Rc::clone(&seen);
            state.add_listener(move |items| seen.borrow_mut().push(items));
        }

        state.notify(&[1]);
        assert_eq!(*seen.borrow(), vec![vec![1, 99], vec![1]]);
    }
}
