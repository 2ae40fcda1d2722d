/// Boxed updater carried by [`Update::Updater`].
pub type Updater<T> = Box<dyn FnOnce(&T) -> T + Send>;

/// A write request: either a replacement value or a function of the
/// previous value.
///
/// The two cases are tagged rather than told apart by looking at the
/// argument, so a store whose state is itself a function can be replaced
/// with `Update::Value` without the function ever being called.
///
/// ```
/// use sangtae::{create_store, Update};
///
/// let store = create_store(5);
/// store.apply(Update::updater(|n| n + 1));
/// assert_eq!(*store.get_state(), 6);
///
/// store.apply(Update::Value(1));
/// assert_eq!(*store.get_state(), 1);
/// ```
pub enum Update<T> {
    Value(T),
    Updater(Updater<T>),
}

impl<T> Update<T> {
    pub fn value(value: T) -> Self {
        Update::Value(value)
    }

    pub fn updater<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        Update::Updater(Box::new(f))
    }

    /// Resolve against `prev`.
    pub fn resolve(self, prev: &T) -> T {
        match self {
            Update::Value(value) => value,
            Update::Updater(f) => f(prev),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Value(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Update::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Update::Updater(_) => f.debug_tuple("Updater").finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_valued_state_is_not_invoked() {
        fn double(n: i32) -> i32 {
            n * 2
        }
        fn triple(n: i32) -> i32 {
            n * 3
        }

        let update: Update<fn(i32) -> i32> = Update::Value(triple);
        let next = update.resolve(&(double as fn(i32) -> i32));
        assert_eq!(next(2), 6);
    }

    #[test]
    fn updater_sees_previous() {
        let update = Update::updater(|prev: &String| format!("{prev}!"));
        assert_eq!(update.resolve(&"hi".to_string()), "hi!");
    }
}
