//! Signal - shared observable value
//!
//! `Signal<T>` holds a value behind shared ownership. Clones refer to the same
//! value; every `set()` or `update()` runs the registered subscribers
//! synchronously, in registration order, before returning.
//!
//! ## Example
//!
//! ```
//! use formsmith_pages::reactive::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//! let sink = seen.clone();
//! count.subscribe(move |n| sink.set(*n));
//!
//! count.set(42);
//! assert_eq!(count.get(), 42);
//! assert_eq!(seen.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(seen.get(), 43);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
	value: RefCell<T>,
	subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
	next_id: Cell<u64>,
}

/// Observable value cell
///
/// Single-threaded: a signal is neither `Send` nor `Sync`.
pub struct Signal<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Clone + 'static> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				subscribers: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// A copy of the current value
	pub fn get(&self) -> T {
		self.inner.value.borrow().clone()
	}

	/// Read the current value without cloning it
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	pub fn set(&self, value: T) {
		*self.inner.value.borrow_mut() = value;
		self.notify();
	}

	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.inner.value.borrow_mut());
		self.notify();
	}

	/// Run `f` with the new value after every change
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.inner.next_id.get());
		self.inner.next_id.set(id.0 + 1);
		self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Remove a subscriber; returns whether it was registered
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.inner.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(existing, _)| *existing != id);
		subscribers.len() != before
	}

	fn notify(&self) {
		// Subscribers may read or write this signal, so nothing stays borrowed while they run.
		let snapshot = self.get();
		let subscribers: Vec<Subscriber<T>> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for subscriber in subscribers {
			subscriber(&snapshot);
		}
	}
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &self.get())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}
