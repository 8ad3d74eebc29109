use crate::schema::{Result, SchemaError};

/// LIFO of lexer state markers.
#[derive(Debug, Clone, Default)]
pub struct TokenStack<T> {
	items: Vec<T>,
}

impl<T: Copy> TokenStack<T> {
	/// Create an empty stack.
	pub fn new() -> Self {
		Self { items: Vec::new() }
	}

	/// Push a state on top.
	pub fn push(&mut self, state: T) {
		self.items.push(state);
	}

	/// Remove and return the top state.
	pub fn pop(&mut self) -> Result<T> {
		self.items.pop().ok_or(SchemaError::StackUnderflow { op: "pop" })
	}

	/// Return the top state without removing it.
	pub fn top(&self) -> Result<T> {
		self.items.last().copied().ok_or(SchemaError::StackUnderflow { op: "top" })
	}

	/// Replace the top state in place.
	pub fn replace_top(&mut self, state: T) -> Result<()> {
		self.pop()?;
		self.push(state);
		Ok(())
	}

	/// Number of states held.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the stack holds no states.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}
