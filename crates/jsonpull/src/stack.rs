//! Nesting contexts for open, unclosed `[` / `{` scopes.

/// The grammar role of the innermost currently-open bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Inside `[` … `]`: elements separated by commas.
    Array,
    /// Inside `{` … `}`, a key (or the closing brace) is expected next.
    ObjectKey,
    /// Inside `{` … `}`, between a key and its value: a colon and then the
    /// value are expected.
    ObjectValue,
}

/// Ordered sequence of open container contexts.
///
/// Grows on `[`/`{`, shrinks on the matching closer. The object key/value
/// alternation rewrites the top entry in place rather than pushing.
#[derive(Debug)]
pub(crate) struct ContextStack {
    items: Vec<Context>,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, ctx: Context) {
        self.items.push(ctx);
    }

    /// Pops the top context if it matches `want`. Mismatched or missing
    /// closers are the caller's grammar error.
    pub(crate) fn pop_expect(&mut self, want: Context) -> bool {
        match self.items.last() {
            Some(&top) if top == want => {
                self.items.pop();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn top(&self) -> Option<Context> {
        self.items.last().copied()
    }

    /// Rewrites the top context; a no-op on an empty stack.
    pub(crate) fn replace_top(&mut self, ctx: Context) {
        if let Some(top) = self.items.last_mut() {
            *top = ctx;
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
