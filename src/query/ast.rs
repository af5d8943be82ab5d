//! Selector types for jread queries.

/// An index written in a query: a literal or a `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// Literal 0-based index (`[2`, `{2`)
    At(usize),
    /// Wildcard (`[*`, `{*`), taken from the query parameters
    Param,
}

/// One token of a query, narrowing the current value to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'q> {
    /// Object member by key (`{'name'` or `{"name"`)
    Key(&'q str),
    /// Key of the object member at a position (`{1`, `{*`)
    KeyAt(Index),
    /// Array element at a position (`[1`, `[*`)
    Item(Index),
}

impl Selector<'_> {
    /// True for selectors that apply to objects.
    pub fn wants_object(&self) -> bool {
        matches!(self, Selector::Key(_) | Selector::KeyAt(_))
    }

    /// True when this selector consumes a query parameter.
    pub fn is_wildcard(&self) -> bool {
        matches!(
            self,
            Selector::KeyAt(Index::Param) | Selector::Item(Index::Param)
        )
    }
}
