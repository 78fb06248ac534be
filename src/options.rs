//! Per-call configuration of the consume functions.

/// Options passed to every consume call.
///
/// Nothing is global: two parses running side by side may use different options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumeOptions {
    /// Accept input where an expected trailing CRLF is missing.
    pub accept_missing_terminator: bool,
    /// Never allocate while consuming. A step that would need a new node fails
    /// with `ParseError::Capacity` instead.
    pub no_allocation: bool,
    /// Reset nodes to their sentinel state instead of releasing them when a
    /// header list is cleared.
    pub clear_without_release: bool,
}

impl ConsumeOptions {
    /// Strict grammar, dynamic allocation allowed.
    pub const fn new() -> Self {
        Self {
            accept_missing_terminator: false,
            no_allocation: false,
            clear_without_release: false,
        }
    }

    /// Accept a missing final CRLF.
    pub const fn lenient() -> Self {
        Self::new().with_missing_terminator(true)
    }

    /// The mandatory options for pre-sized storage: no allocation, no release.
    pub const fn no_alloc() -> Self {
        Self::new().with_no_allocation(true).with_clear_without_release(true)
    }

    pub const fn with_missing_terminator(mut self, accept: bool) -> Self {
        self.accept_missing_terminator = accept;
        self
    }

    pub const fn with_no_allocation(mut self, no_allocation: bool) -> Self {
        self.no_allocation = no_allocation;
        self
    }

    pub const fn with_clear_without_release(mut self, keep: bool) -> Self {
        self.clear_without_release = keep;
        self
    }

    /// Same options, with the missing terminator tolerance turned off.
    pub(crate) const fn strict_terminator(self) -> Self {
        self.with_missing_terminator(false)
    }
}
