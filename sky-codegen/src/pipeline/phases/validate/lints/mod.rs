//! Built-in lints.

mod empty_sequence;
mod fetch_binding;
mod unused_binding;

pub use empty_sequence::EmptySequenceLint;
pub use fetch_binding::FetchBindingLint;
pub use unused_binding::UnusedBindingLint;
