//! Group arithmetic: [`GroupContext`] plus its [`ElementModP`]/[`ElementModQ`] elements.

mod context;
mod element;

pub use context::GroupContext;
pub use element::{ElementModP, ElementModQ};
