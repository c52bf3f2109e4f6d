//! Channel kinds and the table describing how each one is produced

mod kind;
mod table;

#[cfg(test)]
mod tests;

pub use kind::ChannelKind;
pub use table::{channel_spec, resolve_order, ChannelInputs, ChannelSpec, CHANNEL_TABLE};
