pub(crate) mod entry;
pub(crate) mod manager;
mod replay;
