pub(crate) mod clipboard;
pub(crate) mod clips;
pub(crate) mod compositions;
pub(crate) mod nesting;
pub(crate) mod tracks;
