mod controls;
pub(crate) mod selection;
pub(crate) mod state;
