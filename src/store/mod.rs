pub(crate) mod integrity;
pub(crate) mod registry;
