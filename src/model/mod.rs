pub(crate) mod clip;
pub(crate) mod composition;
pub(crate) mod keyframe;
pub(crate) mod track;
