pub(crate) mod catalog;
pub(crate) mod geometry;
pub(crate) mod model;
