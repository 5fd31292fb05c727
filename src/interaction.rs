pub(crate) mod controller;
pub(crate) mod transform;
pub(crate) mod viewport;
