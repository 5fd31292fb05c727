pub(crate) mod compositor;
pub(crate) mod export;
pub(crate) mod frame;
pub(crate) mod paint;
pub(crate) mod style;
pub(crate) mod text;
