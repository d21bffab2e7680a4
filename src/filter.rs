pub(crate) mod blur;
pub(crate) mod color;
pub(crate) mod convolve;
pub(crate) mod engine;
pub(crate) mod geometry;
pub(crate) mod local;
