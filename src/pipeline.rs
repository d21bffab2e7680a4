pub(crate) mod operation;
pub(crate) mod sequence;
