pub(crate) mod diagnostic;
pub(crate) mod registry;
pub(crate) mod tokenize;
pub(crate) mod validate;
