pub(crate) mod disposal;
pub(crate) mod resize;
pub(crate) mod visibility;
