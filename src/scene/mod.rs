pub(crate) mod line;
pub(crate) mod manager;
pub(crate) mod projection;
