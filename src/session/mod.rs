pub(crate) mod line_reveal;
