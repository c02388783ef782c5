pub(crate) mod dialog;
pub(crate) mod tree;
pub(crate) mod ui;
