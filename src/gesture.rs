pub(crate) mod controller;
pub(crate) mod pointer;
pub(crate) mod script;
