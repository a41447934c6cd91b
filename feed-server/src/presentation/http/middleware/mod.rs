pub(crate) mod cors;
pub(crate) mod session;
pub(crate) mod trace;
