pub(crate) mod logging;
pub(crate) mod session;
pub(crate) mod settings;
