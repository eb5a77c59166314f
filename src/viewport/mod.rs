pub(crate) mod gate;
pub(crate) mod scroll;
pub(crate) mod stepper;
