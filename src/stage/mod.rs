//! Page composition: section layout, panel transitions, the video wall and the stage that drives
//! them all from one scroll bus and one timer queue.

pub(crate) mod director;
pub(crate) mod layout;
pub(crate) mod marquee;
pub(crate) mod nav;
pub(crate) mod panels;
