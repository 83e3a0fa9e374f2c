//! Testing utilities and harness for Drawerpose

pub mod element_tree;
pub mod host;
pub mod robot;
pub mod robot_assertions;

pub use element_tree::FakeElementTree;
pub use host::{HostCall, RecordingDialogHost};
pub use robot::DrawerRobot;

pub mod prelude {
    pub use crate::robot_assertions;
    pub use crate::{DrawerRobot, FakeElementTree, HostCall, RecordingDialogHost};
}
