pub mod assemble;
pub mod calibrate;
pub mod camera;
pub mod config;
pub mod event;
pub mod face;
pub mod frame;
pub mod logging;
pub mod preview;
pub mod scan;
pub mod scanner;
pub mod solver;

pub use config::Config;
pub use event::{Flow, OperatorEvent};
pub use face::Face;
pub use frame::{Frame, Rect};
