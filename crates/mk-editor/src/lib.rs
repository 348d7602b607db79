pub mod gesture;
pub mod input;
pub mod loader;
pub mod overlay;
pub mod session;

pub use gesture::GestureTracker;
pub use input::{Cursor, InputEvent, InputResponse, PointerId};
pub use loader::{BackgroundSlot, RequestToken};
pub use overlay::OverlayController;
pub use session::MemeSession;
