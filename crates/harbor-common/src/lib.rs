pub mod actions;
pub mod errors;
pub mod events;
pub mod id;
pub mod types;
pub mod url;

pub use actions::{Action, EditCommand};
pub use errors::{ConfigError, HarborError, HostError, PlatformError, ProfileError};
pub use events::{Event, EventBus};
pub use id::{new_id, ProfileId};
pub use types::{DialogId, Rect, Size, ViewId, WindowId};

pub type Result<T> = std::result::Result<T, HarborError>;
