pub mod entities;
pub mod messages;
pub mod messaging;
pub mod repositories;

pub use entities::*;
pub use messages::*;
pub use messaging::*;
pub use pingmesh_errors::{SchedulerError, SchedulerResult};
pub use repositories::*;
