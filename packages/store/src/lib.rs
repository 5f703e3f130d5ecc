pub mod config;
pub mod error;
pub mod gate;
pub mod media;
pub mod models;
pub mod observer;
pub mod pomodoro;
pub mod repo;
pub mod session;
pub mod view_model;
pub mod workout;

mod memory;
pub use memory::MemoryBackend;

pub use config::TimerConfig;
pub use error::{RemoteError, TaskError};
pub use gate::{AuthGate, GateState, GateTransition};
pub use models::{AuthEvent, NewTask, Session, Task, TaskId, UserId};
pub use observer::{Observers, Subscription};
pub use repo::{Confirmed, TaskChange, TaskRepository, TaskTable};
pub use session::{AuthService, SessionChange, SessionStore};
pub use view_model::{Pending, TaskListViewModel};
