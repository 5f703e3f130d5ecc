mod sign_in;
pub use sign_in::SignIn;

mod tasks;
pub use tasks::TasksView;

mod pomodoro;
pub use pomodoro::PomodoroView;

mod gym;
pub use gym::GymView;
