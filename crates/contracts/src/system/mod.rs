pub mod auth;
pub mod sys_scheduled_task;
pub mod tasks;
pub mod users;
