//! UI Components
//!
//! Leptos components for the auth screens and the task page.

mod app_header;
mod delete_confirm_dialog;
mod filter_bar;
mod log_panel;
mod login_page;
mod new_task_form;
mod signup_page;
mod task_list;
mod task_row;

pub use app_header::AppHeader;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use filter_bar::FilterBar;
pub use log_panel::LogPanel;
pub use login_page::LoginPage;
pub use new_task_form::NewTaskForm;
pub use signup_page::SignupPage;
pub use task_list::TaskList;
pub use task_row::TaskRow;
