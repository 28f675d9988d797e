//! UI Components
//!
//! Leptos components for the login screen, the board list and the board.

mod board_list;
mod board_view;
mod column_form;
mod delete_confirm_button;
mod drag_ghost;
mod editor_target;
mod kanban_column;
mod login_form;
mod task_card;
mod task_modal;
mod toast_host;

pub use board_list::BoardList;
pub use board_view::BoardView;
pub use column_form::ColumnForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drag_ghost::DragGhost;
pub use editor_target::EditTarget;
pub use kanban_column::KanbanColumn;
pub use login_form::LoginForm;
pub use task_card::TaskCard;
pub use task_modal::TaskModal;
pub use toast_host::ToastHost;
