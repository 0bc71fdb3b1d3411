mod error_message;
mod filter_bar;
mod header;
mod loading_spinner;
mod task_card;

pub use error_message::ErrorMessage;
pub use filter_bar::FilterBar;
pub use header::Header;
pub use loading_spinner::LoadingSpinner;
pub use task_card::TaskCard;
