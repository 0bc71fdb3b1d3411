mod entry;
mod not_found;
mod tasks;

pub use entry::Entry;
pub use not_found::NotFound;
pub use tasks::Tasks;
