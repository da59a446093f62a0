mod filesystem;
mod history;
mod traits;

pub use filesystem::JsonFileStore;
pub use history::{append_uniq, History};
pub use traits::HistoryStore;
