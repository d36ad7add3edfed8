use std::path::PathBuf;

use fitscube_core::config::ViewerConfig;

/// Results of file dialogs, which run on their own threads.
pub enum UiMessage {
    DirectoryPicked { path: PathBuf },
    ConfigImported { path: PathBuf, config: ViewerConfig },
    ConfigExported { path: PathBuf },
    Error { message: String },
}
