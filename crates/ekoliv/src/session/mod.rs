//! Persisted identity flags and the shell that decides which screen is shown.

mod shell;
pub mod storage;

pub use shell::{
    AppShell, BufferedAnswers, SessionContext, ShellError, Surface, SIGN_IN_FALLBACK_MESSAGE,
    SIGN_UP_FALLBACK_MESSAGE,
};
pub use storage::{FileStore, LocalStore, MemoryStore, SessionStore, StorageError, UserData};
