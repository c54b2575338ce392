//! Explicit process-wide installation of the base book.

use std::sync::OnceLock;

use mdisp_types::HierarchyError;

use crate::BaseBook;

static INSTALLED: OnceLock<BaseBook> = OnceLock::new();

/// Error returned when installing the process-wide base book.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstallError {
    #[error("a base book is already installed")]
    AlreadyInstalled,

    #[error("cannot build base book: {0}")]
    Build(#[from] HierarchyError),
}

/// Make `book` the process-wide base book.
///
/// Succeeds once per process. Later calls fail and drop their book; the
/// first installation stays in place.
pub fn install(book: BaseBook) -> Result<&'static BaseBook, InstallError> {
    let mut fresh = false;
    let installed = INSTALLED.get_or_init(|| {
        fresh = true;
        book
    });

    if fresh {
        tracing::debug!("installed process-wide base book");
        Ok(installed)
    } else {
        Err(InstallError::AlreadyInstalled)
    }
}

/// Build the standard base book and install it.
pub fn install_default() -> Result<&'static BaseBook, InstallError> {
    install(BaseBook::new()?)
}

/// The process-wide base book, if the host installed one.
pub fn installed() -> Option<&'static BaseBook> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use crate::Value;

    // The only test in this binary that touches the process-wide slot.
    #[test]
    fn test_install_once() {
        let book = install_default().unwrap();
        assert!(std::ptr::eq(book, installed().unwrap()));
        assert_eq!(book.add(Value::Int(1), Value::Int(2)).unwrap(), Value::Int(3));

        let again = install(BaseBook::new().unwrap());
        assert_eq!(again.unwrap_err(), InstallError::AlreadyInstalled);
        assert!(std::ptr::eq(book, installed().unwrap()));
    }
}
