use crate::error::{Error, Result};

/// Whether the process runs with an effective uid of 0.
#[cfg(unix)]
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// Fail with [`Error::NotRoot`] unless running as root. Installing into
/// `/usr/local` and running the package manager both need it.
pub fn require_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(Error::NotRoot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_root_agrees_with_is_root() {
        assert_eq!(require_root().is_ok(), is_root());
    }

    #[test]
    fn not_root_message() {
        assert_eq!(
            Error::NotRoot.to_string(),
            "This program must be run as root (sudo)."
        );
    }
}
