//! Secure byte container with automatic zeroing on drop
//!
//! Key material and decrypted plaintext live in this wrapper so they are
//! zeroed when dropped, never show up in debug output, and (best effort)
//! stay out of swap.

use std::ops::{Deref, DerefMut};
use zeroize::Zeroize;

/// A container for sensitive bytes that zeroes its memory on drop
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SecureBytes(Vec<u8>);

impl SecureBytes {
    /// Take ownership of sensitive bytes. The memory is locked against
    /// swapping where the platform allows it.
    pub fn new(data: Vec<u8>) -> Self {
        let secure = Self(data);
        secure.lock_memory();
        secure
    }

    #[cfg(unix)]
    fn lock_memory(&self) {
        // Best effort: mlock may fail without privileges, which is fine.
        unsafe {
            libc::mlock(self.0.as_ptr() as *const libc::c_void, self.0.len());
        }
    }

    #[cfg(not(unix))]
    fn lock_memory(&self) {}

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for SecureBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SecureBytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

// Never print the contents, even by accident
impl std::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureBytes")
            .field("len", &self.0.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_bytes_deref() {
        let secure = SecureBytes::new(vec![1, 2, 3, 4]);
        assert_eq!(secure.len(), 4);
        assert_eq!(&*secure, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_debug_redacts_contents() {
        let secure = SecureBytes::new(vec![0xDE, 0xAD]);
        let printed = format!("{:?}", secure);
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("0xDE"));
    }
}
