//! Document identity and password protection.

use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use sha2::{Digest, Sha256};

use crate::error::MergeError;
use crate::source::Source;

/// RC4 key length used for protected output.
pub const KEY_LENGTH_BITS: usize = 128;

/// Derive a 16-byte document identifier from the ordered inputs.
///
/// Identical inputs in identical order always give the same identifier.
pub fn document_id<'a, I>(sources: I) -> [u8; 16]
where
    I: IntoIterator<Item = &'a Source>,
{
    let mut hasher = Sha256::new();
    for source in sources {
        hasher.update(source.name().as_bytes());
        hasher.update([0u8]);
        hasher.update(source.size().to_le_bytes());
        hasher.update(source.content());
    }
    let digest = hasher.finalize();

    let mut id = [0u8; 16];
    id.copy_from_slice(&digest[..16]);
    id
}

/// Set the trailer `/ID` pair.
///
/// The standard security handler mixes the first element into the key, so
/// this runs before [`protect`].
pub fn stamp_id(doc: &mut Document, id: [u8; 16]) {
    let id = Object::String(id.to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("ID", vec![id.clone(), id]);
}

/// Encrypt `doc` so it only opens with `password`.
///
/// The password is used as both user and owner password. All permissions
/// are granted to whoever can open the file.
///
/// # Errors
///
/// Returns [`MergeError::UnexpectedMergeFailure`] if the encryption state
/// cannot be derived or applied.
pub fn protect(doc: &mut Document, password: &str) -> Result<(), MergeError> {
    let version = EncryptionVersion::V2 {
        document: &*doc,
        owner_password: password,
        user_password: password,
        key_length: KEY_LENGTH_BITS,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version)
        .map_err(|e| MergeError::unexpected(format!("Failed to derive encryption key: {e}")))?;

    doc.encrypt(&state)
        .map_err(|e| MergeError::unexpected(format!("Failed to encrypt document: {e}")))?;

    tracing::debug!(key_length = KEY_LENGTH_BITS, "encrypted output");
    Ok(())
}
