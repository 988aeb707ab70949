use crate::error::EncryptionError;

/// Byte layout of an encrypted payload:
/// `[wrapped key][wrapped iv/nonce][tag][ciphertext]`.
///
/// Both wrapped segments are exactly `wrapped_len` bytes (the RSA modulus size); `tag_len`
/// is zero for ciphers without a detached tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeLayout {
  pub wrapped_len: usize,
  pub tag_len: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EnvelopeParts<'a> {
  pub wrapped_key: &'a [u8],
  pub wrapped_iv: &'a [u8],
  pub tag: &'a [u8],
  pub ciphertext: &'a [u8],
}

impl EnvelopeLayout {
  pub fn new(wrapped_len: usize, tag_len: usize) -> Self {
    Self { wrapped_len, tag_len }
  }

  pub fn header_len(&self) -> usize {
    self.wrapped_len * 2 + self.tag_len
  }

  pub fn split<'a>(&self, data: &'a [u8]) -> Result<EnvelopeParts<'a>, EncryptionError> {
    let required = self.header_len();
    if data.len() < required {
      return Err(EncryptionError::Truncated {
        required,
        actual: data.len(),
      });
    }
    let (wrapped_key, rest) = data.split_at(self.wrapped_len);
    let (wrapped_iv, rest) = rest.split_at(self.wrapped_len);
    let (tag, ciphertext) = rest.split_at(self.tag_len);
    Ok(EnvelopeParts {
      wrapped_key,
      wrapped_iv,
      tag,
      ciphertext,
    })
  }

  pub fn assemble(&self, wrapped_key: &[u8], wrapped_iv: &[u8], tag: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    debug_assert_eq!(wrapped_key.len(), self.wrapped_len);
    debug_assert_eq!(wrapped_iv.len(), self.wrapped_len);
    debug_assert_eq!(tag.len(), self.tag_len);
    let mut out = Vec::with_capacity(self.header_len() + ciphertext.len());
    out.extend_from_slice(wrapped_key);
    out.extend_from_slice(wrapped_iv);
    out.extend_from_slice(tag);
    out.extend_from_slice(ciphertext);
    out
  }
}
