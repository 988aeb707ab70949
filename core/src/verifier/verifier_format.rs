use crate::codec::CodecId;
use std::fmt::{Display, Formatter};

/// The binary format a type is checked against. Each format has its own rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerifierFormat {
  /// Key-driven object contract: markers, member keys and union keys.
  #[default]
  MessagePack,
  /// Positional compact contract: only placement and the object marker matter.
  Bincode,
}

impl VerifierFormat {
  /// The rule set for a base codec. JSON carries field names and needs no checking.
  pub fn for_codec(codec: CodecId) -> Option<VerifierFormat> {
    match codec {
      CodecId::MessagePack => Some(VerifierFormat::MessagePack),
      CodecId::Bincode => Some(VerifierFormat::Bincode),
      CodecId::Json | CodecId::Custom(_) => None,
    }
  }
}

impl Display for VerifierFormat {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      VerifierFormat::MessagePack => write!(f, "MessagePack"),
      VerifierFormat::Bincode => write!(f, "Bincode"),
    }
  }
}
