use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityVerdict {
  pub ok: bool,
  pub reason: String,
}

impl CompatibilityVerdict {
  pub fn compatible(type_name: &str) -> Self {
    Self {
      ok: true,
      reason: format!("type {} is compatible", type_name),
    }
  }

  pub fn incompatible(reason: impl Into<String>) -> Self {
    Self {
      ok: false,
      reason: reason.into(),
    }
  }

  pub fn is_ok(&self) -> bool {
    self.ok
  }
}

impl Display for CompatibilityVerdict {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.reason)
  }
}
