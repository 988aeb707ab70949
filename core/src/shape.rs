//! Structural metadata the compatibility verifier inspects.
//!
//! Usually produced by `#[derive(Shape)]`; trait objects and foreign types can implement
//! [`Shape`] by hand.

use std::fmt::{Display, Formatter};

pub use stratum_shape_derive_rs::Shape;

pub trait Shape {
  fn shape() -> TypeShape;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
  Public,
  Restricted,
}

/// Present when the type carries `#[shape(object)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectMarker {
  /// Member names double as keys, so per-member keys are not required.
  pub keys_as_names: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKey {
  Index(u32),
  Name(&'static str),
}

impl Display for MemberKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      MemberKey::Index(index) => write!(f, "{}", index),
      MemberKey::Name(name) => write!(f, "\"{}\"", name),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberShape {
  pub name: &'static str,
  pub key: Option<MemberKey>,
  pub ignored: bool,
}

#[derive(Debug, Clone)]
pub struct UnionCase {
  pub variant: &'static str,
  pub key: Option<u32>,
  pub subtype: Option<fn() -> TypeShape>,
}

#[derive(Debug, Clone)]
pub enum ShapeKind {
  Struct(Vec<MemberShape>),
  Union(Vec<UnionCase>),
  /// No inspectable members, e.g. a primitive.
  Opaque,
}

#[derive(Debug, Clone)]
pub struct TypeShape {
  pub name: &'static str,
  pub visibility: Visibility,
  /// The item this type is declared inside, if any.
  pub enclosing: Option<&'static str>,
  pub object: Option<ObjectMarker>,
  pub kind: ShapeKind,
}

impl TypeShape {
  pub fn opaque(name: &'static str) -> Self {
    Self {
      name,
      visibility: Visibility::Public,
      enclosing: None,
      object: None,
      kind: ShapeKind::Opaque,
    }
  }

  pub fn is_union(&self) -> bool {
    matches!(self.kind, ShapeKind::Union(_))
  }
}
