use crate::shape::{MemberShape, ShapeKind, TypeShape, UnionCase, Visibility};
use crate::verifier::{CompatibilityVerdict, VerifierFormat};

pub(crate) fn evaluate(shape: &TypeShape, format: VerifierFormat) -> CompatibilityVerdict {
  let violations = match format {
    VerifierFormat::MessagePack => keyed_violations(shape),
    VerifierFormat::Bincode => marked_violations(shape),
  };
  if violations.is_empty() {
    CompatibilityVerdict::compatible(shape.name)
  } else {
    CompatibilityVerdict::incompatible(violations.join("; "))
  }
}

fn check_placement(shape: &TypeShape, violations: &mut Vec<String>) {
  if shape.visibility != Visibility::Public || shape.enclosing.is_some() {
    violations.push(format!("type {} must be public and not nested", shape.name));
  }
}

fn marked_violations(shape: &TypeShape) -> Vec<String> {
  let mut violations = Vec::new();
  check_placement(shape, &mut violations);
  match &shape.kind {
    ShapeKind::Union(cases) => check_subtypes(shape.name, cases, &mut violations),
    _ if shape.object.is_none() => violations.push(format!("type {} lacks the object marker", shape.name)),
    _ => {}
  }
  violations
}

fn keyed_violations(shape: &TypeShape) -> Vec<String> {
  let mut violations = Vec::new();
  check_placement(shape, &mut violations);

  match &shape.kind {
    ShapeKind::Union(cases) => check_union(shape.name, cases, &mut violations),
    kind => match shape.object {
      None => violations.push(format!("type {} lacks the object marker", shape.name)),
      Some(marker) => {
        if let ShapeKind::Struct(members) = kind {
          check_members(shape.name, members, marker.keys_as_names, &mut violations);
        }
      }
    },
  }
  violations
}

fn check_members(type_name: &str, members: &[MemberShape], keys_as_names: bool, violations: &mut Vec<String>) {
  let live = members.iter().filter(|member| !member.ignored);

  if !keys_as_names {
    let missing = live.clone().filter(|member| member.key.is_none()).map(|member| member.name).collect::<Vec<_>>();
    if !missing.is_empty() {
      violations.push(format!(
        "type {} has members without a key: {}",
        type_name,
        missing.join(", ")
      ));
    }
  }

  let keyed = live.filter_map(|member| member.key.map(|key| (key, member.name)));
  for (key, names) in duplicates(keyed) {
    violations.push(format!(
      "type {} reuses key {} on members {}",
      type_name,
      key,
      names.join(", ")
    ));
  }
}

fn check_union(type_name: &str, cases: &[UnionCase], violations: &mut Vec<String>) {
  if cases.is_empty() {
    violations.push(format!("union {} declares no cases", type_name));
    return;
  }

  let unkeyed = cases.iter().filter(|case| case.key.is_none()).map(|case| case.variant).collect::<Vec<_>>();
  if !unkeyed.is_empty() {
    violations.push(format!(
      "union {} has cases without a union key: {}",
      type_name,
      unkeyed.join(", ")
    ));
  }

  let keyed = cases.iter().filter_map(|case| case.key.map(|key| (key, case.variant)));
  for (key, variants) in duplicates(keyed) {
    violations.push(format!(
      "union {} reuses union key {} on cases {}",
      type_name,
      key,
      variants.join(", ")
    ));
  }

  check_subtypes(type_name, cases, violations);
}

fn check_subtypes(type_name: &str, cases: &[UnionCase], violations: &mut Vec<String>) {
  for case in cases {
    match case.subtype {
      None => violations.push(format!(
        "union {} case {} does not map to a subtype",
        type_name, case.variant
      )),
      Some(subtype) => {
        let subtype = subtype();
        if !subtype.is_union() && subtype.object.is_none() {
          violations.push(format!(
            "union {} case {} maps to {} which lacks the object marker",
            type_name, case.variant, subtype.name
          ));
        }
      }
    }
  }
}

/// Groups names by key, in first-seen order, keeping only keys claimed more than once.
fn duplicates<K>(entries: impl Iterator<Item = (K, &'static str)>) -> Vec<(K, Vec<&'static str>)>
where
  K: PartialEq, {
  let mut groups: Vec<(K, Vec<&'static str>)> = Vec::new();
  for (key, name) in entries {
    match groups.iter_mut().find(|(existing, _)| *existing == key) {
      Some((_, names)) => names.push(name),
      None => groups.push((key, vec![name])),
    }
  }
  groups.retain(|(_, names)| names.len() > 1);
  groups
}
