//! The host type universe consulted by the scanner.
//!
//! The universe is a read-only snapshot: the scanner only ever enumerates
//! types, walks their methods and resolves generic arguments, so every
//! operation beyond [`TypeUniverse::types`] and [`TypeUniverse::type_info`]
//! is provided on top of those two.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{MethodInfo, OBJECT, TypeInfo, TypeRef, jdk};

/// A method reachable from a type, together with where it was declared.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredMethod<'a> {
    /// Distance from the queried type (0 = declared on the type itself).
    pub depth: usize,
    pub declaring: &'a TypeInfo,
    pub method: &'a MethodInfo,
}

/// Read-only access to the types of the host library.
pub trait TypeUniverse {
    /// Every type in the universe, in no particular order.
    fn types(&self) -> Box<dyn Iterator<Item = &TypeInfo> + '_>;

    /// Look up a type by binary name.
    fn type_info(&self, name: &str) -> Option<&TypeInfo>;

    /// Types whose package is `namespace` or nested below it, sorted by name.
    fn types_under(&self, namespace: &str) -> Vec<&TypeInfo> {
        let mut found: Vec<&TypeInfo> = self
            .types()
            .filter(|ty| in_namespace(ty.package(), namespace))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Methods declared on the type and on all of its supertypes.
    ///
    /// Supertypes are visited breadth-first, each at most once; types not
    /// present in the universe contribute no methods.
    fn methods_of(&self, name: &str) -> Vec<DeclaredMethod<'_>> {
        let mut methods = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([(name.to_string(), 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(info) = self.type_info(&current) else {
                continue;
            };
            methods.extend(info.methods.iter().map(|method| DeclaredMethod {
                depth,
                declaring: info,
                method,
            }));
            for supertype in &info.supertypes {
                queue.push_back((supertype.raw_class(), depth + 1));
            }
        }

        methods
    }

    /// Direct supertype names, from the universe or the built-in platform table.
    fn supertype_names(&self, name: &str) -> Vec<String> {
        match self.type_info(name) {
            Some(info) => info.supertypes.iter().map(TypeRef::raw_class).collect(),
            None => jdk::supertypes(name).iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns true if a value of type `from` can be assigned to `to`.
    fn is_assignable(&self, to: &str, from: &str) -> bool {
        if to == from || to == OBJECT {
            return true;
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([from.to_string()]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            if seen.insert(current.clone()) {
                queue.extend(self.supertype_names(&current));
            }
        }
        false
    }

    /// Type arguments of `declaring` as instantiated by `concrete`.
    ///
    /// Returns `None` if `concrete` does not extend `declaring`. Arguments
    /// the hierarchy leaves open remain [`TypeRef::Variable`]s.
    fn resolve_generic(&self, concrete: &str, declaring: &str) -> Option<Vec<TypeRef>> {
        let info = self.type_info(concrete)?;
        if concrete == declaring {
            return Some(
                info.type_params
                    .iter()
                    .map(|param| TypeRef::variable(param, concrete))
                    .collect(),
            );
        }
        resolve_through(self, info, declaring, &mut HashSet::new())
    }
}

fn resolve_through<U: TypeUniverse + ?Sized>(
    universe: &U,
    info: &TypeInfo,
    declaring: &str,
    visiting: &mut HashSet<String>,
) -> Option<Vec<TypeRef>> {
    if !visiting.insert(info.name.clone()) {
        return None;
    }
    for supertype in &info.supertypes {
        let raw = supertype.raw_class();
        if raw == declaring {
            return Some(supertype.args().to_vec());
        }
        let Some(super_info) = universe.type_info(&raw) else {
            continue;
        };
        let Some(args) = resolve_through(universe, super_info, declaring, visiting) else {
            continue;
        };
        // Arguments come back in terms of the supertype's own parameters.
        let bindings: HashMap<String, TypeRef> = super_info
            .type_params
            .iter()
            .cloned()
            .zip(supertype.args().iter().cloned())
            .collect();
        return Some(args.iter().map(|arg| arg.substitute(&bindings)).collect());
    }
    None
}

fn in_namespace(package: &str, namespace: &str) -> bool {
    package == namespace
        || (package.starts_with(namespace) && package[namespace.len()..].starts_with('.'))
}

/// In-memory type universe backed by a name index.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    types: HashMap<String, TypeInfo>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type, replacing any previous type with the same name.
    pub fn insert(&mut self, info: TypeInfo) {
        self.types.insert(info.name.clone(), info);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeInfo> for Universe {
    fn from_iter<I: IntoIterator<Item = TypeInfo>>(iter: I) -> Self {
        let mut universe = Universe::new();
        for info in iter {
            universe.insert(info);
        }
        universe
    }
}

impl TypeUniverse for Universe {
    fn types(&self) -> Box<dyn Iterator<Item = &TypeInfo> + '_> {
        Box::new(self.types.values())
    }

    fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }
}
