//! Builder discovery and method scanning.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    rc::Rc,
};

use indexmap::IndexMap;
use kdsl_ir::{DeclaredMethod, MethodInfo, OBJECT, TypeInfo, TypeKind, TypeRef, TypeUniverse};
use kdsl_manifest::DocIndex;

use super::{BuilderModel, Declarations, MethodGroupModel, MethodModel, SourceModel};
use crate::{Settings, pipeline::Diagnostic};

const PHASE: &str = "scan";

/// Returns true for types the scanner looks at.
///
/// Non-public, synthetic and internal-annotated types are skipped, as are
/// `Default*` and `*Impl` implementation classes. Abstract classes are
/// scanned for their methods but never become builders.
pub fn is_scannable(ty: &TypeInfo) -> bool {
    let simple = ty.simple_name();
    ty.is_public
        && !ty.is_synthetic
        && !ty
            .annotations
            .iter()
            .any(|a| a.to_lowercase().contains("internal"))
        && !simple.starts_with("Default")
        && !simple.ends_with("Impl")
}

/// Walks the type universe below the source namespace and builds a [`SourceModel`].
pub struct Scanner<'a> {
    universe: &'a dyn TypeUniverse,
    settings: &'a Settings,
    declarations: Declarations<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(universe: &'a dyn TypeUniverse, settings: &'a Settings, docs: &'a DocIndex) -> Self {
        Self {
            universe,
            settings,
            declarations: Declarations::new(docs),
        }
    }

    /// Scan the namespace. Skipped types are reported as info diagnostics.
    pub fn scan(mut self, diagnostics: &mut Vec<Diagnostic>) -> SourceModel {
        let universe = self.universe;
        let supertype = self.settings.supertype.clone();
        let candidates: Vec<&TypeInfo> = universe
            .types_under(&self.settings.source_namespace)
            .into_iter()
            .filter(|ty| is_scannable(ty))
            .collect();

        let mut model = SourceModel {
            supertype: supertype.clone(),
            ..SourceModel::default()
        };
        let mut owned: HashMap<&str, Vec<Rc<MethodModel>>> = HashMap::new();
        for ty in &candidates {
            let methods = self.scan_methods(&ty.name);
            for method in &methods {
                model.methods.insert(method.key.clone(), Rc::clone(method));
            }
            owned.insert(ty.name.as_str(), methods);
        }

        for ty in &candidates {
            if ty.name == supertype
                || is_abstract_class(ty)
                || !universe.is_assignable(&supertype, &ty.name)
            {
                continue;
            }
            let Some((builder, target)) = self.builder_pair(&ty.name, diagnostics) else {
                continue;
            };
            if let Some(existing) = model.builders.get(&target) {
                if existing.builder.qualified_name != builder {
                    diagnostics.push(
                        Diagnostic::info(
                            PHASE,
                            format!(
                                "ignoring builder '{}' for '{}', already built by '{}'",
                                builder, target, existing.builder.qualified_name
                            ),
                        )
                        .at(&ty.name),
                    );
                }
                continue;
            }
            if !self.is_concrete(&target) {
                diagnostics.push(
                    Diagnostic::info(
                        PHASE,
                        format!("excluding '{}': not a concrete class", target),
                    )
                    .at(&target),
                );
                continue;
            }
            let Some(factory) = self.factory(&target, &builder) else {
                diagnostics.push(
                    Diagnostic::info(
                        PHASE,
                        format!(
                            "excluding '{}': no static factory returning '{}'",
                            target, builder
                        ),
                    )
                    .at(&target),
                );
                continue;
            };
            let methods = match owned.get(builder.as_str()) {
                Some(methods) => methods.clone(),
                None => self.scan_methods(&builder),
            };
            let Some(groups) = self.builder_groups(&builder, methods, diagnostics) else {
                continue;
            };

            model.builders.insert(
                target.clone(),
                BuilderModel {
                    builder: self.declarations.get(&builder),
                    target: self.declarations.get(&target),
                    factory,
                    groups,
                },
            );
        }

        model
    }

    /// Resolve (builder, target) from the supertype's arguments.
    fn builder_pair(
        &self,
        name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<(String, String)> {
        let args = self
            .universe
            .resolve_generic(name, &self.settings.supertype)
            .unwrap_or_default();
        let pair = match args.as_slice() {
            [builder, target, ..] => concrete_class(builder).zip(concrete_class(target)),
            _ => None,
        };
        let Some((builder, target)) = pair else {
            diagnostics.push(
                Diagnostic::info(
                    PHASE,
                    format!(
                        "skipping '{}': builder and target arguments of '{}' are not concrete",
                        name, self.settings.supertype
                    ),
                )
                .at(name),
            );
            return None;
        };
        if self.universe.type_info(&builder).is_none() {
            diagnostics.push(
                Diagnostic::info(
                    PHASE,
                    format!("skipping '{}': builder '{}' is not in the universe", name, builder),
                )
                .at(name),
            );
            return None;
        }
        Some((builder, target))
    }

    /// Unknown targets pass; they fail the factory lookup instead.
    fn is_concrete(&self, target: &str) -> bool {
        self.universe
            .type_info(target)
            .is_none_or(|ty| ty.kind == TypeKind::Class && !ty.is_abstract)
    }

    fn factory(&self, target: &str, builder: &str) -> Option<String> {
        self.universe
            .type_info(target)?
            .static_factories()
            .filter(|m| m.returns.raw_class() == builder)
            .map(|m| m.name.clone())
            .min()
    }

    /// Group builder methods by name and keep the qualifying groups.
    ///
    /// Returns `None` when the builder only had excluded groups.
    fn builder_groups(
        &self,
        builder: &str,
        methods: Vec<Rc<MethodModel>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<BTreeMap<String, MethodGroupModel>> {
        let mut groups: BTreeMap<String, MethodGroupModel> = BTreeMap::new();
        for method in methods {
            groups
                .entry(method.name.clone())
                .or_insert_with(|| MethodGroupModel {
                    name: method.name.clone(),
                    qualified_name: method.qualified_name.clone(),
                    methods: Vec::new(),
                })
                .methods
                .push(method);
        }

        let before = groups.len();
        groups.retain(|name, _| !self.settings.is_excluded_method(name));
        let had_excluded = groups.len() < before;
        groups.retain(|_, group| {
            group
                .methods
                .iter()
                .any(|method| self.is_builder_shaped(&method.returns))
        });

        if groups.is_empty() && had_excluded {
            diagnostics.push(
                Diagnostic::info(
                    PHASE,
                    format!("excluding '{}': only excluded methods return the builder", builder),
                )
                .at(builder),
            );
            return None;
        }
        Some(groups)
    }

    fn is_builder_shaped(&self, returns: &TypeRef) -> bool {
        let raw = returns.raw_class();
        raw != OBJECT
            && (self.universe.is_assignable(&self.settings.supertype, &raw)
                || self.settings.has_builder_suffix(&raw))
    }

    /// Scan the methods of one type, collapsing overloads per call signature.
    fn scan_methods(&mut self, owner: &str) -> Vec<Rc<MethodModel>> {
        let universe = self.universe;
        let declaration = self.declarations.get(owner);

        let mut reachable: Vec<DeclaredMethod<'_>> = universe
            .methods_of(owner)
            .into_iter()
            .filter(|d| is_instance_api(d.method))
            .collect();
        reachable.sort_by_cached_key(|d| (d.depth, d.method.name.clone(), d.method.call_signature()));

        let mut by_signature: IndexMap<String, Vec<DeclaredMethod<'_>>> = IndexMap::new();
        for declared in reachable {
            by_signature
                .entry(declared.method.call_signature())
                .or_default()
                .push(declared);
        }

        let docs = self.declarations.docs();
        by_signature
            .into_iter()
            .filter_map(|(signature, candidates)| {
                let (best, returns) = self.most_specific(owner, &candidates)?;
                let method = best.method;
                let key = format!("{}.{}", owner, signature);
                let doc = method_doc(docs, owner, method, &candidates);
                let mut dependencies = BTreeSet::new();
                for param in &method.params {
                    param.collect_classes(&mut dependencies);
                }
                Some(Rc::new(MethodModel {
                    name: method.name.clone(),
                    qualified_name: format!("{}.{}", owner, method.name),
                    key,
                    owner: Rc::clone(&declaration),
                    declaring: best.declaring.name.clone(),
                    params: method.params.clone(),
                    returns,
                    doc,
                    dependencies,
                }))
            })
            .collect()
    }

    /// Pick the candidate with the most concrete resolved return type.
    ///
    /// A candidate replaces the current best only when its erased return is
    /// a strict subtype of the best's; ties keep encounter order.
    fn most_specific<'m>(
        &self,
        owner: &str,
        candidates: &[DeclaredMethod<'m>],
    ) -> Option<(DeclaredMethod<'m>, TypeRef)> {
        let mut best: Option<(DeclaredMethod<'m>, TypeRef)> = None;
        for candidate in candidates {
            let returns = self.resolve_return(owner, candidate);
            best = match best {
                None => Some((*candidate, returns)),
                Some((current, current_returns)) => {
                    let (raw, current_raw) = (returns.raw_class(), current_returns.raw_class());
                    if raw != current_raw && self.universe.is_assignable(&current_raw, &raw) {
                        Some((*candidate, returns))
                    } else {
                        Some((current, current_returns))
                    }
                }
            };
        }
        best
    }

    /// Bind a type-variable return to the owner's instantiation of the declaring type.
    fn resolve_return(&self, owner: &str, declared: &DeclaredMethod<'_>) -> TypeRef {
        let returns = &declared.method.returns;
        let TypeRef::Variable { name, declared_by } = returns else {
            return returns.clone();
        };
        if *declared_by != declared.declaring.name {
            return returns.clone();
        }
        let Some(index) = declared.declaring.type_params.iter().position(|p| p == name) else {
            return returns.clone();
        };
        match self
            .universe
            .resolve_generic(owner, &declared.declaring.name)
            .and_then(|args| args.into_iter().nth(index))
        {
            Some(arg) if !arg.has_variables() && !matches!(arg, TypeRef::Wildcard { .. }) => arg,
            _ => returns.clone(),
        }
    }
}

fn is_abstract_class(ty: &TypeInfo) -> bool {
    ty.kind == TypeKind::Class && ty.is_abstract
}

fn is_instance_api(method: &MethodInfo) -> bool {
    method.is_public && !method.is_static && !method.is_synthetic && !method.name.contains('$')
}

fn concrete_class(arg: &TypeRef) -> Option<String> {
    match arg {
        TypeRef::Class { name } => Some(name.clone()),
        TypeRef::Parameterized { raw, .. } if !arg.has_variables() => Some(raw.clone()),
        _ => None,
    }
}

/// Look the comment up on the most specific declaring type first, then on the owner.
///
/// Both the generic and the erased signature spellings are tried.
fn method_doc(
    docs: &DocIndex,
    owner: &str,
    method: &MethodInfo,
    candidates: &[DeclaredMethod<'_>],
) -> String {
    let generic = method.call_signature();
    let erased = erased_signature(method);
    candidates
        .iter()
        .map(|c| c.declaring.name.as_str())
        .chain(std::iter::once(owner))
        .flat_map(|ty| [format!("{}.{}", ty, generic), format!("{}.{}", ty, erased)])
        .find_map(|key| docs.method_comment(&key))
        .unwrap_or_default()
        .to_string()
}

fn erased_signature(method: &MethodInfo) -> String {
    let params = method
        .params
        .iter()
        .map(TypeRef::raw_class)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", method.name, params)
}
