//! Unit naming and collision resolution.
//!
//! Every unit name is derived from the short name of its target plus a
//! per-kind suffix. Two units landing on the same qualified name collide;
//! depending on [`CollisionPolicy`] the run fails or the colliding units
//! are renamed with their enclosing (or key) type names.

use std::collections::{BTreeMap, BTreeSet};

use kdsl_ir::{TypeRef, TypeUniverse, nested_name_of, package_of, simple_name_of};
use kdsl_manifest::CollisionPolicy;
use serde::Serialize;

use super::{
    model::UnitName,
    shape::{Buildables, Shape},
};
use crate::{Settings, source::SourceModel};

/// What a unit is generated for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnitSource {
    Marker,
    Type { target: String },
    Collection { target: String },
    Map { key: String, target: String },
}

impl std::fmt::Display for UnitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSource::Marker => write!(f, "DSL marker"),
            UnitSource::Type { target } => write!(f, "type '{}'", target),
            UnitSource::Collection { target } => write!(f, "collection of '{}'", target),
            UnitSource::Map { key, target } => write!(f, "map of '{}' to '{}'", key, target),
        }
    }
}

/// A map unit together with its key type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSlot {
    pub key: TypeRef,
    pub target: String,
    pub unit: UnitName,
}

/// Several units sharing one qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub unit: UnitName,
    pub sources: Vec<UnitSource>,
}

/// A unit renamed to resolve a collision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renamed {
    pub source: UnitSource,
    pub from: UnitName,
    pub to: UnitName,
}

/// Names of every unit of a run.
#[derive(Debug, Clone, Serialize)]
pub struct UnitPlan {
    pub marker: UnitName,
    /// Type units by qualified target name.
    pub types: BTreeMap<String, UnitName>,
    /// Collection units by qualified element target name.
    pub collections: BTreeMap<String, UnitName>,
    /// Map units by (key type, qualified target name).
    #[serde(serialize_with = "serialize_slots")]
    pub maps: BTreeMap<(String, String), MapSlot>,
    /// Collisions left after applying the policy.
    pub collisions: Vec<Collision>,
    pub renamed: Vec<Renamed>,
    /// Target short names used by more than one package.
    pub shared_short_names: BTreeMap<String, Vec<String>>,
}

impl UnitPlan {
    pub fn new(source: &SourceModel, universe: &dyn TypeUniverse, settings: &Settings) -> Self {
        let buildables = Buildables::new(source);
        let mut collections = BTreeSet::new();
        let mut maps: BTreeMap<(String, String), TypeRef> = BTreeMap::new();

        let indexed = source.methods.values();
        let builder_methods = source.builders.values().flat_map(|model| model.methods());
        for method in indexed.chain(builder_methods) {
            let Some(param) = method.single_param() else {
                continue;
            };
            match buildables.shape_of(universe, param) {
                Some(Shape::Collection(target)) => {
                    collections.insert(target);
                }
                Some(Shape::Map { key, target }) => {
                    maps.entry((key.to_string(), target)).or_insert(key);
                }
                _ => {}
            }
        }

        let mut plan = Self {
            marker: UnitName::new(settings.target_namespace.clone(), settings.marker_name()),
            types: source
                .builders
                .keys()
                .map(|target| (target.clone(), unit_name(settings, target, short_stem(target), "DSL")))
                .collect(),
            collections: collections
                .into_iter()
                .map(|target| {
                    let name = unit_name(settings, &target, short_stem(&target), "CollectionDSL");
                    (target, name)
                })
                .collect(),
            maps: maps
                .into_iter()
                .map(|((display, target), key)| {
                    let unit = unit_name(settings, &target, short_stem(&target), "MapDSL");
                    ((display, target.clone()), MapSlot { key, target, unit })
                })
                .collect(),
            collisions: Vec::new(),
            renamed: Vec::new(),
            shared_short_names: shared_short_names(source.builders.keys()),
        };

        plan.collisions = plan.find_collisions();
        if settings.collisions == CollisionPolicy::Qualify && !plan.collisions.is_empty() {
            plan.qualify(settings);
            plan.collisions = plan.find_collisions();
        }
        plan
    }

    pub fn type_unit(&self, target: &str) -> Option<&UnitName> {
        self.types.get(target)
    }

    pub fn collection_unit(&self, target: &str) -> Option<&UnitName> {
        self.collections.get(target)
    }

    pub fn map_unit(&self, key: &TypeRef, target: &str) -> Option<&UnitName> {
        self.maps
            .get(&(key.to_string(), target.to_string()))
            .map(|slot| &slot.unit)
    }

    /// The unit a buildable shape links to.
    pub fn unit_for(&self, shape: &Shape) -> Option<&UnitName> {
        match shape {
            Shape::Target(target) | Shape::Builder(target) => self.type_unit(target),
            Shape::Collection(target) => self.collection_unit(target),
            Shape::Map { key, target } => self.map_unit(key, target),
        }
    }

    /// Every unit with its source, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = (UnitSource, &UnitName)> {
        let marker = std::iter::once((UnitSource::Marker, &self.marker));
        let types = self.types.iter().map(|(target, name)| {
            let source = UnitSource::Type {
                target: target.clone(),
            };
            (source, name)
        });
        let collections = self.collections.iter().map(|(target, name)| {
            let source = UnitSource::Collection {
                target: target.clone(),
            };
            (source, name)
        });
        let maps = self.maps.iter().map(|((key, target), slot)| {
            let source = UnitSource::Map {
                key: key.clone(),
                target: target.clone(),
            };
            (source, &slot.unit)
        });
        marker.chain(types).chain(collections).chain(maps)
    }

    fn find_collisions(&self) -> Vec<Collision> {
        let mut by_name: BTreeMap<&UnitName, Vec<UnitSource>> = BTreeMap::new();
        for (source, name) in self.units() {
            by_name.entry(name).or_default().push(source);
        }
        by_name
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(unit, mut sources)| {
                sources.sort();
                Collision {
                    unit: unit.clone(),
                    sources,
                }
            })
            .collect()
    }

    /// Rename every colliding unit with its qualified form.
    ///
    /// Type and collection units use the enclosing type names of their
    /// target (`OuterWidgetDSL`), map units prefix the key's short name
    /// (`StringPartMapDSL`). The marker keeps its name.
    fn qualify(&mut self, settings: &Settings) {
        let colliding: BTreeSet<UnitSource> = self
            .collisions
            .iter()
            .flat_map(|collision| collision.sources.iter().cloned())
            .collect();

        for source in colliding {
            let slot = match &source {
                UnitSource::Marker => None,
                UnitSource::Type { target } => self.types.get_mut(target).map(|name| {
                    let qualified = unit_name(settings, target, nested_stem(target), "DSL");
                    (name, qualified)
                }),
                UnitSource::Collection { target } => self.collections.get_mut(target).map(|name| {
                    let qualified =
                        unit_name(settings, target, nested_stem(target), "CollectionDSL");
                    (name, qualified)
                }),
                UnitSource::Map { key, target } => self
                    .maps
                    .get_mut(&(key.clone(), target.clone()))
                    .map(|slot| {
                        let stem = format!("{}{}", key_stem(&slot.key), nested_stem(target));
                        (&mut slot.unit, unit_name(settings, target, stem, "MapDSL"))
                    }),
            };
            let Some((name, qualified)) = slot else {
                continue;
            };
            if *name != qualified {
                self.renamed.push(Renamed {
                    source: source.clone(),
                    from: name.clone(),
                    to: qualified.clone(),
                });
                *name = qualified;
            }
        }
    }
}

fn serialize_slots<S: serde::Serializer>(
    maps: &BTreeMap<(String, String), MapSlot>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(maps.values())
}

fn unit_name(settings: &Settings, target: &str, stem: String, suffix: &str) -> UnitName {
    UnitName::new(
        settings.target_package(package_of(target)),
        format!("{}{}", stem, suffix),
    )
}

fn short_stem(target: &str) -> String {
    simple_name_of(target).to_string()
}

/// `OuterWidget` for `com.acme.Outer$Widget`.
fn nested_stem(target: &str) -> String {
    nested_name_of(target).replace('.', "")
}

fn key_stem(key: &TypeRef) -> String {
    if key.is_primitive() {
        return kdsl_core::capitalize(&key.raw_class());
    }
    nested_stem(&key.raw_class())
}

fn shared_short_names<'a>(
    targets: impl IntoIterator<Item = &'a String>,
) -> BTreeMap<String, Vec<String>> {
    let mut by_short: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for target in targets {
        by_short
            .entry(simple_name_of(target))
            .or_default()
            .push(target.as_str());
    }
    by_short
        .into_iter()
        .filter(|(_, targets)| {
            let packages: BTreeSet<&str> = targets.iter().map(|t| package_of(t)).collect();
            packages.len() > 1
        })
        .map(|(short, targets)| {
            let targets = targets.into_iter().map(str::to_string).collect();
            (short.to_string(), targets)
        })
        .collect()
}
