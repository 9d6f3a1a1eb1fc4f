//! [`SourceModel`] to [`DslModel`].

use std::collections::BTreeMap;

use kdsl_ir::{TypeRef, TypeUniverse};

use super::{
    kotlin_type::KotlinTypes,
    model::{
        CollectionUnit, DslModel, ExtensionLink, Function, LinkKind, MapUnit, MarkerUnit,
        Property, SubLink, TypeUnit, UnitName,
    },
    plan::{MapSlot, UnitPlan},
    shape::{Buildables, Shape},
};
use crate::{
    Settings,
    classify::{Classifier, Role},
    generation::ImportCollector,
    source::{BuilderModel, MethodModel, SourceModel},
};

/// Build the DSL model for a scanned API surface.
///
/// Units missing from `plan` are skipped; every list of the result is
/// sorted by unit name.
pub fn transform(
    source: &SourceModel,
    plan: &UnitPlan,
    universe: &dyn TypeUniverse,
    settings: &Settings,
) -> DslModel {
    Transformer::new(source, plan, universe, settings).run()
}

/// A link together with the names its unit has to import.
struct Linked<T> {
    link: T,
    imports: Vec<String>,
}

struct Transformer<'a> {
    source: &'a SourceModel,
    plan: &'a UnitPlan,
    universe: &'a dyn TypeUniverse,
    settings: &'a Settings,
    types: KotlinTypes<'a>,
    buildables: Buildables<'a>,
    classifier: Classifier<'a>,
}

impl<'a> Transformer<'a> {
    fn new(
        source: &'a SourceModel,
        plan: &'a UnitPlan,
        universe: &'a dyn TypeUniverse,
        settings: &'a Settings,
    ) -> Self {
        Self {
            source,
            plan,
            universe,
            settings,
            types: KotlinTypes::new(&settings.type_mapping),
            buildables: Buildables::new(source),
            classifier: Classifier::new(universe),
        }
    }

    fn run(&self) -> DslModel {
        let mut extensions = self.extension_links();

        let mut collections: Vec<CollectionUnit> = self
            .plan
            .collections
            .iter()
            .filter_map(|(target, name)| self.collection_unit(target, name))
            .collect();
        let mut maps: Vec<MapUnit> = self
            .plan
            .maps
            .values()
            .filter_map(|slot| self.map_unit(slot))
            .collect();
        let mut types: Vec<TypeUnit> = self
            .source
            .builders
            .iter()
            .filter_map(|(target, model)| {
                let extensions = extensions.remove(target).unwrap_or_default();
                self.type_unit(target, model, extensions)
            })
            .collect();

        collections.sort_by(|a, b| by_unit_name(&a.name, &b.name));
        maps.sort_by(|a, b| by_unit_name(&a.name, &b.name));
        types.sort_by(|a, b| by_unit_name(&a.name, &b.name));

        DslModel {
            marker: MarkerUnit {
                name: self.plan.marker.clone(),
            },
            collections,
            maps,
            types,
        }
    }

    fn marker(&self) -> &str {
        &self.plan.marker.name
    }

    fn render_class(&self, name: &str) -> String {
        self.types.render(&TypeRef::class(name))
    }

    fn target_doc(&self, target: &str) -> String {
        self.source
            .builder_for(target)
            .map(|model| model.target.doc.clone())
            .unwrap_or_default()
    }

    fn collection_unit(&self, target: &str, name: &UnitName) -> Option<CollectionUnit> {
        let target_unit = self.plan.type_unit(target)?;
        let mut imports = ImportCollector::new(self.settings, name.package.as_str());
        imports.add(&self.plan.marker.qualified());
        imports.add(target);
        imports.add(&target_unit.qualified());
        imports.add(&target_unit.qualified_entry_point());

        Some(CollectionUnit {
            name: name.clone(),
            imports: imports.into_sorted(),
            comment: self.target_doc(target),
            marker: self.marker().to_string(),
            entry_point: name.entry_point(),
            target_type: self.render_class(target),
            target_dsl: target_unit.name.clone(),
            target_entry_point: target_unit.entry_point(),
        })
    }

    fn map_unit(&self, slot: &MapSlot) -> Option<MapUnit> {
        let target_unit = self.plan.type_unit(&slot.target)?;
        let name = &slot.unit;
        let mut imports = ImportCollector::new(self.settings, name.package.as_str());
        imports.add(&self.plan.marker.qualified());
        imports.add(&slot.target);
        imports.add_type(&slot.key);
        imports.add(&target_unit.qualified());
        imports.add(&target_unit.qualified_entry_point());

        Some(MapUnit {
            name: name.clone(),
            imports: imports.into_sorted(),
            comment: self.target_doc(&slot.target),
            marker: self.marker().to_string(),
            entry_point: name.entry_point(),
            key_type: self.types.render(&slot.key),
            target_type: self.render_class(&slot.target),
            target_dsl: target_unit.name.clone(),
            target_entry_point: target_unit.entry_point(),
        })
    }

    fn type_unit(
        &self,
        target: &str,
        model: &BuilderModel,
        extensions: Vec<Linked<ExtensionLink>>,
    ) -> Option<TypeUnit> {
        let name = self.plan.type_unit(target)?;
        let mut imports = ImportCollector::new(self.settings, name.package.as_str());
        imports.add(&self.plan.marker.qualified());
        imports.add(&model.builder.qualified_name);
        imports.add(&model.target.qualified_name);

        let mut properties = Vec::new();
        let mut secondaries = Vec::new();
        let mut functions = Vec::new();
        for group in model.groups.values() {
            let classification = self.classifier.classify(group);
            if let Some((role, method)) = classification.primary
                && let Some(property) = self.property(method, role)
            {
                imports.add_all(&method.dependencies);
                properties.push(property);
            }
            if let Some(method) = classification.secondary
                && let Some(property) = self.property(method, Role::PrimitiveProperty)
            {
                imports.add_all(&method.dependencies);
                secondaries.push(property);
            }
            if let Some(method) = classification.function {
                functions.push(Function {
                    name: method.name.clone(),
                    comment: method.doc.clone(),
                });
            }
        }

        let sub_links = self.sub_links(model);
        for linked in &sub_links {
            imports.add_all(&linked.imports);
        }
        for linked in &extensions {
            imports.add_all(&linked.imports);
        }

        Some(TypeUnit {
            name: name.clone(),
            imports: imports.into_sorted(),
            comment: model.target.doc.clone(),
            marker: self.marker().to_string(),
            entry_point: name.entry_point(),
            builder_type: self.render_class(&model.builder.qualified_name),
            target_type: self.render_class(&model.target.qualified_name),
            factory: model.factory.clone(),
            properties,
            secondaries,
            functions,
            sub_links: sub_links.into_iter().map(|linked| linked.link).collect(),
            extensions: extensions.into_iter().map(|linked| linked.link).collect(),
        })
    }

    fn property(&self, method: &MethodModel, role: Role) -> Option<Property> {
        let param = method.single_param()?;
        Some(Property {
            name: method.name.clone(),
            comment: method.doc.clone(),
            kotlin_type: self.types.render_nullable(param),
            role,
        })
    }

    /// The linked unit of a method's single parameter.
    fn link_of(&self, method: &MethodModel) -> Option<(LinkKind, Shape, &'a UnitName)> {
        let param = method.single_param()?;
        let shape = self.buildables.shape_of(self.universe, param)?;
        let unit = self.plan.unit_for(&shape)?;
        let kind = match shape {
            Shape::Target(_) => LinkKind::Direct,
            Shape::Builder(_) => LinkKind::Builder,
            Shape::Collection(_) => LinkKind::Collection,
            Shape::Map { .. } => LinkKind::Map,
        };
        Some((kind, shape, unit))
    }

    fn link_imports(&self, kind: LinkKind, shape: &Shape, unit: &UnitName) -> Vec<String> {
        let mut imports = vec![shape.target().to_string(), unit.qualified()];
        if kind != LinkKind::Builder {
            imports.push(unit.qualified_entry_point());
        }
        imports
    }

    /// Nested blocks of a builder, one per (method name, linked unit).
    ///
    /// When a name links to the same unit by target and by builder, the
    /// target form wins.
    fn sub_links(&self, model: &BuilderModel) -> Vec<Linked<SubLink>> {
        let mut links: BTreeMap<(String, String), Linked<SubLink>> = BTreeMap::new();
        for method in model.methods() {
            let Some((kind, shape, unit)) = self.link_of(method) else {
                continue;
            };
            let key = (method.name.clone(), unit.qualified());
            let replaces = |existing: &Linked<SubLink>| {
                kind == LinkKind::Direct && existing.link.kind == LinkKind::Builder
            };
            if links.get(&key).is_some_and(|existing| !replaces(existing)) {
                continue;
            }
            let link = SubLink {
                name: method.name.clone(),
                comment: method.doc.clone(),
                kind,
                target_type: self.render_class(shape.target()),
                target_dsl: unit.name.clone(),
                target_entry_point: unit.entry_point(),
            };
            let imports = self.link_imports(kind, &shape, unit);
            links.insert(key, Linked { link, imports });
        }
        links.into_values().collect()
    }

    /// Extension blocks grouped by the target whose type unit declares them.
    ///
    /// Every indexed method owned by a type that is not itself a builder
    /// and taking a buildable shape becomes an extension on its owner.
    fn extension_links(&self) -> BTreeMap<String, Vec<Linked<ExtensionLink>>> {
        type ByLink = BTreeMap<(String, String, String), Linked<ExtensionLink>>;
        let mut by_target: BTreeMap<String, ByLink> = BTreeMap::new();
        for method in self.source.methods.values() {
            let owner = method.owner.qualified_name.as_str();
            if self.source.is_builder_type(owner)
                || self.universe.is_assignable(&self.source.supertype, owner)
            {
                continue;
            }
            let Some((kind, shape, unit)) = self.link_of(method) else {
                continue;
            };
            let key = (owner.to_string(), method.name.clone(), unit.qualified());
            let mut imports = self.link_imports(kind, &shape, unit);
            imports.push(owner.to_string());
            let link = ExtensionLink {
                receiver_type: self.render_class(owner),
                name: method.name.clone(),
                comment: method.doc.clone(),
                kind,
                target_dsl: unit.name.clone(),
                target_entry_point: unit.entry_point(),
            };
            by_target
                .entry(shape.target().to_string())
                .or_default()
                .entry(key)
                .or_insert(Linked { link, imports });
        }
        by_target
            .into_iter()
            .map(|(target, links)| (target, links.into_values().collect()))
            .collect()
    }
}

fn by_unit_name(a: &UnitName, b: &UnitName) -> std::cmp::Ordering {
    a.name.cmp(&b.name).then_with(|| a.package.cmp(&b.package))
}

#[cfg(test)]
mod tests {
    use kdsl_manifest::DocIndex;

    use super::*;
    use crate::{
        source::Scanner,
        testing::{fixture_universe, settings},
    };

    fn fixture_model(docs: &DocIndex) -> DslModel {
        let universe = fixture_universe();
        let settings = settings();
        let source = Scanner::new(&universe, &settings, docs).scan(&mut Vec::new());
        let plan = UnitPlan::new(&source, &universe, &settings);
        transform(&source, &plan, &universe, &settings)
    }

    fn unit_names<'m>(names: impl Iterator<Item = &'m UnitName>) -> Vec<&'m str> {
        names.map(|name| name.name.as_str()).collect()
    }

    #[test]
    fn test_unit_lists() {
        let model = fixture_model(&DocIndex::empty());

        assert_eq!(model.marker.name.qualified(), "com.acme.kotlin.dsl.AcmeDSL");
        assert_eq!(
            unit_names(model.types.iter().map(|u| &u.name)),
            vec!["BlankDSL", "GadgetDSL", "PartDSL", "WidgetDSL"]
        );
        assert_eq!(
            unit_names(model.collections.iter().map(|u| &u.name)),
            vec!["PartCollectionDSL"]
        );
        assert_eq!(unit_names(model.maps.iter().map(|u| &u.name)), vec!["PartMapDSL"]);
        assert_eq!(model.unit_count(), 7);
    }

    #[test]
    fn test_widget_members() {
        let model = fixture_model(&DocIndex::empty());
        let widget = model.type_unit("WidgetDSL").unwrap();

        assert_eq!(widget.builder_type, "Widget.Builder");
        assert_eq!(widget.target_type, "Widget");
        assert_eq!(widget.factory, "builder");
        assert_eq!(widget.entry_point, "buildWidget");
        assert_eq!(widget.marker, "AcmeDSL");

        let properties: Vec<(&str, &str)> = widget
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.kotlin_type.as_str()))
            .collect();
        assert_eq!(
            properties,
            vec![
                ("attributes", "Map<String, Part>?"),
                ("color", "Color?"),
                ("enabled", "Boolean?"),
                ("gadget", "Gadget?"),
                ("label", "String?"),
                ("onDone", "Consumer<String>?"),
                ("parts", "Collection<Part>?"),
                ("size", "Int"),
                ("spare", "Gadget.Builder?"),
                ("tags", "Array<String>?"),
            ]
        );
        assert_eq!(widget.properties[6].role, Role::CollectionProperty);

        assert_eq!(widget.secondaries.len(), 1);
        assert_eq!(widget.secondaries[0].name, "color");
        assert_eq!(widget.secondaries[0].kotlin_type, "String?");

        let functions: Vec<&str> = widget.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["reset"]);
    }

    #[test]
    fn test_widget_links() {
        let model = fixture_model(&DocIndex::empty());
        let widget = model.type_unit("WidgetDSL").unwrap();

        let links: Vec<(&str, LinkKind, &str, &str)> = widget
            .sub_links
            .iter()
            .map(|l| {
                (
                    l.name.as_str(),
                    l.kind,
                    l.target_dsl.as_str(),
                    l.target_entry_point.as_str(),
                )
            })
            .collect();
        assert_eq!(
            links,
            vec![
                ("attributes", LinkKind::Map, "PartMapDSL", "buildPartMap"),
                ("gadget", LinkKind::Direct, "GadgetDSL", "buildGadget"),
                ("parts", LinkKind::Collection, "PartCollectionDSL", "buildPartCollection"),
                ("spare", LinkKind::Builder, "GadgetDSL", "buildGadget"),
            ]
        );

        assert_eq!(widget.extensions.len(), 1);
        let extension = &widget.extensions[0];
        assert_eq!(extension.receiver_type, "AcmeClient");
        assert_eq!(extension.name, "putWidget");
        assert_eq!(extension.kind, LinkKind::Direct);
        assert_eq!(extension.target_dsl, "WidgetDSL");
    }

    #[test]
    fn test_imports() {
        let model = fixture_model(&DocIndex::empty());

        assert_eq!(
            model.type_unit("WidgetDSL").unwrap().imports,
            vec![
                "com.acme.kotlin.dsl.AcmeDSL",
                "com.acme.kotlin.dsl.model.gadget.GadgetDSL",
                "com.acme.kotlin.dsl.model.gadget.buildGadget",
                "com.acme.model.Color",
                "com.acme.model.Part",
                "com.acme.model.Widget",
                "com.acme.model.gadget.Gadget",
                "com.acme.service.AcmeClient",
                "java.util.function.Consumer",
            ]
        );
        assert_eq!(
            model.type_unit("GadgetDSL").unwrap().imports,
            vec![
                "com.acme.kotlin.dsl.AcmeDSL",
                "com.acme.kotlin.dsl.model.WidgetDSL",
                "com.acme.kotlin.dsl.model.buildWidget",
                "com.acme.model.Widget",
                "com.acme.model.gadget.Gadget",
            ]
        );
        assert_eq!(
            model.collection_unit("PartCollectionDSL").unwrap().imports,
            vec!["com.acme.kotlin.dsl.AcmeDSL", "com.acme.model.Part"]
        );
    }

    #[test]
    fn test_collection_and_map_units() {
        let model = fixture_model(&DocIndex::empty());

        let collection = model.collection_unit("PartCollectionDSL").unwrap();
        assert_eq!(collection.name.package, "com.acme.kotlin.dsl.model");
        assert_eq!(collection.entry_point, "buildPartCollection");
        assert_eq!(collection.target_type, "Part");
        assert_eq!(collection.target_dsl, "PartDSL");
        assert_eq!(collection.target_entry_point, "buildPart");

        let map = model.map_unit("PartMapDSL").unwrap();
        assert_eq!(map.key_type, "String");
        assert_eq!(map.entry_point, "buildPartMap");
        assert_eq!(map.target_dsl, "PartDSL");
    }

    #[test]
    fn test_part_has_collection_extension() {
        let model = fixture_model(&DocIndex::empty());
        let part = model.type_unit("PartDSL").unwrap();

        let properties: Vec<&str> = part.properties.iter().map(|p| p.kotlin_type.as_str()).collect();
        assert_eq!(properties, vec!["String?", "Double"]);
        assert_eq!(part.extensions.len(), 1);
        assert_eq!(part.extensions[0].name, "putParts");
        assert_eq!(part.extensions[0].kind, LinkKind::Collection);
        assert_eq!(part.extensions[0].target_dsl, "PartCollectionDSL");
    }

    #[test]
    fn test_blank_builder_renders_empty_unit() {
        let model = fixture_model(&DocIndex::empty());
        let blank = model.type_unit("BlankDSL").unwrap();
        assert!(blank.is_empty());
        assert!(blank.extensions.is_empty());
    }

    #[test]
    fn test_documentation_flows_into_units() {
        let mut docs = DocIndex::empty();
        docs.insert_type("com.acme.model.Part", "<p>A part.</p>");
        docs.insert_method("com.acme.model.Part$Builder.weight(double)", "Weight in kg.");

        let with_docs = fixture_model(&docs);
        let without_docs = fixture_model(&DocIndex::empty());

        let part = with_docs.type_unit("PartDSL").unwrap();
        assert_eq!(part.comment, "A part.");
        assert_eq!(part.properties[1].comment, "Weight in kg.");
        assert_eq!(with_docs.collection_unit("PartCollectionDSL").unwrap().comment, "A part.");

        let bare = without_docs.type_unit("PartDSL").unwrap();
        assert_eq!(bare.comment, "");
        assert_eq!(bare.properties[1].comment, "");
        assert_eq!(bare.properties, {
            let mut stripped = part.properties.clone();
            for property in &mut stripped {
                property.comment.clear();
            }
            stripped
        });
    }
}
