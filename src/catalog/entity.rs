//! Entity class definitions
//!
//! An entity class is a flat, owned tree: top-level property records,
//! property classes holding nested records, effect groups and drops.
//! Cloning an `EntityClass` is always a full, independent copy.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Property holding an entity's explicit canonical type
pub const TYPE_TAG_PROPERTY: &str = "Class";
/// Effect group holding an entity's base stats
pub const BASE_EFFECTS_GROUP: &str = "Base Effects";
/// Drop event for harvestable resources
pub const HARVEST_EVENT: &str = "Harvest";

/// A `(name, value, optional extra-data)` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Named container of nested property records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyClass {
    pub class: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveEffect {
    pub name: String,
    pub operation: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectGroup {
    pub name: String,
    #[serde(default)]
    pub effects: Vec<PassiveEffect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub event: String,
    pub name: String,
    pub count: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<String>,
}

/// One child of an entity class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityNode {
    Property(Property),
    PropertyClass(PropertyClass),
    EffectGroup(EffectGroup),
    Drop(ItemDrop),
}

/// Transient attributes carried only by generated variants
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantMeta {
    /// Source entity this variant was cloned from
    pub original_name: String,
    /// Overall scale in percent; `None` until drawn
    pub overall_scale: Option<u32>,
    pub is_raging: bool,
    /// Behavior template most recently installed
    pub applied_behavior_template: Option<String>,
}

/// An entity definition from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityClass {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub nodes: Vec<EntityNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantMeta>,
}

impl EntityClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            nodes: Vec::new(),
            variant: None,
        }
    }

    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn with_node(mut self, node: EntityNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_property(self, name: &str, value: &str) -> Self {
        self.with_node(EntityNode::Property(Property::new(name, value)))
    }

    /// Explicit type tag, if declared as a direct child
    pub fn type_tag(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            EntityNode::Property(p) if p.name == TYPE_TAG_PROPERTY => Some(p.value.as_str()),
            _ => None,
        })
    }

    /// Every property record in the subtree, in document order
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.nodes.iter().flat_map(|node| match node {
            EntityNode::Property(p) => std::slice::from_ref(p).iter(),
            EntityNode::PropertyClass(c) => c.properties.iter(),
            _ => std::slice::Iter::default(),
        })
    }

    pub fn properties_mut(&mut self) -> impl Iterator<Item = &mut Property> {
        self.nodes.iter_mut().flat_map(|node| match node {
            EntityNode::Property(p) => std::slice::from_mut(p).iter_mut(),
            EntityNode::PropertyClass(c) => c.properties.iter_mut(),
            _ => std::slice::IterMut::default(),
        })
    }

    /// First value of the named property anywhere in the subtree
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.properties()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties().any(|p| p.name == name)
    }

    /// Rewrite every record named `name` with `f(old value)`; when none exists,
    /// append one record valued `f(default)`
    ///
    /// Returns true if a record was created.
    pub fn update_or_create<F>(&mut self, name: &str, default: &str, mut f: F) -> Result<bool>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let mut found = false;
        for prop in self.properties_mut().filter(|p| p.name == name) {
            found = true;
            let new_val = f(&prop.value)?;
            if new_val != prop.value {
                tracing::debug!("   Changed {} from {} to {}", name, prop.value, new_val);
                prop.value = new_val;
            }
        }

        if !found {
            let new_val = f(default)?;
            tracing::debug!(" + Defined {} as {}", name, new_val);
            self.nodes
                .push(EntityNode::Property(Property::new(name, new_val)));
        }

        Ok(!found)
    }

    /// Set every record named `name` to `value`, creating one if absent
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let mut found = false;
        for prop in self.properties_mut().filter(|p| p.name == name) {
            found = true;
            if prop.value != value {
                tracing::debug!("   Changed {} from {} to {}", name, prop.value, value);
                prop.value = value.to_string();
            }
        }

        if !found {
            tracing::debug!(" + Defined {} as {}", name, value);
            self.nodes
                .push(EntityNode::Property(Property::new(name, value)));
        }

        !found
    }

    /// Remove every property record matching `pred`, at any depth
    pub fn remove_properties<P>(&mut self, mut pred: P) -> Vec<Property>
    where
        P: FnMut(&Property) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.nodes.len());

        for node in self.nodes.drain(..) {
            match node {
                EntityNode::Property(p) if pred(&p) => removed.push(p),
                EntityNode::PropertyClass(mut class) => {
                    let (gone, stay): (Vec<_>, Vec<_>) =
                        class.properties.into_iter().partition(|p| pred(p));
                    removed.extend(gone);
                    class.properties = stay;
                    kept.push(EntityNode::PropertyClass(class));
                }
                other => kept.push(other),
            }
        }

        self.nodes = kept;
        removed
    }

    /// Insert `nodes`, in order, ahead of the current last child
    pub fn insert_before_last(&mut self, nodes: Vec<EntityNode>) {
        let at = self.nodes.len().saturating_sub(1);
        self.nodes.splice(at..at, nodes);
    }

    pub fn effect_group(&self, name: &str) -> Option<&EffectGroup> {
        self.nodes.iter().find_map(|node| match node {
            EntityNode::EffectGroup(g) if g.name == name => Some(g),
            _ => None,
        })
    }

    pub fn effect_group_mut(&mut self, name: &str) -> Option<&mut EffectGroup> {
        self.nodes.iter_mut().find_map(|node| match node {
            EntityNode::EffectGroup(g) if g.name == name => Some(g),
            _ => None,
        })
    }

    /// Named effect group, created empty at the end if missing
    pub fn effect_group_or_insert(&mut self, name: &str) -> &mut EffectGroup {
        let idx = self
            .nodes
            .iter()
            .position(|node| matches!(node, EntityNode::EffectGroup(g) if g.name == name));

        let idx = match idx {
            Some(idx) => idx,
            None => {
                self.nodes.push(EntityNode::EffectGroup(EffectGroup {
                    name: name.to_string(),
                    effects: Vec::new(),
                }));
                self.nodes.len() - 1
            }
        };

        match &mut self.nodes[idx] {
            EntityNode::EffectGroup(g) => g,
            _ => unreachable!("index points at an effect group"),
        }
    }

    pub fn drops_mut(&mut self, event: &str) -> impl Iterator<Item = &mut ItemDrop> + '_ {
        let event = event.to_string();
        self.nodes.iter_mut().filter_map(move |node| match node {
            EntityNode::Drop(d) if d.event == event => Some(d),
            _ => None,
        })
    }

    /// Overall scale in percent, 100 when not yet drawn
    pub fn overall_scale(&self) -> u32 {
        self.variant
            .as_ref()
            .and_then(|v| v.overall_scale)
            .unwrap_or(100)
    }

    pub fn is_raging(&self) -> bool {
        self.variant.as_ref().map(|v| v.is_raging).unwrap_or(false)
    }

    /// Source name for variants, own name otherwise
    pub fn original_name(&self) -> &str {
        self.variant
            .as_ref()
            .map(|v| v.original_name.as_str())
            .unwrap_or(&self.name)
    }

    pub fn variant_mut(&mut self) -> &mut VariantMeta {
        let original = self.name.clone();
        self.variant.get_or_insert_with(|| VariantMeta {
            original_name: original,
            ..VariantMeta::default()
        })
    }
}
