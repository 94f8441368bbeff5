//! Minimal XML rendering for entity classes and group entries

use crate::catalog::{EntityClass, EntityNode, GroupEntry, Property};

/// Escape text for use inside a double-quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// `name="value"` pairs, skipping absent optional attributes
fn attributes(pairs: &[(&str, Option<&str>)]) -> String {
    pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!(" {}=\"{}\"", key, escape(v))))
        .collect()
}

fn property_line(prop: &Property) -> String {
    format!(
        "<property{}/>",
        attributes(&[
            ("name", Some(prop.name.as_str())),
            ("value", Some(prop.value.as_str())),
            ("data", prop.data.as_deref()),
        ])
    )
}

/// Render an entity class; variant bookkeeping is not written
pub fn render_entity(entity: &EntityClass) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<entity_class{}>\n",
        attributes(&[
            ("name", Some(entity.name.as_str())),
            ("extends", entity.extends.as_deref()),
        ])
    ));

    for node in &entity.nodes {
        match node {
            EntityNode::Property(prop) => {
                out.push_str(&format!("    {}\n", property_line(prop)));
            }
            EntityNode::PropertyClass(class) => {
                out.push_str(&format!("    <property class=\"{}\">\n", escape(&class.class)));
                for prop in &class.properties {
                    out.push_str(&format!("        {}\n", property_line(prop)));
                }
                out.push_str("    </property>\n");
            }
            EntityNode::EffectGroup(group) => {
                out.push_str(&format!("    <effect_group name=\"{}\">\n", escape(&group.name)));
                for effect in &group.effects {
                    out.push_str(&format!(
                        "        <passive_effect{}/>\n",
                        attributes(&[
                            ("name", Some(effect.name.as_str())),
                            ("operation", Some(effect.operation.as_str())),
                            ("value", Some(effect.value.as_str())),
                            ("tags", effect.tags.as_deref()),
                        ])
                    ));
                }
                out.push_str("    </effect_group>\n");
            }
            EntityNode::Drop(drop) => {
                out.push_str(&format!(
                    "    <drop{}/>\n",
                    attributes(&[
                        ("event", Some(drop.event.as_str())),
                        ("name", Some(drop.name.as_str())),
                        ("count", Some(drop.count.as_str())),
                        ("prob", drop.prob.as_deref()),
                    ])
                ));
            }
        }
    }

    out.push_str("</entity_class>\n");
    out
}

pub fn render_group_entry(entry: &GroupEntry) -> String {
    format!(
        "<entity{}/>",
        attributes(&[("name", Some(entry.name.as_str())), ("prob", entry.prob.as_deref())])
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EffectGroup, ItemDrop, PassiveEffect, PropertyClass};

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c" 'd'>"#), "a&lt;b &amp; &quot;c&quot; &apos;d&apos;&gt;");
    }

    #[test]
    fn test_render_entity() {
        let mut entity = EntityClass::new("fv_zombieBoe_001")
            .extending("zombieBoe")
            .with_node(EntityNode::Property(
                Property::new("AITask-4", "ApproachAndAttackTarget").with_data("class=EntityPlayer"),
            ))
            .with_node(EntityNode::PropertyClass(PropertyClass {
                class: "Attributes".into(),
                properties: vec![Property::new("Speed", "1")],
            }))
            .with_node(EntityNode::EffectGroup(EffectGroup {
                name: "Base Effects".into(),
                effects: vec![PassiveEffect {
                    name: "HealthMax".into(),
                    operation: "base_set".into(),
                    value: "300".into(),
                    tags: None,
                }],
            }))
            .with_node(EntityNode::Drop(ItemDrop {
                event: "Harvest".into(),
                name: "resourceRockSmall".into(),
                count: "4".into(),
                prob: Some("0.5".into()),
            }));
        entity.variant_mut().overall_scale = Some(120);

        let xml = render_entity(&entity);
        let expected = "\
<entity_class name=\"fv_zombieBoe_001\" extends=\"zombieBoe\">
    <property name=\"AITask-4\" value=\"ApproachAndAttackTarget\" data=\"class=EntityPlayer\"/>
    <property class=\"Attributes\">
        <property name=\"Speed\" value=\"1\"/>
    </property>
    <effect_group name=\"Base Effects\">
        <passive_effect name=\"HealthMax\" operation=\"base_set\" value=\"300\"/>
    </effect_group>
    <drop event=\"Harvest\" name=\"resourceRockSmall\" count=\"4\" prob=\"0.5\"/>
</entity_class>
";
        assert_eq!(xml, expected);
        assert!(!xml.contains("120"));
    }

    #[test]
    fn test_group_entry() {
        let entry = GroupEntry {
            name: "fv_zombieBoe_001".into(),
            prob: None,
        };
        assert_eq!(render_group_entry(&entry), "<entity name=\"fv_zombieBoe_001\"/>");
    }
}
