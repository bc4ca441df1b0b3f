// src/bsp/entities.rs
// Entity key bookkeeping done once per compile: model numbers, switchable
// light styles, and the final entity text.

use log::info;

use crate::bsp::{LIGHT_STYLE_BASE, LS_NONE, LS_NORMAL};
use crate::config::EmitConfig;
use crate::error::{CompileError, Result};
use crate::map::Entity;
use crate::utils::util::strip_trailing;

/// Classnames that never make it into the entity lump.
const STRIPPED_CLASSNAMES: [&str; 3] = ["misc_model", "_decal", "_skybox"];

/// Gives every non-world entity with brushes or patches a `model` key of
/// `*1`, `*2`, ... in entity order. Returns the total model count, world
/// included.
pub fn assign_model_numbers(entities: &mut [Entity]) -> usize {
    let mut models = 1;
    for entity in entities.iter_mut().skip(1) {
        if entity.has_geometry() {
            entity.set_key_value("model", &format!("*{}", models));
            models += 1;
        }
    }
    models
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightStyleReport {
    /// Distinct (style, targetname) pairs handed a switchable style.
    pub num_styles: usize,
    /// Lights without a targetname that were removed.
    pub num_stripped: usize,
}

/// Sets style keys for entity lights.
///
/// A light with a targetname can be switched at runtime, so each distinct
/// (style, targetname) pair gets its own style starting at
/// [`LIGHT_STYLE_BASE`]; a non-default original style is kept in
/// `switch_style`. Lights without a targetname are stripped unless the world
/// says `_keepLights`.
pub fn assign_light_styles(
    entities: &mut [Entity],
    config: &EmitConfig,
) -> Result<LightStyleReport> {
    let mut report = LightStyleReport::default();
    let Some((world, rest)) = entities.split_first_mut() else {
        return Ok(report);
    };

    if config.keep_lights {
        world.set_key_value("_keepLights", "1");
    }
    let keep_lights = world.bool_for_key("_keepLights");

    let mut switched: Vec<(i32, String)> = Vec::new();
    for (offset, entity) in rest.iter_mut().enumerate() {
        if !entity.classname_prefixed("light") {
            continue;
        }

        let target = entity
            .value_for_key("targetname")
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let Some(target) = target else {
            if !keep_lights {
                entity.epairs.clear();
                report.num_stripped += 1;
            }
            continue;
        };

        let style = entity.int_for_key("style");
        if !(LS_NORMAL..=LS_NONE).contains(&style) {
            return Err(CompileError::InvalidLightStyle {
                style,
                entity: offset + 1,
            });
        }

        let slot = match switched.iter().position(|(s, t)| *s == style && *t == target) {
            Some(slot) => slot,
            None => {
                if switched.len() == config.max_switched_lights {
                    return Err(CompileError::SwitchedLightLimit {
                        limit: config.max_switched_lights,
                    });
                }
                switched.push((style, target));
                switched.len() - 1
            }
        };

        entity.set_key_value("style", &(LIGHT_STYLE_BASE + slot as i32).to_string());
        if style != LS_NORMAL {
            entity.set_key_value("switch_style", &style.to_string());
        }
    }

    report.num_styles = switched.len();
    info!("{:9} light entities stripped", report.num_stripped);
    Ok(report)
}

/// Writes the entity lump text: one `{ "key" "value" ... }` block per
/// surviving entity.
pub fn unparse_entities(entities: &[Entity]) -> String {
    let mut data = String::new();
    for entity in entities {
        // Stripped by light style assignment.
        if entity.epairs.is_empty() {
            continue;
        }
        let classname = entity.classname();
        if STRIPPED_CLASSNAMES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(classname))
        {
            continue;
        }

        data.push_str("{\n");
        for (key, value) in &entity.epairs {
            data.push('"');
            data.push_str(strip_trailing(key));
            data.push_str("\" \"");
            data.push_str(strip_trailing(value));
            data.push_str("\"\n");
        }
        data.push_str("}\n");
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{BrushId, PatchMesh};
    use crate::utils::Point3D;

    fn world() -> Entity {
        Entity::with_pairs(&[("classname", "worldspawn")])
    }

    fn light(target: Option<&str>, style: Option<&str>) -> Entity {
        let mut light = Entity::with_pairs(&[("classname", "light")]);
        if let Some(t) = target {
            light.set_key_value("targetname", t);
        }
        if let Some(s) = style {
            light.set_key_value("style", s);
        }
        light
    }

    #[test]
    fn test_model_numbers() {
        let mut a = Entity::with_pairs(&[("classname", "func_door")]);
        a.brushes.push(BrushId(0));
        let b = Entity::with_pairs(&[("classname", "info_null")]);
        let mut c = Entity::with_pairs(&[("classname", "func_group")]);
        c.patches.push(PatchMesh::new(1, 1, vec![Point3D::default()]));
        let mut entities = vec![world(), a, b, c];

        assert_eq!(assign_model_numbers(&mut entities), 3);
        assert_eq!(entities[0].value_for_key("model"), None);
        assert_eq!(entities[1].value_for_key("model"), Some("*1"));
        assert_eq!(entities[2].value_for_key("model"), None);
        assert_eq!(entities[3].value_for_key("model"), Some("*2"));
    }

    #[test]
    fn test_untargeted_lights_stripped() {
        let mut entities = vec![world(), light(None, None), light(Some("t1"), None)];
        let report = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap();
        assert_eq!(report.num_stripped, 1);
        assert!(entities[1].epairs.is_empty());
        assert_eq!(entities[2].value_for_key("style"), Some("32"));
        assert_eq!(entities[2].value_for_key("switch_style"), None);
    }

    #[test]
    fn test_keep_lights_from_config_and_world() {
        let mut entities = vec![world(), light(None, None)];
        let config = EmitConfig {
            keep_lights: true,
            ..EmitConfig::default()
        };
        let report = assign_light_styles(&mut entities, &config).unwrap();
        assert_eq!(report.num_stripped, 0);
        assert_eq!(entities[0].value_for_key("_keepLights"), Some("1"));
        assert!(!entities[1].epairs.is_empty());

        let mut entities = vec![world(), light(None, None)];
        entities[0].set_key_value("_keepLights", "1");
        let report = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap();
        assert_eq!(report.num_stripped, 0);
    }

    #[test]
    fn test_styles_dedup_per_pair() {
        let mut entities = vec![
            world(),
            light(Some("hall"), None),
            light(Some("hall"), Some("0")),
            light(Some("hall"), Some("5")),
            light(Some("Hall"), None),
            Entity::with_pairs(&[("classname", "info_player_start"), ("targetname", "x")]),
        ];
        let report = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap();
        assert_eq!(report.num_styles, 3);
        assert_eq!(entities[1].value_for_key("style"), Some("32"));
        assert_eq!(entities[2].value_for_key("style"), Some("32"));
        assert_eq!(entities[3].value_for_key("style"), Some("33"));
        assert_eq!(entities[3].value_for_key("switch_style"), Some("5"));
        // Targetnames compare with case.
        assert_eq!(entities[4].value_for_key("style"), Some("34"));
        assert_eq!(entities[5].value_for_key("style"), None);
    }

    #[test]
    fn test_invalid_style_is_fatal() {
        let mut entities = vec![world(), light(Some("a"), Some("256"))];
        let err = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidLightStyle { style: 256, entity: 1 }));

        let mut entities = vec![world(), light(Some("a"), Some("-1"))];
        assert!(assign_light_styles(&mut entities, &EmitConfig::default()).is_err());
    }

    #[test]
    fn test_switched_light_cap() {
        let targeted = |count: usize| {
            let mut entities = vec![world()];
            for i in 0..count {
                entities.push(light(Some(&format!("t{}", i)), None));
            }
            entities
        };

        let mut entities = targeted(32);
        let report = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap();
        assert_eq!(report.num_styles, 32);
        assert_eq!(entities[32].value_for_key("style"), Some("63"));

        let mut entities = targeted(33);
        let err = assign_light_styles(&mut entities, &EmitConfig::default()).unwrap_err();
        assert!(matches!(err, CompileError::SwitchedLightLimit { limit: 32 }));
    }

    #[test]
    fn test_unparse_entities() {
        let mut entities = vec![
            Entity::with_pairs(&[("classname", "worldspawn"), ("message", "Arena  ")]),
            Entity::new(),
            Entity::with_pairs(&[("classname", "MISC_MODEL"), ("model", "m.md3")]),
            Entity::with_pairs(&[("classname", "func_door"), ("model", "*1")]),
        ];
        entities[1].epairs.clear();
        let text = unparse_entities(&entities);
        assert_eq!(
            text,
            concat!(
                "{\n\"classname\" \"worldspawn\"\n\"message\" \"Arena\"\n}\n",
                "{\n\"classname\" \"func_door\"\n\"model\" \"*1\"\n}\n",
            )
        );
    }
}
