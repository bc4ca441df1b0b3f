use std::io::{Cursor, Read};

use byteorder::{ReadBytesExt, LE};

use bsp_emit::bsp::{
    compile, BspNode, BspSink, IbspWriter, LeafData, NodeRef, IBSP_IDENT, IBSP_VERSION,
};
use bsp_emit::config::EmitConfig;
use bsp_emit::document::Document;
use bsp_emit::map::{Brush, Entity, LogicalFog, PatchMesh, Side};
use bsp_emit::utils::{BoundingBox, Plane, Point3D};

fn cube(min: f32, max: f32, shader: &str) -> Brush {
    Brush::new(
        shader,
        (0..6).map(|i| Side::with_shader(i * 2, shader)).collect(),
        BoundingBox::new(Point3D::new(min, min, min), Point3D::new(max, max, max)),
    )
}

fn sample_document() -> Document {
    let mut doc = Document::new();
    for i in 0..6 {
        let axis = i / 2;
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        let normal = match axis {
            0 => Point3D::new(sign, 0.0, 0.0),
            1 => Point3D::new(0.0, sign, 0.0),
            _ => Point3D::new(0.0, 0.0, sign),
        };
        doc.add_plane(Plane::new(normal, 64.0 * sign));
        doc.add_plane(Plane::new(
            Point3D::new(-normal.x, -normal.y, -normal.z),
            -64.0 * sign,
        ));
    }

    let b0 = doc.add_brush(cube(-64.0, 0.0, "textures/base/wall"));
    let b1 = doc.add_brush(cube(0.0, 64.0, "textures/base/floor"));
    let door = doc.add_brush(cube(64.0, 96.0, "textures/base/door"));

    let mut world = Entity::with_pairs(&[("classname", "worldspawn")]);
    world.brushes = vec![b0, b1];
    world.draw_surfaces = 4;
    world.tree = Some(BspNode::create_node(
        0,
        BspNode::create_leaf(
            BoundingBox::new(Point3D::new(-64.0, -64.0, -64.0), Point3D::new(0.0, 64.0, 64.0)),
            LeafData {
                brushes: vec![b0],
                draw_surfaces: vec![0, 1],
                ..LeafData::default()
            },
        ),
        BspNode::create_leaf(
            BoundingBox::new(Point3D::new(0.0, -64.0, -64.0), Point3D::new(64.0, 64.0, 64.0)),
            LeafData {
                cluster: 1,
                brushes: vec![b1],
                draw_surfaces: vec![2, 3],
                ..LeafData::default()
            },
        ),
        BoundingBox::new(Point3D::new(-64.0, -64.0, -64.0), Point3D::new(64.0, 64.0, 64.0)),
    ));
    doc.add_entity(world);

    let mut func = Entity::with_pairs(&[("classname", "func_door")]);
    func.brushes = vec![door];
    func.draw_surfaces = 6;
    doc.add_entity(func);

    doc.add_entity(Entity::with_pairs(&[("classname", "info_player_start")]));

    let mut curve = Entity::with_pairs(&[("classname", "func_group")]);
    curve.patches.push(PatchMesh::new(
        1,
        2,
        vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(16.0, 16.0, 16.0)],
    ));
    doc.add_entity(curve);

    doc.add_entity(Entity::with_pairs(&[("classname", "light"), ("light", "300")]));
    doc.add_entity(Entity::with_pairs(&[
        ("classname", "light"),
        ("targetname", "alarm"),
        ("style", "6"),
    ]));

    doc.fogs.push(LogicalFog::global("textures/fog/haze"));
    doc
}

fn write_to_vec(doc: &mut Document) -> Vec<u8> {
    let mut writer = IbspWriter::new(Cursor::new(Vec::new()));
    compile(doc, EmitConfig::default(), Some(&mut writer as &mut dyn BspSink)).unwrap();
    writer.into_inner().into_inner()
}

#[test]
fn test_two_leaf_world() {
    let mut doc = sample_document();
    let ctx = compile(&mut doc, EmitConfig::default(), None).unwrap();

    let world_root = &ctx.nodes[0];
    assert_eq!(world_root.plane_num, 0);
    assert_eq!(world_root.children, [NodeRef::Leaf(1), NodeRef::Leaf(2)]);
    assert_eq!(world_root.children.map(NodeRef::to_signed), [-2, -3]);

    assert_eq!(ctx.leafs[1].num_leaf_brushes, 1);
    assert_eq!(ctx.leafs[2].num_leaf_brushes, 1);
    assert_eq!(ctx.leafs[2].cluster, 1);
    assert_eq!(ctx.leaf_brushes.as_slice(), &[0, 1]);
    assert_eq!(ctx.leaf_surfaces.as_slice(), &[0, 1, 2, 3]);

    // World, door, curve.
    assert_eq!(ctx.models.len(), 3);
    assert_eq!(ctx.models[0].num_brushes, 2);
    assert_eq!((ctx.models[1].first_surface, ctx.models[1].num_surfaces), (4, 6));
    assert_eq!(ctx.models[2].num_brushes, 0);
    assert_eq!(ctx.planes.len(), 12);
    assert_eq!(ctx.draw_indexes.as_slice()[..6], [0, 1, 2, 0, 2, 3]);
}

#[test]
fn test_entity_keys_written_back() {
    let mut doc = sample_document();
    let ctx = compile(&mut doc, EmitConfig::default(), None).unwrap();

    assert_eq!(doc.entities[1].value_for_key("model"), Some("*1"));
    assert_eq!(doc.entities[2].value_for_key("model"), None);
    assert_eq!(doc.entities[3].value_for_key("model"), Some("*2"));

    assert_eq!(ctx.num_stripped_lights, 1);
    assert!(doc.entities[4].epairs.is_empty());
    assert_eq!(doc.entities[5].value_for_key("style"), Some("32"));
    assert_eq!(doc.entities[5].value_for_key("switch_style"), Some("6"));

    assert!(!ctx.entity_data.contains("\"light\" \"300\""));
    assert!(ctx.entity_data.contains("\"switch_style\" \"6\""));
}

#[test]
fn test_keep_lights_flag() {
    let mut doc = sample_document();
    let config = EmitConfig {
        keep_lights: true,
        ..EmitConfig::default()
    };
    let ctx = compile(&mut doc, config, None).unwrap();
    assert_eq!(ctx.num_stripped_lights, 0);
    assert!(ctx.entity_data.contains("\"light\" \"300\""));
}

#[test]
fn test_output_is_deterministic() {
    let first = write_to_vec(&mut sample_document());
    let second = write_to_vec(&mut sample_document());
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_ibsp_header() {
    let data = write_to_vec(&mut sample_document());
    let mut cursor = Cursor::new(&data);

    let mut ident = [0u8; 4];
    cursor.read_exact(&mut ident).unwrap();
    assert_eq!(&ident, IBSP_IDENT);
    assert_eq!(cursor.read_i32::<LE>().unwrap(), IBSP_VERSION);

    let mut lumps = Vec::new();
    for _ in 0..17 {
        let offset = cursor.read_i32::<LE>().unwrap();
        let length = cursor.read_i32::<LE>().unwrap();
        lumps.push((offset as usize, length as usize));
    }

    // Entity text is NUL terminated.
    let (offset, length) = lumps[0];
    assert_eq!(data[offset + length - 1], 0);
    assert!(data[offset..].starts_with(b"{\n\"classname\" \"worldspawn\""));

    // Three models at 40 bytes each.
    assert_eq!(lumps[7].1, 3 * 40);
    // One global fog, brush and side both -1.
    let (offset, length) = lumps[12];
    assert_eq!(length, 72);
    let mut fog = Cursor::new(&data[offset + 64..offset + 72]);
    assert_eq!(fog.read_i32::<LE>().unwrap(), -1);
    assert_eq!(fog.read_i32::<LE>().unwrap(), -1);

    for (offset, length) in &lumps {
        assert!(offset + length <= data.len());
    }
}
