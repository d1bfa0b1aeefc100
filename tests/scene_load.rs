use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;

use radiance::{
    parse::{MeshLoader, ObjLoader},
    scene::{TextureType, TransformSpec},
    Matrix4x4, ParserConfig, SceneError, SceneParser, Vector, Vector4,
};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn box_scene() {
    let tables = SceneParser::new(ParserConfig::default())
        .parse_file(data_path("box_scene.xml"))
        .unwrap();

    // Camera
    assert_eq!(tables.camera.position, Vector::new(0.0, 0.0, -10.0));
    assert_eq!(tables.camera.direction, Vector::new(0.0, 0.0, 1.0));
    assert_eq!(tables.camera.target(), Vector::new(0.0, 0.0, 130.0));

    // The one object
    assert_eq!(tables.render_items.len(), 1);
    let item = tables.render_item("Box").unwrap();
    assert_eq!(item.obj_idx, 0);
    assert_eq!(item.mat_idx, 0);
    assert_eq!(item.material_name.as_deref(), Some("Red"));
    let geo = item.geometry.unwrap();
    assert_eq!(geo.vertices.offset_bytes, 0);
    assert_eq!(geo.vertices.count, 4);
    assert_eq!(geo.indices.offset_bytes, 0);
    assert_eq!(geo.indices.count, 6);
    assert_eq!(geo.normals, None);
    assert_eq!(geo.texcoords, None);
    assert!(item
        .transform()
        .aprx_eq(Matrix4x4::from_translation(Vector::new(0.0, 0.0, 5.0)), 0.000001));

    // Materials
    assert_eq!(tables.materials.len(), 1);
    let red = tables.material("Red").unwrap();
    assert_eq!(red.albedo, Vector4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(tables.material_records()[0].albedo, [1.0, 0.0, 0.0, 1.0]);

    // Lights
    assert_eq!(tables.lights.len(), 1);
    assert_eq!(tables.lights[0].normal(), Vector::new(0.0, -1.0, 0.0));
    assert_eq!(tables.lights[0].emission, Vector::splat(10.0));

    // Shared buffers
    assert_eq!(tables.buffers.vertices.len(), 12);
    assert_eq!(tables.buffers.indices.len(), 6);
    assert_eq!(tables.buffers.normal_indices, vec![-1; 6]);
    assert_eq!(tables.buffers.texcoord_indices, vec![-1; 6]);
    for &i in tables.buffers.indices.iter() {
        assert!(i < 4);
    }
}

#[test]
fn gallery_scene() {
    let tables = SceneParser::new(ParserConfig::default())
        .parse_file(data_path("gallery_scene.xml"))
        .unwrap();

    // Objects come out in document order.
    let names: Vec<_> = tables
        .render_items_ordered()
        .iter()
        .map(|item| item.name.clone())
        .collect();
    assert_eq!(names, vec!["Floor", "LeftPanel", "RightPanel", "Statues"]);

    // Three distinct meshes, box.obj shared by both panels.
    assert_eq!(tables.geometries.len(), 3);
    let left = tables.render_item("LeftPanel").unwrap();
    let right = tables.render_item("RightPanel").unwrap();
    assert_eq!(left.geometry, right.geometry);

    // Both panels name material "Red", so the first definition wins.
    assert_eq!(left.mat_idx, right.mat_idx);
    assert_eq!(
        tables.material("Red").unwrap().albedo,
        Vector4::new(1.0, 0.0, 0.0, 1.0)
    );
    assert_eq!(tables.materials.len(), 3);

    // The explicit matrix and the composed transform agree.
    assert!(matches!(left.transform_spec(), TransformSpec::Explicit(_)));
    assert_eq!(left.transform().translation(), Vector::new(-3.0, 1.0, 0.0));
    assert_eq!(right.transform().translation(), Vector::new(3.0, 1.0, 0.0));

    // Textures are keyed by name: Marble reuses the "stone_diffuse" entry.
    assert_eq!(tables.textures.len(), 2);
    let marble = tables.material("Marble").unwrap();
    assert_eq!(marble.diffuse_map.as_ref().unwrap().texture_idx, 0);
    let stone_d = &tables.textures["stone_diffuse"];
    assert_eq!(stone_d.path, "textures/stone.png");
    assert_eq!(stone_d.texture_type, TextureType::Diffuse);
    assert_eq!(stone_d.resolved_path, data_path("textures/stone.png"));
    assert_eq!(tables.textures["stone_normal"].texture_type, TextureType::Normal);

    // The floor quad carries normals and texture coordinates.
    let floor = tables.render_item("Floor").unwrap();
    let floor_geo = floor.geometry.unwrap();
    assert_eq!(floor_geo.normals.unwrap().count, 1);
    assert_eq!(floor_geo.texcoords.unwrap().count, 4);
    let records = tables.instance_records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].normal_offset, 0);
    assert_eq!(records[0].texcoord_offset, 0);
    assert_eq!(records[1].normal_offset, -1);
    assert_eq!(records[1].vertex_offset, 4);
    assert_eq!(records[1].index_offset, 6);
    assert_eq!(records[1].vertex_offset, records[2].vertex_offset);

    // Rotating -90 degrees about x lays the quad flat, then scale by 10.
    let corner = Vector::new(1.0, 1.0, 0.0) * floor.transform();
    assert_abs_diff_eq!(corner.x(), 10.0, epsilon = 0.0001);
    assert_abs_diff_eq!(corner.y(), 0.0, epsilon = 0.0001);
    assert_abs_diff_eq!(corner.z(), -10.0, epsilon = 0.0001);

    // Index streams always line up.
    assert_eq!(tables.buffers.indices.len(), 18);
    assert_eq!(tables.buffers.normal_indices.len(), 18);
    assert_eq!(tables.buffers.texcoord_indices.len(), 18);

    assert_eq!(tables.lights.len(), 2);
    assert_eq!(tables.light_records()[1].normal, [1.0, 0.0, 0.0]);
}

#[test]
fn obj_loader_keeps_separate_index_streams() {
    let mesh = ObjLoader.load(&data_path("textured_quad.obj")).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.normals.len(), 3);
    assert_eq!(mesh.texcoords.len(), 8);
    assert_eq!(mesh.indices.len(), 6);
    assert_eq!(mesh.normal_indices, vec![0; 6]);
    assert_eq!(mesh.texcoord_indices.len(), 6);
    for (&v, &t) in mesh.indices.iter().zip(mesh.texcoord_indices.iter()) {
        assert_eq!(v as i32, t);
    }
}

#[test]
fn obj_loader_merges_shapes() {
    let mesh = ObjLoader.load(&data_path("two_shapes.obj")).unwrap();

    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(mesh.normal_indices, vec![-1; 6]);
}

#[test]
fn missing_material_library_is_an_error() {
    match ObjLoader.load(&data_path("missing_mtl.obj")) {
        Err(SceneError::Mesh(path, _)) => assert_eq!(path, data_path("missing_mtl.obj")),
        other => panic!("expected a mesh error, got {:?}", other),
    }
}

#[test]
fn missing_mesh_file() {
    let result = SceneParser::new(ParserConfig {
        base_dir: Some(data_path("")),
        ..ParserConfig::default()
    })
    .parse_str(
        r#"<scene><object name="Ghost"><Mesh><geometry>nowhere.obj</geometry></Mesh></object></scene>"#,
    );

    match result {
        Err(SceneError::Mesh(path, _)) => assert!(path.ends_with("nowhere.obj")),
        other => panic!("expected a mesh error, got {:?}", other),
    }
}

#[test]
fn missing_scene_file() {
    let result = SceneParser::new(ParserConfig::default()).parse_file(data_path("nowhere.xml"));
    match result {
        Err(SceneError::Io(..)) => {}
        other => panic!("expected an IO error, got {:?}", other),
    }
}

#[test]
fn editing_after_load() {
    let mut tables = SceneParser::new(ParserConfig {
        frames_in_flight: 2,
        ..ParserConfig::default()
    })
    .parse_file(data_path("box_scene.xml"))
    .unwrap();

    let item = tables.render_item_mut("Box").unwrap();
    assert!(item.consume_update());
    assert!(item.consume_update());
    assert!(!item.consume_update());

    assert!(item.set_scale(Vector::splat(2.0), 2));
    assert!(item.dirty.is_dirty());
    let p = Vector::new(1.0, 0.0, 0.0) * item.transform();
    assert!(p.aprx_eq(Vector::new(2.0, 0.0, 10.0), 0.00001));

    let red = tables.material_mut("Red").unwrap();
    red.albedo = Vector4::new(0.5, 0.0, 0.0, 1.0);
    red.mark_dirty(2);
    assert_eq!(tables.material_records()[0].albedo, [0.5, 0.0, 0.0, 1.0]);
}
