/*!
 * Common test utilities for the sion-tools test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Routes library logging to the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    init_test_logging();
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample mesh with one submesh and shared geometry
pub const SAMPLE_MESH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mesh>
    <sharedgeometry vertexcount="1">
        <vertexbuffer positions="true">
            <vertex>
                <position x="0.5" y="0.25" z="0"/>
            </vertex>
        </vertexbuffer>
    </sharedgeometry>
    <submeshes>
        <submesh material="Hero" usesharedvertices="false">
            <faces count="1">
                <face v1="0" v2="1" v3="2"/>
            </faces>
            <geometry vertexcount="3">
                <vertexbuffer positions="true" normals="true">
                    <vertex>
                        <position x="1.0" y="2.0" z="-3.0"/>
                        <normal x="0" y="1" z="0"/>
                    </vertex>
                    <vertex>
                        <position x="-0.1" y="10" z="7.5"/>
                        <normal x="0" y="1" z="0"/>
                    </vertex>
                    <vertex>
                        <position x="100" y="0" z="-42.125"/>
                        <normal x="0" y="1" z="0"/>
                    </vertex>
                </vertexbuffer>
            </geometry>
        </submesh>
    </submeshes>
</mesh>
"#;

/// Sample skeleton with two bones and one animation track
pub const SAMPLE_SKELETON: &str = r#"<skeleton>
    <bones>
        <bone id="0" name="root">
            <position x="0" y="1.5" z="0"/>
            <rotation angle="0">
                <axis x="1" y="0" z="0"/>
            </rotation>
        </bone>
        <bone id="1" name="spine">
            <position x="0.25" y="2" z="-1"/>
            <rotation angle="1.57">
                <axis x="0" y="1" z="0"/>
            </rotation>
        </bone>
    </bones>
    <bonehierarchy>
        <boneparent bone="spine" parent="root"/>
    </bonehierarchy>
    <animations>
        <animation name="Walk" length="1">
            <tracks>
                <track bone="spine">
                    <keyframes>
                        <keyframe time="0">
                            <translate x="0" y="0" z="0"/>
                            <rotate angle="0">
                                <axis x="1" y="0" z="0"/>
                            </rotate>
                        </keyframe>
                        <keyframe time="0.5">
                            <translate x="1" y="-2" z="0.5"/>
                            <rotate angle="0">
                                <axis x="1" y="0" z="0"/>
                            </rotate>
                        </keyframe>
                    </keyframes>
                </track>
            </tracks>
        </animation>
    </animations>
</skeleton>
"#;

/// Builds a MyGUI layout with one button per caption value
pub fn layout_with_captions(captions: &[&str]) -> String {
    let mut layout = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<MyGUI type=\"Layout\">\n    <Widget type=\"Window\" name=\"root\">\n");
    for (index, caption) in captions.iter().enumerate() {
        layout.push_str(&format!(
            "        <Widget type=\"Button\" name=\"button{}\">\n            <Property key=\"Caption\" value=\"{}\"/>\n            <Property key=\"FontName\" value=\"Default\"/>\n        </Widget>\n",
            index, caption
        ));
    }
    layout.push_str("    </Widget>\n</MyGUI>\n");
    layout
}

/// Collects (x, y, z) of every element with the given name, in document order
pub fn coordinates_of(document: &str, element: &str) -> Vec<(f64, f64, f64)> {
    let marker = format!("<{} ", element);
    document
        .split(&marker)
        .skip(1)
        .map(|rest| {
            let attrs = &rest[..rest.find('>').unwrap()];
            (attr(attrs, "x"), attr(attrs, "y"), attr(attrs, "z"))
        })
        .collect()
}

fn attr(attrs: &str, name: &str) -> f64 {
    let key = format!(" {}=\"", name);
    let padded = format!(" {}", attrs);
    let start = padded.find(&key).unwrap() + key.len();
    let end = start + padded[start..].find('"').unwrap();
    padded[start..end].trim().parse().unwrap()
}

/// Asserts two coordinate lists are equal within floating-point tolerance
pub fn assert_coordinates_close(actual: &[(f64, f64, f64)], expected: &[(f64, f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "coordinate count differs");
    for (a, e) in actual.iter().zip(expected) {
        for (x, y) in [(a.0, e.0), (a.1, e.1), (a.2, e.2)] {
            assert!((x - y).abs() <= 1e-9 * y.abs().max(1.0), "{:?} != {:?}", a, e);
        }
    }
}
