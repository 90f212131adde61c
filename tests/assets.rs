use std::fs;
use std::path::{Path, PathBuf};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn lesson_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("static").join(name)
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    assert!(bytes.starts_with(&PNG_SIGNATURE), "{} is not a PNG", path.display());
}

/// Values of every `data-tex-srcN="..."` attribute in a page.
fn texture_sources(html: &str) -> Vec<String> {
    html.split("data-tex-src")
        .skip(1)
        .filter_map(|rest| rest.split('"').nth(1))
        .map(str::to_string)
        .collect()
}

#[test]
fn point_cloud_image_ships() {
    assert_png(&lesson_dir("lesson001").join("cat03.png"));
}

#[test]
fn gallery_textures_ship() {
    let dir = lesson_dir("lesson002");
    let html = fs::read_to_string(dir.join("index.html")).unwrap();
    let sources = texture_sources(&html);

    // two textures per plane
    assert!(!sources.is_empty());
    assert_eq!(sources.len() % 2, 0);
    for src in sources {
        assert_png(&dir.join(&src));
    }
}

#[test]
fn every_lesson_has_its_shaders() {
    for lesson in ["lesson001", "lesson002", "lesson003"] {
        let dir = lesson_dir(lesson);
        for file in ["index.html", "main.vert", "main.frag"] {
            assert!(dir.join(file).is_file(), "{lesson}/{file} missing");
        }
    }
}
