//! Integration tests for full project generation

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use gowebgen::prelude::*;
use gowebgen::scaffold::project::PROJECT_DIRS;
use tempfile::TempDir;
use walkdir::WalkDir;

fn shop_config(root: &Path) -> ProjectConfig {
    ProjectConfig {
        project_name: "github.com/acme/shop".to_string(),
        project_path: root.join("shop").display().to_string(),
        db_type: "postgres".to_string(),
        db_port: TemplateHelpers::default_db_port("postgres").to_string(),
        ..ProjectConfig::default()
    }
}

/// Snapshot every file below `root` as relative path -> content
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read_to_string(entry.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_postgres_project_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = shop_config(temp_dir.path());
    let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());

    let report = ProjectGenerator::new(&config, &renderer).generate().unwrap();
    let root = report.root;

    for dir in PROJECT_DIRS {
        assert!(root.join(dir).is_dir(), "Directory should exist: {dir}");
    }

    let expected = [
        "config/config.yaml",
        "cmd/main.go",
        "internal/api/router.go",
        "internal/api/user_handler.go",
        "internal/model/user.go",
        "internal/dao/base_dao.go",
        "internal/dao/user_dao.go",
        "internal/service/base_service.go",
        "internal/service/user_service.go",
        "pkg/config/config.go",
        "pkg/database/database.go",
        "pkg/cache/redis.go",
        "pkg/logger/logger.go",
        "pkg/wire/wire.go",
        "pkg/wire/provider.go",
        "pkg/wire/registry_gen.go",
        "go.mod",
    ];
    for file in expected {
        assert!(root.join(file).is_file(), "File should exist: {file}");
    }

    let go_mod = fs::read_to_string(root.join("go.mod")).unwrap();
    assert_eq!(go_mod.lines().next(), Some("module github.com/acme/shop"));
    assert!(go_mod.contains("gorm.io/driver/postgres v1.5.4"));
    assert!(go_mod.contains("github.com/google/wire v0.5.0"));

    let yaml = fs::read_to_string(root.join("config/config.yaml")).unwrap();
    assert!(yaml.contains("type: postgres"));
    assert!(yaml.contains("port: 5432"));

    let provider = fs::read_to_string(root.join("pkg/wire/provider.go")).unwrap();
    assert!(provider.contains("var ProviderSet = wire.NewSet("));

    let wire = fs::read_to_string(root.join("pkg/wire/wire.go")).unwrap();
    assert!(wire.contains("\tRegistrySet,\n"));
    let registry = fs::read_to_string(root.join("pkg/wire/registry_gen.go")).unwrap();
    assert!(registry.contains("var RegistrySet = wire.NewSet()"));

    // 17 project files plus the seeded table templates
    let files = snapshot(&root);
    assert_eq!(files.len(), expected.len() + TemplateKey::TABLE.len());
    assert!(files.keys().all(|p| !p.to_string_lossy().contains("{{")));
}

#[test]
fn test_generated_sources_have_no_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let config = shop_config(temp_dir.path());
    let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
    let report = ProjectGenerator::new(&config, &renderer).generate().unwrap();

    for (path, content) in snapshot(&report.root) {
        if path.extension().is_some_and(|ext| ext == "hbs") {
            continue;
        }
        assert!(!content.contains("{{"), "unrendered placeholder in {}", path.display());
    }
}

#[test]
fn test_generation_is_deterministic() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());

    let first_config = shop_config(first_dir.path());
    let second_config = shop_config(second_dir.path());
    let first = ProjectGenerator::new(&first_config, &renderer).generate().unwrap();
    let second = ProjectGenerator::new(&second_config, &renderer).generate().unwrap();

    assert_eq!(snapshot(&first.root), snapshot(&second.root));
}

#[test]
fn test_project_override_template() {
    let temp_dir = TempDir::new().unwrap();
    let overrides = temp_dir.path().join("overrides");
    fs::create_dir_all(&overrides).unwrap();
    fs::write(overrides.join("go.mod.hbs"), "module {{project_name}}\n\ngo 1.22\n").unwrap();

    let config = shop_config(temp_dir.path());
    let renderer = TemplateRenderer::new(TemplateLoader::new(vec![overrides]));
    let report = ProjectGenerator::new(&config, &renderer).generate().unwrap();

    assert_eq!(
        fs::read_to_string(report.root.join("go.mod")).unwrap(),
        "module github.com/acme/shop\n\ngo 1.22\n"
    );
}

#[test]
fn test_regenerating_overwrites_but_keeps_custom_templates() {
    let temp_dir = TempDir::new().unwrap();
    let config = shop_config(temp_dir.path());
    let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
    let generator = ProjectGenerator::new(&config, &renderer);

    let report = generator.generate().unwrap();
    let custom = report.root.join("scripts/generator/templates/model.go.hbs");
    fs::write(&custom, "custom").unwrap();
    fs::write(report.root.join("cmd/main.go"), "stale").unwrap();

    let again = generator.generate().unwrap();
    assert!(again.templates.is_empty());
    assert_eq!(fs::read_to_string(&custom).unwrap(), "custom");
    assert_ne!(fs::read_to_string(report.root.join("cmd/main.go")).unwrap(), "stale");
}
