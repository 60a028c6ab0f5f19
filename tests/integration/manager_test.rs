//! Integration tests for hookfile resolution, loading and checksums.

mod helpers;

use hookfile_core::config::hooks::HooksConfig;
use hookfile_core::error::ErrorKind;
use hookfile_hooks::prelude::*;

#[tokio::test]
async fn test_override_hookfile_resolves_against_project_root() {
    let project = helpers::TestProject::new();
    let custom = project.write_project_file("tools/hooks", "custom").await;
    project
        .register(&custom, |_| {
            Ok(HookDeclarationSet::default().with_read_package(read_package_fn(
                |pkg, _| async move { Ok(pkg) },
            )))
        })
        .await;

    let config = HooksConfig {
        hookfile: Some("tools/hooks".to_string()),
        ..HooksConfig::default()
    };
    let cooked = project
        .manager()
        .require_hooks(project.root(), &config)
        .await
        .unwrap();

    assert_eq!(cooked.read_package().len(), 1);
    assert_eq!(
        cooked.read_package()[0].context().origin(),
        custom.display().to_string()
    );
    assert_eq!(cooked.checksum_provider().unwrap().path(), custom.as_path());
}

#[tokio::test]
async fn test_default_hookfile_is_not_read_when_overridden() {
    let project = helpers::TestProject::new();
    project.write_project_file(".hookfile", "default").await;

    let config = HooksConfig {
        hookfile: Some("missing/hooks".to_string()),
        ..HooksConfig::default()
    };
    let err = project
        .manager()
        .require_hooks(project.root(), &config)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains("missing/hooks"));
}

#[tokio::test]
async fn test_missing_global_hookfile_is_fatal() {
    let project = helpers::TestProject::new();
    let config = HooksConfig {
        global_hookfile: Some(
            project
                .system
                .path()
                .join("absent")
                .display()
                .to_string(),
        ),
        ..HooksConfig::default()
    };

    let err = project
        .manager()
        .require_hooks(project.root(), &config)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_failing_hookfile_reports_its_path() {
    let project = helpers::TestProject::new();
    let local = project.write_project_file(".hookfile", "broken").await;
    project
        .register(&local, |_| Err(AppError::internal("syntax error on line 3")))
        .await;

    let err = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Plugin);
    assert!(err.message.contains(&local.display().to_string()));
    assert!(err.message.contains("syntax error on line 3"));
}

#[tokio::test]
async fn test_factory_receives_project_root() {
    let project = helpers::TestProject::new();
    let local = project.write_project_file(".hookfile", "project").await;
    let expected = project.root().to_path_buf();
    project
        .register(&local, move |root| {
            assert_eq!(root, expected.as_path());
            Ok(HookDeclarationSet::default())
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();
    assert!(cooked.checksum_provider().is_some());
}

#[tokio::test]
async fn test_ignore_hookfile_keeps_global_hooks() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    let local = project.write_project_file(".hookfile", "project").await;
    for path in [&global, &local] {
        project
            .register(path, |_| {
                Ok(HookDeclarationSet::default()
                    .with_filter_log(filter_log_fn(|_, _| true)))
            })
            .await;
    }

    let config = HooksConfig {
        global_hookfile: Some(global.display().to_string()),
        hookfile: None,
        ignore_hookfile: true,
    };
    let cooked = project
        .manager()
        .require_hooks(project.root(), &config)
        .await
        .unwrap();

    assert_eq!(cooked.filter_log().len(), 1);
    assert!(cooked.checksum_provider().is_none());
}

#[tokio::test]
async fn test_checksum_follows_hookfile_contents() {
    let project = helpers::TestProject::new();
    let local = project
        .write_project_file(".hookfile", "module.exports = {}\n")
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();

    let first = cooked.calculate_checksum().await.unwrap().unwrap();
    assert_eq!(first.len(), 64);
    assert_eq!(cooked.calculate_checksum().await.unwrap().unwrap(), first);

    tokio::fs::write(&local, "module.exports = { hooks: {} }\n")
        .await
        .unwrap();
    let second = cooked.calculate_checksum().await.unwrap().unwrap();
    assert_ne!(first, second);

    tokio::fs::write(&local, "module.exports = {}\r\n").await.unwrap();
    assert_eq!(cooked.calculate_checksum().await.unwrap().unwrap(), first);
}

#[tokio::test]
async fn test_checksum_reports_deleted_hookfile() {
    let project = helpers::TestProject::new();
    let local = project.write_project_file(".hookfile", "project").await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();
    tokio::fs::remove_file(&local).await.unwrap();

    let err = cooked.calculate_checksum().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Storage);
}

#[tokio::test]
async fn test_summary_lists_hooks_with_origins() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    let local = project.write_project_file(".hookfile", "project").await;
    project
        .register(&global, |_| {
            Ok(HookDeclarationSet::default()
                .with_read_package(read_package_fn(|pkg, _| async move { Ok(pkg) }))
                .with_import_package(import_package_fn(|_, _| async { Ok(None) })))
        })
        .await;
    project
        .register(&local, |_| {
            Ok(HookDeclarationSet::default()
                .with_read_package(read_package_fn(|pkg, _| async move { Ok(pkg) })))
        })
        .await;

    let config = HooksConfig {
        global_hookfile: Some(global.display().to_string()),
        ..HooksConfig::default()
    };
    let cooked = project
        .manager()
        .require_hooks(project.root(), &config)
        .await
        .unwrap();

    let summary = cooked.summary();
    let rows: Vec<(HookCategory, Option<String>)> = summary
        .iter()
        .map(|row| (row.hook, row.from.clone()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (HookCategory::ReadPackage, Some(global.display().to_string())),
            (HookCategory::ReadPackage, Some(local.display().to_string())),
            (HookCategory::ImportPackage, None),
        ]
    );
}
