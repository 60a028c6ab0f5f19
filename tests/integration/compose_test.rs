//! Integration tests for hook composition through the manager.

mod helpers;

use std::sync::{Arc, Mutex};

use hookfile_core::config::hooks::HooksConfig;
use hookfile_hooks::hooks::{HookLogLevel, HookScope};
use hookfile_hooks::prelude::*;

fn global_config(path: &std::path::Path) -> HooksConfig {
    HooksConfig {
        global_hookfile: Some(path.display().to_string()),
        ..HooksConfig::default()
    }
}

#[tokio::test]
async fn test_no_hookfiles_gives_canonical_empty_bundle() {
    let project = helpers::TestProject::new();

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();

    assert_eq!(cooked.read_package().len(), 0);
    assert_eq!(cooked.after_all_resolved().len(), 0);
    assert_eq!(cooked.filter_log().len(), 0);
    assert!(cooked.import_package().is_none());
    assert!(cooked.pre_resolution().is_none());
    assert!(cooked.fetchers().is_none());
    assert!(cooked.checksum_provider().is_none());
    assert_eq!(cooked.calculate_checksum().await.unwrap(), None);
}

#[tokio::test]
async fn test_global_read_package_patches_manifest() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    project
        .register(&global, |_| {
            Ok(HookDeclarationSet::default().with_read_package(read_package_fn(
                |mut pkg, _| async move {
                    pkg["patched"] = json!(true);
                    Ok(pkg)
                },
            )))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &global_config(&global))
        .await
        .unwrap();

    assert_eq!(cooked.read_package().len(), 1);
    let manifest = cooked
        .apply_read_package(json!({"name": "x"}))
        .await
        .unwrap();
    assert_eq!(manifest, json!({"name": "x", "patched": true}));
    assert!(cooked.checksum_provider().is_none());
}

#[tokio::test]
async fn test_project_output_builds_on_global_output() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    let local = project.write_project_file(".hookfile", "project").await;

    project
        .register(&global, |_| {
            Ok(HookDeclarationSet::default().with_after_all_resolved(
                after_all_resolved_fn(|mut lockfile, ctx| async move {
                    ctx.log("stamping settings");
                    lockfile["settings"] = json!({"autoInstallPeers": true});
                    Ok(lockfile)
                }),
            ))
        })
        .await;
    project
        .register(&local, |_| {
            Ok(HookDeclarationSet::default().with_after_all_resolved(
                after_all_resolved_fn(|mut lockfile, _| async move {
                    let seen = lockfile["settings"]["autoInstallPeers"].clone();
                    lockfile["sawGlobal"] = seen;
                    Ok(lockfile)
                }),
            ))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &global_config(&global))
        .await
        .unwrap();

    let scopes: Vec<HookScope> = cooked
        .after_all_resolved()
        .iter()
        .map(|entry| entry.scope())
        .collect();
    assert_eq!(scopes, vec![HookScope::Global, HookScope::Project]);

    let lockfile = cooked
        .apply_after_all_resolved(json!({"lockfileVersion": "9.0"}))
        .await
        .unwrap();
    assert_eq!(lockfile["sawGlobal"], json!(true));

    let records = project.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, HookLogLevel::Debug);
    assert_eq!(records[0].hook, HookCategory::AfterAllResolved);
    assert_eq!(records[0].from, Some(global.display().to_string()));
    assert_eq!(records[0].prefix, project.root().display().to_string());
}

#[tokio::test]
async fn test_project_hookfile_cannot_replace_install_mechanics() {
    let project = helpers::TestProject::new();
    let local = project.write_project_file(".hookfile", "project").await;
    project
        .register(&local, |_| {
            Ok(HookDeclarationSet::default()
                .with_import_package(import_package_fn(|_, _| async {
                    Ok(Some("hardlink".to_string()))
                }))
                .with_pre_resolution(pre_resolution_fn(|_, _| async { Ok(()) }))
                .with_fetchers(CustomFetchers::new().with(
                    FetcherKind::Git,
                    fetcher_fn(|_| async { Ok(FetchResult::default()) }),
                )))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();

    assert!(cooked.import_package().is_none());
    assert!(cooked.pre_resolution().is_none());
    assert!(cooked.fetchers().is_none());
    assert!(cooked.checksum_provider().is_some());
}

#[tokio::test]
async fn test_global_install_mechanics_are_exposed() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    project
        .register(&global, |_| {
            Ok(HookDeclarationSet::default()
                .with_import_package(import_package_fn(|to, opts| async move {
                    assert!(opts.force);
                    Ok(Some(format!("clone:{}", to.display())))
                }))
                .with_pre_resolution(pre_resolution_fn(|ctx, logger| async move {
                    logger.info(&format!("{} registries", ctx.registries.len()));
                    Ok(())
                })))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &global_config(&global))
        .await
        .unwrap();

    let import = cooked.import_package().unwrap();
    let method = import
        .import_package(
            std::path::Path::new("/store/pkg"),
            ImportPackageOptions {
                files_map: Default::default(),
                force: true,
                resolved_from: ResolvedFrom::Store,
                keep_modules_dir: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(method.as_deref(), Some("clone:/store/pkg"));

    cooked
        .run_pre_resolution(&PreResolutionContext::default())
        .await
        .unwrap();
    let records = project.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, HookLogLevel::Info);
    assert_eq!(records[0].hook, HookCategory::PreResolution);
    assert_eq!(records[0].message, "0 registries");
    assert!(records[0].from.is_none());
}

#[tokio::test]
async fn test_filter_log_runs_both_scopes_in_order() {
    let project = helpers::TestProject::new();
    let global = project.write_global_file("global-hooks", "global").await;
    let local = project.write_project_file(".hookfile", "project").await;
    let seen = Arc::new(Mutex::new(Vec::new()));

    let g = seen.clone();
    project
        .register(&global, move |_| {
            let g = g.clone();
            Ok(HookDeclarationSet::default().with_filter_log(filter_log_fn(
                move |event, _| {
                    g.lock().unwrap().push("global");
                    event.level != LogLevel::Debug
                },
            )))
        })
        .await;
    let p = seen.clone();
    project
        .register(&local, move |_| {
            let p = p.clone();
            Ok(HookDeclarationSet::default().with_filter_log(filter_log_fn(
                move |_, _| {
                    p.lock().unwrap().push("project");
                    true
                },
            )))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &global_config(&global))
        .await
        .unwrap();

    assert_eq!(cooked.filter_log().len(), 2);
    assert!(cooked.accepts_log(&LogEvent::new("pnpm:stage", LogLevel::Info)));
    assert!(!cooked.accepts_log(&LogEvent::new("pnpm:progress", LogLevel::Debug)));
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["global", "project", "global", "project"]
    );
}

#[tokio::test]
async fn test_hook_failure_reaches_caller() {
    let project = helpers::TestProject::new();
    let local = project.write_project_file(".hookfile", "project").await;
    project
        .register(&local, |_| {
            Ok(HookDeclarationSet::default().with_read_package(read_package_fn(
                |pkg, _| async move {
                    if pkg["name"] == json!("left-pad") {
                        return Err(AppError::plugin("left-pad is banned"));
                    }
                    Ok(pkg)
                },
            )))
        })
        .await;

    let cooked = project
        .manager()
        .require_hooks(project.root(), &HooksConfig::default())
        .await
        .unwrap();

    assert!(cooked.apply_read_package(json!({"name": "lodash"})).await.is_ok());
    let err = cooked
        .apply_read_package(json!({"name": "left-pad"}))
        .await
        .unwrap_err();
    assert_eq!(err.message, "left-pad is banned");
}
